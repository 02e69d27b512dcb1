//! Notification service - per-user inbox

use chrono::Utc;
use crea_core::entities::Notification;
use crea_core::traits::PageQuery;
use crea_core::{DomainError, Snowflake};
use tracing::{info, instrument, warn};

use crate::dto::{
    CreateNotificationRequest, NotificationCountResponse, NotificationListResponse,
    NotificationResponse, PageOrder, PaginatedResponse,
};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::{non_blank, probe};

pub struct NotificationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> NotificationService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// The caller's inbox, newest first, with the unread total
    #[instrument(skip(self))]
    pub async fn list_mine(
        &self,
        user_id: Snowflake,
        unread_only: bool,
        page: PageQuery,
    ) -> ServiceResult<NotificationListResponse> {
        let rows = self
            .ctx
            .notification_repo()
            .list_for_user(user_id, unread_only, probe(page))
            .await?;
        let unread_count = self.ctx.notification_repo().unread_count(user_id).await?;

        let page = PaginatedResponse::from_rows(
            rows,
            page,
            PageOrder::NewestFirst,
            |n| n.id,
            |n| NotificationResponse::from(&n),
        );

        Ok(NotificationListResponse {
            data: page.data,
            pagination: page.pagination,
            unread_count,
        })
    }

    #[instrument(skip(self))]
    pub async fn unread_count(&self, user_id: Snowflake) -> ServiceResult<NotificationCountResponse> {
        let count = self.ctx.notification_repo().unread_count(user_id).await?;
        Ok(NotificationCountResponse {
            count: u64::try_from(count).unwrap_or_default(),
        })
    }

    /// Another user's notification reads as not found.
    #[instrument(skip(self))]
    pub async fn mark_read(&self, user_id: Snowflake, notification_id: Snowflake) -> ServiceResult<()> {
        let found = self
            .ctx
            .notification_repo()
            .mark_read(notification_id, user_id, Utc::now())
            .await?;
        if !found {
            return Err(DomainError::NotificationNotFound(notification_id).into());
        }
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn mark_all_read(&self, user_id: Snowflake) -> ServiceResult<NotificationCountResponse> {
        let count = self.ctx.notification_repo().mark_all_read(user_id, Utc::now()).await?;

        info!(user_id = %user_id, count, "Notifications marked read");
        Ok(NotificationCountResponse { count })
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, user_id: Snowflake, notification_id: Snowflake) -> ServiceResult<()> {
        if !self.ctx.notification_repo().delete(notification_id, user_id).await? {
            return Err(DomainError::NotificationNotFound(notification_id).into());
        }
        Ok(())
    }

    /// Send to one user, or broadcast to every active account when no
    /// recipient is named.
    #[instrument(skip(self, request), fields(title = %request.title))]
    pub async fn create(&self, request: CreateNotificationRequest) -> ServiceResult<NotificationCountResponse> {
        let title = request.title.trim().to_string();
        let link = non_blank(request.link);

        let count = match request.user_id {
            Some(user_id) => {
                if self.ctx.user_repo().find_by_id(user_id).await?.is_none() {
                    return Err(DomainError::UserNotFound(user_id).into());
                }
                let notification = Notification::new(self.ctx.generate_id(), user_id, title, request.message)
                    .with_link(link);
                self.ctx.notification_repo().create(&notification).await?;
                1
            }
            None => {
                let recipients = self.ctx.user_repo().active_ids().await?;
                let batch: Vec<Notification> = recipients
                    .into_iter()
                    .map(|user_id| {
                        Notification::new(self.ctx.generate_id(), user_id, title.clone(), request.message.clone())
                            .with_link(link.clone())
                    })
                    .collect();
                self.ctx.notification_repo().create_many(&batch).await?
            }
        };

        info!(count, broadcast = request.user_id.is_none(), "Notifications sent");
        Ok(NotificationCountResponse { count })
    }

    /// Best-effort notice from another workflow; failures are logged only.
    pub(crate) async fn notify_quietly(
        &self,
        user_id: Snowflake,
        title: &str,
        message: String,
        link: Option<String>,
    ) {
        let notification = Notification::new(self.ctx.generate_id(), user_id, title.to_string(), message)
            .with_link(link);
        if let Err(e) = self.ctx.notification_repo().create(&notification).await {
            warn!(user_id = %user_id, error = %e, "Notification not stored");
        }
    }
}

//! Event service

use chrono::Utc;
use crea_core::entities::{Event, EventWindow};
use crea_core::traits::PageQuery;
use crea_core::{DomainError, Snowflake};
use tracing::{info, instrument};

use crate::dto::{CreateEventRequest, EventResponse, PageOrder, PaginatedResponse, UpdateEventRequest};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::{non_blank, probe};

pub struct EventService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> EventService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    async fn load(&self, event_id: Snowflake) -> ServiceResult<Event> {
        self.ctx
            .event_repo()
            .find_by_id(event_id)
            .await?
            .ok_or_else(|| DomainError::EventNotFound(event_id).into())
    }

    #[instrument(skip(self))]
    pub async fn list_events(&self, window: EventWindow, page: PageQuery) -> ServiceResult<PaginatedResponse<EventResponse>> {
        let rows = self.ctx.event_repo().list(window, Utc::now(), probe(page)).await?;
        Ok(PaginatedResponse::from_rows(
            rows,
            page,
            PageOrder::NewestFirst,
            |e| e.id,
            |e| EventResponse::from(&e),
        ))
    }

    #[instrument(skip(self))]
    pub async fn get_event(&self, event_id: Snowflake) -> ServiceResult<EventResponse> {
        let event = self.load(event_id).await?;
        Ok(EventResponse::from(&event))
    }

    #[instrument(skip(self, request), fields(title = %request.title))]
    pub async fn create_event(&self, author_id: Snowflake, request: CreateEventRequest) -> ServiceResult<EventResponse> {
        let mut event = Event::new(
            self.ctx.generate_id(),
            request.title.trim().to_string(),
            request.description,
            request.starts_at,
            request.ends_at,
            author_id,
        )?;
        event.location = non_blank(request.location);
        event.image_url = non_blank(request.image_url);

        self.ctx.event_repo().create(&event).await?;

        info!(event_id = %event.id, "Event created");
        Ok(EventResponse::from(&event))
    }

    #[instrument(skip(self, request))]
    pub async fn update_event(&self, event_id: Snowflake, request: UpdateEventRequest) -> ServiceResult<EventResponse> {
        let mut event = self.load(event_id).await?;

        if let Some(title) = request.title {
            event.title = title.trim().to_string();
        }
        if let Some(description) = request.description {
            event.description = description;
        }
        if let Some(location) = request.location {
            event.location = non_blank(location);
        }
        if let Some(image_url) = request.image_url {
            event.image_url = non_blank(image_url);
        }
        if request.starts_at.is_some() || request.ends_at.is_some() {
            let starts_at = request.starts_at.unwrap_or(event.starts_at);
            let ends_at = request.ends_at.unwrap_or(event.ends_at);
            event.reschedule(starts_at, ends_at)?;
        }
        event.updated_at = Utc::now();

        self.ctx.event_repo().update(&event).await?;

        info!(event_id = %event_id, "Event updated");
        Ok(EventResponse::from(&event))
    }

    #[instrument(skip(self))]
    pub async fn delete_event(&self, event_id: Snowflake) -> ServiceResult<()> {
        self.load(event_id).await?;
        self.ctx.event_repo().delete(event_id).await?;

        info!(event_id = %event_id, "Event deleted");
        Ok(())
    }
}

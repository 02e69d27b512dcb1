//! Forum service - topics and replies
//!
//! Authors manage their own topics and posts; administrators manage all of
//! them and alone may pin or lock a topic.

use chrono::Utc;
use crea_core::entities::{ForumPost, ForumTopic};
use crea_core::traits::PageQuery;
use crea_core::{DomainError, Snowflake};
use tracing::{info, instrument};

use crate::dto::{
    CreatePostRequest, CreateTopicRequest, PageOrder, PaginatedResponse, PostResponse,
    TopicListResponse, TopicResponse, UpdatePostRequest, UpdateTopicRequest,
};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::{non_blank, probe};

/// Who is acting on a topic or post
#[derive(Debug, Clone, Copy)]
pub struct Actor {
    pub user_id: Snowflake,
    pub is_admin: bool,
}

pub struct ForumService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ForumService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    async fn load_topic(&self, topic_id: Snowflake) -> ServiceResult<ForumTopic> {
        self.ctx
            .forum_topic_repo()
            .find_by_id(topic_id)
            .await?
            .ok_or_else(|| DomainError::TopicNotFound(topic_id).into())
    }

    async fn load_post(&self, post_id: Snowflake) -> ServiceResult<ForumPost> {
        self.ctx
            .forum_post_repo()
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| DomainError::PostNotFound(post_id).into())
    }

    // ========================================================================
    // Topics
    // ========================================================================

    /// Pinned topics head the first page only; the rest page by latest activity.
    #[instrument(skip(self))]
    pub async fn list_topics(&self, category: Option<&str>, page: PageQuery) -> ServiceResult<TopicListResponse> {
        let first_page = page.before.is_none() && page.after.is_none();
        let pinned = if first_page {
            self.ctx.forum_topic_repo().list_pinned(category).await?
        } else {
            Vec::new()
        };

        let rows = self.ctx.forum_topic_repo().list(category, probe(page)).await?;
        let unpinned = PaginatedResponse::from_rows(
            rows,
            page,
            PageOrder::NewestFirst,
            |t| t.id,
            |t| TopicResponse::from(&t),
        );

        Ok(TopicListResponse {
            pinned: pinned.iter().map(TopicResponse::from).collect(),
            data: unpinned.data,
            pagination: unpinned.pagination,
        })
    }

    /// A topic with its author's display name
    #[instrument(skip(self))]
    pub async fn get_topic(&self, topic_id: Snowflake) -> ServiceResult<TopicResponse> {
        let topic = self.load_topic(topic_id).await?;
        let author_name = self
            .ctx
            .user_repo()
            .find_by_id(topic.author_id)
            .await?
            .map(|user| user.name);

        Ok(TopicResponse::from(&topic).with_author_name(author_name))
    }

    #[instrument(skip(self, request), fields(title = %request.title))]
    pub async fn create_topic(&self, author_id: Snowflake, request: CreateTopicRequest) -> ServiceResult<TopicResponse> {
        let mut topic = ForumTopic::new(
            self.ctx.generate_id(),
            request.title.trim().to_string(),
            request.body,
            author_id,
        );
        topic.category = non_blank(request.category);

        self.ctx.forum_topic_repo().create(&topic).await?;

        info!(topic_id = %topic.id, author_id = %author_id, "Topic created");
        Ok(TopicResponse::from(&topic))
    }

    #[instrument(skip(self, request))]
    pub async fn update_topic(
        &self,
        actor: Actor,
        topic_id: Snowflake,
        request: UpdateTopicRequest,
    ) -> ServiceResult<TopicResponse> {
        let mut topic = self.load_topic(topic_id).await?;
        topic.ensure_editable_by(actor.user_id, actor.is_admin)?;

        let moderates = request.is_pinned.is_some() || request.is_locked.is_some();
        if moderates && !actor.is_admin {
            return Err(DomainError::AdminRequired.into());
        }

        if let Some(title) = request.title {
            topic.title = title.trim().to_string();
        }
        if let Some(body) = request.body {
            topic.body = body;
        }
        if let Some(category) = request.category {
            topic.category = non_blank(category);
        }
        if let Some(is_pinned) = request.is_pinned {
            topic.is_pinned = is_pinned;
        }
        if let Some(is_locked) = request.is_locked {
            topic.is_locked = is_locked;
        }
        topic.updated_at = Utc::now();

        self.ctx.forum_topic_repo().update(&topic).await?;

        info!(topic_id = %topic_id, actor_id = %actor.user_id, "Topic updated");
        Ok(TopicResponse::from(&topic))
    }

    /// Remove a topic and all its posts
    #[instrument(skip(self))]
    pub async fn delete_topic(&self, actor: Actor, topic_id: Snowflake) -> ServiceResult<()> {
        let topic = self.load_topic(topic_id).await?;
        topic.ensure_editable_by(actor.user_id, actor.is_admin)?;

        self.ctx.forum_topic_repo().delete_with_posts(topic_id).await?;

        info!(topic_id = %topic_id, actor_id = %actor.user_id, "Topic deleted");
        Ok(())
    }

    // ========================================================================
    // Posts
    // ========================================================================

    /// Replies oldest first
    #[instrument(skip(self))]
    pub async fn list_posts(&self, topic_id: Snowflake, page: PageQuery) -> ServiceResult<PaginatedResponse<PostResponse>> {
        self.load_topic(topic_id).await?;

        let rows = self
            .ctx
            .forum_post_repo()
            .list_by_topic(topic_id, probe(page))
            .await?;
        Ok(PaginatedResponse::from_rows(
            rows,
            page,
            PageOrder::OldestFirst,
            |p| p.id,
            |p| PostResponse::from(&p),
        ))
    }

    #[instrument(skip(self, request))]
    pub async fn create_post(
        &self,
        author_id: Snowflake,
        topic_id: Snowflake,
        request: CreatePostRequest,
    ) -> ServiceResult<PostResponse> {
        let topic = self.load_topic(topic_id).await?;
        topic.ensure_open()?;

        let post = ForumPost::new(self.ctx.generate_id(), topic_id, author_id, request.body);
        self.ctx.forum_post_repo().create(&post).await?;

        info!(post_id = %post.id, topic_id = %topic_id, author_id = %author_id, "Post created");
        Ok(PostResponse::from(&post))
    }

    #[instrument(skip(self, request))]
    pub async fn update_post(&self, actor: Actor, post_id: Snowflake, request: UpdatePostRequest) -> ServiceResult<PostResponse> {
        let mut post = self.load_post(post_id).await?;
        post.ensure_editable_by(actor.user_id, actor.is_admin)?;

        if !actor.is_admin {
            self.load_topic(post.topic_id).await?.ensure_open()?;
        }

        post.body = request.body;
        post.updated_at = Utc::now();
        self.ctx.forum_post_repo().update(&post).await?;

        info!(post_id = %post_id, actor_id = %actor.user_id, "Post updated");
        Ok(PostResponse::from(&post))
    }

    #[instrument(skip(self))]
    pub async fn delete_post(&self, actor: Actor, post_id: Snowflake) -> ServiceResult<()> {
        let post = self.load_post(post_id).await?;
        post.ensure_editable_by(actor.user_id, actor.is_admin)?;

        self.ctx.forum_post_repo().delete(&post).await?;

        info!(post_id = %post_id, actor_id = %actor.user_id, "Post deleted");
        Ok(())
    }
}

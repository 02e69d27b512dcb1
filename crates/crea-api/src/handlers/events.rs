//! Event handlers

use axum::{
    extract::{Query, State},
    Json,
};
use crea_core::entities::EventWindow;
use crea_service::dto::{CreateEventRequest, EventResponse, PaginatedResponse, UpdateEventRequest};
use crea_service::services::EventService;
use serde::Deserialize;

use super::parse_filter;
use crate::extractors::{AdminUser, IdPath, Pagination, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct EventListQuery {
    pub when: Option<String>,
}

/// List events
///
/// GET /events?when=upcoming|past|all&before&limit
pub async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<EventListQuery>,
    pagination: Pagination,
) -> ApiResult<Json<PaginatedResponse<EventResponse>>> {
    let window = parse_filter::<EventWindow>(query.when.as_deref())?.unwrap_or_default();

    let service = EventService::new(state.service_context());
    let response = service.list_events(window, pagination.page()).await?;
    Ok(Json(response))
}

/// GET /events/{id}
pub async fn get_event(State(state): State<AppState>, IdPath(event_id): IdPath) -> ApiResult<Json<EventResponse>> {
    let service = EventService::new(state.service_context());
    let response = service.get_event(event_id).await?;
    Ok(Json(response))
}

/// POST /events
pub async fn create_event(
    State(state): State<AppState>,
    admin: AdminUser,
    ValidatedJson(request): ValidatedJson<CreateEventRequest>,
) -> ApiResult<Created<Json<EventResponse>>> {
    let service = EventService::new(state.service_context());
    let response = service.create_event(admin.user_id(), request).await?;
    Ok(Created(Json(response)))
}

/// PATCH /events/{id}
pub async fn update_event(
    State(state): State<AppState>,
    _admin: AdminUser,
    IdPath(event_id): IdPath,
    ValidatedJson(request): ValidatedJson<UpdateEventRequest>,
) -> ApiResult<Json<EventResponse>> {
    let service = EventService::new(state.service_context());
    let response = service.update_event(event_id, request).await?;
    Ok(Json(response))
}

/// DELETE /events/{id}
pub async fn delete_event(
    State(state): State<AppState>,
    _admin: AdminUser,
    IdPath(event_id): IdPath,
) -> ApiResult<NoContent> {
    let service = EventService::new(state.service_context());
    service.delete_event(event_id).await?;
    Ok(NoContent)
}

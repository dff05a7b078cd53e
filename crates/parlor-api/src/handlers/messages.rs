//! Message handlers
//!
//! Endpoints for reading and posting chat history.

use axum::{
    extract::{Query, State},
    Json,
};
use parlor_service::dto::{ChatEntryResponse, CreateMessageRequest, HistoryQuery};
use parlor_service::MessageService;

use crate::extractors::JsonBody;
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Recent messages, oldest first
///
/// GET /api/messages?limit=N
pub async fn list_messages(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> ApiResult<Json<Vec<ChatEntryResponse>>> {
    let service = MessageService::new(state.service_context());
    let messages = service.history(query.limit()).await?;
    Ok(Json(messages))
}

/// Post a message
///
/// POST /api/messages
///
/// Stored entries are not pushed to gateway clients; they show up in the
/// next history read.
pub async fn create_message(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<CreateMessageRequest>,
) -> ApiResult<Created<Json<ChatEntryResponse>>> {
    let service = MessageService::new(state.service_context());
    let response = service.create_message(request).await?;
    Ok(Created(Json(response)))
}

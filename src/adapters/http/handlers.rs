//! Request handlers: parse, delegate, translate errors.

use std::str::FromStr;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::error;

use crate::application::{
    NavigationService, RetrievalEngine, RetrievalError, SessionStarted, SessionView,
    DEFAULT_QUERY_LIMIT,
};
use crate::domain::foundation::SessionId;
use crate::domain::knowledge::KnowledgeBase;
use crate::domain::navigation::{NavigationAction, NavigationError, NavigationReply};

use super::dto::{
    ChatRequest, ErrorResponse, HealthResponse, SearchRequest, SearchResponse, ServiceSummary,
    StartSessionRequest,
};

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub navigation: Arc<NavigationService>,
    pub retrieval: Arc<RetrievalEngine>,
    pub knowledge: Arc<KnowledgeBase>,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

pub(super) async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: "seva-guide",
    })
}

pub(super) async fn start_session(
    State(state): State<AppState>,
    Json(req): Json<StartSessionRequest>,
) -> Result<(StatusCode, Json<SessionStarted>), ApiError> {
    let started = state
        .navigation
        .start_session(&req.name, &req.phone)
        .await
        .map_err(handle_navigation_error)?;
    Ok((StatusCode::CREATED, Json(started)))
}

pub(super) async fn chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<NavigationReply>, ApiError> {
    let session_id = parse_session_id(&req.session_id)?;
    let action = NavigationAction::parse(&req.action, req.value).map_err(handle_navigation_error)?;

    let reply = state
        .navigation
        .chat(session_id, action)
        .await
        .map_err(handle_navigation_error)?;
    Ok(Json(reply))
}

pub(super) async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionView>, ApiError> {
    let session_id = parse_session_id(&session_id)?;
    let view = state
        .navigation
        .get_session(session_id)
        .await
        .map_err(handle_navigation_error)?;
    Ok(Json(view))
}

pub(super) async fn list_services(
    State(state): State<AppState>,
) -> Json<Vec<ServiceSummary>> {
    let summaries = state
        .knowledge
        .services()
        .into_iter()
        .map(|service| {
            let categories = state.knowledge.categories(&service);
            let question_count = state.knowledge.question_count(&service);
            ServiceSummary {
                service,
                categories,
                question_count,
            }
        })
        .collect();
    Json(summaries)
}

pub(super) async fn search(
    State(state): State<AppState>,
    Json(req): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
    let query = req.query.trim();
    if query.is_empty() {
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorResponse::unprocessable("query must not be empty")),
        ));
    }
    let limit = req.limit.unwrap_or(DEFAULT_QUERY_LIMIT);
    if limit == 0 {
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorResponse::unprocessable("limit must be positive")),
        ));
    }

    let results = state
        .retrieval
        .query(query, limit)
        .await
        .map_err(handle_retrieval_error)?;
    Ok(Json(SearchResponse { results }))
}

fn parse_session_id(raw: &str) -> Result<SessionId, ApiError> {
    SessionId::from_str(raw).map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(format!(
                "invalid session id: {raw}"
            ))),
        )
    })
}

fn handle_navigation_error(err: NavigationError) -> ApiError {
    match &err {
        NavigationError::Validation { .. } => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorResponse::unprocessable(err.to_string())),
        ),
        NavigationError::InvalidSelection { .. }
        | NavigationError::MissingPrecedingSelection
        | NavigationError::InvalidAction(_) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(err.to_string())),
        ),
        NavigationError::SessionNotFound(_) | NavigationError::QuestionNotFound(_) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found(err.to_string())),
        ),
    }
}

fn handle_retrieval_error(err: RetrievalError) -> ApiError {
    match &err {
        RetrievalError::NotInitialized => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ErrorResponse::unavailable(err.to_string())),
        ),
        RetrievalError::Embedding(_) | RetrievalError::Index(_) => {
            error!(error = %err, "search failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal("search failed")),
            )
        }
    }
}

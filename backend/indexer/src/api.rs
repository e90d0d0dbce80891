//! REST handlers over the indexed event store.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::error;

use crate::db;
use crate::errors::IndexerError;
use crate::events::EventRecord;
use crate::summary::PoolSummary;

#[derive(Clone)]
pub struct ApiState {
    pub pool: SqlitePool,
}

#[derive(Serialize)]
pub struct PoolEventsResponse {
    pub pool_id: String,
    pub count: usize,
    pub events: Vec<EventRecord>,
}

#[derive(Serialize)]
pub struct ContributorEventsResponse {
    pub address: String,
    pub count: usize,
    pub events: Vec<EventRecord>,
}

#[derive(Serialize)]
pub struct AllEventsResponse {
    pub count: usize,
    pub events: Vec<EventRecord>,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for IndexerError {
    fn into_response(self) -> Response {
        error!("API request failed: {self}");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

type ApiResult<T> = std::result::Result<Json<T>, IndexerError>;

/// `GET /health`
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// `GET /events`
pub async fn get_all_events(State(state): State<Arc<ApiState>>) -> ApiResult<AllEventsResponse> {
    let events = db::get_all_events(&state.pool).await?;
    Ok(Json(AllEventsResponse {
        count: events.len(),
        events,
    }))
}

/// `GET /pools/:id/events`
pub async fn get_pool_events(
    State(state): State<Arc<ApiState>>,
    Path(pool_id): Path<String>,
) -> ApiResult<PoolEventsResponse> {
    let events = db::get_events_for_pool(&state.pool, &pool_id).await?;
    Ok(Json(PoolEventsResponse {
        pool_id,
        count: events.len(),
        events,
    }))
}

/// `GET /pools/:id/summary`
///
/// 404 when nothing has been indexed for the pool.
pub async fn get_pool_summary(
    State(state): State<Arc<ApiState>>,
    Path(pool_id): Path<String>,
) -> Response {
    match db::get_events_for_pool(&state.pool, &pool_id).await {
        Ok(events) if events.is_empty() => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("no events indexed for pool {pool_id}"),
            }),
        )
            .into_response(),
        Ok(events) => Json(PoolSummary::from_events(&pool_id, &events)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// `GET /contributors/:address/events`
pub async fn get_contributor_events(
    State(state): State<Arc<ApiState>>,
    Path(address): Path<String>,
) -> ApiResult<ContributorEventsResponse> {
    let events = db::get_events_for_actor(&state.pool, &address).await?;
    Ok(Json(ContributorEventsResponse {
        address,
        count: events.len(),
        events,
    }))
}

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{error, info, instrument, warn};

use super::dto::{DataResponse, DetailResponse, MessageResponse};
use super::extractors::JsonBody;
use super::{EntitySchema, Record, Resource};
use crate::error::{ApiError, DataError};
use crate::state::AppState;

/// `GET|POST <base>` and `GET|PUT|DELETE <base>/:id` for one resource.
pub fn routes<R: Resource>(base: &str) -> Router<AppState> {
    Router::new()
        .route(base, get(list::<R>).post(create::<R>))
        .route(
            &format!("{base}/:id"),
            get(get_one::<R>).put(update::<R>).delete(delete::<R>),
        )
}

/// Maps a data-layer failure to the response taxonomy. `failure` is the
/// message used for anything that is neither a miss nor a conflict.
fn reject(schema: &EntitySchema, err: DataError, failure: String) -> ApiError {
    match err {
        DataError::NotFound => ApiError::new(StatusCode::NOT_FOUND, schema.not_found_message()),
        DataError::Conflict(constraint) => {
            warn!(table = schema.table, %constraint, "unique constraint violated");
            ApiError::new(StatusCode::CONFLICT, schema.conflict_message())
        }
        DataError::Internal(detail) => {
            error!(table = schema.table, error = %detail, "{failure}");
            ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, failure)
        }
    }
}

#[instrument(skip_all)]
pub async fn list<R: Resource>(
    State(state): State<AppState>,
    Query(query): Query<R::Filter>,
) -> Result<Json<DataResponse<Vec<Record>>>, ApiError> {
    let schema = R::schema(&state);
    let rows = state
        .store
        .list(schema, R::filter(query))
        .await
        .map_err(|e| reject(schema, e, format!("Failed to fetch {}", schema.plural)))?;
    Ok(Json(DataResponse { data: rows }))
}

#[instrument(skip(state))]
pub async fn get_one<R: Resource>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DataResponse<Record>>, ApiError> {
    let schema = R::schema(&state);
    let row = state
        .store
        .get(schema, &id)
        .await
        .map_err(|e| reject(schema, e, format!("Failed to fetch {}", schema.noun)))?;
    Ok(Json(DataResponse { data: row }))
}

#[instrument(skip_all)]
pub async fn create<R: Resource>(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<R::Create>,
) -> Result<(StatusCode, Json<DetailResponse>), ApiError> {
    let schema = R::schema(&state);
    let failure = format!("Failed to create {}", schema.noun);

    // argon2 for users; kept off the async workers
    let values = tokio::task::spawn_blocking(move || R::create_values(body))
        .await
        .map_err(|e| DataError::Internal(e.to_string()))
        .and_then(|values| values)
        .map_err(|e| reject(schema, e, failure.clone()))?;
    let row = state
        .store
        .insert(schema, values)
        .await
        .map_err(|e| reject(schema, e, failure))?;

    info!(table = schema.table, id = ?row.get("id"), "created");
    Ok((
        StatusCode::CREATED,
        Json(DetailResponse {
            message: format!("Create {} successfully", schema.noun),
            detail: row,
        }),
    ))
}

#[instrument(skip(state, body))]
pub async fn update<R: Resource>(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<R::Update>,
) -> Result<Json<DetailResponse>, ApiError> {
    let schema = R::schema(&state);
    let failure = format!("Failed to update {}", schema.noun);
    let values: Vec<_> = R::update_values(body)
        .map_err(|e| reject(schema, e, failure.clone()))?
        .into_iter()
        .filter(|(col, _)| schema.is_updatable(col))
        .collect();

    let row = state
        .store
        .update(schema, &id, values)
        .await
        .map_err(|e| reject(schema, e, failure))?;

    info!(table = schema.table, %id, "updated");
    Ok(Json(DetailResponse {
        message: format!("Update {} successfully", schema.noun),
        detail: row,
    }))
}

#[instrument(skip(state))]
pub async fn delete<R: Resource>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let schema = R::schema(&state);
    state
        .store
        .delete(schema, &id)
        .await
        .map_err(|e| reject(schema, e, format!("Failed to delete {}", schema.noun)))?;

    info!(table = schema.table, %id, "deleted");
    Ok(Json(MessageResponse {
        message: format!("Delete {} successfully", schema.noun),
    }))
}

use axum::{
    Json, Router,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    response::IntoResponse,
    routing,
};
use serde_json::{Map, Value};

use crate::{
    common::{ApiError, AppState},
    db::{Picture, StoreError},
};

pub fn picture_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/picture",
            routing::get(list_pictures).post(create_picture),
        )
        .route(
            "/picture/{id}",
            routing::get(get_picture)
                .put(update_picture)
                .delete(delete_picture),
        )
}

async fn list_pictures(State(state): State<AppState>) -> Result<Json<Vec<Picture>>, ApiError> {
    let pics = state.store.list().await;
    if pics.is_empty() && state.status_mode.empty_is_missing() {
        return Err(ApiError::NoPictures);
    }
    Ok(Json(pics))
}

async fn get_picture(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Picture>, ApiError> {
    let Path(id) = id?;

    if state.status_mode.empty_is_missing() && state.store.count().await == 0 {
        return Err(ApiError::NoPictures);
    }

    state
        .store
        .get(id)
        .await
        .map(Json)
        .ok_or(ApiError::NotFound("Picture not found."))
}

async fn create_picture(
    State(state): State<AppState>,
    payload: Result<Json<Picture>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(picture) = payload?;

    let saved = state.store.create(picture).await.map_err(|e| match e {
        StoreError::Duplicate(id) => ApiError::AlreadyPresent {
            id,
            status: state.status_mode.conflict_status(),
        },
        other => other.into(),
    })?;

    Ok((StatusCode::CREATED, Json(saved)))
}

async fn update_picture(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<Map<String, Value>>, JsonRejection>,
) -> Result<Json<Picture>, ApiError> {
    let Path(id) = id?;
    let Json(patch) = payload?;

    state
        .store
        .update(id, patch)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound("Picture not found"))
}

async fn delete_picture(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;

    if state.store.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("Picture not found"))
    }
}

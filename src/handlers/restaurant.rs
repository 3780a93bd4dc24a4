//! Restaurant handlers: list, read with menu, cascading delete.

use super::parse_id;
use crate::error::AppError;
use crate::response::restaurant_full;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

const RESTAURANT: &str = "Restaurant";

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let restaurants = state.store.list_restaurants().await?;
    Ok((StatusCode::OK, Json(restaurants)))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<Response, AppError> {
    let id = parse_id(&id_str).ok_or(AppError::NotFound(RESTAURANT))?;
    let (restaurant, menu) = state
        .store
        .restaurant_detail(id)
        .await?
        .ok_or(AppError::NotFound(RESTAURANT))?;
    Ok((StatusCode::OK, Json(restaurant_full(&restaurant, &menu))).into_response())
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str).ok_or(AppError::NotFound(RESTAURANT))?;
    if !state.store.delete_restaurant(id).await? {
        tracing::debug!(restaurant_id = id, "delete of unknown restaurant");
        return Err(AppError::NotFound(RESTAURANT));
    }
    tracing::info!(restaurant_id = id, "restaurant deleted");
    Ok(StatusCode::NO_CONTENT)
}

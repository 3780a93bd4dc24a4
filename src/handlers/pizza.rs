//! Pizza handlers.

use crate::error::AppError;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let pizzas = state.store.list_pizzas().await?;
    Ok((StatusCode::OK, Json(pizzas)))
}

//! POST /restaurant_pizzas.
//!
//! Checks run in a fixed order: price range first, then existence of both
//! referenced rows. Nothing is written unless both pass. A body that cannot
//! be read as JSON gets the same 400 as a bad price.

use crate::error::AppError;
use crate::model::{NewRestaurantPizza, ValidationError};
use crate::response::{pizza_full, restaurant_with_links, CreatedRestaurantPizza};
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;

pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(body) = body.map_err(|rejection| {
        tracing::debug!(error = %rejection, "restaurant pizza body unreadable");
        ValidationError::UnreadableBody
    })?;
    let new = NewRestaurantPizza::from_json(&body).map_err(|e| {
        tracing::debug!(error = %e, "restaurant pizza rejected");
        e
    })?;

    let pizza = state.store.get_pizza(new.pizza_id()).await?;
    let restaurant = state.store.get_restaurant(new.restaurant_id()).await?;
    let (Some(pizza), Some(restaurant)) = (pizza, restaurant) else {
        tracing::debug!(
            pizza_id = new.pizza_id(),
            restaurant_id = new.restaurant_id(),
            "restaurant pizza references missing rows"
        );
        return Err(ValidationError::InvalidReference.into());
    };

    let rp = state.store.insert_restaurant_pizza(new).await?;
    tracing::info!(
        id = rp.id,
        pizza_id = rp.pizza_id,
        restaurant_id = rp.restaurant_id,
        price = rp.price,
        "restaurant pizza created"
    );

    let pizza_links = state.store.restaurant_pizzas_for_pizza(pizza.id).await?;
    let restaurant_links = state.store.restaurant_pizzas_for_restaurant(restaurant.id).await?;
    let body = CreatedRestaurantPizza {
        id: rp.id,
        pizza: pizza_full(&pizza, &pizza_links),
        pizza_id: rp.pizza_id,
        price: rp.price,
        restaurant: restaurant_with_links(&restaurant, &restaurant_links),
        restaurant_id: rp.restaurant_id,
    };
    Ok((StatusCode::CREATED, Json(body)).into_response())
}

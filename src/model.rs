//! Entities and the one invariant they carry: a restaurant's price for a pizza lies in 1..=30.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::ops::RangeInclusive;
use thiserror::Error;

/// Allowed prices for a pizza at a restaurant.
pub const PRICE_RANGE: RangeInclusive<i64> = 1..=30;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: i32,
    pub name: String,
    pub address: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pizza {
    pub id: i32,
    pub name: String,
    pub ingredients: String,
}

/// Association between a restaurant and a pizza, carrying the price.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestaurantPizza {
    pub id: i32,
    pub price: i32,
    pub pizza_id: i32,
    pub restaurant_id: i32,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("price {0} is outside 1..=30")]
    PriceOutOfRange(i64),
    #[error("price is not an integer")]
    PriceNotInteger,
    #[error("invalid pizza or restaurant id")]
    InvalidReference,
    /// Body is not JSON, or was sent without a JSON content type.
    #[error("request body is not JSON")]
    UnreadableBody,
}

/// A RestaurantPizza that passed validation and has not been written yet.
/// Fields are private so the only way to obtain one is through [`NewRestaurantPizza::new`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewRestaurantPizza {
    price: i32,
    pizza_id: i32,
    restaurant_id: i32,
}

impl NewRestaurantPizza {
    pub fn new(price: i64, pizza_id: i32, restaurant_id: i32) -> Result<Self, ValidationError> {
        if !PRICE_RANGE.contains(&price) {
            return Err(ValidationError::PriceOutOfRange(price));
        }
        Ok(NewRestaurantPizza {
            // in range, so it fits
            price: price as i32,
            pizza_id,
            restaurant_id,
        })
    }

    /// Parse a POST body. Price is checked first; a missing price counts as 0.
    pub fn from_json(body: &Value) -> Result<Self, ValidationError> {
        let price = match body.get("price") {
            None | Some(Value::Null) => 0,
            Some(v) => v.as_i64().ok_or(ValidationError::PriceNotInteger)?,
        };
        if !PRICE_RANGE.contains(&price) {
            return Err(ValidationError::PriceOutOfRange(price));
        }
        let pizza_id = reference_id(body, "pizza_id")?;
        let restaurant_id = reference_id(body, "restaurant_id")?;
        Self::new(price, pizza_id, restaurant_id)
    }

    pub fn price(&self) -> i32 {
        self.price
    }

    pub fn pizza_id(&self) -> i32 {
        self.pizza_id
    }

    pub fn restaurant_id(&self) -> i32 {
        self.restaurant_id
    }

    /// Attach the id generated by the store.
    pub fn with_id(self, id: i32) -> RestaurantPizza {
        RestaurantPizza {
            id,
            price: self.price,
            pizza_id: self.pizza_id,
            restaurant_id: self.restaurant_id,
        }
    }
}

fn reference_id(body: &Value, key: &str) -> Result<i32, ValidationError> {
    body.get(key)
        .and_then(Value::as_i64)
        .and_then(|n| i32::try_from(n).ok())
        .ok_or(ValidationError::InvalidReference)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn price_bounds_are_inclusive() {
        assert!(NewRestaurantPizza::new(1, 1, 1).is_ok());
        assert!(NewRestaurantPizza::new(30, 1, 1).is_ok());
        assert_eq!(
            NewRestaurantPizza::new(0, 1, 1),
            Err(ValidationError::PriceOutOfRange(0))
        );
        assert_eq!(
            NewRestaurantPizza::new(31, 1, 1),
            Err(ValidationError::PriceOutOfRange(31))
        );
        assert_eq!(
            NewRestaurantPizza::new(-5, 1, 1),
            Err(ValidationError::PriceOutOfRange(-5))
        );
    }

    #[test]
    fn missing_price_is_rejected_as_zero() {
        let err = NewRestaurantPizza::from_json(&json!({"pizza_id": 1, "restaurant_id": 1})).unwrap_err();
        assert_eq!(err, ValidationError::PriceOutOfRange(0));
    }

    #[test]
    fn non_integer_price_is_rejected() {
        let err = NewRestaurantPizza::from_json(&json!({"price": "5", "pizza_id": 1, "restaurant_id": 1}))
            .unwrap_err();
        assert_eq!(err, ValidationError::PriceNotInteger);
        let err = NewRestaurantPizza::from_json(&json!({"price": 2.5, "pizza_id": 1, "restaurant_id": 1}))
            .unwrap_err();
        assert_eq!(err, ValidationError::PriceNotInteger);
    }

    #[test]
    fn price_is_checked_before_references() {
        let err = NewRestaurantPizza::from_json(&json!({"price": 31})).unwrap_err();
        assert_eq!(err, ValidationError::PriceOutOfRange(31));
    }

    #[test]
    fn missing_or_malformed_ids_are_invalid_references() {
        let err = NewRestaurantPizza::from_json(&json!({"price": 5, "restaurant_id": 1})).unwrap_err();
        assert_eq!(err, ValidationError::InvalidReference);
        let err = NewRestaurantPizza::from_json(&json!({"price": 5, "pizza_id": "1", "restaurant_id": 1}))
            .unwrap_err();
        assert_eq!(err, ValidationError::InvalidReference);
        let err = NewRestaurantPizza::from_json(&json!({"price": 5, "pizza_id": 1, "restaurant_id": 1_i64 << 40}))
            .unwrap_err();
        assert_eq!(err, ValidationError::InvalidReference);
    }

    #[test]
    fn valid_body_builds_association() {
        let new = NewRestaurantPizza::from_json(&json!({"price": 12, "pizza_id": 3, "restaurant_id": 7})).unwrap();
        assert_eq!(new.price(), 12);
        assert_eq!(
            new.with_id(9),
            RestaurantPizza {
                id: 9,
                price: 12,
                pizza_id: 3,
                restaurant_id: 7
            }
        );
    }
}

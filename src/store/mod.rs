//! Persistence seam. Handlers only see [`Store`]; the backend is picked at startup.

mod memory;
mod postgres;

pub use memory::{MemoryStore, NewPizza, NewRestaurant, Seed};
pub use postgres::PgStore;

use crate::error::AppError;
use crate::model::{NewRestaurantPizza, Pizza, Restaurant, RestaurantPizza};
use async_trait::async_trait;

#[async_trait]
pub trait Store: Send + Sync {
    /// All restaurants, ordered by id.
    async fn list_restaurants(&self) -> Result<Vec<Restaurant>, AppError>;

    async fn get_restaurant(&self, id: i32) -> Result<Option<Restaurant>, AppError>;

    /// All pizzas, ordered by id.
    async fn list_pizzas(&self) -> Result<Vec<Pizza>, AppError>;

    async fn get_pizza(&self, id: i32) -> Result<Option<Pizza>, AppError>;

    async fn get_restaurant_pizza(&self, id: i32) -> Result<Option<RestaurantPizza>, AppError>;

    async fn restaurant_pizzas_for_restaurant(
        &self,
        restaurant_id: i32,
    ) -> Result<Vec<RestaurantPizza>, AppError>;

    async fn restaurant_pizzas_for_pizza(&self, pizza_id: i32) -> Result<Vec<RestaurantPizza>, AppError>;

    /// A restaurant with its associations joined to their pizzas, ordered by association id,
    /// read as one consistent snapshot. None when the restaurant does not exist.
    async fn restaurant_detail(
        &self,
        id: i32,
    ) -> Result<Option<(Restaurant, Vec<(RestaurantPizza, Pizza)>)>, AppError>;

    /// Persist a validated association and return it with its generated id.
    /// Fails with `ValidationError::InvalidReference` if either referenced row is gone.
    async fn insert_restaurant_pizza(&self, new: NewRestaurantPizza) -> Result<RestaurantPizza, AppError>;

    /// Delete the restaurant and every association referencing it as one unit.
    /// Returns false, with nothing removed, when the restaurant does not exist.
    async fn delete_restaurant(&self, id: i32) -> Result<bool, AppError>;

    /// Cheap liveness check for readiness probes.
    async fn ping(&self) -> Result<(), AppError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_is_object_safe() {
        fn _accepts_dyn(_store: &dyn Store) {}
    }
}

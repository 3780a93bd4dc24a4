//! In-process store. Used for local runs without a database and by the test suite.

use super::Store;
use crate::error::{AppError, ConfigError};
use crate::model::{NewRestaurantPizza, Pizza, Restaurant, RestaurantPizza, ValidationError};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone, Debug, Deserialize)]
pub struct NewRestaurant {
    pub name: String,
    pub address: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewPizza {
    pub name: String,
    pub ingredients: String,
}

/// Startup data for the memory store. Restaurants and pizzas have no HTTP create route.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Seed {
    #[serde(default)]
    pub restaurants: Vec<NewRestaurant>,
    #[serde(default)]
    pub pizzas: Vec<NewPizza>,
}

impl Seed {
    pub async fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ConfigError::Seed(format!("{}: {}", path.display(), e)))?;
        serde_json::from_str(&raw).map_err(|e| ConfigError::Seed(format!("{}: {}", path.display(), e)))
    }
}

#[derive(Default)]
struct Tables {
    restaurants: BTreeMap<i32, Restaurant>,
    pizzas: BTreeMap<i32, Pizza>,
    restaurant_pizzas: BTreeMap<i32, RestaurantPizza>,
    last_restaurant_id: i32,
    last_pizza_id: i32,
    last_restaurant_pizza_id: i32,
}

/// Ids start at 1 and are never reused, like a serial column.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn from_seed(seed: &Seed) -> Self {
        let store = Self::new();
        for r in &seed.restaurants {
            store.insert_restaurant(&r.name, &r.address).await;
        }
        for p in &seed.pizzas {
            store.insert_pizza(&p.name, &p.ingredients).await;
        }
        store
    }

    pub async fn insert_restaurant(&self, name: &str, address: &str) -> Restaurant {
        let mut t = self.tables.write().await;
        t.last_restaurant_id += 1;
        let restaurant = Restaurant {
            id: t.last_restaurant_id,
            name: name.to_string(),
            address: address.to_string(),
        };
        t.restaurants.insert(restaurant.id, restaurant.clone());
        restaurant
    }

    pub async fn insert_pizza(&self, name: &str, ingredients: &str) -> Pizza {
        let mut t = self.tables.write().await;
        t.last_pizza_id += 1;
        let pizza = Pizza {
            id: t.last_pizza_id,
            name: name.to_string(),
            ingredients: ingredients.to_string(),
        };
        t.pizzas.insert(pizza.id, pizza.clone());
        pizza
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn list_restaurants(&self) -> Result<Vec<Restaurant>, AppError> {
        Ok(self.tables.read().await.restaurants.values().cloned().collect())
    }

    async fn get_restaurant(&self, id: i32) -> Result<Option<Restaurant>, AppError> {
        Ok(self.tables.read().await.restaurants.get(&id).cloned())
    }

    async fn list_pizzas(&self) -> Result<Vec<Pizza>, AppError> {
        Ok(self.tables.read().await.pizzas.values().cloned().collect())
    }

    async fn get_pizza(&self, id: i32) -> Result<Option<Pizza>, AppError> {
        Ok(self.tables.read().await.pizzas.get(&id).cloned())
    }

    async fn get_restaurant_pizza(&self, id: i32) -> Result<Option<RestaurantPizza>, AppError> {
        Ok(self.tables.read().await.restaurant_pizzas.get(&id).cloned())
    }

    async fn restaurant_pizzas_for_restaurant(
        &self,
        restaurant_id: i32,
    ) -> Result<Vec<RestaurantPizza>, AppError> {
        Ok(self
            .tables
            .read()
            .await
            .restaurant_pizzas
            .values()
            .filter(|rp| rp.restaurant_id == restaurant_id)
            .cloned()
            .collect())
    }

    async fn restaurant_pizzas_for_pizza(&self, pizza_id: i32) -> Result<Vec<RestaurantPizza>, AppError> {
        Ok(self
            .tables
            .read()
            .await
            .restaurant_pizzas
            .values()
            .filter(|rp| rp.pizza_id == pizza_id)
            .cloned()
            .collect())
    }

    async fn restaurant_detail(
        &self,
        id: i32,
    ) -> Result<Option<(Restaurant, Vec<(RestaurantPizza, Pizza)>)>, AppError> {
        let t = self.tables.read().await;
        let Some(restaurant) = t.restaurants.get(&id).cloned() else {
            return Ok(None);
        };
        let menu = t
            .restaurant_pizzas
            .values()
            .filter(|rp| rp.restaurant_id == id)
            .filter_map(|rp| t.pizzas.get(&rp.pizza_id).map(|p| (rp.clone(), p.clone())))
            .collect();
        Ok(Some((restaurant, menu)))
    }

    async fn insert_restaurant_pizza(&self, new: NewRestaurantPizza) -> Result<RestaurantPizza, AppError> {
        let mut t = self.tables.write().await;
        if !t.pizzas.contains_key(&new.pizza_id()) || !t.restaurants.contains_key(&new.restaurant_id()) {
            return Err(ValidationError::InvalidReference.into());
        }
        t.last_restaurant_pizza_id += 1;
        let rp = new.with_id(t.last_restaurant_pizza_id);
        t.restaurant_pizzas.insert(rp.id, rp.clone());
        Ok(rp)
    }

    async fn delete_restaurant(&self, id: i32) -> Result<bool, AppError> {
        // One write guard covers both steps, so readers never see a half-deleted restaurant.
        let mut t = self.tables.write().await;
        if t.restaurants.remove(&id).is_none() {
            return Ok(false);
        }
        t.restaurant_pizzas.retain(|_, rp| rp.restaurant_id != id);
        Ok(true)
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

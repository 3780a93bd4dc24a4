//! PostgreSQL store. Tables `restaurants`, `pizzas` and `restaurant_pizzas` must already exist.

use super::Store;
use crate::config::DatabaseSettings;
use crate::error::AppError;
use crate::model::{NewRestaurantPizza, Pizza, Restaurant, RestaurantPizza, ValidationError};
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

type RestaurantRow = (i32, String, String);
type PizzaRow = (i32, String, String);
type RestaurantPizzaRow = (i32, i32, i32, i32);

fn restaurant_from_row((id, name, address): RestaurantRow) -> Restaurant {
    Restaurant { id, name, address }
}

fn pizza_from_row((id, name, ingredients): PizzaRow) -> Pizza {
    Pizza { id, name, ingredients }
}

fn restaurant_pizza_from_row((id, price, pizza_id, restaurant_id): RestaurantPizzaRow) -> RestaurantPizza {
    RestaurantPizza {
        id,
        price,
        pizza_id,
        restaurant_id,
    }
}

type DetailRow = (
    i32,
    String,
    String,
    Option<i32>,
    Option<i32>,
    Option<i32>,
    Option<String>,
    Option<String>,
);

/// Fold the LEFT JOIN rows of one restaurant. A restaurant without associations yields one row of NULLs.
fn detail_from_rows(rows: Vec<DetailRow>) -> Option<(Restaurant, Vec<(RestaurantPizza, Pizza)>)> {
    let (id, name, address, ..) = rows.first()?.clone();
    let menu = rows
        .into_iter()
        .filter_map(|(restaurant_id, _, _, rp_id, price, pizza_id, pizza_name, ingredients)| {
            let (rp_id, price, pizza_id) = (rp_id?, price?, pizza_id?);
            Some((
                restaurant_pizza_from_row((rp_id, price, pizza_id, restaurant_id)),
                pizza_from_row((pizza_id, pizza_name?, ingredients?)),
            ))
        })
        .collect();
    Some((Restaurant { id, name, address }, menu))
}

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        PgStore { pool }
    }

    pub async fn connect(settings: &DatabaseSettings) -> Result<Self, AppError> {
        let pool = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .connect(&settings.url)
            .await?;
        Ok(PgStore { pool })
    }
}

#[async_trait]
impl Store for PgStore {
    async fn list_restaurants(&self) -> Result<Vec<Restaurant>, AppError> {
        let rows: Vec<RestaurantRow> = sqlx::query_as("SELECT id, name, address FROM restaurants ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(restaurant_from_row).collect())
    }

    async fn get_restaurant(&self, id: i32) -> Result<Option<Restaurant>, AppError> {
        let row: Option<RestaurantRow> = sqlx::query_as("SELECT id, name, address FROM restaurants WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(restaurant_from_row))
    }

    async fn list_pizzas(&self) -> Result<Vec<Pizza>, AppError> {
        let rows: Vec<PizzaRow> = sqlx::query_as("SELECT id, name, ingredients FROM pizzas ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(pizza_from_row).collect())
    }

    async fn get_pizza(&self, id: i32) -> Result<Option<Pizza>, AppError> {
        let row: Option<PizzaRow> = sqlx::query_as("SELECT id, name, ingredients FROM pizzas WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(pizza_from_row))
    }

    async fn get_restaurant_pizza(&self, id: i32) -> Result<Option<RestaurantPizza>, AppError> {
        let row: Option<RestaurantPizzaRow> = sqlx::query_as(
            "SELECT id, price, pizza_id, restaurant_id FROM restaurant_pizzas WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(restaurant_pizza_from_row))
    }

    async fn restaurant_pizzas_for_restaurant(
        &self,
        restaurant_id: i32,
    ) -> Result<Vec<RestaurantPizza>, AppError> {
        let rows: Vec<RestaurantPizzaRow> = sqlx::query_as(
            "SELECT id, price, pizza_id, restaurant_id FROM restaurant_pizzas WHERE restaurant_id = $1 ORDER BY id",
        )
        .bind(restaurant_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(restaurant_pizza_from_row).collect())
    }

    async fn restaurant_pizzas_for_pizza(&self, pizza_id: i32) -> Result<Vec<RestaurantPizza>, AppError> {
        let rows: Vec<RestaurantPizzaRow> = sqlx::query_as(
            "SELECT id, price, pizza_id, restaurant_id FROM restaurant_pizzas WHERE pizza_id = $1 ORDER BY id",
        )
        .bind(pizza_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(restaurant_pizza_from_row).collect())
    }

    async fn restaurant_detail(
        &self,
        id: i32,
    ) -> Result<Option<(Restaurant, Vec<(RestaurantPizza, Pizza)>)>, AppError> {
        // Single statement, so the restaurant and its menu come from one snapshot.
        let rows: Vec<DetailRow> = sqlx::query_as(
            r#"
            SELECT r.id, r.name, r.address,
                   rp.id, rp.price, rp.pizza_id, p.name, p.ingredients
            FROM restaurants r
            LEFT JOIN restaurant_pizzas rp ON rp.restaurant_id = r.id
            LEFT JOIN pizzas p ON p.id = rp.pizza_id
            WHERE r.id = $1
            ORDER BY rp.id
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;
        Ok(detail_from_rows(rows))
    }

    async fn insert_restaurant_pizza(&self, new: NewRestaurantPizza) -> Result<RestaurantPizza, AppError> {
        let inserted = sqlx::query_scalar::<_, i32>(
            "INSERT INTO restaurant_pizzas (price, pizza_id, restaurant_id) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(new.price())
        .bind(new.pizza_id())
        .bind(new.restaurant_id())
        .fetch_one(&self.pool)
        .await;
        match inserted {
            Ok(id) => Ok(new.with_id(id)),
            // referenced row deleted between lookup and insert
            Err(sqlx::Error::Database(e)) if e.is_foreign_key_violation() => {
                Err(ValidationError::InvalidReference.into())
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn delete_restaurant(&self, id: i32) -> Result<bool, AppError> {
        // Dropping `tx` without commit rolls back, so every early return leaves both tables untouched.
        let mut tx = self.pool.begin().await?;
        let links = sqlx::query("DELETE FROM restaurant_pizzas WHERE restaurant_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let removed = sqlx::query("DELETE FROM restaurants WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        if removed.rows_affected() == 0 {
            return Ok(false);
        }
        tx.commit().await?;
        tracing::debug!(restaurant_id = id, links = links.rows_affected(), "restaurant deleted");
        Ok(true)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_rows_without_associations() {
        let rows = vec![(1, "R".to_string(), "A".to_string(), None, None, None, None, None)];
        let (restaurant, menu) = detail_from_rows(rows).unwrap();
        assert_eq!(restaurant.name, "R");
        assert!(menu.is_empty());
        assert!(detail_from_rows(Vec::new()).is_none());
    }

    #[test]
    fn detail_rows_fold_into_menu() {
        let row = |rp_id, pizza_id, pizza: &str| {
            (
                1,
                "R".to_string(),
                "A".to_string(),
                Some(rp_id),
                Some(10),
                Some(pizza_id),
                Some(pizza.to_string()),
                Some("Dough".to_string()),
            )
        };
        let (_, menu) = detail_from_rows(vec![row(4, 2, "Emma"), row(6, 3, "Geri")]).unwrap();
        assert_eq!(menu.len(), 2);
        assert_eq!(menu[0].0.id, 4);
        assert_eq!(menu[0].0.restaurant_id, 1);
        assert_eq!(menu[1].1.name, "Geri");
    }
}

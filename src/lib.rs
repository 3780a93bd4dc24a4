//! Pizza API: restaurants, pizzas and the prices restaurants charge for them, over REST.

pub mod config;
pub mod error;
pub mod handlers;
pub mod model;
pub mod response;
pub mod routes;
pub mod state;
pub mod store;

pub use config::{DatabaseSettings, Settings, StoreSettings};
pub use error::{AppError, ConfigError};
pub use model::{NewRestaurantPizza, Pizza, Restaurant, RestaurantPizza, ValidationError};
pub use routes::{api_routes, app, service_routes};
pub use state::AppState;
pub use store::{MemoryStore, PgStore, Seed, Store};

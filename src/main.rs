//! Server binary: reads settings, builds the configured store, serves the API.

use pizza_api::{app, AppState, MemoryStore, PgStore, Seed, Settings, StoreSettings};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("pizza_api=info,tower_http=info")),
        )
        .init();

    let settings = Settings::from_env()?;
    let state = match &settings.store {
        StoreSettings::Postgres(db) => AppState::new(PgStore::connect(db).await?),
        StoreSettings::Memory { seed_path } => {
            let seed = match seed_path {
                Some(path) => Seed::load(path).await?,
                None => Seed::default(),
            };
            tracing::info!(
                restaurants = seed.restaurants.len(),
                pizzas = seed.pizzas.len(),
                "using in-memory store"
            );
            AppState::new(MemoryStore::from_seed(&seed).await)
        }
    };

    let listener = TcpListener::bind(settings.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app(state)).await?;
    Ok(())
}

use std::time::Duration;

use migration::{Migrator, MigratorTrait};
use settings::Database;

mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "dashboard={level},server={level},engine={level},tower_http={level}",
            level = settings.app.level
        ))
        .init();

    let db = parse_database(&settings.server.database).await?;

    let dataset = engine::HttpDataset::new(
        settings.seed.url.clone(),
        Duration::from_secs(settings.seed.timeout_secs),
    )?;
    let engine = engine::Engine::builder()
        .database(db.clone())
        .dataset(dataset)
        .max_per_page(settings.server.max_per_page)
        .build()
        .await?;

    if settings.seed.on_startup {
        tracing::info!("Seeding record store from {}", settings.seed.url);
        match engine.seed().await {
            Ok(count) => tracing::info!("Seeded {count} transactions"),
            Err(err) => tracing::warn!("startup seed failed, serving existing records: {err}"),
        }
    }

    let addr = format!("{}:{}", settings.server.bind, settings.server.port);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    server::run_with_listener(engine, listener).await?;

    db.close().await?;
    Ok(())
}

async fn parse_database(
    config: &settings::Database,
) -> Result<sea_orm::DatabaseConnection, Box<dyn std::error::Error + Send + Sync>> {
    let url = match config {
        Database::Memory => String::from("sqlite::memory:"),
        Database::Sqlite(path) => format!("sqlite:{}?mode=rwc", path),
    };

    let database = sea_orm::Database::connect(url).await?;
    Migrator::up(&database, None).await?;
    Ok(database)
}

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;

use cedin_server::adapters::Repositories;
use cedin_server::config::Config;
use cedin_server::password::PasswordService;
use cedin_server::{build_router, logging, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    logging::init();

    tracing::info!("🏥 Cedin Manager API initializing...");

    let config = Config::from_env()?;

    let repos = match &config.database_url {
        Some(url) => {
            let pool = PgPoolOptions::new()
                .max_connections(config.max_connections)
                .connect(url)
                .await
                .context("Failed to connect to DATABASE_URL")?;

            sqlx::migrate!()
                .run(&pool)
                .await
                .context("Failed to run database migrations")?;

            tracing::info!("✅ Database migrations completed");
            Repositories::postgres(pool)
        }
        None => {
            tracing::warn!(
                "⚠️  No DATABASE_URL set - using in-memory store, data is not persisted"
            );
            Repositories::in_memory()
        }
    };

    let state = AppState::new(repos, PasswordService::new(config.secret_key.clone()));
    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;

    tracing::info!("📚 Swagger UI: /swagger-ui");
    tracing::info!("✅ Cedin Manager API listening on {}", config.bind_addr);

    axum::serve(listener, router).await?;

    Ok(())
}

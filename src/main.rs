use actix_web::{App, HttpServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod app;
mod model;
mod service;

use api::ApiData;
use app::AppState;
use model::Config;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present (ignore if missing)
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    let bind_addr = config.bind_addr();

    let state = match AppState::new(config).await {
        Ok(state) => state,
        Err(e) => {
            tracing::error!(error = %e, "Failed to initialize application");
            std::process::exit(1);
        }
    };

    tracing::info!(
        llm_enabled = state.llm_enabled(),
        tests_dir = %state.store.dir().display(),
        "Starting E2E test agent server on {}",
        bind_addr
    );

    let data = ApiData::new(&state);

    HttpServer::new(move || App::new().configure(|cfg| data.configure(cfg)))
        .bind(&bind_addr)?
        .run()
        .await
}

//! feedback-api - Multilingual Customer Feedback Analyzer
//!
//! Accepts customer feedback in any language, asks Gemini for language,
//! English translation and sentiment, stores the result in SQLite and serves
//! list and statistics queries.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use feedback_api::analysis::{Analyzer, GeminiClient};
use feedback_api::{build_router, AppState};
use feedback_common::config::{load_toml_config, CliOverrides, ServiceConfig, TomlConfig};
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for feedback-api
#[derive(Parser, Debug)]
#[command(name = "feedback-api")]
#[command(about = "Multilingual customer feedback analyzer")]
#[command(version)]
struct Args {
    /// Address to listen on (e.g. 127.0.0.1:8000)
    #[arg(short, long)]
    bind: Option<String>,

    /// SQLite database URL (e.g. sqlite://feedback.db)
    #[arg(short, long)]
    database_url: Option<String>,

    /// Gemini model name
    #[arg(short, long)]
    model: Option<String>,

    /// Optional TOML configuration file
    #[arg(short, long, env = "FEEDBACK_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine; real environment variables still apply
    let dotenv_path = dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "feedback_api=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting feedback-api v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );
    if let Some(path) = dotenv_path {
        info!("Loaded environment from {}", path.display());
    }

    let args = Args::parse();

    let toml_config = match &args.config {
        Some(path) => {
            info!("Config file: {}", path.display());
            load_toml_config(path)?
        }
        None => TomlConfig::default(),
    };

    let cli = CliOverrides {
        bind: args.bind,
        database_url: args.database_url,
        gemini_model: args.model,
    };
    let config = ServiceConfig::resolve(&cli, &toml_config).context("Invalid configuration")?;

    info!("Database: {}", config.database_url);
    let db_pool = feedback_api::db::init_database_pool(&config.database_url).await?;
    info!("Database connection established");

    let analyzer = match GeminiClient::new(&config.gemini) {
        Ok(client) => {
            info!(
                model = client.model(),
                endpoint = client.endpoint(),
                "Gemini analysis enabled"
            );
            Analyzer::new(Arc::new(client))
        }
        Err(e) => {
            warn!("{}. Every submission will be stored with the fallback analysis.", e);
            Analyzer::disabled()
        }
    };

    info!(generator = analyzer.generator_name(), "Analyzer ready");

    let state = AppState::new(db_pool, analyzer);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind))?;
    info!("Listening on http://{}", config.bind);
    info!("Health check: http://{}/health", config.bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received SIGTERM, shutting down");
        },
    }
}

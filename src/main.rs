use anyhow::{Context, Result};
use signalforge_site::config::Config;
use signalforge_site::i18n::Catalog;
use signalforge_site::mailer::SmtpMailer;
use signalforge_site::server::{build_router, AppState};
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("signalforge_site=info".parse()?),
        )
        .init();

    info!("Starting SignalForge site");

    // Load configuration from environment
    let config = Arc::new(Config::from_env()?);

    // Step 1: Load translations once, before serving anything
    let catalog = match &config.locales_dir {
        Some(dir) => {
            info!("Loading translations from {}", dir);
            Catalog::from_dir(dir)
        }
        None => Catalog::embedded(),
    }
    .context("Failed to load translations")?;

    for (locale, section, report) in catalog.validate() {
        for error in &report.errors {
            warn!("Translation {}/{}: {}", locale, section, error);
        }
        for warning in &report.warnings {
            warn!("Translation {}/{}: {}", locale, section, warning);
        }
    }

    // Step 2: Configure the SMTP relay
    let mailer = SmtpMailer::from_config(&config).context("Failed to configure SMTP relay")?;

    // Step 3: Serve
    let state = Arc::new(AppState {
        config: Arc::clone(&config),
        catalog: Arc::new(catalog),
        mailer: Arc::new(mailer),
    });
    let app = build_router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

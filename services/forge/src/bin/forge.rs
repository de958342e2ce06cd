//! services/forge/src/bin/forge.rs

use forge_lib::{
    adapters::{DbAdapter, OpenAiPageAdapter},
    config::Config,
    error::AppError,
    shell::Shell,
    web::{
        contact_router, preview_router, spawn_listener,
        state::{AppState, PreviewState},
    },
};
use page_forge_core::DocumentGenerator;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // --- 1. Load Configuration & Set Up Logging ---
    // Logs go to stderr; stdout belongs to the shell.
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
    info!("Configuration loaded. Starting up...");

    // --- 2. Open the Database & Run Migrations ---
    // A broken database is reported but does not stop the shell.
    let db_adapter = match DbAdapter::connect_lazy(&config.database_url) {
        Ok(adapter) => Arc::new(adapter),
        Err(e) => {
            error!("Invalid DATABASE_URL {}: {}", config.database_url, e);
            eprintln!("Cannot open {}: {e}. Submissions will only be kept in memory.", config.database_url);
            Arc::new(DbAdapter::in_memory())
        }
    };
    info!("Running database migrations...");
    match db_adapter.run_migrations().await {
        Ok(()) => info!("Database initialized."),
        Err(e) => {
            error!("DB init error: {}", e);
            eprintln!("Database initialization failed: {e}");
        }
    }

    // --- 3. Initialize the Text Generation Adapter ---
    if config.llm_api_key().is_none() {
        warn!("Neither OPENAI_API_KEY nor GEMINI_API_KEY is set; generation will fail.");
        eprintln!("Set OPENAI_API_KEY or GEMINI_API_KEY to generate webpages.");
    }
    let page_adapter = Arc::new(OpenAiPageAdapter::from_settings(
        config.llm_api_key(),
        config.llm_api_base.as_deref(),
        config.page_model.clone(),
    ));
    info!("Using model {}", page_adapter.model());
    let generator = DocumentGenerator::new(page_adapter, config.contact_endpoint.clone());

    // --- 4. Start the Background Listeners ---
    let shutdown = CancellationToken::new();
    let app_state = Arc::new(AppState {
        submissions: db_adapter.clone(),
    });
    if let Err(e) = spawn_listener(
        "contact",
        config.contact_address,
        contact_router(app_state),
        shutdown.clone(),
    )
    .await
    {
        error!("HTTP server error: {}", e);
        eprintln!("Failed to start the contact listener on {}: {e}", config.contact_address);
    }

    let (preview_tx, preview_state) = PreviewState::channel();
    if let Err(e) = spawn_listener(
        "preview",
        config.preview_address,
        preview_router(preview_state),
        shutdown.clone(),
    )
    .await
    {
        error!("Preview server error: {}", e);
        eprintln!("Failed to start the preview listener on {}: {e}", config.preview_address);
    }

    // --- 5. Run the Interactive Shell ---
    let shell = Shell::new(
        db_adapter.clone(),
        db_adapter,
        generator,
        config.output_dir.clone(),
        preview_tx,
        config.preview_url(),
    );
    let result = shell.run().await;

    shutdown.cancel();
    info!("Shell closed.");
    result
}

//! GrantFlow HTTP server
//!
//! Accepts PDF uploads over multipart HTTP, tracks each upload as a task in
//! an in-memory store, and evaluates the document against a chat model in
//! the background. Clients poll for the outcome.
//!
//! # Endpoints
//!
//! - `POST /upload` - accept a PDF, return a task id with 202
//! - `GET /result/{task_id}` - current status, result or error of a task
//! - `GET /tasks` - id, status and message of every known task
//! - `GET /health` - liveness probe
//!
//! # Example
//!
//! ```no_run
//! use grantflow_llm::MockProvider;
//! use grantflow_server::{start_server, ServerConfig};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig::default();
//!     start_server(config, Arc::new(MockProvider::new("ok")))
//!         .await
//!         .unwrap();
//! }
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod handlers;

pub use config::{ConfigError, ServerConfig};
pub use handlers::{create_router, AppState};

use grantflow_llm::ChatProvider;
use grantflow_pipeline::Processor;
use grantflow_store::MemoryTaskStore;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tracing::info;

/// Server startup error
#[derive(Debug, Error)]
pub enum ServerError {
    /// Configuration problem
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Failed to bind or serve
    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

/// Start the HTTP server and block until it exits
pub async fn start_server(
    config: ServerConfig,
    provider: Arc<dyn ChatProvider>,
) -> Result<(), ServerError> {
    config.validate()?;
    tokio::fs::create_dir_all(&config.upload_dir).await?;

    let store = Arc::new(Mutex::new(MemoryTaskStore::with_capacity(
        config.store_capacity,
    )));
    let processor = Arc::new(Processor::new(
        provider,
        Arc::clone(&store),
        config.pipeline_config(),
    ));

    let addr = config.bind_addr();
    let state = AppState {
        store,
        processor,
        config: Arc::new(config),
    };

    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("GrantFlow server listening on {}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}

//! GrantFlow Server CLI
//!
//! Starts the HTTP server for PDF upload and background evaluation.

use grantflow_llm::OpenRouterProvider;
use grantflow_server::{start_server, ServerConfig, ServerError};
use std::env;
use std::process;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    // .env is optional; environment variables win when both are set.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), ServerError> {
    // Parse command-line arguments
    let args: Vec<String> = env::args().collect();

    let config = if args.len() > 2 && args[1] == "--config" {
        // Load from specified config file
        let config_path = &args[2];
        ServerConfig::from_file(config_path)?
    } else if args.len() > 1 && args[1] == "--help" {
        print_help();
        process::exit(0);
    } else {
        eprintln!("Warning: No config file specified, using defaults");
        eprintln!("Usage: grantflow-server --config <path-to-config.toml>");
        eprintln!();
        ServerConfig::default()
    };

    let provider = OpenRouterProvider::from_env()
        .map_err(|e| ServerError::Config(grantflow_server::ConfigError::Invalid(e.to_string())))?;

    start_server(config, Arc::new(provider)).await?;

    Ok(())
}

fn print_help() {
    println!("GrantFlow Server - PDF Grant Application Evaluation");
    println!();
    println!("USAGE:");
    println!("    grantflow-server --config <path-to-config.toml>");
    println!();
    println!("OPTIONS:");
    println!("    --config <file>    Load configuration from TOML file");
    println!("    --help             Print this help message");
    println!();
    println!("EXAMPLE:");
    println!("    grantflow-server --config config/server.toml");
    println!();
    println!("CONFIGURATION:");
    println!("    The TOML config file may contain:");
    println!("    - bind_address: IP address to bind (default: '0.0.0.0')");
    println!("    - bind_port: Port number (default: 8000)");
    println!("    - upload_dir: Directory for temporary uploads (default: 'uploads')");
    println!("    - guidelines_dir: Per-organization guideline files (default: 'guidelines')");
    println!("    - default_model: Model used when an upload names none");
    println!("    - default_temperature: Sampling temperature (default: 0.2)");
    println!("    - store_capacity: Maximum task records kept in memory");
    println!("    - llm_timeout_secs: Model call timeout in seconds (default: 300)");
    println!();
    println!("ENVIRONMENT:");
    println!("    OPENROUTER_API_KEY    Required. API key for the model provider.");
    println!("    OPENROUTER_BASE_URL   Optional. Override the provider base URL.");
    println!();
}

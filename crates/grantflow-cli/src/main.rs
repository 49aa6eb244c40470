//! GrantFlow CLI - Command-line client for the GrantFlow evaluation server.

use clap::Parser;
use grantflow_cli::{commands, ApiClient, Cli, Command, Formatter, Session};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> grantflow_cli::Result<()> {
    let cli = Cli::parse();

    let session_path = match cli.session {
        Some(path) => path,
        None => Session::default_path()?,
    };
    let mut session = Session::load(&session_path)?;

    let formatter = Formatter::new(!cli.no_color);
    let client = ApiClient::new(&cli.server);

    match cli.command {
        Command::Health => {
            commands::execute_health(&client, &formatter).await?;
        }
        Command::Prompt(args) => {
            commands::execute_prompt(args)?;
        }
        Command::Upload(args) => {
            commands::execute_upload(args, &client, &mut session, &formatter).await?;
            session.save(&session_path)?;
        }
        Command::Status => {
            commands::execute_status(&client, &mut session, &formatter).await?;
            session.save(&session_path)?;
        }
        Command::Watch(args) => {
            commands::execute_watch(args, &client, &mut session, &formatter).await?;
            session.save(&session_path)?;
        }
        Command::Show(args) => {
            commands::execute_show(args, &client, &mut session, &formatter).await?;
            session.save(&session_path)?;
        }
        Command::Decide(args) => {
            commands::execute_decide(args, &mut session, &formatter)?;
            session.save(&session_path)?;
        }
        Command::Export(args) => {
            commands::execute_export(args, &session, &formatter)?;
        }
    }

    Ok(())
}

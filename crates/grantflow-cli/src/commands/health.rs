//! Health command implementation.

use crate::client::ApiClient;
use crate::error::{CliError, Result};
use crate::output::Formatter;

/// Execute the health command.
pub async fn execute_health(client: &ApiClient, formatter: &Formatter) -> Result<()> {
    match client.health().await {
        Ok(response) => {
            println!("{}", formatter.success(&response.message));
            Ok(())
        }
        Err(CliError::Timeout) => {
            println!(
                "{}",
                formatter.warning("Health check timed out; the server may be cold-starting.")
            );
            Ok(())
        }
        Err(e) => Err(e),
    }
}

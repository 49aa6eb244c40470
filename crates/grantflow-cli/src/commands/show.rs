//! Show command implementation.

use crate::cli::ShowArgs;
use crate::client::ApiClient;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::session::Session;

/// Execute the show command: refresh one task from the server, then print
/// its full detail including the result or error text.
pub async fn execute_show(
    args: ShowArgs,
    client: &ApiClient,
    session: &mut Session,
    formatter: &Formatter,
) -> Result<()> {
    let needs_refresh = session
        .get(&args.task_id)
        .map(|t| !t.is_terminal())
        .ok_or_else(|| CliError::UnknownTask(args.task_id.clone()))?;

    if needs_refresh {
        match client.result(&args.task_id).await {
            Ok(report) => session.apply_report(&report),
            Err(CliError::Timeout) => session.record_poll_timeout(&args.task_id),
            Err(e) => session.record_poll_failure(&args.task_id, &e.to_string()),
        }
    }

    let task = session
        .get(&args.task_id)
        .ok_or_else(|| CliError::UnknownTask(args.task_id.clone()))?;
    print!("{}", formatter.task_detail(task, session));
    Ok(())
}

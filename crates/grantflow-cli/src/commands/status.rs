//! Status and watch command implementations.

use crate::cli::WatchArgs;
use crate::client::ApiClient;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::session::Session;
use std::time::Duration;

/// One reconciliation pass over all tracked non-terminal tasks.
///
/// A polling timeout leaves the task's status untouched (the server may
/// still be processing); any other failure marks the task errored.
pub async fn reconcile_once(client: &ApiClient, session: &mut Session) {
    let ids: Vec<String> = session
        .tasks
        .iter()
        .filter(|t| !t.is_terminal())
        .map(|t| t.task_id.clone())
        .collect();

    for id in ids {
        match client.result(&id).await {
            Ok(report) => session.apply_report(&report),
            Err(CliError::Timeout) => session.record_poll_timeout(&id),
            Err(e) => session.record_poll_failure(&id, &e.to_string()),
        }
    }
}

/// Execute the status command.
pub async fn execute_status(
    client: &ApiClient,
    session: &mut Session,
    formatter: &Formatter,
) -> Result<()> {
    reconcile_once(client, session).await;
    println!("{}", formatter.task_table(&session.tasks));
    Ok(())
}

/// Execute the watch command: a bounded polling loop that stops early once
/// every tracked task is terminal.
pub async fn execute_watch(
    args: WatchArgs,
    client: &ApiClient,
    session: &mut Session,
    formatter: &Formatter,
) -> Result<()> {
    for round in 1..=args.rounds {
        if !session.has_live_tasks() {
            break;
        }
        reconcile_once(client, session).await;
        println!("{}", formatter.info(&format!("round {}/{}", round, args.rounds)));
        println!("{}", formatter.task_table(&session.tasks));

        if session.has_live_tasks() && round < args.rounds {
            tokio::time::sleep(Duration::from_secs(args.interval)).await;
        }
    }

    if session.has_live_tasks() {
        println!(
            "{}",
            formatter.warning("Some tasks are still in flight. Run 'watch' or 'status' again.")
        );
    } else {
        println!("{}", formatter.success("All tracked tasks are done."));
    }
    Ok(())
}

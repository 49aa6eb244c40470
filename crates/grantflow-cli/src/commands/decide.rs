//! Decide command implementation.

use crate::cli::DecideArgs;
use crate::error::Result;
use crate::output::Formatter;
use crate::session::Session;

/// Execute the decide command: record an expert decision for a tracked
/// task. Decisions live only in the local session and CSV exports; the
/// server never sees them.
pub fn execute_decide(args: DecideArgs, session: &mut Session, formatter: &Formatter) -> Result<()> {
    let decision = args.decision.into();
    session.decide(&args.task_id, decision, args.comment.unwrap_or_default())?;
    println!(
        "{}",
        formatter.success(&format!("Recorded '{}' for task {}", decision, args.task_id))
    );
    Ok(())
}

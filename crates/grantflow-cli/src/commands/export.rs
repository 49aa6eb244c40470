//! Export command implementation.

use crate::cli::ExportArgs;
use crate::error::Result;
use crate::output::Formatter;
use crate::session::Session;
use std::path::Path;

/// Execute the export command: write every tracked task with its decision
/// as one CSV row.
pub fn execute_export(args: ExportArgs, session: &Session, formatter: &Formatter) -> Result<()> {
    write_csv(&args.output, session)?;
    println!(
        "{}",
        formatter.success(&format!(
            "Exported {} task(s) to {}",
            session.tasks.len(),
            args.output.display()
        ))
    );
    Ok(())
}

fn write_csv(path: &Path, session: &Session) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["filename", "task_id", "status", "decision", "expert_comment"])?;

    for task in &session.tasks {
        let entry = session.decisions.get(&task.task_id);
        writer.write_record([
            task.filename.as_str(),
            task.task_id.as_str(),
            task.status.as_str(),
            entry.map(|e| e.decision.as_str()).unwrap_or(""),
            entry.map(|e| e.comment.as_str()).unwrap_or(""),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{Decision, TaskItem};

    #[test]
    fn test_export_rows_match_tasks() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("decisions.csv");

        let mut session = Session::default();
        session.add_task(TaskItem::new("t1", "a.pdf"));
        session.add_task(TaskItem::new("t2", "b.pdf"));
        session.decide("t1", Decision::Support, "clear plan").unwrap();

        write_csv(&path, &session).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "filename,task_id,status,decision,expert_comment");
        assert!(lines[1].contains("a.pdf"));
        assert!(lines[1].contains("support"));
        assert!(lines[1].contains("clear plan"));
        assert!(lines[2].contains("b.pdf"));
        assert!(lines[2].ends_with(",,"));
    }
}

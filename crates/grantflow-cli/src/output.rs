//! Output formatting for the CLI.

use crate::session::{Session, TaskItem};
use colored::*;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(color_enabled: bool) -> Self {
        Self { color_enabled }
    }

    /// Format tracked tasks as a table.
    pub fn task_table(&self, tasks: &[TaskItem]) -> String {
        if tasks.is_empty() {
            return self.colorize("No tasks tracked yet. Upload a PDF first.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["Filename", "Task ID", "Status", "Message"]);

        for task in tasks {
            builder.push_record([
                task.filename.as_str(),
                task.task_id.as_str(),
                task.status.as_str(),
                task.message.as_str(),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// Format one task's full detail, including result or error text.
    pub fn task_detail(&self, task: &TaskItem, session: &Session) -> String {
        let mut out = String::new();
        out.push_str(&format!("File:    {}\n", task.filename));
        out.push_str(&format!("Task:    {}\n", task.task_id));
        out.push_str(&format!("Status:  {}\n", self.status_label(&task.status)));
        if !task.message.is_empty() {
            out.push_str(&format!("Message: {}\n", task.message));
        }
        if let Some(entry) = session.decisions.get(&task.task_id) {
            out.push_str(&format!(
                "Decision: {} ({})\n",
                entry.decision, entry.comment
            ));
        }
        if let Some(error) = &task.error {
            out.push('\n');
            out.push_str(&self.error(error));
            out.push('\n');
        }
        match &task.result {
            Some(result) => {
                out.push('\n');
                out.push_str(result);
                out.push('\n');
            }
            None if task.error.is_none() => {
                out.push('\n');
                out.push_str(&self.info("The result will appear once processing completes."));
                out.push('\n');
            }
            None => {}
        }
        out
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    fn status_label(&self, status: &str) -> String {
        let color = match status {
            "completed" => "green",
            "error" => "red",
            "processing" => "blue",
            _ => "yellow",
        };
        self.colorize(status, color)
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "green" => text.green().to_string(),
            "red" => text.red().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

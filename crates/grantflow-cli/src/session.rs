//! Local session state: tracked tasks and expert decisions.
//!
//! The session is the client-side mirror of server task state plus data the
//! server never sees (decisions, comments). It persists across invocations
//! in a TOML file so a batch uploaded in one command can be polled and
//! decided on in later ones.

use crate::client::TaskReport;
use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Expert decision on one application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    /// Fund the application
    Support,
    /// Decline the application
    Reject,
    /// Return for revision
    Revise,
}

impl Decision {
    /// String form used in CSV export.
    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Support => "support",
            Decision::Reject => "reject",
            Decision::Revise => "revise",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Decision with its free-text comment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionEntry {
    /// The decision outcome
    pub decision: Decision,
    /// Expert comment, possibly empty
    #[serde(default)]
    pub comment: String,
}

/// One tracked task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskItem {
    /// Server-assigned task identifier
    pub task_id: String,
    /// Original filename of the upload
    pub filename: String,
    /// Last known status string
    pub status: String,
    /// Last known progress or completion message
    #[serde(default)]
    pub message: String,
    /// Model output, present once completed
    #[serde(default)]
    pub result: Option<String>,
    /// Error description, present once errored
    #[serde(default)]
    pub error: Option<String>,
}

impl TaskItem {
    /// Create a freshly-uploaded task entry.
    pub fn new(task_id: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            task_id: task_id.into(),
            filename: filename.into(),
            status: "pending".to_string(),
            message: String::new(),
            result: None,
            error: None,
        }
    }

    /// Whether the task can no longer change on the server.
    pub fn is_terminal(&self) -> bool {
        self.status == "completed" || self.status == "error"
    }
}

/// Ordering of statuses for the monotonicity guard. Unknown strings rank
/// lowest so they can never displace a known status.
fn status_rank(status: &str) -> u8 {
    match status {
        "pending" => 1,
        "processing" => 2,
        "completed" | "error" => 3,
        _ => 0,
    }
}

/// Persistent session state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Session {
    /// Tracked tasks, in upload order
    #[serde(default)]
    pub tasks: Vec<TaskItem>,

    /// Decisions keyed by task identifier
    #[serde(default)]
    pub decisions: HashMap<String, DecisionEntry>,
}

impl Session {
    /// Default session file path.
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".grantflow").join("session.toml"))
    }

    /// Load the session from a file, or start empty when absent.
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)?;
            Ok(toml::from_str(&contents)?)
        } else {
            Ok(Self::default())
        }
    }

    /// Save the session, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize session: {}", e)))?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Track a new task.
    pub fn add_task(&mut self, task: TaskItem) {
        self.tasks.push(task);
    }

    /// Find a tracked task by identifier.
    pub fn get(&self, task_id: &str) -> Option<&TaskItem> {
        self.tasks.iter().find(|t| t.task_id == task_id)
    }

    fn get_mut(&mut self, task_id: &str) -> Option<&mut TaskItem> {
        self.tasks.iter_mut().find(|t| t.task_id == task_id)
    }

    /// Whether any tracked task is still pending or processing.
    pub fn has_live_tasks(&self) -> bool {
        self.tasks.iter().any(|t| !t.is_terminal())
    }

    /// Apply a server report to the mirror.
    ///
    /// A report whose status would regress the mirror is ignored wholesale;
    /// the local view stays monotonic regardless of what the server says.
    pub fn apply_report(&mut self, report: &TaskReport) {
        let Some(task) = self.get_mut(&report.task_id) else {
            return;
        };

        if status_rank(&report.status) < status_rank(&task.status) {
            warn!(
                task_id = %report.task_id,
                from = %task.status,
                to = %report.status,
                "ignoring status regression from server"
            );
            return;
        }

        task.status = report.status.clone();
        if let Some(message) = &report.message {
            task.message = message.clone();
        }
        if task.status == "completed" {
            task.result = report.result.clone();
        }
        if task.status == "error" {
            task.error = Some(
                report
                    .error
                    .clone()
                    .unwrap_or_else(|| "Unknown error".to_string()),
            );
        }
    }

    /// Note a polling timeout without changing the task's status.
    pub fn record_poll_timeout(&mut self, task_id: &str) {
        if let Some(task) = self.get_mut(task_id) {
            task.message =
                "Request timed out; the server may still be processing. Try again later."
                    .to_string();
        }
    }

    /// Mark a task failed after a confirmed (non-timeout) polling failure.
    pub fn record_poll_failure(&mut self, task_id: &str, error: &str) {
        if let Some(task) = self.get_mut(task_id) {
            task.status = "error".to_string();
            task.error = Some(error.to_string());
        }
    }

    /// Record an expert decision for a tracked task.
    pub fn decide(
        &mut self,
        task_id: &str,
        decision: Decision,
        comment: impl Into<String>,
    ) -> Result<()> {
        if self.get(task_id).is_none() {
            return Err(CliError::UnknownTask(task_id.to_string()));
        }
        self.decisions.insert(
            task_id.to_string(),
            DecisionEntry {
                decision,
                comment: comment.into(),
            },
        );
        Ok(())
    }
}

//! Task module - the unit of asynchronous document processing

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Unique identifier for a processing task, based on UUIDv4
///
/// Task identifiers are opaque tokens handed to clients at upload time and
/// used to poll for results. They carry no ordering or timestamp semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(u128);

impl TaskId {
    /// Generate a new random TaskId
    ///
    /// # Examples
    ///
    /// ```
    /// use grantflow_domain::TaskId;
    ///
    /// let a = TaskId::new();
    /// let b = TaskId::new();
    /// assert_ne!(a, b);
    /// ```
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().as_u128())
    }

    /// Create a TaskId from a raw u128 value
    pub fn from_value(value: u128) -> Self {
        Self(value)
    }

    /// Parse a TaskId from its UUID string form
    ///
    /// # Examples
    ///
    /// ```
    /// use grantflow_domain::TaskId;
    ///
    /// let id = TaskId::new();
    /// let parsed = TaskId::from_string(&id.to_string()).unwrap();
    /// assert_eq!(id, parsed);
    /// ```
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s)
            .map(|u| Self(u.as_u128()))
            .map_err(|e| format!("Invalid task id: {}", e))
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

/// Lifecycle status of a processing task
///
/// The status is monotonic over the task's lifetime:
/// `Pending → Processing → (Completed | Error)`. Terminal states are never
/// left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskStatus {
    /// Created at upload time, not yet picked up
    Pending,

    /// A background unit is working on this task
    Processing,

    /// Finished with a result
    Completed,

    /// Finished with an error
    Error,
}

impl TaskStatus {
    /// Get the status name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Processing => "processing",
            TaskStatus::Completed => "completed",
            TaskStatus::Error => "error",
        }
    }

    /// Parse a status from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(TaskStatus::Pending),
            "processing" => Some(TaskStatus::Processing),
            "completed" => Some(TaskStatus::Completed),
            "error" => Some(TaskStatus::Error),
            _ => None,
        }
    }

    /// Whether this status is terminal (no further transitions allowed)
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskStatus::Completed | TaskStatus::Error)
    }

    /// Whether a transition from `self` to `next` preserves monotonicity
    ///
    /// Re-entering the same non-terminal status is allowed so progress
    /// messages can be updated while processing.
    pub fn can_transition_to(&self, next: TaskStatus) -> bool {
        match (self, next) {
            (TaskStatus::Pending, _) => true,
            (TaskStatus::Processing, next) => next != TaskStatus::Pending,
            _ => false,
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid task status: {}", s))
    }
}

/// A task record - the server-side state of one uploaded document
///
/// Created pending at upload; mutated only through [`TaskRecord::advance`],
/// which enforces the monotonic status lattice. Records are never deleted
/// while their task is live.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskRecord {
    /// Unique identifier, issued at upload
    pub id: TaskId,

    /// Original filename of the uploaded document
    pub filename: String,

    /// Current lifecycle status
    pub status: TaskStatus,

    /// Human-readable progress message
    pub message: String,

    /// Model output, present once completed
    pub result: Option<String>,

    /// Failure cause, present once errored
    pub error: Option<String>,

    /// When this record was created (seconds since Unix epoch)
    pub created_at: u64,
}

impl TaskRecord {
    /// Create a new pending record for an upload
    pub fn new(id: TaskId, filename: impl Into<String>) -> Self {
        Self {
            id,
            filename: filename.into(),
            status: TaskStatus::Pending,
            message: "Task created, waiting to start processing".to_string(),
            result: None,
            error: None,
            created_at: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0),
        }
    }

    /// Advance the record to a new status with a progress message
    ///
    /// Returns `Err` with the offending pair when the transition would
    /// violate monotonicity; the record is left untouched in that case.
    pub fn advance(
        &mut self,
        status: TaskStatus,
        message: impl Into<String>,
    ) -> Result<(), (TaskStatus, TaskStatus)> {
        if !self.status.can_transition_to(status) {
            return Err((self.status, status));
        }
        self.status = status;
        self.message = message.into();
        Ok(())
    }

    /// Mark the task completed with the model's reply text
    pub fn complete(
        &mut self,
        result: impl Into<String>,
        message: impl Into<String>,
    ) -> Result<(), (TaskStatus, TaskStatus)> {
        self.advance(TaskStatus::Completed, message)?;
        self.result = Some(result.into());
        Ok(())
    }

    /// Mark the task failed with the stringified cause
    pub fn fail(&mut self, error: impl Into<String>) -> Result<(), (TaskStatus, TaskStatus)> {
        let error = error.into();
        self.advance(TaskStatus::Error, format!("Error during processing: {}", error))?;
        self.error = Some(error);
        Ok(())
    }
}

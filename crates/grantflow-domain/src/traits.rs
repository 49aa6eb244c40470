//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and
//! infrastructure. Implementations live in other crates.

use crate::{TaskId, TaskRecord, TaskStatus};

/// Trait for storing and retrieving task records
///
/// Implemented by the infrastructure layer (`grantflow-store`). The store
/// is the sole source of truth for processing state; implementations must
/// enforce the monotonic status lattice on every transition.
pub trait TaskStore {
    /// Error type for store operations
    type Error;

    /// Insert a freshly created record; the id must be previously unissued
    fn create(&mut self, record: TaskRecord) -> Result<TaskId, Self::Error>;

    /// Get a record by id
    fn get(&self, id: TaskId) -> Result<Option<TaskRecord>, Self::Error>;

    /// Advance a record to a new status with a progress message
    fn advance(
        &mut self,
        id: TaskId,
        status: TaskStatus,
        message: &str,
    ) -> Result<(), Self::Error>;

    /// Mark a record completed with the model's reply text
    fn complete(&mut self, id: TaskId, result: &str, message: &str) -> Result<(), Self::Error>;

    /// Mark a record failed with the stringified cause
    fn fail(&mut self, id: TaskId, error: &str) -> Result<(), Self::Error>;

    /// List every known record, oldest first
    fn list(&self) -> Result<Vec<TaskRecord>, Self::Error>;
}

//! GrantFlow Store
//!
//! In-memory implementation of the `TaskStore` boundary. The store is the
//! sole source of truth for task state; it enforces the monotonic status
//! lattice and carries an explicit capacity policy so the map cannot grow
//! without bound over the process lifetime.
//!
//! A durable backing store can be substituted by implementing
//! `grantflow_domain::TaskStore` without touching callers.

#![warn(missing_docs)]

mod memory;

pub use memory::{MemoryTaskStore, DEFAULT_CAPACITY};

use grantflow_domain::{TaskId, TaskStatus};
use thiserror::Error;

/// Errors that can occur during store operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No record exists for the given id
    #[error("Task not found: {0}")]
    NotFound(TaskId),

    /// A record with this id already exists
    #[error("Task id already issued: {0}")]
    DuplicateId(TaskId),

    /// The requested transition would violate monotonicity
    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition {
        /// Status the record currently holds
        from: TaskStatus,
        /// Status the caller tried to move to
        to: TaskStatus,
    },

    /// The store is full and every record is still live
    #[error("Store capacity exhausted: {0} live tasks")]
    CapacityExhausted(usize),
}

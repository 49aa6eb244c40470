//! GrantFlow Domain Layer
//!
//! Core types and trait seams for the grant-review pipeline. This crate
//! keeps dependencies minimal (only `uuid`) and defines the vocabulary that
//! all other layers share.
//!
//! ## Key Concepts
//!
//! - **Task**: one uploaded document's asynchronous lifecycle, from upload
//!   to a terminal status
//! - **Status lattice**: `pending → processing → (completed | error)`,
//!   strictly monotonic
//! - **Organization tag**: selects which guideline text is injected into
//!   the evaluation prompt
//! - **Document kind**: selects the text-extraction strategy (generic vs.
//!   layout-preserving)
//!
//! Infrastructure implementations (in-memory store, HTTP providers) live in
//! other crates; this one only defines the `TaskStore` boundary.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod chat;
pub mod document;
pub mod organization;
pub mod task;
pub mod traits;

// Re-exports for convenience
pub use chat::{ChatMessage, ChatRole};
pub use document::DocumentKind;
pub use organization::Organization;
pub use task::{TaskId, TaskRecord, TaskStatus};
pub use traits::TaskStore;

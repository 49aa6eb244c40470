//! GrantFlow CLI library.
//!
//! Command-line client for the GrantFlow server: upload PDF grant
//! applications, poll their evaluation status, record expert decisions,
//! and export everything as CSV. Task state and decisions persist in a
//! local session file between invocations.

pub mod cli;
pub mod client;
pub mod commands;
pub mod error;
pub mod output;
pub mod prompt_form;
pub mod session;

pub use cli::{Cli, Command};
pub use client::ApiClient;
pub use error::{CliError, Result};
pub use output::Formatter;
pub use session::Session;

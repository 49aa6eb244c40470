//! Command implementations.

mod decide;
mod export;
mod health;
mod prompt;
mod show;
mod status;
mod upload;

pub use decide::execute_decide;
pub use export::execute_export;
pub use health::execute_health;
pub use prompt::execute_prompt;
pub use show::execute_show;
pub use status::{execute_status, execute_watch, reconcile_once};
pub use upload::execute_upload;

//! Command handlers.
//!
//! Handlers follow one pattern:
//! - Signature: `pub async fn execute(ctx: &CliContext, ...) -> Result<()>`
//! - Parse CLI-specific input, call `AppCore` or a session, format output
//!
//! Handlers never touch repositories or the database directly.

pub mod catalog;
pub mod encourage;
pub mod paths;
pub mod phrases;
pub mod play;
pub mod settings;

//! Paths command handler.

use anyhow::Result;
use solace_core::paths::DATA_DIR_ENV;
use solace_tts::API_KEY_ENV;

use crate::bootstrap::CliContext;

/// Print the resolved data locations.
pub fn execute(ctx: &CliContext) -> Result<()> {
    println!("Data directory: {}", ctx.config.data_dir.display());
    println!("Database:       {}", ctx.config.database_path().display());
    println!("Env file:       {}", ctx.config.data_dir.join(".env").display());
    println!();
    println!("Override the data directory with {DATA_DIR_ENV} or --data-dir.");
    if !ctx.config.tts.has_api_key() {
        println!("Set {API_KEY_ENV} to enable spoken encouragements.");
    }
    Ok(())
}

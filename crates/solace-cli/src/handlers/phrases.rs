//! Custom phrase command handler.

use anyhow::{Context, Result};
use solace_core::services::split_import_text;

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::phrase_commands::PhrasesCommand;
use crate::presentation::{format_timestamp, print_separator, truncate_string};

/// Execute a phrases subcommand.
pub async fn execute(ctx: &CliContext, command: PhrasesCommand) -> Result<()> {
    let phrases = ctx.app().phrases();
    match command {
        PhrasesCommand::List => {
            let list = phrases.list().await.map_err(CliError::from)?;
            if list.is_empty() {
                println!("No custom phrases yet. Add one with 'solace phrases add \"...\"'.");
                return Ok(());
            }
            println!("{:<36}  {:<16}  Text", "ID", "Added");
            print_separator(100);
            for phrase in &list {
                println!(
                    "{:<36}  {:<16}  {}",
                    phrase.id,
                    format_timestamp(phrase.created_at),
                    truncate_string(&phrase.text, 44)
                );
            }
            println!();
            println!("{} phrase(s)", list.len());
        }
        PhrasesCommand::Add { text } => {
            let phrase = phrases.add(&text).await.map_err(CliError::from)?;
            println!("✓ Added phrase {}", phrase.id);
        }
        PhrasesCommand::Edit { id, text } => {
            phrases.update(&id, &text).await.map_err(CliError::from)?;
            println!("✓ Updated phrase {id}");
        }
        PhrasesCommand::Remove { id } => {
            phrases.delete(&id).await.map_err(CliError::from)?;
            println!("✓ Removed phrase {id}");
        }
        PhrasesCommand::Import { file } => {
            let text = tokio::fs::read_to_string(&file)
                .await
                .map_err(CliError::from)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let lines = split_import_text(&text);
            let added = phrases.import(&lines).await.map_err(CliError::from)?;
            println!(
                "✓ Imported {added} phrase(s), skipped {}",
                lines.len().saturating_sub(added)
            );
        }
        PhrasesCommand::Export { output } => {
            let text = phrases.export().await.map_err(CliError::from)?;
            match output {
                Some(path) => {
                    tokio::fs::write(&path, format!("{text}\n"))
                        .await
                        .map_err(CliError::from)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    println!("✓ Exported to {}", path.display());
                }
                None => println!("{text}"),
            }
        }
    }
    Ok(())
}

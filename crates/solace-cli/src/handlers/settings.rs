//! Settings command handler.

use anyhow::Result;
use solace_core::{PlaybackSettings, SettingsUpdate, VoiceMode};

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::settings_commands::{SettingField, SettingsCommand};

/// Execute a settings subcommand.
pub async fn execute(ctx: &CliContext, command: SettingsCommand) -> Result<()> {
    match command {
        SettingsCommand::Show { json } => {
            let settings = ctx.app().settings().get().await.map_err(CliError::from)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&settings)?);
            } else {
                print_settings(&settings);
            }
        }
        SettingsCommand::Set { field, value } => {
            let update = parse_update(field, &value)?;
            let (previous, current) = ctx
                .app()
                .settings()
                .update(update)
                .await
                .map_err(CliError::from)?;
            tracing::debug!(?field, "Setting updated");
            if previous == current {
                println!("No change.");
            } else {
                println!("✓ Updated.");
                print_settings(&current);
            }
        }
        SettingsCommand::Reset => {
            let settings = ctx.app().settings().reset().await.map_err(CliError::from)?;
            println!("✓ Settings reset to defaults.");
            print_settings(&settings);
        }
    }
    Ok(())
}

fn print_settings(settings: &PlaybackSettings) {
    println!("Sound:              {}", settings.selected_sound);
    println!("Background volume:  {:.2}", settings.background_volume);
    println!("Voice:              {}", settings.selected_voice);
    println!("Voice volume:       {:.2}", settings.voice_volume);
    println!(
        "Mode:               {} ({})",
        settings.voice_mode,
        settings.voice_mode.description()
    );
    println!(
        "Frequency:          every {} min",
        settings.encouragement_frequency_minutes
    );
    println!(
        "Name:               {}",
        settings.display_name().unwrap_or("(not set)")
    );
    println!("Custom phrases:     {}", settings.use_custom_phrases);
    println!("Playing:            {}", settings.is_playing);
}

/// Turn `field value` into a partial update. Range checks happen in the
/// settings service.
pub fn parse_update(field: SettingField, value: &str) -> Result<SettingsUpdate, CliError> {
    let value = value.trim();
    let mut update = SettingsUpdate::default();
    match field {
        SettingField::Sound => update.selected_sound = Some(value.to_string()),
        SettingField::BackgroundVolume => update.background_volume = Some(parse_volume(value)?),
        SettingField::VoiceVolume => update.voice_volume = Some(parse_volume(value)?),
        SettingField::Voice => update.selected_voice = Some(value.to_lowercase()),
        SettingField::Mode => {
            let mode = VoiceMode::parse(value).ok_or_else(|| {
                CliError::Arguments(format!(
                    "unknown mode '{value}' (expected gentle, motivating or calm)"
                ))
            })?;
            update.voice_mode = Some(mode);
        }
        SettingField::Frequency => {
            let minutes = value
                .parse::<u32>()
                .map_err(|_| CliError::Arguments(format!("'{value}' is not a number of minutes")))?;
            update.encouragement_frequency_minutes = Some(minutes);
        }
        SettingField::Name => update.user_name = Some(value.to_string()),
        SettingField::CustomPhrases => update.use_custom_phrases = Some(parse_bool(value)?),
        SettingField::Playing => update.is_playing = Some(parse_bool(value)?),
    }
    Ok(update)
}

fn parse_volume(value: &str) -> Result<f32, CliError> {
    value
        .parse::<f32>()
        .map_err(|_| CliError::Arguments(format!("'{value}' is not a volume between 0.0 and 1.0")))
}

fn parse_bool(value: &str) -> Result<bool, CliError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Ok(true),
        "false" | "off" | "no" | "0" => Ok(false),
        _ => Err(CliError::Arguments(format!("'{value}' is not true or false"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_volume() {
        let update = parse_update(SettingField::BackgroundVolume, "0.25").unwrap();
        assert_eq!(update.background_volume, Some(0.25));
        assert!(parse_update(SettingField::VoiceVolume, "loud").is_err());
    }

    #[test]
    fn test_parse_mode_and_frequency() {
        let update = parse_update(SettingField::Mode, "Calm").unwrap();
        assert_eq!(update.voice_mode, Some(VoiceMode::Calm));

        let update = parse_update(SettingField::Frequency, " 10 ").unwrap();
        assert_eq!(update.encouragement_frequency_minutes, Some(10));

        let err = parse_update(SettingField::Frequency, "-1").unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_parse_bool_variants() {
        assert_eq!(
            parse_update(SettingField::CustomPhrases, "on").unwrap().use_custom_phrases,
            Some(true)
        );
        assert_eq!(
            parse_update(SettingField::Playing, "no").unwrap().is_playing,
            Some(false)
        );
        assert!(parse_update(SettingField::Playing, "maybe").is_err());
    }

    #[test]
    fn test_empty_name_clears_personalization() {
        let update = parse_update(SettingField::Name, "   ").unwrap();
        assert_eq!(update.user_name.as_deref(), Some(""));
    }
}

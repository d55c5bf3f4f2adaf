//! Config command implementation.

use crate::cli::{ConfigAction, Output};
use crate::config::Settings;
use anyhow::Result;

/// Run the config command.
pub fn run_config(action: &ConfigAction, settings: Settings) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let content = toml::to_string_pretty(&settings)?;
            println!("{}", content);
        }

        ConfigAction::Path => {
            println!("{}", Settings::default_config_path().display());
        }

        ConfigAction::Edit => {
            let path = Settings::default_config_path();

            // Seed the file with current settings so the editor opens
            // something meaningful.
            if !path.exists() {
                settings.save_to(&path)?;
                Output::info(&format!("Created {}", path.display()));
            }

            let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vi".to_string());
            let status = std::process::Command::new(&editor).arg(&path).status()?;

            if !status.success() {
                Output::warning(&format!("{} exited with an error", editor));
            }
        }
    }

    Ok(())
}

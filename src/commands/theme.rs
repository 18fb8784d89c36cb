use crate::config::{load_settings, save_settings};
use crate::ui::Theme;
use anyhow::{bail, Result};
use colored::Colorize;

pub struct ThemeCommand;

impl ThemeCommand {
    /// Show the current theme, or persist `name` as the new one
    pub fn execute(name: Option<String>) -> Result<()> {
        let mut settings = load_settings();

        let Some(name) = name else {
            println!("{} {}", "Current theme:".cyan(), settings.theme.name().bold());
            println!("\nAvailable themes:");
            for theme in Theme::all() {
                let marker = if theme == settings.theme { "*" } else { " " };
                println!(" {} {}", marker.green(), theme.name());
            }
            return Ok(());
        };

        let Some(theme) = Theme::from_name(&name) else {
            bail!("Unknown theme '{}'", name);
        };

        settings.theme = theme;
        save_settings(&settings)?;
        println!("{} {}", "Theme set to".green(), theme.name().bold());
        Ok(())
    }
}

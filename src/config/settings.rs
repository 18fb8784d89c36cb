use crate::ui::{MatchMode, PageConfig, Theme};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub theme: Theme,
    /// Logical units covered by one terminal column
    pub cell_width: f32,
    /// Logical units covered by one terminal row
    pub cell_height: f32,
    pub frame_interval_ms: u64,
    pub carousel_duration_ms: u64,
    pub grid_prefetch_rows_above: usize,
    pub grid_prefetch_rows_below: usize,
    /// Grid travel per wheel notch, in units
    pub wheel_step: f32,
    pub newly_added_limit: usize,
    pub match_mode: MatchMode,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::Default,
            cell_width: 8.0,
            cell_height: 16.0,
            frame_interval_ms: 16,
            carousel_duration_ms: 200,
            grid_prefetch_rows_above: 1,
            grid_prefetch_rows_below: 2,
            wheel_step: 90.0,
            newly_added_limit: 10,
            match_mode: MatchMode::Contains,
        }
    }
}

impl Settings {
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms.max(1))
    }

    /// Controller configuration derived from these settings
    pub fn page_config(&self) -> PageConfig {
        let mut config = PageConfig::default();
        config.scale.unit_width = self.cell_width.max(1.0);
        config.scale.unit_height = self.cell_height.max(1.0);
        config.carousel.scroll_duration = Duration::from_millis(self.carousel_duration_ms);
        config.grid.prefetch_rows_above = self.grid_prefetch_rows_above;
        config.grid.prefetch_rows_below = self.grid_prefetch_rows_below;
        config.grid.wheel_step = self.wheel_step;
        config.newly_added_limit = self.newly_added_limit;
        config.match_mode = self.match_mode;
        config
    }
}

/// Get the path to the settings file
pub fn settings_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?
        .join("catview");

    Ok(config_dir.join("settings.json"))
}

/// Load settings from disk
/// Falls back to default settings if file doesn't exist or is invalid
pub fn load_settings() -> Settings {
    match settings_path() {
        Ok(path) => load_settings_from(&path),
        Err(e) => {
            tracing::warn!("{e}, using default settings");
            Settings::default()
        }
    }
}

pub fn load_settings_from(path: &Path) -> Settings {
    if !path.exists() {
        return Settings::default();
    }

    let parsed = fs::read_to_string(path)
        .map_err(anyhow::Error::from)
        .and_then(|content| serde_json::from_str(&content).map_err(anyhow::Error::from));
    match parsed {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!(path = %path.display(), "Ignoring unreadable settings: {e}");
            Settings::default()
        }
    }
}

/// Save settings to disk
pub fn save_settings(settings: &Settings) -> Result<()> {
    save_settings_to(settings, &settings_path()?)
}

pub fn save_settings_to(settings: &Settings, path: &Path) -> Result<()> {
    // Create config directory if it doesn't exist
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
    }
    let json = serde_json::to_string_pretty(settings)?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), "Settings saved");
    Ok(())
}

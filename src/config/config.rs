use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::storage::DEFAULT_ITEMS_KEY;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub display: DisplayConfig,
    pub storage: StorageConfig,
    pub theme: ThemeConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Use Unicode glyphs for icons
    pub use_glyphs: bool,

    /// Show "n of m items" in the list title
    pub show_item_count: bool,

    /// Icons for row affordances and notices (can be overridden)
    pub icons: IconConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IconConfig {
    pub delete: String,
    pub edit: String,
    pub warning: String,
    pub info: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Key the item list is stored under
    pub key: String,

    /// Storage file (defaults to the data directory)
    pub path: Option<PathBuf>,

    /// Refuse to grow the storage file beyond this many bytes
    pub quota_bytes: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Color of the selected row: "yellow", "cyan", "green", ...
    pub highlight_color: String,

    /// Color of the row being edited
    pub editing_color: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            display: DisplayConfig::default(),
            storage: StorageConfig::default(),
            theme: ThemeConfig::default(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            use_glyphs: true,
            show_item_count: true,
            icons: IconConfig::default(),
        }
    }
}

impl Default for IconConfig {
    fn default() -> Self {
        Self {
            delete: "✖".to_string(),
            edit: "✎".to_string(),
            warning: "⚠️".to_string(),
            info: "ℹ️".to_string(),
        }
    }
}

impl IconConfig {
    /// Get simple ASCII alternatives for terminals without glyph support
    pub fn simple() -> Self {
        Self {
            delete: "[x]".to_string(),
            edit: "[e]".to_string(),
            warning: "[!]".to_string(),
            info: "[i]".to_string(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            key: DEFAULT_ITEMS_KEY.to_string(),
            path: None,
            quota_bytes: None,
        }
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            highlight_color: "yellow".to_string(),
            editing_color: "cyan".to_string(),
        }
    }
}

impl Config {
    /// Load config from the default location
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            // Create default config if it doesn't exist
            let default_config = Self::default();
            default_config.save()?;
            return Ok(default_config);
        }

        let contents = fs::read_to_string(&config_path)?;
        Self::from_toml(&contents)
    }

    /// Parse config text, applying the ASCII icon set when glyphs are off
    pub fn from_toml(contents: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(contents)?;
        if !config.display.use_glyphs {
            config.display.icons = IconConfig::simple();
        }
        Ok(config)
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;

        // Ensure parent directory exists
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(&config_path, contents)?;

        Ok(())
    }

    /// Get the default config file path
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("shopping-list").join("config.toml"))
    }

    /// Create a default config file with comments
    pub fn create_default_with_comments() -> String {
        r#"# Shopping List Configuration File
# Location: ~/.config/shopping-list/config.toml (Linux)
#           %APPDATA%\shopping-list\config.toml (Windows)

[display]
# Use Unicode glyphs for icons
# Set to false for ASCII-only mode (better compatibility)
use_glyphs = true

# Show how many items the filter lets through in the list title
show_item_count = true

# Icon configuration
# These are automatically set to ASCII when use_glyphs = false
[display.icons]
delete = "✖"
edit = "✎"
warning = "⚠️"
info = "ℹ️"

[storage]
# Key the list is stored under inside the storage file
key = "items"

# Storage file (leave commented to use the data directory)
# path = "/path/to/storage.json"

# Maximum size of the storage file in bytes; past it the list is kept in
# memory only until exit
# quota_bytes = 5242880

[theme]
# Colors: "yellow", "red", "green", "blue", "magenta", "cyan", "white"
highlight_color = "yellow"
editing_color = "cyan"
"#
        .to_string()
    }
}

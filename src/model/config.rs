use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Configuration from config.toml in the data directory
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Default: see src/templates/config.toml
    #[serde(default = "default_true")]
    pub show_key_hints: bool,
    /// Default: see src/templates/config.toml
    #[serde(default = "default_true")]
    pub show_footer: bool,
    /// Color overrides by theme slot name, as `#RRGGBB`
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            show_key_hints: true,
            show_footer: true,
            colors: HashMap::new(),
        }
    }
}

/// Default: see src/templates/config.toml
fn default_true() -> bool {
    true
}

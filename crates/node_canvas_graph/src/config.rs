// SPDX-License-Identifier: MIT OR Apache-2.0
//! Editor configuration.

use crate::error::ConfigError;
use egui::Vec2;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Result type for configuration loading
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Settings used by the default delegate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Width and height of newly created nodes
    pub default_node_size: [f32; 2],
    /// Input slots given to newly created nodes
    pub default_input_slots: usize,
    /// Name prefix for newly created nodes
    pub new_node_prefix: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            default_node_size: [180.0, 120.0],
            default_input_slots: 2,
            new_node_prefix: "Node".to_string(),
        }
    }
}

impl EditorConfig {
    /// Parse from RON
    pub fn from_ron(source: &str) -> Result<Self> {
        Ok(ron::from_str(source)?)
    }

    /// Serialize to pretty-printed RON
    pub fn to_ron(&self) -> Result<String> {
        Ok(ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?)
    }

    /// Load from a RON file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_ron(&contents)?;
        tracing::info!("Loaded editor config from {:?}", path);
        Ok(config)
    }

    /// Default node size as a vector
    pub fn node_size(&self) -> Vec2 {
        Vec2::new(self.default_node_size[0], self.default_node_size[1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config() {
        let config = EditorConfig::from_ron("(default_input_slots: 4)").unwrap();
        assert_eq!(config.default_input_slots, 4);
        assert_eq!(config.new_node_prefix, "Node");
        assert_eq!(config.node_size(), Vec2::new(180.0, 120.0));
    }

    #[test]
    fn test_full_config() {
        let config = EditorConfig::from_ron(
            r#"(default_node_size: (200.0, 80.0), default_input_slots: 1, new_node_prefix: "Filter")"#,
        )
        .unwrap();
        assert_eq!(config.node_size(), Vec2::new(200.0, 80.0));
        assert_eq!(config.new_node_prefix, "Filter");
    }

    #[test]
    fn test_config_serialization() {
        let config = EditorConfig {
            default_node_size: [220.0, 90.0],
            default_input_slots: 5,
            new_node_prefix: "Shader".to_string(),
        };
        let ron = config.to_ron().unwrap();
        let loaded = EditorConfig::from_ron(&ron).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_invalid_config() {
        assert!(matches!(
            EditorConfig::from_ron("(default_input_slots: \"many\")"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            EditorConfig::load(Path::new("/nonexistent/node_canvas.ron")),
            Err(ConfigError::Io(_))
        ));
    }
}

//! Editor tunables.

use crate::error::{ConfigError, ConfigResult};
use crate::input::Modifiers;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default hit radius of a node in canvas units.
pub const DEFAULT_NODE_RADIUS: f64 = 30.0;
/// Default interval between session ticks (~60 Hz).
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 16;

/// Which modifier key turns a selection gesture into a toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ModifyKey {
    #[default]
    Ctrl,
    Meta,
}

impl ModifyKey {
    /// Check whether this key is held in the given modifier state.
    pub fn is_held(self, modifiers: Modifiers) -> bool {
        match self {
            ModifyKey::Ctrl => modifiers.ctrl,
            ModifyKey::Meta => modifiers.meta,
        }
    }
}

/// Editor configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Radius of a node circle; also the hit-test radius.
    pub node_radius: f64,
    /// Outer radius of the selection halo drawn around selected nodes.
    pub select_halo_radius: f64,
    /// Tick interval while a drag is active, in milliseconds.
    pub drag_tick_ms: u64,
    /// Tick interval while a sweep selection is active, in milliseconds.
    pub select_tick_ms: u64,
    /// Length of the arrow head along the arc.
    pub arrow_height: f64,
    /// Half-width of the arrow head.
    pub arrow_width: f64,
    /// How far the arrow tip is pulled back from the node rim.
    pub arrow_recess: f64,
    /// Length of the glyph drawn for a terminal choice.
    pub terminal_glyph_length: f64,
    /// Modifier that toggles instead of replacing the selection.
    pub modify_key: ModifyKey,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            node_radius: DEFAULT_NODE_RADIUS,
            select_halo_radius: 36.0,
            drag_tick_ms: DEFAULT_TICK_INTERVAL_MS,
            select_tick_ms: DEFAULT_TICK_INTERVAL_MS,
            arrow_height: 12.0,
            arrow_width: 6.0,
            arrow_recess: 2.0,
            terminal_glyph_length: 20.0,
            modify_key: ModifyKey::default(),
        }
    }
}

impl EditorConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to pretty JSON.
    pub fn to_json(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the editor cannot work with.
    pub fn validate(&self) -> ConfigResult<()> {
        if !(self.node_radius > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "node_radius must be positive, got {}",
                self.node_radius
            )));
        }
        if !(self.select_halo_radius > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "select_halo_radius must be positive, got {}",
                self.select_halo_radius
            )));
        }
        if self.drag_tick_ms == 0 || self.select_tick_ms == 0 {
            return Err(ConfigError::Invalid(
                "tick intervals must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Drag tick interval as a duration.
    pub fn drag_interval(&self) -> Duration {
        Duration::from_millis(self.drag_tick_ms)
    }

    /// Sweep selection tick interval as a duration.
    pub fn select_interval(&self) -> Duration {
        Duration::from_millis(self.select_tick_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(EditorConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = EditorConfig::from_json(r#"{ "node_radius": 12.5 }"#).unwrap();
        assert!((config.node_radius - 12.5).abs() < f64::EPSILON);
        assert_eq!(config.drag_tick_ms, DEFAULT_TICK_INTERVAL_MS);
        assert_eq!(config.modify_key, ModifyKey::Ctrl);
    }

    #[test]
    fn test_rejects_bad_radius() {
        let err = EditorConfig::from_json(r#"{ "node_radius": 0.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_zero_tick() {
        let err = EditorConfig::from_json(r#"{ "select_tick_ms": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_malformed_json() {
        let err = EditorConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Serialization(_)));
    }

    #[test]
    fn test_json_roundtrip() {
        let config = EditorConfig {
            modify_key: ModifyKey::Meta,
            ..Default::default()
        };
        let json = config.to_json().unwrap();
        assert_eq!(EditorConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_modify_key_held() {
        let mods = Modifiers {
            ctrl: true,
            ..Default::default()
        };
        assert!(ModifyKey::Ctrl.is_held(mods));
        assert!(!ModifyKey::Meta.is_held(mods));
    }
}

//! User configuration — stack tuning and persistence.
//!
//! Values are stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/card-stack/config.toml` (default
//! `~/.config/card-stack/config.toml`).  Unknown keys are ignored and
//! malformed values fall back to defaults — a bad config file must never
//! keep the viewer from starting.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::stack::config::{Offset, StackConfig};

/// Persisted, user-tunable settings.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Vertical space after each non-last card, virtual pixels.
    pub item_gap: f64,
    /// Per-index scale delta.
    pub item_scale_step: f64,
    /// Per-index pin-trigger stagger, virtual pixels.
    pub item_stack_offset: f64,
    /// Pin-trigger distance as a fraction of viewport height.
    pub trigger_fraction: f64,
    /// Scale-complete distance as a fraction of viewport height.
    pub scale_complete_fraction: f64,
    /// Minimum card scale.
    pub base_scale: f64,
    /// Virtual pixels per wheel notch / j,k press.
    pub wheel_step_px: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            item_gap: 100.0,
            item_scale_step: 0.03,
            item_stack_offset: 30.0,
            trigger_fraction: 0.20,
            scale_complete_fraction: 0.10,
            base_scale: 0.85,
            wheel_step_px: 48.0,
        }
    }
}

impl AppConfig {
    /// Location of the config file.
    pub fn config_path() -> Option<PathBuf> {
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("card-stack").join("config.toml"))
    }

    /// Load from disk, falling back to defaults for anything missing or
    /// unparseable.
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };
        match std::fs::read_to_string(&path) {
            Ok(text) => {
                tracing::debug!("loaded config from {}", path.display());
                Self::from_str_lossy(&text)
            }
            Err(_) => Self::default(),
        }
    }

    /// Parse `key = value` lines; `#` starts a comment.
    pub fn from_str_lossy(text: &str) -> Self {
        let mut values: HashMap<&str, f64> = HashMap::new();
        for line in text.lines() {
            let line = line.split('#').next().unwrap_or("").trim();
            if line.is_empty() {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            if let Ok(v) = value.trim().parse::<f64>() {
                values.insert(key.trim_end(), v);
            }
        }

        let d = Self::default();
        let get = |key: &str, fallback: f64| values.get(key).copied().unwrap_or(fallback);
        Self {
            item_gap: get("item_gap", d.item_gap),
            item_scale_step: get("item_scale_step", d.item_scale_step),
            item_stack_offset: get("item_stack_offset", d.item_stack_offset),
            trigger_fraction: get("trigger_fraction", d.trigger_fraction),
            scale_complete_fraction: get("scale_complete_fraction", d.scale_complete_fraction),
            base_scale: get("base_scale", d.base_scale),
            wheel_step_px: get("wheel_step_px", d.wheel_step_px),
        }
    }

    /// The engine configuration these settings describe.
    pub fn stack_config(&self) -> StackConfig {
        StackConfig {
            item_gap: self.item_gap,
            item_scale_step: self.item_scale_step,
            item_stack_offset: self.item_stack_offset,
            trigger_offset: Offset::ViewportFraction(self.trigger_fraction),
            scale_complete_offset: Offset::ViewportFraction(self.scale_complete_fraction),
            base_scale: self.base_scale,
        }
        .sanitized()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_keys() {
        let config = AppConfig::from_str_lossy(
            "item_gap = 80\nbase_scale = 0.9  # shrink less\nwheel_step_px = 32\n",
        );
        assert_eq!(config.item_gap, 80.0);
        assert_eq!(config.base_scale, 0.9);
        assert_eq!(config.wheel_step_px, 32.0);
        // Untouched keys keep their defaults.
        assert_eq!(config.item_scale_step, 0.03);
    }

    #[test]
    fn ignores_junk_lines() {
        let config = AppConfig::from_str_lossy("# comment only\nnot a pair\nitem_gap = what\n");
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn stack_config_uses_viewport_fractions() {
        let config = AppConfig::default().stack_config();
        assert_eq!(config.trigger_offset, Offset::ViewportFraction(0.20));
        assert_eq!(config.scale_complete_offset, Offset::ViewportFraction(0.10));
    }
}

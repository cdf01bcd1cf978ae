use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ControlError;

/// Layout and glyphs of the control bar. Every field falls back to its default when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub paused_glyph: String,
    pub playing_glyph: String,
    pub skip_buttons: Vec<SkipButtonConfig>,
    pub sliders: Vec<SliderConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkipButtonConfig {
    pub label: String,
    /// Signed seconds, kept as text and parsed on click.
    pub skip: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliderConfig {
    /// Name of the element field the slider drives, e.g. `volume` or `playbackRate`.
    pub name: String,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub value: f64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            paused_glyph: "►".to_string(),
            playing_glyph: "❚ ❚".to_string(),
            skip_buttons: vec![
                SkipButtonConfig {
                    label: "« 10s".to_string(),
                    skip: "-10".to_string(),
                },
                SkipButtonConfig {
                    label: "25s »".to_string(),
                    skip: "25".to_string(),
                },
            ],
            sliders: vec![
                SliderConfig {
                    name: "volume".to_string(),
                    min: 0.0,
                    max: 1.0,
                    step: 0.05,
                    value: 1.0,
                },
                SliderConfig {
                    name: "playbackRate".to_string(),
                    min: 0.5,
                    max: 2.0,
                    step: 0.1,
                    value: 1.0,
                },
            ],
        }
    }
}

impl PlayerConfig {
    pub fn load(path: &Path) -> Result<Self, ControlError> {
        let text = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&text)?;
        log::info!("Loaded control config from {}", path.display());
        Ok(config)
    }

    /// Loads `path` if given, otherwise returns the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ControlError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}

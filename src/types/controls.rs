use std::fmt;
use std::str::FromStr;

use crate::error::ControlError;
use crate::types::config::PlayerConfig;

/// Element field a slider is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliderName {
    Volume,
    PlaybackRate,
}

impl FromStr for SliderName {
    type Err = ControlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "volume" => Ok(SliderName::Volume),
            "playbackRate" => Ok(SliderName::PlaybackRate),
            other => Err(ControlError::UnknownSlider(other.to_string())),
        }
    }
}

impl fmt::Display for SliderName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SliderName::Volume => write!(f, "volume"),
            SliderName::PlaybackRate => write!(f, "playbackRate"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToggleControl {
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkipControl {
    pub label: String,
    pub skip: String,
}

impl SkipControl {
    /// Signed offset in seconds carried by the `skip` attribute.
    pub fn offset(&self) -> Result<f64, ControlError> {
        self.skip
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| ControlError::InvalidSkip(self.skip.clone()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SliderControl {
    pub name: SliderName,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub value: f64,
}

/// Seek bar. The fill is kept in `[0, 100]`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProgressIndicator {
    fill_percent: f64,
}

impl ProgressIndicator {
    pub fn fill_percent(&self) -> f64 {
        self.fill_percent
    }

    /// Sets the fill from a playback position. Unknown or zero durations yield an empty bar.
    pub fn set_progress(&mut self, current_time: f64, duration: f64) {
        let percent = current_time / duration * 100.0;
        self.fill_percent = if percent.is_finite() {
            percent.clamp(0.0, 100.0)
        } else {
            0.0
        };
    }
}

/// The widget tree rendered by the control bar.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlSurface {
    pub toggle: ToggleControl,
    pub skips: Vec<SkipControl>,
    pub progress: ProgressIndicator,
    pub sliders: Vec<SliderControl>,
}

impl ControlSurface {
    pub fn from_config(config: &PlayerConfig) -> Result<Self, ControlError> {
        let skips = config
            .skip_buttons
            .iter()
            .map(|b| SkipControl {
                label: b.label.clone(),
                skip: b.skip.clone(),
            })
            .collect();

        let sliders = config
            .sliders
            .iter()
            .map(|s| {
                Ok(SliderControl {
                    name: s.name.parse()?,
                    min: s.min,
                    max: s.max,
                    step: s.step,
                    value: s.value.max(s.min).min(s.max),
                })
            })
            .collect::<Result<Vec<_>, ControlError>>()?;

        Ok(Self {
            toggle: ToggleControl {
                label: config.paused_glyph.clone(),
            },
            skips,
            progress: ProgressIndicator::default(),
            sliders,
        })
    }
}

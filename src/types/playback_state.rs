use std::time::Duration;

use crate::types::media::PlaybackElement;

/// Point-in-time copy of a playback element's fields, taken once per frame for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    pub paused: bool,
    pub current_time: f64,
    pub duration: f64,
}

impl PlaybackState {
    pub fn capture(element: &impl PlaybackElement) -> Self {
        Self {
            paused: element.paused(),
            current_time: element.current_time(),
            duration: element.duration(),
        }
    }

    /// Frame pacing for the window: video cadence while playing, a slow tick while paused.
    pub fn repaint_interval(&self) -> Duration {
        if self.paused {
            Duration::from_millis(250)
        } else {
            Duration::from_millis(16)
        }
    }
}

/// Formats seconds as `m:ss`, or `h:mm:ss` past the hour. Unknown times render as `--:--`.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "--:--".to_string();
    }
    let total = seconds.floor() as u64;
    let (h, m, s) = (total / 3600, (total / 60) % 60, total % 60);
    if h > 0 {
        format!("{}:{:02}:{:02}", h, m, s)
    } else {
        format!("{}:{:02}", m, s)
    }
}

use crate::error::ControlError;

/// Notifications a playback element raises about its own state.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    Play,
    Pause,
    TimeUpdate,
    DurationChange,
    Ended,
    Error(String),
}

/// A media-playback object the controls drive.
///
/// Implementations own all clamping: `set_current_time` keeps the position in
/// `[0, duration]` and `set_volume` keeps volume in `[0, 1]`. Without loaded
/// media `duration` is NaN.
pub trait PlaybackElement {
    fn has_media(&self) -> bool;
    fn paused(&self) -> bool;
    fn play(&mut self) -> Result<(), ControlError>;
    fn pause(&mut self) -> Result<(), ControlError>;
    fn current_time(&self) -> f64;
    fn set_current_time(&mut self, seconds: f64);
    fn duration(&self) -> f64;
    fn volume(&self) -> f64;
    fn set_volume(&mut self, volume: f64);
    fn playback_rate(&self) -> f64;
    fn set_playback_rate(&mut self, rate: f64);
    /// Drains events raised since the last call, oldest first.
    fn poll_events(&mut self) -> Vec<MediaEvent>;
}

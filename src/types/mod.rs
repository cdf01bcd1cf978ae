pub mod config;
pub mod controls;
pub mod media;
pub mod playback_state;

pub mod app;
pub mod player_controls;
pub mod video_player;

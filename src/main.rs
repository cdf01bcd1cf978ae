mod error;
mod ops;
mod renderer;
mod types;
mod ui;

use crate::ops::controller::PlaybackController;
use crate::renderer::gst_element::GstPlaybackElement;
use crate::types::config::PlayerConfig;
use crate::ui::app::{AppState, PlaydeckApp};
use crate::ui::video_player::VideoPlayer;
use clap::Parser;
use eframe::egui;
use gstreamer as gst;

use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "playdeck", version, about = "Custom playback controls for a video element")]
struct Cli {
    /// Media file to open on startup
    media: Option<PathBuf>,

    /// JSON file overriding glyphs, skip buttons and sliders
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    gst::init()?;
    let config = PlayerConfig::load_or_default(cli.config.as_deref())?;

    let app_state = AppState {
        element: GstPlaybackElement::new()?,
        controller: PlaybackController::new(&config)?,
        video_player: VideoPlayer::new(),
        status: None,
    };
    let mut app = PlaydeckApp::new(app_state);
    if let Some(path) = &cli.media {
        app.open(path);
    }

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([960.0, 600.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Playdeck",
        native_options,
        Box::new(|_cc| Ok(Box::new(app))),
    )?;
    Ok(())
}

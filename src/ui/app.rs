use std::path::Path;

use eframe::egui;

use crate::ops::controller::{ControlEvent, PlaybackController};
use crate::renderer::gst_element::GstPlaybackElement;
use crate::types::playback_state::PlaybackState;
use crate::ui::player_controls::PlayerControls;
use crate::ui::video_player::VideoPlayer;

const MEDIA_EXTENSIONS: &[&str] = &["mp4", "mov", "mkv", "webm", "avi", "mp3", "wav", "ogg", "flac"];

pub struct AppState {
    pub element: GstPlaybackElement,
    pub controller: PlaybackController,
    pub video_player: VideoPlayer,
    pub status: Option<String>,
}

pub struct PlaydeckApp {
    pub state: AppState,
}

impl PlaydeckApp {
    pub fn new(mut state: AppState) -> Self {
        state.controller.apply_sliders(&mut state.element);
        state.controller.sync(&state.element);
        Self { state }
    }

    pub fn open(&mut self, path: &Path) {
        let state = &mut self.state;
        match state.element.load(path) {
            Ok(()) => {
                state.video_player.clear();
                state.controller.sync(&state.element);
                state.status = None;
            }
            Err(e) => {
                log::error!("Failed to open {}: {}", path.display(), e);
                state.video_player.clear();
                state.controller.sync(&state.element);
                state.status = Some(format!("Failed to open {}: {}", path.display(), e));
            }
        }
    }
}

impl eframe::App for PlaydeckApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let state = &mut self.state;

        state.controller.pump_media_events(&mut state.element);
        if let Some(error) = state.controller.take_error() {
            state.status = Some(error);
        }
        if let Some(frame) = state.element.take_frame() {
            log::trace!("New frame at {:.3}s", frame.timestamp);
            state.video_player.update_texture(ctx, &frame);
        }

        let mut open_path = None;
        egui::TopBottomPanel::top("menu_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Open…").clicked() {
                    open_path = rfd::FileDialog::new()
                        .add_filter("Media", MEDIA_EXTENSIONS)
                        .pick_file();
                }
                if let Some(uri) = state.element.uri() {
                    ui.label(egui::RichText::new(uri).color(egui::Color32::GRAY));
                }
                if let Some(status) = &state.status {
                    ui.colored_label(egui::Color32::RED, status);
                }
            });
        });

        let snapshot = PlaybackState::capture(&state.element);
        let mut events: Vec<ControlEvent> = Vec::new();

        egui::TopBottomPanel::bottom("controls_panel").show(ctx, |ui| {
            ui.add_space(4.0);
            events.extend(PlayerControls::show(
                ui,
                state.controller.surface(),
                state.controller.scrub_state(),
                &snapshot,
            ));
            ui.add_space(4.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            if state.video_player.show(ui) {
                events.push(ControlEvent::ViewerClicked);
            }
        });

        for event in events {
            state.controller.handle(&mut state.element, event);
        }
        state.controller.pump_media_events(&mut state.element);
        if let Some(error) = state.controller.take_error() {
            state.status = Some(error);
        }

        if let Some(path) = open_path {
            self.open(&path);
        }

        ctx.request_repaint_after(PlaybackState::capture(&self.state.element).repaint_interval());
    }
}

use eframe::egui;

use crate::ops::controller::{ControlEvent, ScrubState};
use crate::types::controls::ControlSurface;
use crate::types::playback_state::{PlaybackState, format_time};

const PROGRESS_HEIGHT: f32 = 8.0;
const PROGRESS_FILL: egui::Color32 = egui::Color32::from_rgb(255, 200, 0);
const PROGRESS_FILL_SCRUBBING: egui::Color32 = egui::Color32::from_rgb(255, 230, 120);
const HANDLE_RADIUS: f32 = 6.0;

/// Control bar under the viewer: seek bar on top, buttons and sliders below.
pub struct PlayerControls;

impl PlayerControls {
    pub fn show(
        ui: &mut egui::Ui,
        surface: &ControlSurface,
        scrub: ScrubState,
        state: &PlaybackState,
    ) -> Vec<ControlEvent> {
        let mut events = Vec::new();

        Self::progress_bar(ui, surface.progress.fill_percent(), scrub, &mut events);
        ui.add_space(4.0);

        ui.horizontal(|ui| {
            if ui.button(&surface.toggle.label).clicked() {
                events.push(ControlEvent::ToggleClicked);
            }

            for (index, skip) in surface.skips.iter().enumerate() {
                if ui.button(&skip.label).clicked() {
                    events.push(ControlEvent::SkipClicked(index));
                }
            }

            ui.separator();

            for (index, slider) in surface.sliders.iter().enumerate() {
                let mut value = slider.value;
                let response = ui.add(
                    egui::Slider::new(&mut value, slider.min..=slider.max)
                        .step_by(slider.step)
                        .text(slider.name.to_string()),
                );
                if response.changed() && response.dragged() {
                    events.push(ControlEvent::SliderDragged { index, value });
                } else if response.changed() || response.drag_stopped() {
                    events.push(ControlEvent::SliderChanged { index, value });
                }
            }

            ui.separator();
            ui.label(format!(
                "{} / {}",
                format_time(state.current_time),
                format_time(state.duration)
            ));
        });

        events
    }

    fn progress_bar(
        ui: &mut egui::Ui,
        fill_percent: f64,
        scrub: ScrubState,
        events: &mut Vec<ControlEvent>,
    ) {
        let desired = egui::vec2(ui.available_width(), PROGRESS_HEIGHT);
        let (rect, response) = ui.allocate_exact_size(desired, egui::Sense::click_and_drag());

        let fill_width = rect.width() * (fill_percent / 100.0) as f32;
        let painter = ui.painter();
        painter.rect_filled(rect, 2.0, ui.visuals().extreme_bg_color);
        let filled = egui::Rect::from_min_size(rect.min, egui::vec2(fill_width, rect.height()));
        painter.rect_filled(filled, 2.0, fill_color(scrub));
        if scrub.pointer_down {
            painter.circle_filled(
                egui::pos2(rect.left() + fill_width, rect.center().y),
                HANDLE_RADIUS,
                PROGRESS_FILL_SCRUBBING,
            );
        }

        let width = rect.width();
        let (pressed, released, moving, hover) = ui.input(|i| {
            (
                i.pointer.primary_pressed(),
                i.pointer.primary_released(),
                i.pointer.is_moving(),
                i.pointer.hover_pos(),
            )
        });
        let inside = hover.filter(|pos| rect.contains(*pos));

        // Dispatch order: press, move, release, click.
        if let Some(pos) = inside {
            if pressed {
                events.push(ControlEvent::ProgressPressed);
            }
            if moving {
                events.push(ControlEvent::ProgressPointerMoved {
                    offset_x: pos.x - rect.left(),
                    width,
                });
            }
            if released {
                events.push(ControlEvent::ProgressReleased);
            }
        }
        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                events.push(ControlEvent::ProgressClicked {
                    offset_x: pos.x - rect.left(),
                    width,
                });
            }
        }
    }
}

/// The fill brightens while the pointer is held down on the bar.
fn fill_color(scrub: ScrubState) -> egui::Color32 {
    if scrub.pointer_down {
        PROGRESS_FILL_SCRUBBING
    } else {
        PROGRESS_FILL
    }
}

use eframe::egui;

use crate::renderer::gst_element::VideoFrame;

/// Displays the most recent decoded frame. Clicking the picture toggles playback.
#[derive(Default)]
pub struct VideoPlayer {
    pub texture: Option<egui::TextureHandle>,
}

impl VideoPlayer {
    pub fn new() -> Self {
        Self { texture: None }
    }

    /// Upload a frame into the egui texture, reusing the existing handle when possible.
    pub fn update_texture(&mut self, ctx: &egui::Context, frame: &VideoFrame) {
        let color_img = egui::ColorImage::from_rgba_unmultiplied(
            [frame.width as usize, frame.height as usize],
            &frame.data,
        );
        match &mut self.texture {
            Some(texture) => texture.set(color_img, egui::TextureOptions::LINEAR),
            None => {
                self.texture = Some(ctx.load_texture(
                    "viewer_frame",
                    color_img,
                    egui::TextureOptions::LINEAR,
                ))
            }
        }
    }

    pub fn clear(&mut self) {
        self.texture = None;
    }

    /// Show the viewer, returning `true` when it was clicked.
    pub fn show(&mut self, ui: &mut egui::Ui) -> bool {
        let response = if let Some(texture) = &self.texture {
            ui.centered_and_justified(|ui| {
                ui.add(
                    egui::Image::new(texture)
                        .shrink_to_fit()
                        .sense(egui::Sense::click()),
                )
            })
            .inner
        } else {
            ui.centered_and_justified(|ui| {
                ui.add(egui::Label::new("No media loaded").sense(egui::Sense::click()))
            })
            .inner
        };
        response.clicked()
    }
}

use crate::error::ControlError;
use crate::types::config::PlayerConfig;
use crate::types::controls::{ControlSurface, SkipControl, SliderName};
use crate::types::media::{MediaEvent, PlaybackElement};

/// User input raised by the control bar and viewer.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlEvent {
    /// Click on the video surface itself.
    ViewerClicked,
    ToggleClicked,
    SkipClicked(usize),
    /// Slider committed a new value.
    SliderChanged { index: usize, value: f64 },
    /// Slider value changed while the handle is still being dragged.
    SliderDragged { index: usize, value: f64 },
    ProgressClicked { offset_x: f32, width: f32 },
    ProgressPointerMoved { offset_x: f32, width: f32 },
    ProgressPressed,
    ProgressReleased,
}

/// Pointer state scoped to the progress indicator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrubState {
    pub pointer_down: bool,
}

/// Binds a [`ControlSurface`] to a playback element.
///
/// The controller never holds the element; every handler borrows it for the
/// duration of one event.
pub struct PlaybackController {
    surface: ControlSurface,
    scrub: ScrubState,
    paused_glyph: String,
    playing_glyph: String,
    last_error: Option<String>,
}

impl PlaybackController {
    pub fn new(config: &PlayerConfig) -> Result<Self, ControlError> {
        Ok(Self {
            surface: ControlSurface::from_config(config)?,
            scrub: ScrubState::default(),
            paused_glyph: config.paused_glyph.clone(),
            playing_glyph: config.playing_glyph.clone(),
            last_error: None,
        })
    }

    pub fn surface(&self) -> &ControlSurface {
        &self.surface
    }

    pub fn scrub_state(&self) -> ScrubState {
        self.scrub
    }

    /// Returns the most recent playback error once, clearing it.
    pub fn take_error(&mut self) -> Option<String> {
        self.last_error.take()
    }

    pub fn toggle_play(&self, element: &mut impl PlaybackElement) {
        let result = if element.paused() {
            element.play()
        } else {
            element.pause()
        };
        if let Err(e) = result {
            log::debug!("Ignoring play/pause request: {}", e);
        }
    }

    pub fn update_button_glyph(&mut self, element: &impl PlaybackElement) {
        self.surface.toggle.label = if element.paused() {
            self.paused_glyph.clone()
        } else {
            self.playing_glyph.clone()
        };
    }

    pub fn skip(&self, element: &mut impl PlaybackElement, control: &SkipControl) {
        match control.offset() {
            Ok(offset) => {
                let target = element.current_time() + offset;
                log::debug!("Skipping {:+}s to {:.2}s", offset, target);
                element.set_current_time(target);
            }
            Err(e) => log::warn!("Skip button {:?} ignored: {}", control.label, e),
        }
    }

    pub fn apply_slider_value(
        &self,
        element: &mut impl PlaybackElement,
        name: SliderName,
        value: f64,
    ) {
        let applied = match name {
            SliderName::Volume => {
                element.set_volume(value);
                element.volume()
            }
            SliderName::PlaybackRate => {
                element.set_playback_rate(value);
                element.playback_rate()
            }
        };
        log::trace!("Set {} to {} (requested {})", name, applied, value);
    }

    pub fn update_progress(&mut self, element: &impl PlaybackElement) {
        self.surface
            .progress
            .set_progress(element.current_time(), element.duration());
    }

    /// Seeks to the position under the pointer, `offset_x` pixels into an indicator `width` wide.
    pub fn scrub(&self, element: &mut impl PlaybackElement, offset_x: f32, width: f32) {
        let target = f64::from(offset_x) / f64::from(width) * element.duration();
        if !target.is_finite() {
            log::debug!(
                "Scrub at {}/{}px ignored, no seekable duration",
                offset_x,
                width
            );
            return;
        }
        element.set_current_time(target);
    }

    pub fn pointer_pressed(&mut self) {
        self.scrub.pointer_down = true;
    }

    pub fn pointer_released(&mut self) {
        self.scrub.pointer_down = false;
    }

    pub fn pointer_moved(&self, element: &mut impl PlaybackElement, offset_x: f32, width: f32) {
        if self.scrub.pointer_down {
            self.scrub(element, offset_x, width);
        }
    }

    /// Pushes every slider's current value onto the element.
    pub fn apply_sliders(&self, element: &mut impl PlaybackElement) {
        for slider in &self.surface.sliders {
            self.apply_slider_value(element, slider.name, slider.value);
        }
    }

    /// Re-renders the glyph and progress fill from the element's current state.
    pub fn sync(&mut self, element: &impl PlaybackElement) {
        self.update_button_glyph(element);
        self.update_progress(element);
    }

    pub fn handle(&mut self, element: &mut impl PlaybackElement, event: ControlEvent) {
        match event {
            ControlEvent::ViewerClicked | ControlEvent::ToggleClicked => self.toggle_play(element),
            ControlEvent::SkipClicked(index) => {
                if let Some(control) = self.surface.skips.get(index) {
                    self.skip(element, control);
                }
            }
            ControlEvent::SliderChanged { index, value }
            | ControlEvent::SliderDragged { index, value } => {
                let Some(slider) = self.surface.sliders.get_mut(index) else {
                    return;
                };
                slider.value = value;
                let name = slider.name;
                self.apply_slider_value(element, name, value);
            }
            ControlEvent::ProgressClicked { offset_x, width } => {
                self.scrub(element, offset_x, width)
            }
            ControlEvent::ProgressPointerMoved { offset_x, width } => {
                self.pointer_moved(element, offset_x, width)
            }
            ControlEvent::ProgressPressed => self.pointer_pressed(),
            ControlEvent::ProgressReleased => self.pointer_released(),
        }
    }

    pub fn on_media_event(&mut self, element: &impl PlaybackElement, event: MediaEvent) {
        match event {
            MediaEvent::Play | MediaEvent::Pause | MediaEvent::Ended => {
                self.update_button_glyph(element)
            }
            MediaEvent::TimeUpdate | MediaEvent::DurationChange => self.update_progress(element),
            MediaEvent::Error(message) => {
                log::warn!("Playback error: {}", message);
                self.last_error = Some(message);
            }
        }
    }

    /// Drains the element's pending events and applies each in order.
    pub fn pump_media_events(&mut self, element: &mut impl PlaybackElement) {
        for event in element.poll_events() {
            self.on_media_event(&*element, event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::media::fake::FakeElement;

    fn controller() -> PlaybackController {
        PlaybackController::new(&PlayerConfig::default()).unwrap()
    }

    #[test]
    fn test_toggle_play_alternates() {
        let ctl = controller();
        let mut element = FakeElement::with_media(60.0);
        assert!(element.paused);

        ctl.toggle_play(&mut element);
        assert!(!element.paused);
        ctl.toggle_play(&mut element);
        assert!(element.paused);
        assert_eq!(element.events, [MediaEvent::Play, MediaEvent::Pause]);
    }

    #[test]
    fn test_toggle_play_without_media_is_silent() {
        let ctl = controller();
        let mut element = FakeElement::empty();
        ctl.toggle_play(&mut element);
        assert!(element.paused);
        assert!(element.events.is_empty());
    }

    #[test]
    fn test_button_glyph_follows_paused_state() {
        let mut ctl = controller();
        let mut element = FakeElement::with_media(60.0);

        ctl.update_button_glyph(&element);
        assert_eq!(ctl.surface().toggle.label, "►");

        element.paused = false;
        ctl.update_button_glyph(&element);
        assert_eq!(ctl.surface().toggle.label, "❚ ❚");
    }

    #[test]
    fn test_media_events_drive_glyph() {
        let mut ctl = controller();
        let mut element = FakeElement::with_media(60.0);

        ctl.handle(&mut element, ControlEvent::ToggleClicked);
        ctl.pump_media_events(&mut element);
        assert_eq!(ctl.surface().toggle.label, "❚ ❚");

        ctl.handle(&mut element, ControlEvent::ViewerClicked);
        ctl.pump_media_events(&mut element);
        assert_eq!(ctl.surface().toggle.label, "►");
    }

    #[test]
    fn test_custom_glyphs() {
        let config = PlayerConfig {
            paused_glyph: "Play".to_string(),
            playing_glyph: "Pause".to_string(),
            ..PlayerConfig::default()
        };
        let mut ctl = PlaybackController::new(&config).unwrap();
        let mut element = FakeElement::with_media(10.0);
        assert_eq!(ctl.surface().toggle.label, "Play");
        element.paused = false;
        ctl.update_button_glyph(&element);
        assert_eq!(ctl.surface().toggle.label, "Pause");
    }

    #[test]
    fn test_skip_forward_then_back_restores_time() {
        let ctl = controller();
        let mut element = FakeElement::with_media(300.0);
        element.current_time = 100.0;
        let forward = SkipControl {
            label: "+10".to_string(),
            skip: "10".to_string(),
        };
        let back = SkipControl {
            label: "-10".to_string(),
            skip: "-10".to_string(),
        };

        ctl.skip(&mut element, &forward);
        assert_eq!(element.current_time, 110.0);
        ctl.skip(&mut element, &back);
        assert_eq!(element.current_time, 100.0);
    }

    #[test]
    fn test_skip_is_clamped_by_element() {
        let mut ctl = controller();
        let mut element = FakeElement::with_media(30.0);
        element.current_time = 5.0;

        ctl.handle(&mut element, ControlEvent::SkipClicked(0));
        assert_eq!(element.current_time, 0.0);
        ctl.handle(&mut element, ControlEvent::SkipClicked(1));
        assert_eq!(element.current_time, 25.0);
        ctl.handle(&mut element, ControlEvent::SkipClicked(1));
        assert_eq!(element.current_time, 30.0);
    }

    #[test]
    fn test_malformed_skip_is_noop() {
        let ctl = controller();
        let mut element = FakeElement::with_media(30.0);
        element.current_time = 12.0;
        let broken = SkipControl {
            label: "?".to_string(),
            skip: "soon".to_string(),
        };
        ctl.skip(&mut element, &broken);
        assert_eq!(element.current_time, 12.0);
        assert!(element.events.is_empty());
    }

    #[test]
    fn test_unknown_skip_index_is_ignored() {
        let mut ctl = controller();
        let mut element = FakeElement::with_media(30.0);
        ctl.handle(&mut element, ControlEvent::SkipClicked(9));
        assert_eq!(element.current_time, 0.0);
    }

    #[test]
    fn test_apply_slider_value_sets_field_exactly() {
        let ctl = controller();
        let mut element = FakeElement::with_media(30.0);
        ctl.apply_slider_value(&mut element, SliderName::Volume, 0.5);
        assert_eq!(element.volume, 0.5);
        ctl.apply_slider_value(&mut element, SliderName::PlaybackRate, 1.5);
        assert_eq!(element.playback_rate, 1.5);
    }

    #[test]
    fn test_slider_events_update_widget_and_element() {
        let mut ctl = controller();
        let mut element = FakeElement::with_media(30.0);

        ctl.handle(
            &mut element,
            ControlEvent::SliderDragged {
                index: 0,
                value: 0.3,
            },
        );
        assert_eq!(element.volume, 0.3);
        assert_eq!(ctl.surface().sliders[0].value, 0.3);

        ctl.handle(
            &mut element,
            ControlEvent::SliderChanged {
                index: 1,
                value: 0.75,
            },
        );
        assert_eq!(element.playback_rate, 0.75);
        assert_eq!(ctl.surface().sliders[1].value, 0.75);
    }

    #[test]
    fn test_update_progress() {
        let mut ctl = controller();
        let mut element = FakeElement::with_media(200.0);
        for (t, expected) in [(0.0, 0.0), (50.0, 25.0), (150.0, 75.0), (200.0, 100.0)] {
            element.current_time = t;
            ctl.update_progress(&element);
            assert_eq!(ctl.surface().progress.fill_percent(), expected);
        }
    }

    #[test]
    fn test_update_progress_without_duration() {
        let mut ctl = controller();
        let element = FakeElement::empty();
        ctl.update_progress(&element);
        assert_eq!(ctl.surface().progress.fill_percent(), 0.0);
    }

    #[test]
    fn test_time_update_event_moves_fill() {
        let mut ctl = controller();
        let mut element = FakeElement::with_media(40.0);
        element.set_current_time(10.0);
        ctl.pump_media_events(&mut element);
        assert_eq!(ctl.surface().progress.fill_percent(), 25.0);
    }

    #[test]
    fn test_scrub_maps_offset_to_time() {
        let ctl = controller();
        let mut element = FakeElement::with_media(200.0);
        ctl.scrub(&mut element, 50.0, 100.0);
        assert_eq!(element.current_time, 100.0);
        ctl.scrub(&mut element, 0.0, 100.0);
        assert_eq!(element.current_time, 0.0);
    }

    #[test]
    fn test_scrub_degenerate_inputs_are_noops() {
        let ctl = controller();
        let mut element = FakeElement::with_media(200.0);
        element.current_time = 42.0;
        ctl.scrub(&mut element, 10.0, 0.0);
        assert_eq!(element.current_time, 42.0);

        let mut empty = FakeElement::empty();
        ctl.scrub(&mut empty, 10.0, 100.0);
        assert_eq!(empty.current_time, 0.0);
    }

    #[test]
    fn test_drag_scrubs_only_while_pressed() {
        let mut ctl = controller();
        let mut element = FakeElement::with_media(100.0);
        let moved = |x| ControlEvent::ProgressPointerMoved {
            offset_x: x,
            width: 200.0,
        };

        ctl.handle(&mut element, moved(100.0));
        assert_eq!(element.current_time, 0.0);

        ctl.handle(&mut element, ControlEvent::ProgressPressed);
        assert!(ctl.scrub_state().pointer_down);
        ctl.handle(&mut element, moved(100.0));
        assert_eq!(element.current_time, 50.0);
        ctl.handle(&mut element, moved(150.0));
        assert_eq!(element.current_time, 75.0);

        ctl.handle(&mut element, ControlEvent::ProgressReleased);
        assert!(!ctl.scrub_state().pointer_down);
        ctl.handle(&mut element, moved(20.0));
        assert_eq!(element.current_time, 75.0);
    }

    #[test]
    fn test_progress_click_seeks_without_press() {
        let mut ctl = controller();
        let mut element = FakeElement::with_media(80.0);
        ctl.handle(
            &mut element,
            ControlEvent::ProgressClicked {
                offset_x: 30.0,
                width: 120.0,
            },
        );
        assert_eq!(element.current_time, 20.0);
    }

    #[test]
    fn test_apply_sliders_uses_configured_values() {
        let mut config = PlayerConfig::default();
        config.sliders[0].value = 0.4;
        config.sliders[1].value = 1.25;
        let ctl = PlaybackController::new(&config).unwrap();
        let mut element = FakeElement::with_media(10.0);

        ctl.apply_sliders(&mut element);
        assert_eq!(element.volume, 0.4);
        assert_eq!(element.playback_rate, 1.25);
    }

    #[test]
    fn test_ended_event_shows_paused_glyph() {
        let mut ctl = controller();
        let mut element = FakeElement::with_media(10.0);
        element.paused = false;
        ctl.update_button_glyph(&element);

        element.paused = true;
        ctl.on_media_event(&element, MediaEvent::Ended);
        assert_eq!(ctl.surface().toggle.label, "►");

        ctl.on_media_event(&element, MediaEvent::Error("decoder gone".to_string()));
        assert_eq!(ctl.surface().toggle.label, "►");
    }

    #[test]
    fn test_sync_after_load() {
        let mut ctl = controller();
        let mut element = FakeElement::with_media(10.0);
        element.paused = false;
        element.current_time = 5.0;
        ctl.sync(&element);
        assert_eq!(ctl.surface().toggle.label, "❚ ❚");
        assert_eq!(ctl.surface().progress.fill_percent(), 50.0);
    }

    #[test]
    fn test_error_event_is_reported_once() {
        let mut ctl = controller();
        let mut element = FakeElement::with_media(10.0);
        assert_eq!(ctl.take_error(), None);

        element
            .events
            .push(MediaEvent::Error("first failure".to_string()));
        element
            .events
            .push(MediaEvent::Error("decoder gone".to_string()));
        ctl.pump_media_events(&mut element);

        assert_eq!(ctl.take_error().as_deref(), Some("decoder gone"));
        assert_eq!(ctl.take_error(), None);
    }

    #[test]
    fn test_sync_after_failed_load_resets_controls() {
        let mut ctl = controller();
        let mut element = FakeElement::with_media(10.0);
        element.paused = false;
        element.current_time = 5.0;
        ctl.sync(&element);
        assert_eq!(ctl.surface().progress.fill_percent(), 50.0);

        let element = FakeElement::empty();
        ctl.sync(&element);
        assert_eq!(ctl.surface().toggle.label, "►");
        assert_eq!(ctl.surface().progress.fill_percent(), 0.0);
    }
}

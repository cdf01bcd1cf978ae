use std::path::Path;

use gst::prelude::*;
use gstreamer as gst;
use gstreamer_app as gst_app;
use gstreamer_video as gst_video;

use crate::error::ControlError;
use crate::renderer::source;
use crate::types::media::{MediaEvent, PlaybackElement};

#[derive(Debug, Clone)]
pub struct VideoFrame {
    pub data: Vec<u8>, // Tightly packed RGBA rows
    pub width: u32,
    pub height: u32,
    pub timestamp: f64,
}

fn to_seconds(time: gst::ClockTime) -> f64 {
    time.nseconds() as f64 / 1_000_000_000.0
}

fn from_seconds(seconds: f64) -> gst::ClockTime {
    gst::ClockTime::from_nseconds((seconds * 1_000_000_000.0) as u64)
}

/// Playback element backed by a GStreamer `playbin` whose video is delivered to an RGBA appsink.
pub struct GstPlaybackElement {
    playbin: gst::Element,
    sink: gst_app::AppSink,
    uri: Option<String>,
    stream: StreamState,
    playback_rate: f64,
    rate_pending: bool,
    events: Vec<MediaEvent>,
}

/// Per-media playback bookkeeping, reset whenever the source changes.
#[derive(Debug, Clone, PartialEq)]
struct StreamState {
    paused: bool,
    duration: f64,
    position: f64,
    reached_eos: bool,
    last_frame_pts: Option<gst::ClockTime>,
}

impl StreamState {
    fn unloaded() -> Self {
        Self {
            paused: true,
            duration: f64::NAN,
            position: 0.0,
            reached_eos: false,
            last_frame_pts: None,
        }
    }

    fn end_of_stream(&mut self) {
        self.paused = true;
        self.reached_eos = true;
        if self.duration.is_finite() {
            self.position = self.duration;
        }
    }

    fn seeked(&mut self, target: f64) {
        self.position = target;
        self.reached_eos = false;
    }

    /// Playing from the end of the stream starts over from zero.
    fn needs_rewind(&self) -> bool {
        self.reached_eos
    }
}

impl GstPlaybackElement {
    pub fn new() -> Result<Self, ControlError> {
        let caps = gst_video::VideoCapsBuilder::new()
            .format(gst_video::VideoFormat::Rgba)
            .build();
        let sink = gst_app::AppSink::builder()
            .caps(&caps)
            .max_buffers(1)
            .drop(true)
            .build();
        let playbin = gst::ElementFactory::make("playbin")
            .name("viewer")
            .property("video-sink", &sink)
            .build()?;

        Ok(Self {
            playbin,
            sink,
            uri: None,
            stream: StreamState::unloaded(),
            playback_rate: 1.0,
            rate_pending: false,
            events: Vec::new(),
        })
    }

    pub fn uri(&self) -> Option<&str> {
        self.uri.as_deref()
    }

    /// Replaces the current media with `path` and prerolls it paused at the start.
    pub fn load(&mut self, path: &Path) -> Result<(), ControlError> {
        let uri = source::media_uri(path)?;
        self.uri = None;
        self.stream = StreamState::unloaded();
        self.playbin.set_state(gst::State::Null)?;
        self.playbin.set_property("uri", &uri);

        let duration = match source::discover_duration(&uri) {
            Ok(Some(duration)) => duration,
            Ok(None) => f64::NAN,
            Err(e) => {
                log::warn!("Could not discover duration of {}: {}", uri, e);
                f64::NAN
            }
        };

        self.playbin.set_state(gst::State::Paused)?;
        log::info!("Loaded {} ({:.2}s)", uri, duration);

        self.uri = Some(uri);
        self.stream.duration = duration;
        self.rate_pending = self.playback_rate != 1.0;
        self.events.extend([
            MediaEvent::DurationChange,
            MediaEvent::TimeUpdate,
            MediaEvent::Pause,
        ]);
        Ok(())
    }

    /// Returns the newest decoded frame, if one arrived since the last call.
    pub fn take_frame(&mut self) -> Option<VideoFrame> {
        let sample = self
            .sink
            .try_pull_sample(gst::ClockTime::ZERO)
            .or_else(|| {
                if self.stream.paused {
                    self.sink.try_pull_preroll(gst::ClockTime::ZERO)
                } else {
                    None
                }
            })?;

        let buffer = sample.buffer()?;
        let pts = buffer.pts();
        if pts.is_some() && pts == self.stream.last_frame_pts {
            return None;
        }
        self.stream.last_frame_pts = pts;

        let info = gst_video::VideoInfo::from_caps(sample.caps()?).ok()?;
        let map = buffer.map_readable().ok()?;
        let (width, height) = (info.width(), info.height());
        let row = width as usize * 4;
        let stride = info.stride()[0] as usize;

        let data = if stride == row {
            map.as_slice().to_vec()
        } else {
            let mut packed = Vec::with_capacity(row * height as usize);
            for line in map.as_slice().chunks(stride).take(height as usize) {
                if line.len() < row {
                    break;
                }
                packed.extend_from_slice(&line[..row]);
            }
            packed
        };
        if data.len() != row * height as usize {
            log::debug!(
                "Dropping short frame: got {} bytes, expected {}",
                data.len(),
                row * height as usize
            );
            return None;
        }

        Some(VideoFrame {
            data,
            width,
            height,
            timestamp: pts.map(to_seconds).unwrap_or(self.stream.position),
        })
    }

    fn seek(&self, seconds: f64) -> Result<(), ControlError> {
        self.playbin.seek(
            self.playback_rate,
            gst::SeekFlags::FLUSH | gst::SeekFlags::ACCURATE,
            gst::SeekType::Set,
            from_seconds(seconds),
            gst::SeekType::End,
            gst::ClockTime::ZERO,
        )?;
        Ok(())
    }

    fn apply_pending_rate(&mut self) {
        if !self.rate_pending || self.uri.is_none() {
            return;
        }
        match self.seek(self.current_time()) {
            Ok(()) => {
                self.rate_pending = false;
                log::debug!("Applied playback rate {}", self.playback_rate);
            }
            Err(e) => log::debug!("Playback rate still pending: {}", e),
        }
    }

    fn handle_message(&mut self, msg: &gst::Message) {
        use gst::MessageView;

        match msg.view() {
            MessageView::Eos(..) => {
                log::info!("Reached end of stream");
                if let Err(e) = self.playbin.set_state(gst::State::Paused) {
                    log::warn!("Failed to pause at end of stream: {}", e);
                }
                self.stream.end_of_stream();
                self.events.extend([MediaEvent::Pause, MediaEvent::Ended]);
            }
            MessageView::Error(err) => {
                let message = format!("{} ({:?})", err.error(), err.debug());
                log::error!("Pipeline error: {}", message);
                self.events.push(MediaEvent::Error(message));
            }
            MessageView::Warning(warn) => {
                log::warn!("Pipeline warning: {}", warn.error());
            }
            MessageView::DurationChanged(..) => self.refresh_duration(),
            MessageView::AsyncDone(..) => {
                if !self.stream.duration.is_finite() {
                    self.refresh_duration();
                }
                self.apply_pending_rate();
            }
            _ => {}
        }
    }

    fn refresh_duration(&mut self) {
        if let Some(duration) = self.playbin.query_duration::<gst::ClockTime>() {
            self.stream.duration = to_seconds(duration);
            self.events.push(MediaEvent::DurationChange);
        }
    }
}

impl PlaybackElement for GstPlaybackElement {
    fn has_media(&self) -> bool {
        self.uri.is_some()
    }

    fn paused(&self) -> bool {
        self.stream.paused
    }

    fn play(&mut self) -> Result<(), ControlError> {
        if self.uri.is_none() {
            return Err(ControlError::NoMedia);
        }
        if self.stream.needs_rewind() {
            self.seek(0.0)?;
            self.stream.seeked(0.0);
        }
        self.playbin.set_state(gst::State::Playing)?;
        self.stream.paused = false;
        self.events.push(MediaEvent::Play);
        Ok(())
    }

    fn pause(&mut self) -> Result<(), ControlError> {
        if self.uri.is_some() {
            self.playbin.set_state(gst::State::Paused)?;
        }
        self.stream.paused = true;
        self.events.push(MediaEvent::Pause);
        Ok(())
    }

    fn current_time(&self) -> f64 {
        if self.uri.is_none() {
            return 0.0;
        }
        self.playbin
            .query_position::<gst::ClockTime>()
            .map(to_seconds)
            .unwrap_or(self.stream.position)
    }

    fn set_current_time(&mut self, seconds: f64) {
        if self.uri.is_none() || !seconds.is_finite() {
            return;
        }
        let target = if self.stream.duration.is_finite() {
            seconds.min(self.stream.duration).max(0.0)
        } else {
            seconds.max(0.0)
        };
        match self.seek(target) {
            Ok(()) => {
                self.stream.seeked(target);
                self.events.push(MediaEvent::TimeUpdate);
            }
            Err(e) => log::debug!("Seek to {:.2}s failed: {}", target, e),
        }
    }

    fn duration(&self) -> f64 {
        if self.uri.is_some() {
            self.stream.duration
        } else {
            f64::NAN
        }
    }

    fn volume(&self) -> f64 {
        self.playbin.property::<f64>("volume")
    }

    fn set_volume(&mut self, volume: f64) {
        self.playbin
            .set_property("volume", volume.max(0.0).min(1.0));
    }

    fn playback_rate(&self) -> f64 {
        self.playback_rate
    }

    fn set_playback_rate(&mut self, rate: f64) {
        if !rate.is_finite() || rate <= 0.0 {
            log::warn!("Ignoring unsupported playback rate {}", rate);
            return;
        }
        self.playback_rate = rate;
        self.rate_pending = true;
        self.apply_pending_rate();
    }

    fn poll_events(&mut self) -> Vec<MediaEvent> {
        if let Some(bus) = self.playbin.bus() {
            while let Some(msg) = bus.pop() {
                self.handle_message(&msg);
            }
        }

        if self.uri.is_some() {
            let position = self.current_time();
            if (position - self.stream.position).abs() > f64::EPSILON {
                self.stream.position = position;
                self.events.push(MediaEvent::TimeUpdate);
            }
        }

        std::mem::take(&mut self.events)
    }
}

impl Drop for GstPlaybackElement {
    fn drop(&mut self) {
        if let Err(e) = self.playbin.set_state(gst::State::Null) {
            log::warn!("Failed to shut down pipeline: {}", e);
        }
    }
}

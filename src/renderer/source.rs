use std::path::Path;

use gstreamer as gst;
use gstreamer_pbutils as gst_pbutils;

use crate::error::ControlError;

#[cfg(windows)]
fn path_to_file_uri(path: &str) -> String {
    let mut path = path.replace('\\', "/");
    if let Some(stripped) = path.strip_prefix("//?/") {
        path = stripped.to_string();
    }
    format!("file:///{}", path)
}

#[cfg(not(windows))]
fn path_to_file_uri(path: &str) -> String {
    format!("file://{}", path)
}

/// Resolves `path` to an absolute `file://` URI usable by `playbin`.
pub fn media_uri(path: &Path) -> Result<String, ControlError> {
    let abs_path = std::fs::canonicalize(path)?;
    Ok(path_to_file_uri(&abs_path.to_string_lossy()))
}

/// Reads the container duration in seconds without starting playback.
pub fn discover_duration(uri: &str) -> Result<Option<f64>, ControlError> {
    let discoverer = gst_pbutils::Discoverer::new(gst::ClockTime::from_seconds(5))
        .map_err(|e| ControlError::Discovery(e.to_string()))?;
    let info = discoverer
        .discover_uri(uri)
        .map_err(|e| ControlError::Discovery(e.to_string()))?;
    let duration = info
        .duration()
        .map(|d| d.nseconds() as f64 / 1_000_000_000.0);
    log::debug!("Discovered duration for {}: {:?}", uri, duration);
    Ok(duration)
}

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ControlError {
    #[error("no media loaded")]
    NoMedia,
    #[error("invalid skip offset: {0:?}")]
    InvalidSkip(String),
    #[error("unknown slider name: {0:?}")]
    UnknownSlider(String),
    #[error("config io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("gstreamer error: {0}")]
    Gstreamer(String),
    #[error("failed to discover media: {0}")]
    Discovery(String),
}

impl From<gstreamer::glib::BoolError> for ControlError {
    fn from(err: gstreamer::glib::BoolError) -> Self {
        ControlError::Gstreamer(err.to_string())
    }
}

impl From<gstreamer::StateChangeError> for ControlError {
    fn from(err: gstreamer::StateChangeError) -> Self {
        ControlError::Gstreamer(err.to_string())
    }
}

use thiserror::Error;

use crate::shared::frame::Frame;

#[derive(Error, Debug)]
pub enum CaptureError {
    /// The device could not be opened. Fatal at startup.
    #[error("cannot access camera {device}: {reason}")]
    DeviceUnavailable { device: String, reason: String },
    /// One capture attempt failed. The device stays open.
    #[error("failed to capture frame: {0}")]
    FrameRead(String),
}

impl CaptureError {
    pub fn is_transient(&self) -> bool {
        matches!(self, CaptureError::FrameRead(_))
    }
}

/// Produces camera frames one at a time.
///
/// Implementations are opened by their constructor and must tolerate
/// `release` being called more than once.
pub trait FrameSource: Send {
    /// Blocks until the next frame is available.
    fn read(&mut self) -> Result<Frame, CaptureError>;

    /// Gives the device back. Later reads fail with [`CaptureError::FrameRead`].
    fn release(&mut self);
}

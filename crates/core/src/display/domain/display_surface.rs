use crate::shared::frame::Frame;

/// What the viewer did while the last frame was on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DisplayEvent {
    Continue,
    KeyPressed,
    Closed,
}

/// A window that shows composite frames.
///
/// Not `Send`: windowing toolkits tie their handles to the creating thread.
pub trait DisplaySurface {
    /// Presents `frame` and polls input once.
    fn show(&mut self, frame: &Frame) -> Result<DisplayEvent, Box<dyn std::error::Error>>;

    /// Closes the window. Safe to call more than once.
    fn close(&mut self);
}

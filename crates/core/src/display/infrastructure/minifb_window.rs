use minifb::{KeyRepeat, Window, WindowOptions};

use crate::display::domain::display_surface::{DisplayEvent, DisplaySurface};
use crate::shared::color::Color;
use crate::shared::frame::{Frame, CHANNELS};

/// Native window backed by `minifb`.
///
/// The window opens on the first frame, sized to it, and is reopened when
/// the frame size changes.
pub struct MinifbWindow {
    title: String,
    window: Option<Window>,
    size: (usize, usize),
    buffer: Vec<u32>,
}

impl MinifbWindow {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            window: None,
            size: (0, 0),
            buffer: Vec::new(),
        }
    }

    fn window_for(&mut self, size: (usize, usize)) -> Result<&mut Window, minifb::Error> {
        if self.size != size {
            self.window = None;
        }
        let window = match self.window.take() {
            Some(window) => window,
            None => {
                let window = Window::new(&self.title, size.0, size.1, WindowOptions::default())?;
                log::debug!("Opened window '{}' at {}x{}", self.title, size.0, size.1);
                self.size = size;
                window
            }
        };
        Ok(self.window.insert(window))
    }
}

impl DisplaySurface for MinifbWindow {
    fn show(&mut self, frame: &Frame) -> Result<DisplayEvent, Box<dyn std::error::Error>> {
        let size = (frame.width() as usize, frame.height() as usize);
        let mut buffer = std::mem::take(&mut self.buffer);
        fill_0rgb(frame, &mut buffer);

        let window = self.window_for(size)?;
        let result = window.update_with_buffer(&buffer, size.0, size.1);
        let event = if !window.is_open() {
            DisplayEvent::Closed
        } else if !window.get_keys_pressed(KeyRepeat::No).is_empty() {
            DisplayEvent::KeyPressed
        } else {
            DisplayEvent::Continue
        };

        self.buffer = buffer;
        result?;
        Ok(event)
    }

    fn close(&mut self) {
        if self.window.take().is_some() {
            log::debug!("Closed window '{}'", self.title);
        }
    }
}

impl Drop for MinifbWindow {
    fn drop(&mut self) {
        self.close();
    }
}

/// Packs a frame into `0RGB` words, reusing `buffer`'s allocation.
fn fill_0rgb(frame: &Frame, buffer: &mut Vec<u32>) {
    buffer.clear();
    buffer.extend(frame.data().chunks_exact(CHANNELS).map(|px| {
        Color::from_bytes([px[0], px[1], px[2]], frame.order()).to_0rgb()
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::frame::PixelOrder;

    #[test]
    fn test_fill_0rgb_from_bgr() {
        let frame = Frame::new(vec![0x56, 0x34, 0x12, 0, 0, 0xff], 2, 1, PixelOrder::Bgr, 0);
        let mut buffer = Vec::new();
        fill_0rgb(&frame, &mut buffer);
        assert_eq!(buffer, vec![0x0012_3456, 0x00ff_0000]);
    }

    #[test]
    fn test_fill_0rgb_reuses_buffer() {
        let frame = Frame::new(vec![1, 2, 3], 1, 1, PixelOrder::Rgb, 0);
        let mut buffer = vec![7u32; 10];
        fill_0rgb(&frame, &mut buffer);
        assert_eq!(buffer, vec![0x0001_0203]);
    }

    #[test]
    fn test_close_without_window_is_noop() {
        let mut window = MinifbWindow::new("test");
        window.close();
        window.close();
    }
}

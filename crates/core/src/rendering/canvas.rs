use image::Rgb;
use imageproc::drawing::Canvas;

use crate::shared::frame::Frame;

/// Lets `imageproc` draw on frames in either channel order.
///
/// Pixels crossing this boundary are semantic RGB; [`Frame`] converts them.
impl Canvas for Frame {
    type Pixel = Rgb<u8>;

    fn dimensions(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    fn get_pixel(&self, x: u32, y: u32) -> Self::Pixel {
        self.pixel(x, y).into()
    }

    fn draw_pixel(&mut self, x: u32, y: u32, color: Self::Pixel) {
        self.put_pixel(x, y, color.into());
    }
}

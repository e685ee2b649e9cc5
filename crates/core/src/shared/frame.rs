use ndarray::ArrayView3;

use crate::shared::color::Color;

/// Byte order of the three channels of every pixel in a [`Frame`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelOrder {
    /// Native camera order.
    Bgr,
    /// Order expected by the detectors.
    Rgb,
}

/// A single camera frame: contiguous 3-channel bytes in row-major order.
///
/// The frame remembers its channel order so that colors written through
/// [`Frame::put_pixel`] render the same whatever the order is.
#[derive(Clone, Debug)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    order: PixelOrder,
    index: usize,
}

pub const CHANNELS: usize = 3;

impl Frame {
    pub fn new(data: Vec<u8>, width: u32, height: u32, order: PixelOrder, index: usize) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * CHANNELS,
            "data length must equal width * height * 3"
        );
        Self {
            data,
            width,
            height,
            order,
            index,
        }
    }

    /// A frame filled with a single color.
    pub fn filled(width: u32, height: u32, order: PixelOrder, color: Color) -> Self {
        let pixel = color.to_bytes(order);
        let data = pixel
            .iter()
            .copied()
            .cycle()
            .take((width as usize) * (height as usize) * CHANNELS)
            .collect();
        Self::new(data, width, height, order, 0)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn order(&self) -> PixelOrder {
        self.order
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn set_index(&mut self, index: usize) {
        self.index = index;
    }

    pub fn as_ndarray(&self) -> ArrayView3<'_, u8> {
        ArrayView3::from_shape(self.shape(), &self.data)
            .expect("Frame data length must match dimensions")
    }

    /// Reads the pixel at `(x, y)` as an RGB color. Panics when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Color {
        let offset = self.offset(x, y);
        Color::from_bytes(
            [
                self.data[offset],
                self.data[offset + 1],
                self.data[offset + 2],
            ],
            self.order,
        )
    }

    /// Writes an RGB color at `(x, y)` in this frame's channel order.
    /// Panics when out of bounds.
    pub fn put_pixel(&mut self, x: u32, y: u32, color: Color) {
        let offset = self.offset(x, y);
        self.data[offset..offset + CHANNELS].copy_from_slice(&color.to_bytes(self.order));
    }

    /// Mirrors the frame around its vertical axis in place.
    pub fn flip_horizontal(&mut self) {
        let row_len = self.width as usize * CHANNELS;
        if row_len == 0 {
            return;
        }
        for row in self.data.chunks_exact_mut(row_len) {
            let w = row.len() / CHANNELS;
            for x in 0..w / 2 {
                let (left, right) = row.split_at_mut((w - 1 - x) * CHANNELS);
                left[x * CHANNELS..(x + 1) * CHANNELS].swap_with_slice(&mut right[..CHANNELS]);
            }
        }
    }

    /// Returns an RGB copy of this frame, swapping channels when the frame is BGR.
    pub fn to_rgb(&self) -> Frame {
        let mut data = self.data.clone();
        if self.order == PixelOrder::Bgr {
            for px in data.chunks_exact_mut(CHANNELS) {
                px.swap(0, 2);
            }
        }
        Frame::new(data, self.width, self.height, PixelOrder::Rgb, self.index)
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) outside {}x{} frame",
            self.width,
            self.height
        );
        ((y as usize) * (self.width as usize) + x as usize) * CHANNELS
    }

    fn shape(&self) -> (usize, usize, usize) {
        (self.height as usize, self.width as usize, CHANNELS)
    }
}

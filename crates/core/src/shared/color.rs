//! Colors and the feature color table.
//!
//! Colors are stored as what appears on screen (RGB). Frames convert them to
//! their own channel order when writing.

use crate::shared::frame::PixelOrder;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_bytes(self, order: PixelOrder) -> [u8; 3] {
        match order {
            PixelOrder::Rgb => [self.r, self.g, self.b],
            PixelOrder::Bgr => [self.b, self.g, self.r],
        }
    }

    pub fn from_bytes(bytes: [u8; 3], order: PixelOrder) -> Self {
        match order {
            PixelOrder::Rgb => Self::new(bytes[0], bytes[1], bytes[2]),
            PixelOrder::Bgr => Self::new(bytes[2], bytes[1], bytes[0]),
        }
    }

    /// Packs into the `0RGB` word layout used by window framebuffers.
    pub fn to_0rgb(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }
}

impl From<Color> for image::Rgb<u8> {
    fn from(c: Color) -> Self {
        image::Rgb([c.r, c.g, c.b])
    }
}

impl From<image::Rgb<u8>> for Color {
    fn from(p: image::Rgb<u8>) -> Self {
        Self::new(p.0[0], p.0[1], p.0[2])
    }
}

/// Color for landmark groups missing from [`FEATURE_COLORS`].
pub const FALLBACK_COLOR: Color = Color::new(200, 200, 200);

/// Landmark group colors, in legend order.
pub const FEATURE_COLORS: [(&str, Color); 9] = [
    ("chin", Color::new(0, 0, 255)),
    ("left_eyebrow", Color::new(0, 255, 0)),
    ("right_eyebrow", Color::new(255, 255, 0)),
    ("nose_bridge", Color::new(0, 255, 255)),
    ("nose_tip", Color::new(255, 0, 255)),
    ("left_eye", Color::new(255, 0, 0)),
    ("right_eye", Color::new(0, 128, 255)),
    ("top_lip", Color::new(128, 0, 128)),
    ("bottom_lip", Color::new(128, 128, 0)),
];

/// Looks up the color of a landmark group, falling back to gray.
pub fn feature_color(name: &str) -> Color {
    FEATURE_COLORS
        .iter()
        .find(|(feature, _)| *feature == name)
        .map(|(_, color)| *color)
        .unwrap_or(FALLBACK_COLOR)
}

/// Bounding box of one detected face in `(top, right, bottom, left)` pixel
/// coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FaceBox {
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub left: i32,
}

/// A drawing rectangle, edges inclusive, always inside `[0, width] x [0, height]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl FaceBox {
    pub fn new(top: i32, right: i32, bottom: i32, left: i32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Grows the box by `padding` on every side and clamps it to the frame.
    ///
    /// Boxes lying partly or fully outside the frame collapse onto its edge
    /// rather than producing an inverted rectangle.
    pub fn padded(&self, padding: i32, width: u32, height: u32) -> Rect {
        let w = i32::try_from(width).unwrap_or(i32::MAX);
        let h = i32::try_from(height).unwrap_or(i32::MAX);
        let left = self.left.saturating_sub(padding).clamp(0, w);
        let top = self.top.saturating_sub(padding).clamp(0, h);
        let right = self.right.saturating_add(padding).clamp(left, w);
        let bottom = self.bottom.saturating_add(padding).clamp(top, h);
        Rect {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Trims the box to the frame, the way detectors report their results.
    pub fn trimmed(&self, width: u32, height: u32) -> FaceBox {
        let r = self.padded(0, width, height);
        FaceBox::new(r.top, r.right, r.bottom, r.left)
    }
}

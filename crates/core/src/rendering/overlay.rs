use imageproc::drawing::{draw_filled_circle_mut, draw_hollow_rect_mut};

use crate::shared::color::{feature_color, Color};
use crate::shared::constants::BOX_PADDING;
use crate::shared::face_box::{FaceBox, Rect};
use crate::shared::frame::Frame;
use crate::shared::landmark_set::LandmarkSet;

pub const BOX_COLOR: Color = Color::new(0, 150, 0);
pub const BOX_THICKNESS: i32 = 2;
pub const LANDMARK_RADIUS: i32 = 2;

/// Outlines every face, padded and clamped to the frame.
pub fn draw_boxes(frame: &mut Frame, boxes: &[FaceBox]) {
    for face in boxes {
        let rect = face.padded(BOX_PADDING, frame.width(), frame.height());
        draw_outline(frame, rect, BOX_COLOR, BOX_THICKNESS);
    }
}

/// Draws every landmark point as a small filled circle in its group color.
pub fn draw_landmarks(frame: &mut Frame, landmark_sets: &[LandmarkSet]) {
    for set in landmark_sets {
        for (feature, points) in set.groups() {
            let color = feature_color(feature).into();
            for &(x, y) in points {
                draw_filled_circle_mut(frame, (x, y), LANDMARK_RADIUS, color);
            }
        }
    }
}

/// Nested one-pixel outlines, growing inward from `rect`.
fn draw_outline(frame: &mut Frame, rect: Rect, color: Color, thickness: i32) {
    for inset in 0..thickness {
        let left = rect.left + inset;
        let top = rect.top + inset;
        let right = rect.right - inset;
        let bottom = rect.bottom - inset;
        if left > right || top > bottom {
            break;
        }
        let r = imageproc::rect::Rect::at(left, top)
            .of_size((right - left + 1) as u32, (bottom - top + 1) as u32);
        draw_hollow_rect_mut(frame, r, color.into());
    }
}

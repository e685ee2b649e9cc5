use thiserror::Error;

use crate::shared::face_box::FaceBox;
use crate::shared::frame::{Frame, PixelOrder, CHANNELS};
use crate::shared::landmark_set::LandmarkSet;

use super::legend::build_legend;
use super::overlay::{draw_boxes, draw_landmarks};

#[derive(Error, Debug, PartialEq)]
pub enum RenderError {
    #[error("cannot join panels of height {left} and {right}")]
    HeightMismatch { left: u32, right: u32 },
    #[error("cannot join {left:?} and {right:?} panels")]
    PixelOrderMismatch { left: PixelOrder, right: PixelOrder },
}

/// Places `legend` to the left of `frame`.
///
/// The result keeps the frame's index and channel order.
pub fn compose(legend: &Frame, frame: &Frame) -> Result<Frame, RenderError> {
    if legend.height() != frame.height() {
        return Err(RenderError::HeightMismatch {
            left: legend.height(),
            right: frame.height(),
        });
    }
    if legend.order() != frame.order() {
        return Err(RenderError::PixelOrderMismatch {
            left: legend.order(),
            right: frame.order(),
        });
    }

    let width = legend.width() + frame.width();
    let legend_row = legend.width() as usize * CHANNELS;
    let frame_row = frame.width() as usize * CHANNELS;

    let mut data = Vec::with_capacity((width as usize) * (frame.height() as usize) * CHANNELS);
    for y in 0..frame.height() as usize {
        data.extend_from_slice(&legend.data()[y * legend_row..(y + 1) * legend_row]);
        data.extend_from_slice(&frame.data()[y * frame_row..(y + 1) * frame_row]);
    }

    Ok(Frame::new(
        data,
        width,
        frame.height(),
        frame.order(),
        frame.index(),
    ))
}

/// Draws boxes, then landmarks, onto `frame` and joins the legend to its left.
pub fn render_overlay(
    frame: &mut Frame,
    boxes: &[FaceBox],
    landmark_sets: &[LandmarkSet],
) -> Result<Frame, RenderError> {
    draw_boxes(frame, boxes);
    draw_landmarks(frame, landmark_sets);
    let legend = build_legend(frame.height(), frame.order());
    compose(&legend, frame)
}

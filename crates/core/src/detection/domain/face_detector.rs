use crate::shared::face_box::FaceBox;
use crate::shared::frame::Frame;

/// Domain interface for face detection.
///
/// Takes an RGB frame. Boxes come back in any order, trimmed to the frame.
pub trait FaceDetector: Send {
    fn detect_faces(&mut self, image: &Frame) -> Result<Vec<FaceBox>, Box<dyn std::error::Error>>;
}

use crate::shared::frame::Frame;
use crate::shared::landmark_set::LandmarkSet;

/// Domain interface for facial landmark localization.
///
/// Takes an RGB frame and returns one [`LandmarkSet`] per face it finds.
/// Results are independent of any [`FaceDetector`](super::face_detector::FaceDetector)
/// call on the same frame; callers must not pair them by index.
pub trait LandmarkDetector: Send {
    fn detect_landmarks(
        &mut self,
        image: &Frame,
    ) -> Result<Vec<LandmarkSet>, Box<dyn std::error::Error>>;
}

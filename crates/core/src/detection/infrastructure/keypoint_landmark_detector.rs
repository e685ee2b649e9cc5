//! Coarse landmarks from the face detector's own five pose keypoints.
//!
//! Stands in for the 68-point regressor when no landmark model is available.
//! Eyes and nose become single-point groups; both lip groups hold the two
//! mouth corners.

use crate::detection::domain::landmark_detector::LandmarkDetector;
use crate::shared::frame::Frame;
use crate::shared::landmark_set::{LandmarkSet, Point};

use super::onnx_face_detector::OnnxFaceDetector;

const LEFT_EYE: usize = 0;
const RIGHT_EYE: usize = 1;
const NOSE: usize = 2;
const LEFT_MOUTH: usize = 3;
const RIGHT_MOUTH: usize = 4;

pub struct KeypointLandmarkDetector {
    faces: OnnxFaceDetector,
}

impl KeypointLandmarkDetector {
    pub fn new(faces: OnnxFaceDetector) -> Self {
        Self { faces }
    }
}

impl LandmarkDetector for KeypointLandmarkDetector {
    fn detect_landmarks(
        &mut self,
        image: &Frame,
    ) -> Result<Vec<LandmarkSet>, Box<dyn std::error::Error>> {
        Ok(self
            .faces
            .detect_scored(image)?
            .iter()
            .filter_map(|d| d.keypoints.as_ref())
            .map(keypoint_landmarks)
            .filter(|set| !set.is_empty())
            .collect())
    }
}

/// Groups visible keypoints under the 68-point feature names.
fn keypoint_landmarks(points: &[(f64, f64); 5]) -> LandmarkSet {
    let visible = |i: usize| -> Option<Point> {
        let (x, y) = points[i];
        (x > 0.0).then(|| (x.round() as i32, y.round() as i32))
    };

    let mut set = LandmarkSet::new();
    for (feature, i) in [("left_eye", LEFT_EYE), ("right_eye", RIGHT_EYE), ("nose_tip", NOSE)] {
        if let Some(p) = visible(i) {
            set.insert(feature, vec![p]);
        }
    }
    let mouth: Vec<Point> = [LEFT_MOUTH, RIGHT_MOUTH]
        .into_iter()
        .filter_map(visible)
        .collect();
    if !mouth.is_empty() {
        set.insert("top_lip", mouth.clone());
        set.insert("bottom_lip", mouth);
    }
    set
}

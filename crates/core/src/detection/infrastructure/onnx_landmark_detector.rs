/// 68-point facial landmark detector using ONNX Runtime via `ort`.
///
/// Runs its own face detection pass, crops a square around every face, and
/// regresses 68 points normalized to the crop.
use std::path::Path;

use crate::detection::domain::landmark_detector::LandmarkDetector;
use crate::detection::domain::landmark_layout::{self, NUM_POINTS};
use crate::shared::frame::Frame;
use crate::shared::landmark_set::{LandmarkSet, Point};

use super::math::ScoredBox;
use super::onnx_face_detector::OnnxFaceDetector;
use super::onnx_session;

/// Fallback landmark model input edge.
const DEFAULT_INPUT_SIZE: u32 = 112;

/// Crop edge relative to the longer side of the face box.
const CROP_SCALE: f64 = 1.2;

/// Square crop around a face, in frame coordinates. May extend past the frame.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Crop {
    x: f64,
    y: f64,
    size: f64,
}

impl Crop {
    fn around(bbox: &[f64; 4]) -> Self {
        let [x1, y1, x2, y2] = *bbox;
        let size = (x2 - x1).max(y2 - y1) * CROP_SCALE;
        let cx = (x1 + x2) / 2.0;
        let cy = (y1 + y2) / 2.0;
        Self {
            x: cx - size / 2.0,
            y: cy - size / 2.0,
            size,
        }
    }

    /// Maps a point normalized to the crop back to integer frame pixels.
    fn to_frame(self, nx: f32, ny: f32) -> Point {
        (
            (self.x + nx as f64 * self.size).round() as i32,
            (self.y + ny as f64 * self.size).round() as i32,
        )
    }
}

pub struct OnnxLandmarkDetector {
    faces: OnnxFaceDetector,
    session: ort::session::Session,
    input_size: u32,
}

impl OnnxLandmarkDetector {
    pub fn new(
        faces: OnnxFaceDetector,
        model_path: &Path,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let session = onnx_session::load_session(model_path)?;
        let input_size = onnx_session::square_input_size(&session, DEFAULT_INPUT_SIZE);
        Ok(Self {
            faces,
            session,
            input_size,
        })
    }

    fn regress(
        &mut self,
        image: &Frame,
        crop: Crop,
    ) -> Result<[Point; NUM_POINTS], Box<dyn std::error::Error>> {
        let input = sample_crop(image, crop, self.input_size);
        let input_value = ort::value::Tensor::from_array(input)?;
        let outputs = self.session.run(ort::inputs![input_value])?;
        if outputs.len() == 0 {
            return Err("landmark model produced no outputs".into());
        }
        let tensor = outputs[0].try_extract_array::<f32>()?;
        let values = tensor.as_slice().ok_or("Cannot get landmark slice")?;
        decode_points(values, crop)
    }
}

impl LandmarkDetector for OnnxLandmarkDetector {
    fn detect_landmarks(
        &mut self,
        image: &Frame,
    ) -> Result<Vec<LandmarkSet>, Box<dyn std::error::Error>> {
        onnx_session::ensure_rgb(image, "landmark detector")?;
        let faces: Vec<ScoredBox> = self.faces.detect_scored(image)?;
        let mut sets = Vec::with_capacity(faces.len());
        for face in &faces {
            let crop = Crop::around(&face.bbox);
            if crop.size < 1.0 {
                continue;
            }
            let points = self.regress(image, crop)?;
            sets.push(landmark_layout::group_points(&points));
        }
        Ok(sets)
    }
}

/// Nearest-neighbor samples the crop into a `size` × `size` NCHW tensor in
/// [0, 1]. Pixels outside the frame read as black.
fn sample_crop(image: &Frame, crop: Crop, size: u32) -> ndarray::Array4<f32> {
    let n = size as usize;
    let mut tensor = ndarray::Array4::<f32>::zeros((1, 3, n, n));
    let src = image.as_ndarray();
    let (w, h) = (image.width() as f64, image.height() as f64);
    let step = crop.size / size as f64;

    for ty in 0..n {
        let sy = (crop.y + (ty as f64 + 0.5) * step).floor();
        if sy < 0.0 || sy >= h {
            continue;
        }
        for tx in 0..n {
            let sx = (crop.x + (tx as f64 + 0.5) * step).floor();
            if sx < 0.0 || sx >= w {
                continue;
            }
            for c in 0..3 {
                tensor[[0, c, ty, tx]] = src[[sy as usize, sx as usize, c]] as f32 / 255.0;
            }
        }
    }
    tensor
}

/// Reads 68 `(x, y)` pairs; extra trailing values (e.g. pose outputs) are ignored.
fn decode_points(
    values: &[f32],
    crop: Crop,
) -> Result<[Point; NUM_POINTS], Box<dyn std::error::Error>> {
    if values.len() < NUM_POINTS * 2 {
        return Err(format!(
            "landmark model returned {} values, expected at least {}",
            values.len(),
            NUM_POINTS * 2
        )
        .into());
    }
    let mut points = [(0, 0); NUM_POINTS];
    for (i, p) in points.iter_mut().enumerate() {
        *p = crop.to_frame(values[i * 2], values[i * 2 + 1]);
    }
    Ok(points)
}

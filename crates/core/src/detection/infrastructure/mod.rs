pub mod keypoint_landmark_detector;
mod math;
pub mod model_resolver;
pub mod onnx_face_detector;
pub mod onnx_landmark_detector;
mod onnx_session;

pub const FACE_MODEL_NAME: &str = "yolo11n-pose_widerface.onnx";
pub const FACE_MODEL_URL: &str =
    "https://github.com/neutrinographics/faceguard/releases/download/v0.1.0/yolo11n-pose_widerface.onnx";

/// 68-point landmark regressor. No public download location is bundled; the
/// file is taken from the model cache or from the command line. Without it
/// the face model's five keypoints are drawn instead.
pub const LANDMARK_MODEL_NAME: &str = "face_landmarks_68.onnx";

pub const WINDOW_TITLE: &str = "Face Detection with Landmarks & Legend";

pub const DEFAULT_DEVICE_INDEX: usize = 0;

/// Pixels added around every face box before drawing.
pub const BOX_PADDING: i32 = 20;

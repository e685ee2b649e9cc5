use std::path::{Path, PathBuf};
use std::process;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use clap::Parser;

use facemarks_core::capture::infrastructure::ffmpeg_camera::{CameraConfig, FfmpegCamera};
use facemarks_core::detection::domain::landmark_detector::LandmarkDetector;
use facemarks_core::detection::infrastructure::keypoint_landmark_detector::KeypointLandmarkDetector;
use facemarks_core::detection::infrastructure::model_resolver::{self, ModelResolveError};
use facemarks_core::detection::infrastructure::onnx_face_detector::{
    OnnxFaceDetector, DEFAULT_CONFIDENCE,
};
use facemarks_core::detection::infrastructure::onnx_landmark_detector::OnnxLandmarkDetector;
use facemarks_core::display::infrastructure::minifb_window::MinifbWindow;
use facemarks_core::pipeline::landmark_overlay_use_case::LandmarkOverlayUseCase;
use facemarks_core::pipeline::pipeline_logger::{PipelineLogger, StdoutPipelineLogger};
use facemarks_core::shared::constants::{
    DEFAULT_DEVICE_INDEX, FACE_MODEL_NAME, FACE_MODEL_URL, LANDMARK_MODEL_NAME, WINDOW_TITLE,
};

/// Live webcam view with face boxes, 68-point landmarks and a color legend.
///
/// Press any key in the window, close it, or hit Ctrl-C to quit.
#[derive(Parser)]
#[command(name = "facemarks")]
struct Cli {
    /// Camera number.
    #[arg(long, default_value_t = DEFAULT_DEVICE_INDEX)]
    device: usize,

    /// Explicit device locator (e.g. /dev/video2, or video=NAME for dshow).
    #[arg(long)]
    device_path: Option<String>,

    /// Capture backend (v4l2, avfoundation, dshow).
    #[arg(long)]
    input_format: Option<String>,

    /// Requested capture size, WIDTHxHEIGHT.
    #[arg(long)]
    video_size: Option<String>,

    /// Requested capture frame rate.
    #[arg(long)]
    framerate: Option<String>,

    /// Face detection confidence threshold (0.0-1.0).
    #[arg(long, default_value_t = DEFAULT_CONFIDENCE)]
    confidence: f64,

    /// 68-point landmark model file.
    #[arg(long)]
    landmark_model: Option<PathBuf>,

    /// Download location for the landmark model when it is not cached.
    #[arg(long)]
    landmark_model_url: Option<String>,
}

/// Where the per-face landmarks come from.
#[derive(Debug, PartialEq)]
enum LandmarkBackend {
    /// 68-point regressor model at this path.
    Regressor(PathBuf),
    /// The face model's own five keypoints.
    Keypoints,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let stop = Arc::new(AtomicBool::new(false));
    let handler_stop = stop.clone();
    ctrlc::set_handler(move || handler_stop.store(true, Ordering::Relaxed))?;

    let camera = FfmpegCamera::open(&camera_config(&cli))?;
    log::info!("Capturing from {}", camera.device());

    let face_model = resolve_face_model()?;
    let backend = landmark_backend(&cli, &model_resolver::model_cache_dir()?)?;
    log::info!("Loading models");
    let face_detector = OnnxFaceDetector::new(&face_model, cli.confidence)?;
    let landmark_faces = OnnxFaceDetector::new(&face_model, cli.confidence)?;
    let landmark_detector: Box<dyn LandmarkDetector> = match backend {
        LandmarkBackend::Regressor(path) => {
            Box::new(OnnxLandmarkDetector::new(landmark_faces, &path)?)
        }
        LandmarkBackend::Keypoints => Box::new(KeypointLandmarkDetector::new(landmark_faces)),
    };

    let mut logger = StdoutPipelineLogger::default();
    let mut use_case = LandmarkOverlayUseCase::new(
        Box::new(camera),
        Box::new(face_detector),
        landmark_detector,
        Box::new(MinifbWindow::new(WINDOW_TITLE)),
        Some(stop),
    );
    let result = use_case.execute(&mut logger);
    logger.summary();

    let summary = result?;
    if summary.capture_failures > 0 {
        log::warn!("{} frames could not be captured", summary.capture_failures);
    }
    Ok(())
}

fn camera_config(cli: &Cli) -> CameraConfig {
    CameraConfig {
        index: cli.device,
        input_format: cli.input_format.clone(),
        locator: cli.device_path.clone(),
        video_size: cli.video_size.clone(),
        framerate: cli.framerate.clone(),
    }
}

fn resolve_face_model() -> Result<PathBuf, Box<dyn std::error::Error>> {
    log::info!("Resolving model: {FACE_MODEL_NAME}");
    let path = model_resolver::resolve(
        FACE_MODEL_NAME,
        Some(FACE_MODEL_URL),
        None,
        Some(Box::new(|done, total| {
            download_progress("face detection", done, total)
        })),
    )?;
    eprintln!();
    Ok(path)
}

/// Picks the 68-point model when one is given, cached or downloadable, and
/// falls back to the face model's keypoints otherwise.
fn landmark_backend(cli: &Cli, cache_dir: &Path) -> Result<LandmarkBackend, ModelResolveError> {
    if let Some(path) = &cli.landmark_model {
        return Ok(LandmarkBackend::Regressor(path.clone()));
    }
    log::info!("Resolving model: {LANDMARK_MODEL_NAME}");
    let url = cli.landmark_model_url.as_deref();
    match model_resolver::resolve_in(
        cache_dir,
        LANDMARK_MODEL_NAME,
        url,
        None,
        Some(Box::new(|done, total| download_progress("landmark", done, total))),
    ) {
        Ok(path) => {
            if url.is_some() {
                eprintln!();
            }
            Ok(LandmarkBackend::Regressor(path))
        }
        Err(ModelResolveError::NotFound { dir, .. }) => {
            log::warn!(
                "{LANDMARK_MODEL_NAME} not found in {}; showing five-point landmarks",
                dir.display()
            );
            Ok(LandmarkBackend::Keypoints)
        }
        Err(e) => Err(e),
    }
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !(0.0..=1.0).contains(&cli.confidence) {
        return Err(format!(
            "Confidence must be between 0.0 and 1.0, got {}",
            cli.confidence
        )
        .into());
    }
    if let Some(size) = &cli.video_size {
        if parse_video_size(size).is_none() {
            return Err(format!("Video size must look like 640x480, got '{size}'").into());
        }
    }
    if let Some(rate) = &cli.framerate {
        match rate.parse::<f64>() {
            Ok(r) if r > 0.0 => {}
            _ => return Err(format!("Frame rate must be a positive number, got '{rate}'").into()),
        }
    }
    if let Some(path) = &cli.landmark_model {
        if !Path::new(path).is_file() {
            return Err(format!("Landmark model not found: {}", path.display()).into());
        }
    }
    Ok(())
}

fn parse_video_size(size: &str) -> Option<(u32, u32)> {
    let (w, h) = size.split_once('x')?;
    let w: u32 = w.parse().ok()?;
    let h: u32 = h.parse().ok()?;
    (w > 0 && h > 0).then_some((w, h))
}

fn download_progress(what: &str, downloaded: u64, total: u64) {
    if total > 0 {
        let pct = (downloaded as f64 / total as f64 * 100.0) as u32;
        eprint!("\rDownloading {what} model... {pct}%");
    } else {
        eprint!("\rDownloading {what} model... {downloaded} bytes");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("facemarks").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults_are_valid() {
        let cli = parse(&[]);
        assert_eq!(cli.device, 0);
        assert!((cli.confidence - 0.5).abs() < f64::EPSILON);
        assert!(validate(&cli).is_ok());
    }

    #[test]
    fn test_rejects_out_of_range_confidence() {
        let cli = parse(&["--confidence", "1.5"]);
        assert!(validate(&cli).is_err());
    }

    #[test]
    fn test_rejects_malformed_video_size() {
        assert!(validate(&parse(&["--video-size", "640by480"])).is_err());
        assert!(validate(&parse(&["--video-size", "0x480"])).is_err());
        assert!(validate(&parse(&["--video-size", "1280x720"])).is_ok());
    }

    #[test]
    fn test_rejects_non_positive_framerate() {
        assert!(validate(&parse(&["--framerate", "0"])).is_err());
        assert!(validate(&parse(&["--framerate", "abc"])).is_err());
        assert!(validate(&parse(&["--framerate", "29.97"])).is_ok());
    }

    #[test]
    fn test_rejects_missing_landmark_model() {
        let cli = parse(&["--landmark-model", "/nonexistent/landmarks.onnx"]);
        assert!(validate(&cli).is_err());
    }

    #[test]
    fn test_cold_cache_without_flags_falls_back_to_keypoints() {
        let cache = tempfile::tempdir().unwrap();
        let backend = landmark_backend(&parse(&[]), cache.path()).unwrap();
        assert_eq!(backend, LandmarkBackend::Keypoints);
    }

    #[test]
    fn test_cached_landmark_model_is_used() {
        let cache = tempfile::tempdir().unwrap();
        let model = cache.path().join(LANDMARK_MODEL_NAME);
        std::fs::write(&model, b"model").unwrap();
        let backend = landmark_backend(&parse(&[]), cache.path()).unwrap();
        assert_eq!(backend, LandmarkBackend::Regressor(model));
    }

    #[test]
    fn test_explicit_landmark_model_wins() {
        let cache = tempfile::tempdir().unwrap();
        let cli = parse(&["--landmark-model", "/models/landmarks.onnx"]);
        let backend = landmark_backend(&cli, cache.path()).unwrap();
        assert_eq!(
            backend,
            LandmarkBackend::Regressor(PathBuf::from("/models/landmarks.onnx"))
        );
    }

    #[test]
    fn test_unreachable_landmark_url_is_an_error() {
        let cache = tempfile::tempdir().unwrap();
        let cli = parse(&[
            "--landmark-model-url",
            "http://invalid.nonexistent.example.com/landmarks.onnx",
        ]);
        assert!(matches!(
            landmark_backend(&cli, cache.path()),
            Err(ModelResolveError::Download { .. })
        ));
    }

    #[test]
    fn test_camera_config_carries_flags() {
        let cli = parse(&["--device", "2", "--input-format", "v4l2", "--framerate", "30"]);
        let config = camera_config(&cli);
        assert_eq!(config.index, 2);
        assert_eq!(config.input_format.as_deref(), Some("v4l2"));
        assert_eq!(config.framerate.as_deref(), Some("30"));
        assert!(config.locator.is_none());
    }
}

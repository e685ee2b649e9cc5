use std::sync::{Arc, Mutex, Once};

use facemarks_core::capture::domain::frame_source::{CaptureError, FrameSource};
use facemarks_core::detection::domain::face_detector::FaceDetector;
use facemarks_core::detection::domain::landmark_detector::LandmarkDetector;
use facemarks_core::display::domain::display_surface::{DisplayEvent, DisplaySurface};
use facemarks_core::pipeline::landmark_overlay_use_case::{LandmarkOverlayUseCase, StopReason};
use facemarks_core::pipeline::pipeline_logger::NullPipelineLogger;
use facemarks_core::rendering::legend::LEGEND_WIDTH;
use facemarks_core::shared::color::Color;
use facemarks_core::shared::face_box::FaceBox;
use facemarks_core::shared::frame::{Frame, PixelOrder};
use facemarks_core::shared::landmark_set::LandmarkSet;

/// Keeps every log record so tests can check what a run reported.
struct RecordedLog(Mutex<Vec<(log::Level, String)>>);

impl log::Log for RecordedLog {
    fn enabled(&self, _metadata: &log::Metadata) -> bool {
        true
    }

    fn log(&self, record: &log::Record) {
        self.0
            .lock()
            .unwrap()
            .push((record.level(), record.args().to_string()));
    }

    fn flush(&self) {}
}

static RECORDED: RecordedLog = RecordedLog(Mutex::new(Vec::new()));

fn record_logs() {
    static INSTALL: Once = Once::new();
    INSTALL.call_once(|| {
        log::set_logger(&RECORDED).unwrap();
        log::set_max_level(log::LevelFilter::Trace);
    });
}

/// Five capture attempts; the third one fails.
struct FlakyCamera {
    attempt: usize,
    released: Arc<Mutex<bool>>,
}

impl FrameSource for FlakyCamera {
    fn read(&mut self) -> Result<Frame, CaptureError> {
        self.attempt += 1;
        if self.attempt == 3 {
            return Err(CaptureError::FrameRead("select timed out".into()));
        }
        let mut frame = Frame::filled(64, 48, PixelOrder::Bgr, Color::new(0, 0, 0));
        frame.set_index(self.attempt);
        Ok(frame)
    }

    fn release(&mut self) {
        *self.released.lock().unwrap() = true;
    }
}

struct OneFace;

impl FaceDetector for OneFace {
    fn detect_faces(&mut self, _image: &Frame) -> Result<Vec<FaceBox>, Box<dyn std::error::Error>> {
        Ok(vec![FaceBox::new(20, 40, 40, 20)])
    }
}

struct OneEye;

impl LandmarkDetector for OneEye {
    fn detect_landmarks(
        &mut self,
        _image: &Frame,
    ) -> Result<Vec<LandmarkSet>, Box<dyn std::error::Error>> {
        Ok(vec![LandmarkSet::new().with_group("right_eye", vec![(30, 30)])])
    }
}

/// Reports a key press on the fourth frame it shows.
struct KeyOnFourth {
    shown: Arc<Mutex<Vec<Frame>>>,
    closed: Arc<Mutex<bool>>,
}

impl DisplaySurface for KeyOnFourth {
    fn show(&mut self, frame: &Frame) -> Result<DisplayEvent, Box<dyn std::error::Error>> {
        let mut shown = self.shown.lock().unwrap();
        shown.push(frame.clone());
        Ok(if shown.len() == 4 {
            DisplayEvent::KeyPressed
        } else {
            DisplayEvent::Continue
        })
    }

    fn close(&mut self) {
        *self.closed.lock().unwrap() = true;
    }
}

#[test]
fn capture_failure_on_third_of_five_iterations_keeps_loop_alive() {
    record_logs();
    let released = Arc::new(Mutex::new(false));
    let shown = Arc::new(Mutex::new(Vec::new()));
    let closed = Arc::new(Mutex::new(false));

    let mut use_case = LandmarkOverlayUseCase::new(
        Box::new(FlakyCamera {
            attempt: 0,
            released: released.clone(),
        }),
        Box::new(OneFace),
        Box::new(OneEye),
        Box::new(KeyOnFourth {
            shown: shown.clone(),
            closed: closed.clone(),
        }),
        None,
    );
    let summary = use_case.execute(&mut NullPipelineLogger).unwrap();

    assert_eq!(summary.stop_reason, StopReason::KeyPressed);
    assert_eq!(summary.frames_displayed, 4);
    assert_eq!(summary.capture_failures, 1);

    let warnings: Vec<String> = RECORDED
        .0
        .lock()
        .unwrap()
        .iter()
        .filter(|(level, _)| *level == log::Level::Warn)
        .map(|(_, msg)| msg.clone())
        .collect();
    assert!(
        warnings
            .iter()
            .any(|m| m == "failed to capture frame: select timed out"),
        "{warnings:?}"
    );

    let shown = shown.lock().unwrap();
    let attempts: Vec<usize> = shown.iter().map(|f| f.index()).collect();
    assert_eq!(attempts, vec![1, 2, 4, 5]);
    for frame in shown.iter() {
        assert_eq!(frame.width(), LEGEND_WIDTH + 64);
        assert_eq!(frame.height(), 48);
        assert_eq!(frame.pixel(LEGEND_WIDTH + 30, 30), Color::new(0, 128, 255));
    }

    assert!(*released.lock().unwrap());
    assert!(*closed.lock().unwrap());
}

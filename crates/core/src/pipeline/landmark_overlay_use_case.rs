use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use crate::capture::domain::frame_source::FrameSource;
use crate::detection::domain::face_detector::FaceDetector;
use crate::detection::domain::landmark_detector::LandmarkDetector;
use crate::display::domain::display_surface::{DisplayEvent, DisplaySurface};
use crate::rendering::compose::render_overlay;
use crate::shared::frame::Frame;

use super::pipeline_logger::PipelineLogger;

/// Why the loop ended without an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    KeyPressed,
    WindowClosed,
    Interrupted,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunSummary {
    pub frames_displayed: usize,
    pub capture_failures: usize,
    pub stop_reason: StopReason,
}

#[derive(Default)]
struct Counters {
    frames_displayed: usize,
    capture_failures: usize,
}

/// Live overlay loop: capture → mirror → detect → draw → legend → display.
///
/// Runs until a key is pressed, the window is closed, the stop flag is
/// raised, or a step fails with anything other than a transient capture
/// error. The source is released and the display closed on every exit path.
pub struct LandmarkOverlayUseCase {
    source: Box<dyn FrameSource>,
    face_detector: Box<dyn FaceDetector>,
    landmark_detector: Box<dyn LandmarkDetector>,
    display: Box<dyn DisplaySurface>,
    stop: Arc<AtomicBool>,
}

impl LandmarkOverlayUseCase {
    pub fn new(
        source: Box<dyn FrameSource>,
        face_detector: Box<dyn FaceDetector>,
        landmark_detector: Box<dyn LandmarkDetector>,
        display: Box<dyn DisplaySurface>,
        stop: Option<Arc<AtomicBool>>,
    ) -> Self {
        Self {
            source,
            face_detector,
            landmark_detector,
            display,
            stop: stop.unwrap_or_else(|| Arc::new(AtomicBool::new(false))),
        }
    }

    pub fn execute(
        &mut self,
        logger: &mut dyn PipelineLogger,
    ) -> Result<RunSummary, Box<dyn std::error::Error>> {
        let mut counters = Counters::default();
        let result = self.run_loop(logger, &mut counters);

        self.source.release();
        self.display.close();

        let stop_reason = result?;
        logger.info(&format!(
            "Stopped ({stop_reason:?}) after {} frames",
            counters.frames_displayed
        ));
        Ok(RunSummary {
            frames_displayed: counters.frames_displayed,
            capture_failures: counters.capture_failures,
            stop_reason,
        })
    }

    fn run_loop(
        &mut self,
        logger: &mut dyn PipelineLogger,
        counters: &mut Counters,
    ) -> Result<StopReason, Box<dyn std::error::Error>> {
        loop {
            if self.stop.load(Ordering::Relaxed) {
                return Ok(StopReason::Interrupted);
            }

            let start = Instant::now();
            let mut frame = match self.source.read() {
                Ok(frame) => frame,
                Err(e) if e.is_transient() => {
                    log::warn!("{e}");
                    counters.capture_failures += 1;
                    continue;
                }
                Err(e) => return Err(e.into()),
            };
            logger.timing("capture", elapsed_ms(start));

            let composite = self.process(&mut frame, logger)?;

            let start = Instant::now();
            let event = self.display.show(&composite)?;
            logger.timing("display", elapsed_ms(start));
            logger.frame(counters.frames_displayed);
            counters.frames_displayed += 1;

            match event {
                DisplayEvent::Continue => {}
                DisplayEvent::KeyPressed => return Ok(StopReason::KeyPressed),
                DisplayEvent::Closed => return Ok(StopReason::WindowClosed),
            }
        }
    }

    /// Mirrors `frame` in place and returns the legend-plus-overlay composite.
    fn process(
        &mut self,
        frame: &mut Frame,
        logger: &mut dyn PipelineLogger,
    ) -> Result<Frame, Box<dyn std::error::Error>> {
        let start = Instant::now();
        frame.flip_horizontal();
        let rgb = frame.to_rgb();
        let boxes = self.face_detector.detect_faces(&rgb)?;
        let landmarks = self.landmark_detector.detect_landmarks(&rgb)?;
        logger.timing("detect", elapsed_ms(start));
        logger.metric("faces", boxes.len() as f64);

        let start = Instant::now();
        let composite = render_overlay(frame, &boxes, &landmarks)?;
        logger.timing("render", elapsed_ms(start));
        Ok(composite)
    }
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

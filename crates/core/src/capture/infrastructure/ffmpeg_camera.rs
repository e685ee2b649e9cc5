use crate::capture::domain::frame_source::{CaptureError, FrameSource};
use crate::shared::frame::{Frame, PixelOrder, CHANNELS};

/// Where and how to open the camera.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CameraConfig {
    /// Device number used to build the platform locator.
    pub index: usize,
    /// libavdevice input format, e.g. `v4l2`. Platform default when unset.
    pub input_format: Option<String>,
    /// Device locator passed to the input format. Overrides `index`.
    pub locator: Option<String>,
    /// Requested capture size, `WIDTHxHEIGHT`.
    pub video_size: Option<String>,
    /// Requested frame rate.
    pub framerate: Option<String>,
}

impl CameraConfig {
    pub fn with_index(index: usize) -> Self {
        Self {
            index,
            ..Self::default()
        }
    }

    /// Resolves the libavdevice format name and device locator.
    pub fn device(&self) -> Result<(String, String), CaptureError> {
        let format = match &self.input_format {
            Some(f) => f.clone(),
            None => default_input_format()
                .ok_or_else(|| CaptureError::DeviceUnavailable {
                    device: format!("#{}", self.index),
                    reason: "no default capture format on this platform, use --input-format"
                        .into(),
                })?
                .to_string(),
        };
        let locator = match &self.locator {
            Some(l) => l.clone(),
            None => default_locator(&format, self.index).ok_or_else(|| {
                CaptureError::DeviceUnavailable {
                    device: format!("{format} #{}", self.index),
                    reason: format!("{format} needs an explicit --device-path"),
                }
            })?,
        };
        Ok((format, locator))
    }

    fn options(&self) -> ffmpeg_next::Dictionary<'static> {
        let mut options = ffmpeg_next::Dictionary::new();
        if let Some(size) = &self.video_size {
            options.set("video_size", size);
        }
        if let Some(rate) = &self.framerate {
            options.set("framerate", rate);
        }
        options
    }
}

fn default_input_format() -> Option<&'static str> {
    if cfg!(target_os = "linux") {
        Some("v4l2")
    } else if cfg!(target_os = "macos") {
        Some("avfoundation")
    } else if cfg!(target_os = "windows") {
        Some("dshow")
    } else {
        None
    }
}

fn default_locator(format: &str, index: usize) -> Option<String> {
    match format {
        "v4l2" | "video4linux2" => Some(format!("/dev/video{index}")),
        "avfoundation" => Some(format!("{index}")),
        _ => None,
    }
}

struct CameraState {
    ictx: ffmpeg_next::format::context::Input,
    decoder: ffmpeg_next::decoder::Video,
    scaler: Option<Scaler>,
    stream_index: usize,
}

struct Scaler {
    context: ffmpeg_next::software::scaling::Context,
    format: ffmpeg_next::format::Pixel,
    width: u32,
    height: u32,
}

/// Captures frames from a webcam through libavdevice.
///
/// Every decoded picture is converted to packed BGR24 and wrapped in a
/// [`Frame`] with [`PixelOrder::Bgr`].
pub struct FfmpegCamera {
    state: Option<CameraState>,
    device: String,
    frame_index: usize,
}

// Safety: FfmpegCamera is only used from a single thread at a time.
// The raw pointers inside ffmpeg types are not shared across threads.
unsafe impl Send for FfmpegCamera {}

impl FfmpegCamera {
    /// Opens the configured device, failing with
    /// [`CaptureError::DeviceUnavailable`] when it cannot be used.
    pub fn open(config: &CameraConfig) -> Result<Self, CaptureError> {
        let (format_name, locator) = config.device()?;
        let unavailable = |reason: String| CaptureError::DeviceUnavailable {
            device: locator.clone(),
            reason,
        };

        ffmpeg_next::init().map_err(|e| unavailable(e.to_string()))?;

        let input_format = ffmpeg_next::device::input::video()
            .find(|f| f.name() == format_name)
            .ok_or_else(|| unavailable(format!("capture format '{format_name}' not available")))?;

        let ictx = ffmpeg_next::format::open_with(
            &locator,
            &ffmpeg_next::format::format::Format::Input(input_format),
            config.options(),
        )
        .map_err(|e| unavailable(e.to_string()))?
        .input();

        let stream = ictx
            .streams()
            .best(ffmpeg_next::media::Type::Video)
            .ok_or_else(|| unavailable("no video stream".into()))?;
        let stream_index = stream.index();
        let codec_ctx = ffmpeg_next::codec::context::Context::from_parameters(stream.parameters())
            .map_err(|e| unavailable(e.to_string()))?;
        let decoder = codec_ctx
            .decoder()
            .video()
            .map_err(|e| unavailable(e.to_string()))?;

        log::info!(
            "Opened camera {locator} ({format_name}, {}x{})",
            decoder.width(),
            decoder.height()
        );

        Ok(Self {
            state: Some(CameraState {
                ictx,
                decoder,
                scaler: None,
                stream_index,
            }),
            device: locator,
            frame_index: 0,
        })
    }

    pub fn device(&self) -> &str {
        &self.device
    }
}

impl CameraState {
    fn try_receive(&mut self, index: usize) -> Result<Option<Frame>, CaptureError> {
        let mut decoded = ffmpeg_next::util::frame::video::Video::empty();
        if self.decoder.receive_frame(&mut decoded).is_err() {
            return Ok(None);
        }

        let (format, width, height) = (decoded.format(), decoded.width(), decoded.height());
        let stale = self
            .scaler
            .as_ref()
            .map_or(true, |s| s.format != format || s.width != width || s.height != height);
        if stale {
            let context = ffmpeg_next::software::scaling::Context::get(
                format,
                width,
                height,
                ffmpeg_next::format::Pixel::BGR24,
                width,
                height,
                ffmpeg_next::software::scaling::Flags::BILINEAR,
            )
            .map_err(|e| CaptureError::FrameRead(e.to_string()))?;
            self.scaler = Some(Scaler {
                context,
                format,
                width,
                height,
            });
        }
        let Some(scaler) = self.scaler.as_mut() else {
            return Ok(None);
        };

        let mut bgr = ffmpeg_next::util::frame::video::Video::empty();
        scaler
            .context
            .run(&decoded, &mut bgr)
            .map_err(|e| CaptureError::FrameRead(e.to_string()))?;

        let pixels = extract_packed_pixels(bgr.data(0), bgr.stride(0), width, height);
        Ok(Some(Frame::new(
            pixels,
            width,
            height,
            PixelOrder::Bgr,
            index,
        )))
    }
}

impl FrameSource for FfmpegCamera {
    fn read(&mut self) -> Result<Frame, CaptureError> {
        let index = self.frame_index;
        let state = self
            .state
            .as_mut()
            .ok_or_else(|| CaptureError::FrameRead("camera released".into()))?;

        loop {
            if let Some(frame) = state.try_receive(index)? {
                self.frame_index += 1;
                return Ok(frame);
            }

            let Some((stream, packet)) = state.ictx.packets().next() else {
                return Err(CaptureError::FrameRead("camera stream ended".into()));
            };
            if stream.index() != state.stream_index {
                continue;
            }
            state
                .decoder
                .send_packet(&packet)
                .map_err(|e| CaptureError::FrameRead(e.to_string()))?;
        }
    }

    fn release(&mut self) {
        if self.state.take().is_some() {
            log::debug!("Released camera {}", self.device);
        }
    }
}

impl Drop for FfmpegCamera {
    fn drop(&mut self) {
        self.release();
    }
}

/// Copies a packed 3-byte-per-pixel plane into a tight buffer.
///
/// ffmpeg frames may pad each row (stride > width*3); the padding is dropped.
fn extract_packed_pixels(data: &[u8], stride: usize, width: u32, height: u32) -> Vec<u8> {
    let row_len = width as usize * CHANNELS;
    let h = height as usize;

    let mut pixels = Vec::with_capacity(row_len * h);
    for row in 0..h {
        let row_start = row * stride;
        pixels.extend_from_slice(&data[row_start..row_start + row_len]);
    }
    pixels
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_format_and_locator_win() {
        let config = CameraConfig {
            index: 4,
            input_format: Some("dshow".into()),
            locator: Some("video=Integrated Camera".into()),
            ..CameraConfig::default()
        };
        let (format, locator) = config.device().unwrap();
        assert_eq!(format, "dshow");
        assert_eq!(locator, "video=Integrated Camera");
    }

    #[test]
    fn test_v4l2_locator_from_index() {
        let config = CameraConfig {
            input_format: Some("v4l2".into()),
            ..CameraConfig::with_index(2)
        };
        assert_eq!(config.device().unwrap().1, "/dev/video2");
    }

    #[test]
    fn test_avfoundation_locator_from_index() {
        let config = CameraConfig {
            input_format: Some("avfoundation".into()),
            ..CameraConfig::with_index(1)
        };
        assert_eq!(config.device().unwrap().1, "1");
    }

    #[test]
    fn test_dshow_without_locator_is_unavailable() {
        let config = CameraConfig {
            input_format: Some("dshow".into()),
            ..CameraConfig::default()
        };
        let err = config.device().unwrap_err();
        assert!(matches!(err, CaptureError::DeviceUnavailable { .. }));
        assert!(err.to_string().contains("--device-path"));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_linux_default_is_first_video_device() {
        let (format, locator) = CameraConfig::default().device().unwrap();
        assert_eq!(format, "v4l2");
        assert_eq!(locator, "/dev/video0");
    }

    #[test]
    fn test_open_missing_device_is_unavailable() {
        let config = CameraConfig {
            input_format: Some("v4l2".into()),
            locator: Some("/nonexistent/video99".into()),
            ..CameraConfig::default()
        };
        let err = FfmpegCamera::open(&config).err().unwrap();
        assert!(matches!(err, CaptureError::DeviceUnavailable { .. }));
    }

    #[test]
    fn test_extract_strips_row_padding() {
        // 2x2 image, stride 8 (6 bytes of pixels + 2 padding per row)
        let data = [1, 2, 3, 4, 5, 6, 0, 0, 7, 8, 9, 10, 11, 12, 0, 0];
        let pixels = extract_packed_pixels(&data, 8, 2, 2);
        assert_eq!(pixels, vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12]);
    }
}

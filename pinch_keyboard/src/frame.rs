//! Frame sources: where the picture under the keyboard comes from.
//!
//! Every captured frame is mirrored horizontally, so moving a hand to the
//! right moves it right on screen, and scaled to the canvas size if the
//! device delivered something else.

use std::time::Instant;

use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FrameError {
    #[error("camera unavailable: {0}")]
    Unavailable(String),
    #[error("frame capture failed: {0}")]
    Capture(String),
    #[cfg(feature = "camera")]
    #[error("camera error: {0}")]
    Camera(#[from] nokhwa::NokhwaError),
}

/// Anything that can hand out RGB frames one at a time.
pub trait FrameSource {
    /// Block until the next frame is available.  An error ends the session.
    fn capture(&mut self) -> Result<RgbImage, FrameError>;

    /// Human-readable name for logs and the status line.
    fn describe(&self) -> String;
}

/// Mirror `frame` and bring it to `width × height`.
pub fn prepare(mut frame: RgbImage, width: u32, height: u32) -> RgbImage {
    imageops::flip_horizontal_in_place(&mut frame);
    if frame.dimensions() == (width, height) {
        frame
    } else {
        imageops::resize(&frame, width, height, FilterType::Triangle)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// SimFrameSource — synthetic backdrop (always available)
// ════════════════════════════════════════════════════════════════════════════

/// A slowly shifting gradient standing in for a camera.
pub struct SimFrameSource {
    width:   u32,
    height:  u32,
    started: Instant,
}

impl SimFrameSource {
    pub fn new(width: u32, height: u32) -> Self {
        SimFrameSource { width, height, started: Instant::now() }
    }
}

impl FrameSource for SimFrameSource {
    fn capture(&mut self) -> Result<RgbImage, FrameError> {
        let phase = (self.started.elapsed().as_millis() / 40 % 256) as u32;
        let (w, h) = (self.width.max(1), self.height.max(1));
        let frame = RgbImage::from_fn(w, h, |x, y| {
            let r = 40 + (x * 60 / w) as u8;
            let g = 50 + (y * 60 / h) as u8;
            let b = 70 + (((x + phase) % 256) * 40 / 256) as u8;
            Rgb([r, g, b])
        });
        Ok(prepare(frame, self.width, self.height))
    }

    fn describe(&self) -> String {
        format!("simulated {}x{}", self.width, self.height)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// CameraSource — real webcam (feature = "camera")
// ════════════════════════════════════════════════════════════════════════════

/// Webcam opened through `nokhwa`.  The stream is stopped when this is
/// dropped, whichever way the frame loop exits.
#[cfg(feature = "camera")]
pub struct CameraSource {
    camera: nokhwa::Camera,
    width:  u32,
    height: u32,
}

#[cfg(feature = "camera")]
impl CameraSource {
    /// Open camera `index`, asking for the format closest to `width × height`.
    pub fn open(index: u32, width: u32, height: u32) -> Result<Self, FrameError> {
        use nokhwa::pixel_format::RgbFormat;
        use nokhwa::utils::{
            CameraFormat, CameraIndex, FrameFormat, RequestedFormat, RequestedFormatType,
            Resolution,
        };

        let wanted = CameraFormat::new(Resolution::new(width, height), FrameFormat::MJPEG, 30);
        let requested = RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(wanted));
        let mut camera = nokhwa::Camera::new(CameraIndex::Index(index), requested)
            .map_err(|e| FrameError::Unavailable(e.to_string()))?;
        camera.open_stream()
            .map_err(|e| FrameError::Unavailable(e.to_string()))?;

        let res = camera.resolution();
        log::info!(
            "opened camera {} ({}) at {}x{}",
            index, camera.info().human_name(), res.width(), res.height()
        );
        Ok(CameraSource { camera, width, height })
    }
}

#[cfg(feature = "camera")]
impl FrameSource for CameraSource {
    fn capture(&mut self) -> Result<RgbImage, FrameError> {
        use nokhwa::pixel_format::RgbFormat;

        let buffer = self.camera.frame()?;
        let decoded = buffer.decode_image::<RgbFormat>()?;
        let (w, h) = decoded.dimensions();
        let frame = RgbImage::from_raw(w, h, decoded.into_raw())
            .ok_or_else(|| FrameError::Capture("short frame buffer".to_string()))?;
        Ok(prepare(frame, self.width, self.height))
    }

    fn describe(&self) -> String {
        format!("camera {}", self.camera.info().human_name())
    }
}

#[cfg(feature = "camera")]
impl Drop for CameraSource {
    fn drop(&mut self) {
        match self.camera.stop_stream() {
            Ok(())  => log::info!("camera released"),
            Err(e)  => log::warn!("camera stop failed: {}", e),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prepare_mirrors() {
        let mut img = RgbImage::new(4, 2);
        img.put_pixel(0, 0, Rgb([255, 0, 0]));
        let out = prepare(img, 4, 2);
        assert_eq!(out.get_pixel(3, 0).0, [255, 0, 0]);
        assert_eq!(out.get_pixel(0, 0).0, [0, 0, 0]);
    }

    #[test]
    fn prepare_resizes_to_target() {
        let out = prepare(RgbImage::new(640, 360), 1280, 720);
        assert_eq!(out.dimensions(), (1280, 720));
    }

    #[test]
    fn sim_source_produces_requested_size() {
        let mut src = SimFrameSource::new(320, 180);
        let frame = src.capture().unwrap();
        assert_eq!(frame.dimensions(), (320, 180));
        assert!(src.describe().contains("320x180"));
    }
}

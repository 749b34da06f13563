use crate::device_camera::interface::{DeviceCamera, DeviceCameraEvent, Frame};
use crate::library::error::{Error, Result};
use crate::library::logger::interface::Logger;
use image::{Rgba, RgbaImage};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{mpsc, Arc, Mutex};

const WIDTH: u32 = 320;
const HEIGHT: u32 = 240;
const SKIN: [f32; 3] = [205.0, 160.0, 140.0];
const LESION: [f32; 3] = [95.0, 60.0, 50.0];

/// Synthetic camera that simulates a user slowly bringing a lesion into focus:
/// the scene starts dim and textureless and gains light and fine detail with
/// every captured frame.
pub struct DeviceCameraFake {
    logger: Arc<dyn Logger + Send + Sync>,
    started: AtomicBool,
    frame_count: AtomicU64,
    rng: Mutex<StdRng>,
}

impl DeviceCameraFake {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            logger: logger.with_namespace("camera").with_namespace("fake"),
            started: AtomicBool::new(false),
            frame_count: AtomicU64::new(0),
            rng: Mutex::new(StdRng::seed_from_u64(7)),
        }
    }

    fn render_scene(&self, index: u64) -> Result<RgbaImage> {
        let light = (0.45 + index as f32 * 0.01).min(1.0);
        let speck_probability = (index as f64 * 0.004).min(0.12);

        let mut rng = self
            .rng
            .lock()
            .map_err(|e| Error::Camera(e.to_string()))?;

        let (cx, cy) = (WIDTH as f32 / 2.0, HEIGHT as f32 / 2.0);
        let radius = HEIGHT as f32 / 5.0;

        let image = RgbaImage::from_fn(WIDTH, HEIGHT, |x, y| {
            let distance = ((x as f32 - cx).powi(2) + (y as f32 - cy).powi(2)).sqrt();
            let base = if distance < radius { LESION } else { SKIN };

            let speck = if rng.random_bool(speck_probability) {
                60.0
            } else {
                0.0
            };

            let channel = |value: f32| ((value * light) + speck).clamp(0.0, 255.0) as u8;
            Rgba([channel(base[0]), channel(base[1]), channel(base[2]), 255])
        });

        Ok(image)
    }
}

impl DeviceCamera for DeviceCameraFake {
    fn start(&self) -> Result<()> {
        self.logger.info("Starting camera...")?;
        self.started.store(true, Ordering::SeqCst);
        self.logger.info("Camera started")?;
        Ok(())
    }

    fn stop(&self) -> Result<()> {
        self.logger.info("Stopping camera...")?;
        self.started.store(false, Ordering::SeqCst);
        Ok(())
    }

    fn capture_frame(&self) -> Result<Frame> {
        if !self.started.load(Ordering::SeqCst) {
            return Err(Error::CameraNotStarted);
        }

        let index = self.frame_count.fetch_add(1, Ordering::SeqCst);
        let image = self.render_scene(index)?;

        Ok(Frame(image))
    }

    fn events(&self) -> mpsc::Receiver<DeviceCameraEvent> {
        let (tx, rx) = mpsc::channel();
        let _ = tx.send(DeviceCameraEvent::Connected);
        rx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::logger::impl_tracing::LoggerTracing;

    fn camera() -> DeviceCameraFake {
        DeviceCameraFake::new(Arc::new(LoggerTracing::new()))
    }

    #[test]
    fn test_capture_requires_start() {
        let camera = camera();

        assert!(matches!(
            camera.capture_frame(),
            Err(Error::CameraNotStarted)
        ));
    }

    #[test]
    fn test_frames_have_fixed_size() {
        let camera = camera();
        camera.start().unwrap();

        let frame = camera.capture_frame().unwrap();

        assert_eq!((frame.width(), frame.height()), (WIDTH, HEIGHT));
        assert_eq!(frame.pixels().len(), (WIDTH * HEIGHT * 4) as usize);
    }

    #[test]
    fn test_reports_connected() {
        let events = camera().events();

        assert!(matches!(events.recv(), Ok(DeviceCameraEvent::Connected)));
    }
}

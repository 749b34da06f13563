use crate::library::error::Result;
use image::RgbaImage;
use std::sync::mpsc;

#[derive(Debug, Clone)]
pub enum DeviceCameraEvent {
    Disconnected,
    Connected,
}

/// A single RGBA still taken from the camera feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame(pub RgbaImage);

impl Frame {
    pub fn width(&self) -> u32 {
        self.0.width()
    }

    pub fn height(&self) -> u32 {
        self.0.height()
    }

    pub fn pixels(&self) -> &[u8] {
        self.0.as_raw()
    }
}

pub trait DeviceCamera {
    fn start(&self) -> Result<()>;
    #[allow(dead_code)]
    fn stop(&self) -> Result<()>;
    fn capture_frame(&self) -> Result<Frame>;
    fn events(&self) -> mpsc::Receiver<DeviceCameraEvent>;
}

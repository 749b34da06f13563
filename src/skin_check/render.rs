use crate::device_display::interface::DeviceDisplay;
use crate::library::error::{Error, Result};
use crate::skin_check::core::{Model, ModelConnecting, ModelGuiding};
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct Render {
    device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>>,
}

impl Render {
    pub fn new(device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>>) -> Self {
        Self { device_display }
    }

    pub fn render(&self, model: &Model) -> Result<()> {
        let mut device_display = self
            .device_display
            .lock()
            .map_err(|e| Error::Poisoned(e.to_string()))?;

        device_display.clear()?;

        match model {
            Model::Connecting(ModelConnecting::WaitingForCamera) => {
                device_display.write_line(0, "Waiting for camera...")?;
            }
            Model::Connecting(ModelConnecting::StartingCamera) => {
                device_display.write_line(0, "Starting camera...")?;
            }
            Model::Guiding(ModelGuiding {
                latest, notice, ..
            }) => {
                match latest {
                    Some(result) => {
                        device_display.write_line(0, result.message)?;
                        device_display.write_line(
                            1,
                            &format!("Focus {:.0}%", result.focus_score * 100.0),
                        )?;
                        device_display.set_progress(result.progress_percent)?;
                        device_display.set_capture_ready(result.ready_for_capture)?;
                    }
                    None => {
                        device_display.write_line(0, "Point the camera at the spot")?;
                    }
                }

                if let Some(notice) = notice {
                    device_display.write_line(1, notice)?;
                }
            }
            Model::Capturing => {
                device_display.write_line(0, "Capturing...")?;
                device_display.set_progress(100)?;
            }
            Model::Classifying => {
                device_display.write_line(0, "Analyzing...")?;
                device_display.set_progress(100)?;
            }
            Model::Reviewing(reviewing) => {
                device_display.write_line(0, &format!("{} risk", reviewing.assessment.risk))?;
                device_display.write_line(1, &reviewing.assessment.summary)?;
            }
        }

        device_display.flush()
    }
}

use super::main::SkinCheck;
use crate::guidance::GuidanceResult;
use crate::library::error::{Error, Result};
use crate::skin_check::core::{Effect, Msg};
use std::time::Instant;

impl SkinCheck {
    pub fn interpret_effect(&self, effect: Effect) {
        if !matches!(effect, Effect::GuideFrame { .. }) {
            let _ = self
                .logger
                .info(&format!("Running effect: {}", effect.to_display_string()));
        }

        match effect {
            Effect::SubscribeToCameraEvents => {
                let events = self.device_camera.events();
                for event in events.iter() {
                    if self.event_sender.send(Msg::CameraEvent(event)).is_err() {
                        break;
                    }
                }
            }
            Effect::SubscribeTick => loop {
                std::thread::sleep(self.config.tick_rate);
                if self.event_sender.send(Msg::Tick(Instant::now())).is_err() {
                    break;
                }
            },
            Effect::StartCamera => {
                let started = self.device_camera.start();
                let _ = self.event_sender.send(Msg::CameraStartDone(started));
            }
            Effect::GuideFrame { now } => {
                let result = self.guide_frame(now);
                let _ = self.event_sender.send(Msg::GuidanceDone(result));
            }
            Effect::ResetGuidance => {
                if let Err(e) = self.reset_guidance() {
                    let _ = self.logger.warn(&format!("Guidance reset failed: {}", e));
                }
            }
            Effect::CaptureStill => {
                let frame = self.device_camera.capture_frame();
                let _ = self.event_sender.send(Msg::StillCaptureDone(frame));
            }
            Effect::ClassifyFrame { frame } => {
                let classifications = self.image_classifier.classify(&frame);
                let _ = self.event_sender.send(Msg::ClassifyDone(classifications));
            }
        }
    }

    fn guide_frame(&self, now: Instant) -> Result<GuidanceResult> {
        let frame = self.device_camera.capture_frame()?;

        let mut guidance = self
            .guidance
            .lock()
            .map_err(|e| Error::Poisoned(e.to_string()))?;

        let previous = guidance.state();
        let result = guidance.guide(&frame, now);

        if result.state != previous {
            self.logger.info(&format!(
                "Guidance {} -> {} (brightness {:.2}, sharpness {:.2}, focus {:.2})",
                previous,
                result.state,
                result.metrics.brightness,
                result.metrics.sharpness,
                result.focus_score
            ))?;
        }

        Ok(result)
    }

    fn reset_guidance(&self) -> Result<()> {
        self.guidance
            .lock()
            .map_err(|e| Error::Poisoned(e.to_string()))?
            .reset(Instant::now());
        Ok(())
    }
}

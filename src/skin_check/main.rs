use crate::config::Config;
use crate::device_camera::interface::DeviceCamera;
use crate::device_display::interface::DeviceDisplay;
use crate::guidance::GuidanceEngine;
use crate::image_classifier::interface::ImageClassifier;
use crate::library::error::{Error, Result};
use crate::library::logger::interface::Logger;
use crate::skin_check::core::{init, transition, Effect, Msg};
use crate::skin_check::render::Render;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::time::Instant;

#[derive(Clone)]
pub struct SkinCheck {
    pub config: Config,
    pub logger: Arc<dyn Logger + Send + Sync>,
    pub device_camera: Arc<dyn DeviceCamera + Send + Sync>,
    pub image_classifier: Arc<dyn ImageClassifier + Send + Sync>,
    pub guidance: Arc<Mutex<GuidanceEngine>>,
    pub render: Render,
    pub event_sender: Sender<Msg>,
    pub event_receiver: Arc<Mutex<Receiver<Msg>>>,
}

impl SkinCheck {
    pub fn new(
        config: Config,
        logger: Arc<dyn Logger + Send + Sync>,
        device_camera: Arc<dyn DeviceCamera + Send + Sync>,
        device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>>,
        image_classifier: Arc<dyn ImageClassifier + Send + Sync>,
    ) -> Self {
        let (event_sender, event_receiver) = channel();
        let guidance = GuidanceEngine::new(config.guidance.clone(), Instant::now());

        Self {
            logger: logger.with_namespace("skin_check"),
            config,
            device_camera,
            image_classifier,
            guidance: Arc::new(Mutex::new(guidance)),
            render: Render::new(device_display),
            event_sender,
            event_receiver: Arc::new(Mutex::new(event_receiver)),
        }
    }

    /// Handle for feeding messages from outside the loop, e.g. a capture button.
    pub fn sender(&self) -> Sender<Msg> {
        self.event_sender.clone()
    }

    fn spawn_effects(&self, effects: Vec<Effect>) {
        for effect in effects {
            let self_clone = self.clone();
            std::thread::spawn(move || self_clone.interpret_effect(effect));
        }
    }

    fn recv(&self) -> Result<Msg> {
        self.event_receiver
            .lock()
            .map_err(|e| Error::Poisoned(e.to_string()))?
            .recv()
            .map_err(|_| Error::ChannelClosed)
    }

    pub fn run(&self) -> Result<()> {
        let (mut current_model, effects) = init();

        self.render.render(&current_model)?;
        self.spawn_effects(effects);

        loop {
            let msg = self.recv()?;

            if !matches!(msg, Msg::Tick(_) | Msg::GuidanceDone(Ok(_))) {
                self.logger
                    .info(&format!("Processing msg: {}", msg.to_display_string()))?;
            }

            let (new_model, effects) = transition(&self.config, current_model, msg);
            current_model = new_model;

            self.render.render(&current_model)?;

            self.spawn_effects(effects);
        }
    }
}

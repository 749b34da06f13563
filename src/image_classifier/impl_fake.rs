use crate::device_camera::interface::Frame;
use crate::image_classifier::interface::{Classification, ImageClassifier, INPUT_SIZE, LABELS};
use crate::image_classifier::preprocess::frame_to_tensor;
use crate::library::error::{Error, Result};
use crate::library::logger::interface::Logger;
use rand::distr::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::{Arc, Mutex};

/// Stand-in for the lesion model: runs the real preprocessing, then returns a
/// random softmax distribution over the label set.
pub struct ImageClassifierFake {
    logger: Arc<dyn Logger + Send + Sync>,
    rng: Mutex<StdRng>,
}

impl ImageClassifierFake {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self::with_rng(logger, StdRng::from_os_rng())
    }

    pub fn with_rng(logger: Arc<dyn Logger + Send + Sync>, rng: StdRng) -> Self {
        Self {
            logger: logger.with_namespace("image_classifier").with_namespace("fake"),
            rng: Mutex::new(rng),
        }
    }
}

fn softmax(logits: &[f32]) -> Vec<f32> {
    let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = logits.iter().map(|l| (l - max).exp()).collect();
    let total: f32 = exps.iter().sum();
    exps.iter().map(|e| e / total).collect()
}

impl ImageClassifier for ImageClassifierFake {
    fn classify(&self, frame: &Frame) -> Result<Vec<Classification>> {
        let tensor = frame_to_tensor(frame, INPUT_SIZE)?;
        self.logger.info(&format!(
            "Classifying {}x{} frame as {:?} tensor",
            frame.width(),
            frame.height(),
            tensor.shape
        ))?;

        let logit_dist = Uniform::new(-2.0f32, 2.0).map_err(|e| Error::Classifier(e.to_string()))?;

        let logits: Vec<f32> = {
            let mut rng = self
                .rng
                .lock()
                .map_err(|e| Error::Poisoned(e.to_string()))?;
            LABELS.iter().map(|_| logit_dist.sample(&mut *rng)).collect()
        };

        let mut classifications: Vec<Classification> = LABELS
            .iter()
            .zip(softmax(&logits))
            .map(|(label, confidence)| Classification {
                label: label.to_string(),
                confidence,
            })
            .collect();

        classifications.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

        Ok(classifications)
    }
}

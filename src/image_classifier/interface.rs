use crate::device_camera::interface::Frame;
use crate::library::error::Result;

/// Lesion classes the model was trained on (ISIC archive diagnoses).
pub const LABELS: [&str; 7] = [
    "melanoma",
    "nevus",
    "basal_cell_carcinoma",
    "actinic_keratosis",
    "benign_keratosis",
    "dermatofibroma",
    "vascular_lesion",
];

/// Side length of the square model input.
pub const INPUT_SIZE: u32 = 224;

#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub label: String,
    pub confidence: f32,
}

pub trait ImageClassifier {
    /// Returns one probability per label, highest first.
    fn classify(&self, frame: &Frame) -> Result<Vec<Classification>>;
}

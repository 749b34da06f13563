use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Camera error: {0}")]
    Camera(String),

    #[error("Camera not started")]
    CameraNotStarted,

    #[error("Classifier error: {0}")]
    Classifier(String),

    #[error("Display error: {0}")]
    Display(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Lock poisoned: {0}")]
    Poisoned(String),

    #[error("Event channel closed")]
    ChannelClosed,
}

pub type Result<T> = std::result::Result<T, Error>;

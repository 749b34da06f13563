use crate::config::Config;
use crate::device_camera::interface::{DeviceCameraEvent, Frame};
use crate::guidance::GuidanceResult;
use crate::image_classifier::interface::Classification;
use crate::library::error::Error;
use crate::skin_check::assessment::{assess, Assessment};
use std::time::Instant;

#[derive(Clone, Debug, PartialEq)]
pub enum Model {
    Connecting(ModelConnecting),
    Guiding(ModelGuiding),
    Capturing,
    Classifying,
    Reviewing(ModelReviewing),
}

impl Default for Model {
    fn default() -> Self {
        Model::Connecting(ModelConnecting::default())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum ModelConnecting {
    #[default]
    WaitingForCamera,
    StartingCamera,
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct ModelGuiding {
    pub latest: Option<GuidanceResult>,
    /// A guidance frame is being captured and scored.
    pub in_flight: bool,
    /// Last failure, shown until the next guidance result.
    pub notice: Option<String>,
}

impl ModelGuiding {
    fn with_notice(notice: String) -> Self {
        Self {
            notice: Some(notice),
            ..Self::default()
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ModelReviewing {
    pub assessment: Assessment,
    /// Set on the first tick after the result arrived.
    pub since: Option<Instant>,
}

#[derive(Debug)]
pub enum Msg {
    Tick(Instant),
    CameraEvent(DeviceCameraEvent),
    CameraStartDone(Result<(), Error>),
    GuidanceDone(Result<GuidanceResult, Error>),
    CaptureRequested,
    StillCaptureDone(Result<Frame, Error>),
    ClassifyDone(Result<Vec<Classification>, Error>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    SubscribeToCameraEvents,
    SubscribeTick,
    StartCamera,
    GuideFrame { now: Instant },
    ResetGuidance,
    CaptureStill,
    ClassifyFrame { frame: Frame },
}

impl Effect {
    pub fn to_display_string(&self) -> String {
        match self {
            Effect::ClassifyFrame { frame } => {
                format!("ClassifyFrame {{ {}x{} }}", frame.width(), frame.height())
            }
            effect => format!("{:?}", effect),
        }
    }
}

impl Msg {
    pub fn to_display_string(&self) -> String {
        match self {
            Msg::StillCaptureDone(Ok(frame)) => {
                format!("StillCaptureDone(Ok({}x{}))", frame.width(), frame.height())
            }
            msg => format!("{:?}", msg),
        }
    }
}

pub fn init() -> (Model, Vec<Effect>) {
    (
        Model::default(),
        vec![Effect::SubscribeToCameraEvents, Effect::SubscribeTick],
    )
}

pub fn transition(config: &Config, model: Model, msg: Msg) -> (Model, Vec<Effect>) {
    match (model, msg) {
        (_, Msg::CameraEvent(DeviceCameraEvent::Disconnected)) => {
            (Model::Connecting(ModelConnecting::WaitingForCamera), vec![])
        }

        (Model::Connecting(child), msg) => transition_connecting(child, msg),

        (Model::Guiding(child), msg) => transition_guiding(config, child, msg),

        (Model::Capturing, Msg::StillCaptureDone(Ok(frame))) => {
            (Model::Classifying, vec![Effect::ClassifyFrame { frame }])
        }

        (Model::Capturing, Msg::StillCaptureDone(Err(e))) => (
            Model::Guiding(ModelGuiding::with_notice(format!("Capture failed: {}", e))),
            vec![Effect::ResetGuidance],
        ),

        (Model::Classifying, Msg::ClassifyDone(Ok(classifications))) => (
            Model::Reviewing(ModelReviewing {
                assessment: assess(&config.assessment, &classifications),
                since: None,
            }),
            vec![],
        ),

        (Model::Classifying, Msg::ClassifyDone(Err(e))) => (
            Model::Guiding(ModelGuiding::with_notice(format!("Analysis failed: {}", e))),
            vec![Effect::ResetGuidance],
        ),

        (Model::Reviewing(child), msg) => transition_reviewing(config, child, msg),

        (model, _) => (model, vec![]),
    }
}

fn transition_connecting(model: ModelConnecting, msg: Msg) -> (Model, Vec<Effect>) {
    match (model, msg) {
        (ModelConnecting::WaitingForCamera, Msg::CameraEvent(DeviceCameraEvent::Connected)) => (
            Model::Connecting(ModelConnecting::StartingCamera),
            vec![Effect::StartCamera],
        ),

        (ModelConnecting::StartingCamera, Msg::CameraStartDone(Ok(()))) => (
            Model::Guiding(ModelGuiding::default()),
            vec![Effect::ResetGuidance],
        ),

        (ModelConnecting::StartingCamera, Msg::CameraStartDone(Err(_))) => (
            Model::Connecting(ModelConnecting::StartingCamera),
            vec![Effect::StartCamera],
        ),

        (model, _) => (Model::Connecting(model), vec![]),
    }
}

fn transition_guiding(config: &Config, model: ModelGuiding, msg: Msg) -> (Model, Vec<Effect>) {
    match msg {
        Msg::Tick(now) if !model.in_flight => (
            Model::Guiding(ModelGuiding {
                in_flight: true,
                ..model
            }),
            vec![Effect::GuideFrame { now }],
        ),

        Msg::GuidanceDone(Ok(result)) => {
            if result.ready_for_capture && config.auto_capture {
                return (Model::Capturing, vec![Effect::CaptureStill]);
            }

            (
                Model::Guiding(ModelGuiding {
                    latest: Some(result),
                    in_flight: false,
                    notice: None,
                }),
                vec![],
            )
        }

        Msg::GuidanceDone(Err(e)) => (
            Model::Guiding(ModelGuiding {
                in_flight: false,
                notice: Some(e.to_string()),
                ..model
            }),
            vec![],
        ),

        Msg::CaptureRequested => (Model::Capturing, vec![Effect::CaptureStill]),

        _ => (Model::Guiding(model), vec![]),
    }
}

fn transition_reviewing(
    config: &Config,
    model: ModelReviewing,
    msg: Msg,
) -> (Model, Vec<Effect>) {
    match (model.since, msg) {
        (None, Msg::Tick(now)) => (
            Model::Reviewing(ModelReviewing {
                since: Some(now),
                ..model
            }),
            vec![],
        ),

        (Some(since), Msg::Tick(now))
            if now.saturating_duration_since(since) >= config.review_duration =>
        {
            (
                Model::Guiding(ModelGuiding::default()),
                vec![Effect::ResetGuidance],
            )
        }

        (_, Msg::CaptureRequested) => (
            Model::Guiding(ModelGuiding::default()),
            vec![Effect::ResetGuidance],
        ),

        _ => (Model::Reviewing(model), vec![]),
    }
}

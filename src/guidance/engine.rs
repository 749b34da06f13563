use crate::config::GuidanceConfig;
use crate::device_camera::interface::Frame;
use crate::guidance::metrics::{compute_metrics, QualityMetrics};
use crate::guidance::state::GuidanceState;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq)]
pub struct GuidanceResult {
    pub message: &'static str,
    pub state: GuidanceState,
    pub focus_score: f32,
    pub progress_percent: u8,
    pub ready_for_capture: bool,
    pub metrics: QualityMetrics,
}

/// Tracks one guidance session.
///
/// The engine never schedules itself: the host calls [`GuidanceEngine::guide`]
/// on its own tick and passes the current time in. The state only changes
/// once it has been held for longer than the configured dwell.
#[derive(Debug, Clone)]
pub struct GuidanceEngine<R = StdRng> {
    config: GuidanceConfig,
    rng: R,
    state: GuidanceState,
    state_start: Instant,
    focus_score: f32,
}

impl GuidanceEngine<StdRng> {
    pub fn new(config: GuidanceConfig, now: Instant) -> Self {
        Self::with_rng(config, StdRng::from_os_rng(), now)
    }
}

impl<R: Rng> GuidanceEngine<R> {
    pub fn with_rng(config: GuidanceConfig, rng: R, now: Instant) -> Self {
        Self {
            config,
            rng,
            state: GuidanceState::default(),
            state_start: now,
            focus_score: 0.0,
        }
    }

    pub fn state(&self) -> GuidanceState {
        self.state
    }

    pub fn focus_score(&self) -> f32 {
        self.focus_score
    }

    pub fn time_in_state(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.state_start)
    }

    pub fn is_ready_for_capture(&self) -> bool {
        self.state == GuidanceState::HoldSteady
            && self.focus_score > self.config.ready_focus_threshold
    }

    /// Starts a fresh session, e.g. after a capture has been reviewed.
    pub fn reset(&mut self, now: Instant) {
        self.state = GuidanceState::default();
        self.state_start = now;
        self.focus_score = 0.0;
    }

    pub fn guide(&mut self, frame: &Frame, now: Instant) -> GuidanceResult {
        let metrics = compute_metrics(frame, &self.config);
        self.advance(&metrics, now)
    }

    /// Feeds already computed metrics through the state machine.
    pub fn advance(&mut self, metrics: &QualityMetrics, now: Instant) -> GuidanceResult {
        self.focus_score = metrics.focus_score;

        if self.time_in_state(now) > self.config.dwell {
            self.state = self.next_state(metrics, now);
            self.state_start = now;
        }

        GuidanceResult {
            message: self.state.message(),
            state: self.state,
            focus_score: self.focus_score,
            progress_percent: self.progress_percent(now),
            ready_for_capture: self.is_ready_for_capture(),
            metrics: *metrics,
        }
    }

    /// Picks the next instruction. First matching rule wins.
    pub fn next_state(&mut self, metrics: &QualityMetrics, now: Instant) -> GuidanceState {
        let config = &self.config;

        if self.time_in_state(now) > config.dwell && metrics.focus_score > config.hold_focus_threshold
        {
            GuidanceState::HoldSteady
        } else if metrics.brightness < config.min_brightness {
            GuidanceState::MoreLight
        } else if metrics.brightness > config.max_brightness {
            GuidanceState::LessReflection
        } else if metrics.distance_estimate < config.min_distance {
            GuidanceState::Further
        } else if metrics.distance_estimate > config.max_distance {
            GuidanceState::Closer
        } else if !metrics.has_focused_subject {
            if self.rng.random_bool(0.5) {
                GuidanceState::LeftSide
            } else {
                GuidanceState::RightSide
            }
        } else {
            GuidanceState::Center
        }
    }

    fn progress_percent(&self, now: Instant) -> u8 {
        let percent = match self.state {
            GuidanceState::HoldSteady => 100.0 * self.focus_score,
            _ => {
                100.0 * self.time_in_state(now).as_secs_f32() / self.config.dwell.as_secs_f32()
            }
        };

        percent.clamp(0.0, 100.0) as u8
    }
}

use crate::library::error::{Error, Result};
use chrono::Offset;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const CONFIG_PATH_ENV: &str = "SKIN_CHECK_CONFIG";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoggerBackend {
    Console,
    Tracing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayBackend {
    Console,
    Gui,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// How often the host polls the guidance engine.
    #[serde(with = "duration_ms")]
    pub tick_rate: Duration,
    /// How long a classification summary stays on screen before guidance resumes.
    #[serde(with = "duration_ms")]
    pub review_duration: Duration,
    /// Capture automatically as soon as guidance reports ready.
    pub auto_capture: bool,
    pub logger: LoggerBackend,
    pub logger_utc_offset_minutes: i32,
    pub display: DisplayBackend,
    pub guidance: GuidanceConfig,
    pub assessment: AssessmentConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_rate: Duration::from_millis(200),
            review_duration: Duration::from_secs(10),
            auto_capture: true,
            logger: LoggerBackend::Console,
            logger_utc_offset_minutes: 0,
            display: DisplayBackend::Console,
            guidance: GuidanceConfig::default(),
            assessment: AssessmentConfig::default(),
        }
    }
}

impl Config {
    /// Loads a TOML config file. Missing keys fall back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let raw = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;

        Self::from_toml(&raw)
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        let config: Config = toml::from_str(raw).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.tick_rate.is_zero() {
            return Err(Error::Config("tick_rate must be non-zero".to_string()));
        }
        if self.guidance.dwell.is_zero() {
            return Err(Error::Config("guidance.dwell must be non-zero".to_string()));
        }
        if self.guidance.brightness_sample_stride == 0 || self.guidance.edge_grid_stride == 0 {
            return Err(Error::Config("sampling strides must be non-zero".to_string()));
        }
        Ok(())
    }

    pub fn logger_timezone(&self) -> chrono::FixedOffset {
        chrono::FixedOffset::east_opt(self.logger_utc_offset_minutes * 60)
            .unwrap_or_else(|| chrono::Utc.fix())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuidanceConfig {
    /// Minimum time a guidance state is held before it is re-evaluated.
    #[serde(with = "duration_ms")]
    pub dwell: Duration,
    pub hold_focus_threshold: f32,
    pub ready_focus_threshold: f32,
    pub subject_sharpness_threshold: f32,
    pub min_brightness: f32,
    pub max_brightness: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub focused_gain: f32,
    pub unfocused_gain: f32,
    /// Every n-th pixel contributes to brightness.
    pub brightness_sample_stride: usize,
    pub edge_grid_stride: usize,
    /// Intensity step (0-255) that counts as an edge.
    pub edge_delta: f32,
    /// Square size assumed when a frame reports no dimensions.
    pub default_frame_size: u32,
}

impl Default for GuidanceConfig {
    fn default() -> Self {
        Self {
            dwell: Duration::from_millis(3000),
            hold_focus_threshold: 0.7,
            ready_focus_threshold: 0.8,
            subject_sharpness_threshold: 0.4,
            min_brightness: 0.4,
            max_brightness: 0.85,
            min_distance: 0.3,
            max_distance: 0.7,
            focused_gain: 1.5,
            unfocused_gain: 0.5,
            brightness_sample_stride: 10,
            edge_grid_stride: 2,
            edge_delta: 20.0,
            default_frame_size: 300,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssessmentConfig {
    pub concerning_labels: Vec<String>,
    pub high_risk_confidence: f32,
    pub moderate_risk_confidence: f32,
}

impl Default for AssessmentConfig {
    fn default() -> Self {
        Self {
            concerning_labels: vec![
                "melanoma".to_string(),
                "basal_cell_carcinoma".to_string(),
                "actinic_keratosis".to_string(),
            ],
            high_risk_confidence: 0.6,
            moderate_risk_confidence: 0.3,
        }
    }
}

mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_is_default() {
        let config = Config::from_toml("").unwrap();

        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_toml_overrides_only_given_keys() {
        let config = Config::from_toml(
            r#"
            tick_rate = 100
            auto_capture = false
            display = "gui"

            [guidance]
            dwell = 1500
            "#,
        )
        .unwrap();

        assert_eq!(config.tick_rate, Duration::from_millis(100));
        assert!(!config.auto_capture);
        assert_eq!(config.display, DisplayBackend::Gui);
        assert_eq!(config.guidance.dwell, Duration::from_millis(1500));
        assert_eq!(config.guidance.edge_delta, 20.0);
        assert_eq!(config.assessment, AssessmentConfig::default());
    }

    #[test]
    fn test_zero_dwell_is_rejected() {
        let result = Config::from_toml("[guidance]\ndwell = 0\n");

        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        let result = Config::from_toml("tick_rate = \"fast\"");

        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_missing_path_loads_default() {
        assert_eq!(Config::load(None).unwrap(), Config::default());
    }

    #[test]
    fn test_logger_timezone_offset() {
        let config = Config {
            logger_utc_offset_minutes: -7 * 60,
            ..Config::default()
        };

        assert_eq!(config.logger_timezone().local_minus_utc(), -7 * 3600);
    }
}

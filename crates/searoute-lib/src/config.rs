//! Engine tuning constants.
//!
//! Defaults reproduce the documented behaviour; hosts may override any value
//! through `SEAROUTE_*` environment variables via [`EngineConfig::from_env`].

use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Error, Result};
use crate::graph::GraphBuildOptions;
use crate::weather::WeatherThresholds;

/// Tunable parameters for the route engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub safety_margin_nm: f64,
    pub max_direct_connection_nm: f64,
    pub base_speed_knots: f64,
    pub base_fuel_mt_per_100nm: f64,
    pub default_depth_m: f64,
    pub shallow_water_depth_m: f64,
    pub wind_penalty_threshold_ms: f64,
    pub wave_penalty_threshold_m: f64,
    pub avoid_radius_nm: f64,
    pub alternative_timeout_ms: u64,
    pub max_detour_expansions: usize,
    pub latitude_bias_weight: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            safety_margin_nm: 10.0,
            max_direct_connection_nm: 500.0,
            base_speed_knots: 15.0,
            base_fuel_mt_per_100nm: 2.5,
            default_depth_m: 50.0,
            shallow_water_depth_m: 15.0,
            wind_penalty_threshold_ms: 15.0,
            wave_penalty_threshold_m: 3.0,
            avoid_radius_nm: 50.0,
            alternative_timeout_ms: 2_000,
            max_detour_expansions: 256,
            latitude_bias_weight: 3.0,
        }
    }
}

impl EngineConfig {
    /// Defaults overlaid with any `SEAROUTE_*` environment variables.
    ///
    /// Unparseable values are logged and ignored.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        let config = Self {
            safety_margin_nm: env_or("SEAROUTE_SAFETY_MARGIN_NM", defaults.safety_margin_nm),
            max_direct_connection_nm: env_or(
                "SEAROUTE_MAX_DIRECT_CONNECTION_NM",
                defaults.max_direct_connection_nm,
            ),
            base_speed_knots: env_or("SEAROUTE_BASE_SPEED_KNOTS", defaults.base_speed_knots),
            base_fuel_mt_per_100nm: env_or(
                "SEAROUTE_BASE_FUEL_MT_PER_100NM",
                defaults.base_fuel_mt_per_100nm,
            ),
            default_depth_m: env_or("SEAROUTE_DEFAULT_DEPTH_M", defaults.default_depth_m),
            shallow_water_depth_m: env_or(
                "SEAROUTE_SHALLOW_WATER_DEPTH_M",
                defaults.shallow_water_depth_m,
            ),
            wind_penalty_threshold_ms: env_or(
                "SEAROUTE_WIND_PENALTY_THRESHOLD_MS",
                defaults.wind_penalty_threshold_ms,
            ),
            wave_penalty_threshold_m: env_or(
                "SEAROUTE_WAVE_PENALTY_THRESHOLD_M",
                defaults.wave_penalty_threshold_m,
            ),
            avoid_radius_nm: env_or("SEAROUTE_AVOID_RADIUS_NM", defaults.avoid_radius_nm),
            alternative_timeout_ms: env_or(
                "SEAROUTE_ALTERNATIVE_TIMEOUT_MS",
                defaults.alternative_timeout_ms,
            ),
            max_detour_expansions: env_or(
                "SEAROUTE_MAX_DETOUR_EXPANSIONS",
                defaults.max_detour_expansions,
            ),
            latitude_bias_weight: env_or(
                "SEAROUTE_LATITUDE_BIAS_WEIGHT",
                defaults.latitude_bias_weight,
            ),
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject negative, zero or non-finite values where they make no sense.
    pub fn validate(&self) -> Result<()> {
        let non_negative = [
            ("safety_margin_nm", self.safety_margin_nm),
            ("default_depth_m", self.default_depth_m),
            ("shallow_water_depth_m", self.shallow_water_depth_m),
            ("wind_penalty_threshold_ms", self.wind_penalty_threshold_ms),
            ("wave_penalty_threshold_m", self.wave_penalty_threshold_m),
            ("avoid_radius_nm", self.avoid_radius_nm),
            ("latitude_bias_weight", self.latitude_bias_weight),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(name, "a finite, non-negative number", value));
            }
        }

        let positive = [
            ("max_direct_connection_nm", self.max_direct_connection_nm),
            ("base_speed_knots", self.base_speed_knots),
            ("base_fuel_mt_per_100nm", self.base_fuel_mt_per_100nm),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(invalid(name, "a finite, positive number", value));
            }
        }

        if self.max_detour_expansions == 0 {
            return Err(Error::InvalidConfig {
                message: "max_detour_expansions must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    pub fn graph_options(&self) -> GraphBuildOptions {
        GraphBuildOptions {
            safety_margin_nm: self.safety_margin_nm,
            max_direct_connection_nm: self.max_direct_connection_nm,
        }
    }

    pub fn weather_thresholds(&self) -> WeatherThresholds {
        WeatherThresholds {
            wind_speed_ms: self.wind_penalty_threshold_ms,
            wave_height_m: self.wave_penalty_threshold_m,
        }
    }

    pub fn alternative_timeout(&self) -> Duration {
        Duration::from_millis(self.alternative_timeout_ms)
    }
}

fn env_or<T>(name: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    match env::var(name) {
        Ok(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                warn!(variable = name, value = %raw, "ignoring unparseable setting");
                default
            }
        },
        Err(_) => default,
    }
}

fn invalid(name: &str, requirement: &str, value: f64) -> Error {
    Error::InvalidConfig {
        message: format!("{name} must be {requirement} (got {value})"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.graph_options().max_direct_connection_nm, 500.0);
        assert_eq!(config.weather_thresholds(), WeatherThresholds::default());
        assert_eq!(config.alternative_timeout(), Duration::from_secs(2));
    }

    #[test]
    fn validate_rejects_unusable_values() {
        let config = EngineConfig {
            base_speed_knots: 0.0,
            ..EngineConfig::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidConfig { .. })));

        let config = EngineConfig {
            safety_margin_nm: f64::NAN,
            ..EngineConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validation_message_names_the_requirement() {
        let zero_speed = EngineConfig {
            base_speed_knots: 0.0,
            ..EngineConfig::default()
        };
        let message = zero_speed.validate().unwrap_err().to_string();
        assert!(message.contains("base_speed_knots must be a finite, positive number"));

        let negative_margin = EngineConfig {
            safety_margin_nm: -1.0,
            ..EngineConfig::default()
        };
        let message = negative_margin.validate().unwrap_err().to_string();
        assert!(message.contains("safety_margin_nm must be a finite, non-negative number"));
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"safety_margin_nm": 25.0}"#).expect("parse config");
        assert_eq!(config.safety_margin_nm, 25.0);
        assert_eq!(config.base_speed_knots, 15.0);
    }
}

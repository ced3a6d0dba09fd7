//! Live weather snapshot supplied by the caller.
//!
//! The engine never fetches weather itself; the snapshot is opaque input that
//! applies to the whole request.

use serde::{Deserialize, Serialize};

/// Ambient conditions reported for a request. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    /// Wind speed in metres per second.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wind_speed: Option<f64>,
    /// Significant wave height in metres.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wave_height: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub storm_warnings: Vec<String>,
    /// Visibility in nautical miles.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<f64>,
}

impl WeatherSnapshot {
    pub fn is_empty(&self) -> bool {
        self.wind_speed.is_none()
            && self.wave_height.is_none()
            && self.storm_warnings.is_empty()
            && self.visibility.is_none()
    }

    pub fn wind_speed_ms(&self) -> f64 {
        self.wind_speed.unwrap_or(0.0)
    }

    pub fn wave_height_m(&self) -> f64 {
        self.wave_height.unwrap_or(0.0)
    }

    pub fn has_storm_warning(&self) -> bool {
        !self.storm_warnings.is_empty()
    }
}

/// Thresholds above which the `weather` optimization mode penalises a route.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherThresholds {
    pub wind_speed_ms: f64,
    pub wave_height_m: f64,
}

impl Default for WeatherThresholds {
    fn default() -> Self {
        Self {
            wind_speed_ms: 15.0,
            wave_height_m: 3.0,
        }
    }
}

impl WeatherThresholds {
    /// Heuristic penalty in nautical-mile units: wind excess × 10, wave
    /// excess × 20 and a flat 50 when any storm warning is present.
    pub fn penalty(&self, snapshot: &WeatherSnapshot) -> f64 {
        let wind = (snapshot.wind_speed_ms() - self.wind_speed_ms).max(0.0) * 10.0;
        let waves = (snapshot.wave_height_m() - self.wave_height_m).max(0.0) * 20.0;
        let storm = if snapshot.has_storm_warning() {
            50.0
        } else {
            0.0
        };
        wind + waves + storm
    }
}

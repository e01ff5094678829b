//! Dashboard configuration supplied by the host page at `init`.
//!
//! Every field has a default so the host may pass `{}` (or nothing) and
//! override only what it needs.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Namespace prepended to every preference key.
    pub storage_prefix: String,
    /// Whether the host exposes a Web Audio context.
    pub audio_available: bool,
    /// Seed for cosmetic randomness (sprinkles, window lights, donut counts).
    pub seed: u64,
    pub quote_interval_ms: f64,
    pub weather_interval_ms: f64,
    pub featured_interval_ms: f64,
    pub glow_interval_ms: f64,
    pub glow_pulse_ms: f64,
    pub flicker_min_ms: f64,
    pub flicker_span_ms: f64,
    pub cloud_interval_ms: f64,
    pub skyline_buildings: usize,
    pub windows_per_building: usize,
    pub sprinkle_count: usize,
    pub donut_rain_count: usize,
    pub toast_duration_ms: u32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            storage_prefix: "springfield_".to_string(),
            audio_available: true,
            seed: 0x5EED,
            quote_interval_ms: 5_000.0,
            weather_interval_ms: 30_000.0,
            featured_interval_ms: 60_000.0,
            glow_interval_ms: 3_000.0,
            glow_pulse_ms: 1_000.0,
            flicker_min_ms: 5_000.0,
            flicker_span_ms: 10_000.0,
            cloud_interval_ms: 8_000.0,
            skyline_buildings: 5,
            windows_per_building: 6,
            sprinkle_count: 50,
            donut_rain_count: 24,
            toast_duration_ms: 3_000,
        }
    }
}

impl DashboardConfig {
    /// Parse a JSON config. Blank input yields the defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a JSON config, falling back to defaults when it is malformed.
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(error = %e, "falling back to default dashboard config");
                Self::default()
            }
        }
    }
}

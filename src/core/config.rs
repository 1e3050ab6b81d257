//! Engine configuration shared by brushes, angle control and filters

use serde::{Deserialize, Serialize};

use super::errors::CoreError;
use crate::filter::DEFAULT_SIGMA;

/// Tunables for the painting core.
///
/// Every field has a default, so a partial JSON document is enough to
/// override a single value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    /// Number of recent cursor angles averaged by the cursor-movement policy
    pub angle_smoothing_window: usize,
    /// Tessellation of circle brush disks
    pub circle_segments: u32,
    /// Tessellation of the star brush core disk
    pub star_core_segments: u32,
    /// Angular step count of the star brush spikes
    pub star_spikes: u32,
    /// Fixed seed for scatter brushes (entropy when absent)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scatter_seed: Option<u64>,
    /// Sigma used by the Gaussian blur when none is given
    pub default_sigma: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            angle_smoothing_window: 5,
            circle_segments: 90,
            star_core_segments: 30,
            star_spikes: 16,
            scatter_seed: None,
            default_sigma: DEFAULT_SIGMA,
        }
    }
}

impl EngineConfig {
    /// Parse a configuration from JSON
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let config: Self = serde_json::from_str(json)?;
        tracing::debug!("Loaded engine config: {:?}", config);
        Ok(config)
    }

    /// Serialize the configuration to pretty JSON
    pub fn to_json(&self) -> Result<String, CoreError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

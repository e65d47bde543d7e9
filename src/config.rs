use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Kilometres per degree used to turn a planar degree distance into a
/// rough kilometre figure. Calibrated for Hungary's latitude band; it is
/// not a geodesic conversion.
pub const DEFAULT_KM_PER_DEGREE: f64 = 85.0;

/// What to do with a record that fails validation while a layer is built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildPolicy {
    /// Reject the whole layer on the first bad record.
    #[default]
    Abort,
    /// Drop the bad record with a warning and keep building.
    SkipInvalid,
}

/// Tunables shared by layer construction and resolution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    pub km_per_degree: f64,
    pub build_policy: BuildPolicy,
    /// Build an R-tree of record bounds and use it to narrow containment scans.
    pub prefilter: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            km_per_degree: DEFAULT_KM_PER_DEGREE,
            build_policy: BuildPolicy::Abort,
            prefilter: false,
        }
    }
}

impl ResolverConfig {
    /// Parse a JSON config document; missing fields take their defaults.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject a scale that would make `distance_km` negative or meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if valid_scale(self.km_per_degree) { Ok(()) } else { Err(ConfigError::InvalidScale(self.km_per_degree)) }
    }
}

#[inline]
pub(crate) fn valid_scale(km_per_degree: f64) -> bool {
    km_per_degree.is_finite() && km_per_degree > 0.0
}

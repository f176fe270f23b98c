use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::common::{apparent_magnitude, DomainError};

/// Photometric band a magnitude reading was measured in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Band {
    B,
    V,
    I,
}

impl Band {
    pub const ALL: [Band; 3] = [Band::B, Band::V, Band::I];

    pub fn label(self) -> &'static str {
        match self {
            Band::B => "B",
            Band::V => "V",
            Band::I => "I",
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownBand(pub String);

impl fmt::Display for UnknownBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown photometric band `{}`", self.0)
    }
}

impl std::error::Error for UnknownBand {}

impl FromStr for Band {
    type Err = UnknownBand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "B" => Ok(Band::B),
            "V" => Ok(Band::V),
            "I" => Ok(Band::I),
            other => Err(UnknownBand(other.to_string())),
        }
    }
}

/// Per-band Phillips model: linear regression pair mapping the 15-day
/// decline to an absolute peak magnitude, plus the tolerated error margin
/// on the apparent-magnitude comparison.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandConfig {
    pub intercept: f64,
    pub slope: f64,
    pub margin: f64,
}

/// Complete band configuration. Carrying all three bands by construction
/// means a missing band config is unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandConfigs {
    pub b: BandConfig,
    pub v: BandConfig,
    pub i: BandConfig,
}

impl BandConfigs {
    /// Regression pairs re-derived by OLS against modern catalog data.
    pub fn refit() -> Self {
        Self {
            b: BandConfig { intercept: -19.286, slope: 1.257, margin: 0.8 },
            v: BandConfig { intercept: -19.345, slope: 1.509, margin: 0.6 },
            i: BandConfig { intercept: -19.029, slope: 1.428, margin: 0.5 },
        }
    }

    /// Regression pairs from the Phillips (1993) paper.
    pub fn classic() -> Self {
        Self {
            b: BandConfig { intercept: -21.726, slope: 2.698, margin: 0.8 },
            v: BandConfig { intercept: -20.883, slope: 1.949, margin: 0.6 },
            i: BandConfig { intercept: -19.591, slope: 1.076, margin: 0.5 },
        }
    }

    pub fn get(&self, band: Band) -> &BandConfig {
        match band {
            Band::B => &self.b,
            Band::V => &self.v,
            Band::I => &self.i,
        }
    }
}

impl Default for BandConfigs {
    fn default() -> Self {
        Self::refit()
    }
}

/// Apparent peak magnitude predicted from the 15-day decline `dm15`
/// (`mag15 - peak_mag`) at luminosity distance `lumdist_mpc`.
pub fn expected_apparent_magnitude(
    lumdist_mpc: f64,
    dm15: f64,
    config: &BandConfig,
) -> Result<f64, DomainError> {
    let expected_abs = config.intercept + config.slope * dm15;
    apparent_magnitude(lumdist_mpc, expected_abs)
}

/// Two-sided, strictly exclusive margin check:
/// `expected - margin < actual < expected + margin`.
pub fn within_margin(margin: f64, actual: f64, expected: f64) -> bool {
    actual < expected + margin && actual > expected - margin
}

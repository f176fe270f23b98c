use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Numeric domain violations in the core photometric math.
///
/// These are local to one (supernova, band) evaluation unit and never abort
/// a batch: callers log them and withhold the affected verdict.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    #[error("luminosity distance must be positive and finite, got {0} Mpc")]
    NonPositiveLumdist(f64),
    #[error("degenerate interpolation bracket: both samples at t = {0}")]
    DegenerateBracket(f64),
}

/// One supernova from the catalog: event identifier plus luminosity distance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupernovaRecord {
    pub event: String,
    /// Luminosity distance in megaparsecs. Strictly positive; a non-positive
    /// value fails the magnitude conversions with `DomainError`.
    pub lumdist_mpc: f64,
}

/// A single photometric observation: time in days, apparent magnitude.
/// Magnitude is logarithmic with smaller = brighter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub time: f64,
    pub magnitude: f64,
}

/// Time-ordered sequence of readings for one (supernova, band) pair.
///
/// Construction sorts by time and drops rows with non-finite time or
/// magnitude, so the peak/bracket search never sees a NaN. The sort is
/// stable: readings sharing a timestamp keep their encounter order.
/// An empty curve is valid input and always fails qualification.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LightCurve {
    readings: Vec<Reading>,
}

impl LightCurve {
    pub fn new(mut readings: Vec<Reading>) -> Self {
        readings.retain(|r| r.time.is_finite() && r.magnitude.is_finite());
        readings.sort_by(|a, b| a.time.total_cmp(&b.time));
        Self { readings }
    }

    pub fn readings(&self) -> &[Reading] {
        &self.readings
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Distance-magnitude conversions
// ---------------------------------------------------------------------------

fn distance_modulus(lumdist_mpc: f64) -> Result<f64, DomainError> {
    if !(lumdist_mpc > 0.0) || !lumdist_mpc.is_finite() {
        return Err(DomainError::NonPositiveLumdist(lumdist_mpc));
    }
    Ok(5.0 * ((lumdist_mpc * 1e6).log10() - 1.0))
}

/// Absolute magnitude from apparent magnitude at luminosity distance
/// `lumdist_mpc` (megaparsecs): `m - 5*(log10(d_pc) - 1)`.
pub fn absolute_magnitude(lumdist_mpc: f64, apparent_mag: f64) -> Result<f64, DomainError> {
    Ok(apparent_mag - distance_modulus(lumdist_mpc)?)
}

/// Apparent magnitude from absolute magnitude; exact inverse of
/// `absolute_magnitude`.
pub fn apparent_magnitude(lumdist_mpc: f64, absolute_mag: f64) -> Result<f64, DomainError> {
    Ok(absolute_mag + distance_modulus(lumdist_mpc)?)
}

// ---------------------------------------------------------------------------
// Bracketing interpolator
// ---------------------------------------------------------------------------

/// Linearly interpolate the magnitude at `t_target` from two samples.
///
/// The formula is extrapolation-safe, but callers only invoke it with a true
/// bracket (`t1 <= t_target < t2`). Identical sample times are a
/// `DomainError`, never a silent division by zero.
pub fn interpolate(
    t1: f64,
    m1: f64,
    t2: f64,
    m2: f64,
    t_target: f64,
) -> Result<f64, DomainError> {
    if t1 == t2 {
        return Err(DomainError::DegenerateBracket(t1));
    }
    let slope = (m2 - m1) / (t2 - t1);
    Ok(m1 + slope * (t_target - t1))
}

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::common::{interpolate, LightCurve, Reading};

/// Days past peak at which the Phillips decline is measured.
pub const TARGET_OFFSET_DAYS: f64 = 15.0;

/// Tunable cadence/coverage constants for the qualifier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QualifierParams {
    /// Widest tolerated gap between consecutive post-peak readings, in days.
    pub max_gap_days: f64,
    /// Continuous post-peak coverage required before the time criterion
    /// is satisfied, in days.
    pub min_coverage_days: f64,
}

impl Default for QualifierParams {
    fn default() -> Self {
        Self {
            max_gap_days: 5.0,
            min_coverage_days: 20.0,
        }
    }
}

/// Verdict of the light-curve qualification scan for one (supernova, band).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Qualification {
    /// Whether the post-peak record is dense and long enough to trust a
    /// 15-day decline measurement.
    pub time_criterion_met: bool,
    /// Floor of the brightest reading's time; `None` for an empty curve.
    pub peak_time: Option<f64>,
    /// Magnitude of the brightest reading; `None` for an empty curve.
    pub peak_magnitude: Option<f64>,
    /// Magnitude at peak + 15 days, interpolated between the two readings
    /// bracketing that time. `None` when either bracket is missing.
    pub interpolated_mag15: Option<f64>,
}

impl Qualification {
    fn failed() -> Self {
        Self {
            time_criterion_met: false,
            peak_time: None,
            peak_magnitude: None,
            interpolated_mag15: None,
        }
    }
}

/// Scan a light curve for peak, post-peak cadence, and the day-15 brackets.
///
/// The scan walks readings in time order starting at the floor of the peak
/// time. It stops at the first cadence gap wider than `max_gap_days` (time
/// criterion false) or once a reading lands beyond `min_coverage_days` past
/// peak (time criterion true); the gap check runs first, and the reading
/// that triggers either stop is not considered for bracketing. Running out
/// of readings leaves the criterion false.
///
/// Peak ties resolve to the earliest reading. A reading exactly at
/// peak + 15 serves as a zero-distance before-bracket, so the interpolation
/// collapses to that reading's magnitude.
pub fn qualify(curve: &LightCurve, params: &QualifierParams) -> Qualification {
    let readings = curve.readings();
    if readings.is_empty() {
        return Qualification::failed();
    }

    // First minimum wins on ties.
    let mut peak_idx = 0;
    for (i, r) in readings.iter().enumerate().skip(1) {
        if r.magnitude < readings[peak_idx].magnitude {
            peak_idx = i;
        }
    }
    let peak_magnitude = readings[peak_idx].magnitude;
    let peak_time = readings[peak_idx].time.floor();
    let target_time = peak_time + TARGET_OFFSET_DAYS;

    let mut last_seen = peak_time;
    let mut time_criterion_met = false;
    let mut before: Option<Reading> = None;
    let mut after: Option<Reading> = None;

    for r in readings {
        if r.time < peak_time {
            continue;
        }
        if r.time - params.max_gap_days > last_seen {
            break;
        }
        if r.time > peak_time + params.min_coverage_days {
            time_criterion_met = true;
            break;
        }
        last_seen = r.time;

        if r.time <= target_time {
            // Largest time at or below the target; ties keep the first.
            if before.map_or(true, |b| r.time > b.time) {
                before = Some(*r);
            }
        } else if after.map_or(true, |a| r.time < a.time) {
            after = Some(*r);
        }
    }

    let interpolated_mag15 = match (before, after) {
        (Some(b), Some(a)) => {
            match interpolate(b.time, b.magnitude, a.time, a.magnitude, target_time) {
                Ok(mag15) => Some(mag15),
                Err(err) => {
                    warn!(%err, "dropping day-15 interpolation");
                    None
                }
            }
        }
        _ => None,
    };

    Qualification {
        time_criterion_met,
        peak_time: Some(peak_time),
        peak_magnitude: Some(peak_magnitude),
        interpolated_mag15,
    }
}

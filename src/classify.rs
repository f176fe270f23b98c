use std::collections::HashMap;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::common::{LightCurve, SupernovaRecord};
use crate::phillips::{expected_apparent_magnitude, within_margin, Band, BandConfigs};
use crate::qualify::{qualify, QualifierParams};

/// Full evaluation record for one (supernova, band) pair.
///
/// `interpolated_mag15` and `expected_apparent_mag` are present whenever both
/// day-15 brackets were found, independently of the time criterion, so export
/// rows exist even for curves that fail on cadence. `margin_criterion_met`
/// however requires the time criterion as well.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandEvaluation {
    pub event: String,
    pub band: Band,
    pub lumdist_mpc: f64,
    pub time_criterion_met: bool,
    pub margin_criterion_met: bool,
    pub peak_magnitude: Option<f64>,
    pub interpolated_mag15: Option<f64>,
    pub expected_apparent_mag: Option<f64>,
}

/// Evaluate one band of one supernova: qualification, then the Phillips
/// margin verdict when the decline could be measured.
pub fn evaluate_band(
    record: &SupernovaRecord,
    band: Band,
    curve: &LightCurve,
    params: &QualifierParams,
    configs: &BandConfigs,
) -> BandEvaluation {
    let q = qualify(curve, params);

    let mut expected_apparent_mag = None;
    let mut margin_criterion_met = false;
    if let (Some(peak_mag), Some(mag15)) = (q.peak_magnitude, q.interpolated_mag15) {
        let config = configs.get(band);
        match expected_apparent_magnitude(record.lumdist_mpc, mag15 - peak_mag, config) {
            Ok(expected) => {
                expected_apparent_mag = Some(expected);
                margin_criterion_met =
                    q.time_criterion_met && within_margin(config.margin, peak_mag, expected);
            }
            Err(err) => {
                // Bad distance on this one event; the time verdict stands,
                // the margin verdict is withheld.
                warn!(event = %record.event, %band, %err, "skipping margin verdict");
            }
        }
    }

    BandEvaluation {
        event: record.event.clone(),
        band,
        lumdist_mpc: record.lumdist_mpc,
        time_criterion_met: q.time_criterion_met,
        margin_criterion_met,
        peak_magnitude: q.peak_magnitude,
        interpolated_mag15: q.interpolated_mag15,
        expected_apparent_mag,
    }
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Per-band pass counters. Supernovae failing the time criterion do not
/// enter the margin statistics at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandTally {
    /// Supernovae whose light curve passed the time criterion.
    pub qualified: usize,
    /// Among the qualified, those whose peak fell within the Phillips margin.
    pub within_margin: usize,
}

impl BandTally {
    pub fn record(&mut self, eval: &BandEvaluation) {
        if eval.time_criterion_met {
            self.qualified += 1;
            if eval.margin_criterion_met {
                self.within_margin += 1;
            }
        }
    }

    pub fn merge(&mut self, other: &BandTally) {
        self.qualified += other.qualified;
        self.within_margin += other.within_margin;
    }

    /// `within_margin / qualified`, or `None` when no supernova qualified.
    pub fn pass_ratio(&self) -> Option<f64> {
        if self.qualified == 0 {
            None
        } else {
            Some(self.within_margin as f64 / self.qualified as f64)
        }
    }
}

/// Aggregate pass statistics across a batch, one tally per band.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationSummary {
    tallies: HashMap<Band, BandTally>,
}

impl ClassificationSummary {
    pub fn record(&mut self, eval: &BandEvaluation) {
        self.tallies.entry(eval.band).or_default().record(eval);
    }

    pub fn merge(&mut self, other: &ClassificationSummary) {
        for (band, tally) in &other.tallies {
            self.tallies.entry(*band).or_default().merge(tally);
        }
    }

    pub fn tally(&self, band: Band) -> BandTally {
        self.tallies.get(&band).copied().unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Batch evaluation
// ---------------------------------------------------------------------------

/// One supernova with its pre-fetched per-band light curves. Bands without
/// photometry simply carry an empty curve.
#[derive(Debug, Clone, PartialEq)]
pub struct SupernovaSource {
    pub record: SupernovaRecord,
    pub curves: HashMap<Band, LightCurve>,
}

impl SupernovaSource {
    fn curve(&self, band: Band) -> LightCurve {
        self.curves.get(&band).cloned().unwrap_or_default()
    }
}

/// Evaluate every (supernova, band) pair of a batch in parallel.
///
/// Sources are independent and side-effect-free, so they are processed via
/// Rayon; the per-source summaries are merged in a reduction step afterwards.
/// Evaluations come back in catalog order, bands in B, V, I order.
pub fn classify_batch(
    sources: &[SupernovaSource],
    params: &QualifierParams,
    configs: &BandConfigs,
) -> (Vec<BandEvaluation>, ClassificationSummary) {
    let per_source: Vec<Vec<BandEvaluation>> = sources
        .par_iter()
        .map(|source| {
            Band::ALL
                .iter()
                .map(|&band| {
                    evaluate_band(&source.record, band, &source.curve(band), params, configs)
                })
                .collect()
        })
        .collect();

    let mut summary = ClassificationSummary::default();
    let mut evals = Vec::with_capacity(per_source.len() * Band::ALL.len());
    for source_evals in per_source {
        for eval in source_evals {
            summary.record(&eval);
            evals.push(eval);
        }
    }
    (evals, summary)
}

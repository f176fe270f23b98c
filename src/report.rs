use std::io::{self, Write};

use thiserror::Error;
use tracing::debug;

use crate::classify::{BandEvaluation, ClassificationSummary};
use crate::common::absolute_magnitude;
use crate::phillips::Band;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("write failed: {0}")]
    Io(#[from] io::Error),
    #[error("csv write failed: {0}")]
    Csv(#[from] csv::Error),
}

/// True when the day-15 decline could be measured for this evaluation, i.e.
/// both brackets were found and the expected magnitude computed.
fn bracketed(eval: &BandEvaluation) -> bool {
    eval.interpolated_mag15.is_some()
        && eval.peak_magnitude.is_some()
        && eval.expected_apparent_mag.is_some()
}

/// Tab-separated observation log, one line per bracketed evaluation:
/// event, band, interpolated day-15 magnitude, peak magnitude, luminosity
/// distance, expected apparent magnitude.
pub fn write_observation_log<W: Write>(
    w: &mut W,
    evaluations: &[BandEvaluation],
) -> Result<(), ReportError> {
    for eval in evaluations.iter().filter(|e| bracketed(e)) {
        writeln!(
            w,
            "{}\t\t{}\t\t{}\t\t{}\t\t{}\t\t{}",
            eval.event,
            eval.band,
            eval.interpolated_mag15.unwrap_or_default(),
            eval.peak_magnitude.unwrap_or_default(),
            eval.lumdist_mpc,
            eval.expected_apparent_mag.unwrap_or_default(),
        )?;
    }
    Ok(())
}

/// Per-band CSV table of absolute peak and day-15 magnitudes, one row per
/// bracketed evaluation in `band`. Header: `SN_id,peak_mag,15_mag`.
pub fn write_band_table<W: Write>(
    w: W,
    evaluations: &[BandEvaluation],
    band: Band,
) -> Result<(), ReportError> {
    let mut writer = csv::Writer::from_writer(w);
    writer.write_record(["SN_id", "peak_mag", "15_mag"])?;
    for eval in evaluations
        .iter()
        .filter(|e| e.band == band && bracketed(e))
    {
        let peak = eval.peak_magnitude.unwrap_or_default();
        let mag15 = eval.interpolated_mag15.unwrap_or_default();
        let (abs_peak, abs_mag15) = match (
            absolute_magnitude(eval.lumdist_mpc, peak),
            absolute_magnitude(eval.lumdist_mpc, mag15),
        ) {
            (Ok(p), Ok(m)) => (p, m),
            _ => {
                // Bracketed rows imply a valid distance upstream, so this
                // only trips on hand-built records.
                debug!(event = %eval.event, "skipping export row with bad lumdist");
                continue;
            }
        };
        let abs_peak = abs_peak.to_string();
        let abs_mag15 = abs_mag15.to_string();
        writer.write_record([eval.event.as_str(), abs_peak.as_str(), abs_mag15.as_str()])?;
    }
    writer.flush()?;
    Ok(())
}

/// Human-readable per-band summary. Bands with no qualifying supernovae are
/// reported as undefined rather than as a division result.
pub fn write_summary<W: Write>(
    w: &mut W,
    summary: &ClassificationSummary,
) -> Result<(), ReportError> {
    for band in Band::ALL {
        let tally = summary.tally(band);
        writeln!(w, "--------------------------------------------------------")?;
        writeln!(
            w,
            "Total SNe that satisfy light curve requirements for {band}-band: {}",
            tally.qualified
        )?;
        match tally.pass_ratio() {
            Some(ratio) => writeln!(
                w,
                "Fraction of SNe within the {band}-band expected peak margin: {ratio}"
            )?,
            None => writeln!(
                w,
                "Fraction of SNe within the {band}-band expected peak margin: undefined (no qualifying supernovae)"
            )?,
        }
    }
    Ok(())
}

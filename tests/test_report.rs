
use phillips_classifier::{
    evaluate_band, write_band_table, write_observation_log, write_summary, Band, BandConfigs,
    BandEvaluation, ClassificationSummary, QualifierParams, SupernovaRecord,
};

fn bracketed_eval(event: &str, band: Band) -> BandEvaluation {
    BandEvaluation {
        event: event.to_string(),
        band,
        lumdist_mpc: 10.0, // distance modulus exactly 30
        time_criterion_met: true,
        margin_criterion_met: false,
        peak_magnitude: Some(11.0),
        interpolated_mag15: Some(12.5),
        expected_apparent_mag: Some(11.2),
    }
}

fn unbracketed_eval(event: &str, band: Band) -> BandEvaluation {
    BandEvaluation {
        event: event.to_string(),
        band,
        lumdist_mpc: 10.0,
        time_criterion_met: false,
        margin_criterion_met: false,
        peak_magnitude: Some(11.0),
        interpolated_mag15: None,
        expected_apparent_mag: None,
    }
}

// ---------------------------------------------------------------------------
// Band tables
// ---------------------------------------------------------------------------

#[test]
fn band_table_converts_to_absolute_magnitudes() {
    let evals = vec![bracketed_eval("SN_x", Band::B)];
    let mut buf = Vec::new();
    write_band_table(&mut buf, &evals, Band::B).unwrap();
    let out = String::from_utf8(buf).unwrap();
    let mut lines = out.lines();
    assert_eq!(lines.next(), Some("SN_id,peak_mag,15_mag"));
    // 11.0 - 30 = -19, 12.5 - 30 = -17.5
    assert_eq!(lines.next(), Some("SN_x,-19,-17.5"));
    assert_eq!(lines.next(), None);
}

#[test]
fn band_table_filters_by_band_and_brackets() {
    let evals = vec![
        bracketed_eval("SN_b", Band::B),
        bracketed_eval("SN_v", Band::V),
        unbracketed_eval("SN_nobrackets", Band::B),
    ];
    let mut buf = Vec::new();
    write_band_table(&mut buf, &evals, Band::B).unwrap();
    let out = String::from_utf8(buf).unwrap();
    assert!(out.contains("SN_b"));
    assert!(!out.contains("SN_v"));
    assert!(!out.contains("SN_nobrackets"));
}

// ---------------------------------------------------------------------------
// Observation log
// ---------------------------------------------------------------------------

#[test]
fn observation_log_lists_bracketed_evaluations() {
    let evals = vec![
        bracketed_eval("SN_x", Band::B),
        unbracketed_eval("SN_skip", Band::V),
    ];
    let mut buf = Vec::new();
    write_observation_log(&mut buf, &evals).unwrap();
    let out = String::from_utf8(buf).unwrap();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 1);
    let fields: Vec<&str> = lines[0].split("\t\t").collect();
    assert_eq!(fields, vec!["SN_x", "B", "12.5", "11", "10", "11.2"]);
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

#[test]
fn summary_reports_undefined_ratio_explicitly() {
    let summary = ClassificationSummary::default();
    let mut buf = Vec::new();
    write_summary(&mut buf, &summary).unwrap();
    let out = String::from_utf8(buf).unwrap();
    assert_eq!(
        out.matches("undefined (no qualifying supernovae)").count(),
        3,
        "all three bands should report an undefined ratio"
    );
    assert!(!out.contains("NaN"));
}

#[test]
fn summary_reports_counts_and_ratio() {
    let mut summary = ClassificationSummary::default();
    summary.record(&evaluate_band(
        &SupernovaRecord {
            event: "SN_pass".to_string(),
            lumdist_mpc: 30.2133,
        },
        Band::B,
        &synthetic::dense_decline(15.0),
        &QualifierParams::default(),
        &BandConfigs::default(),
    ));
    let mut buf = Vec::new();
    write_summary(&mut buf, &summary).unwrap();
    let out = String::from_utf8(buf).unwrap();
    assert!(out.contains("requirements for B-band: 1"));
    assert!(out.contains("B-band expected peak margin: 1"));
}

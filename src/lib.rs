pub mod catalog;
pub mod classify;
pub mod common;
pub mod phillips;
pub mod qualify;
pub mod report;

pub use catalog::{parse_catalog_csv, parse_photometry_csv, AstrocatsClient, CatalogError};
pub use classify::{
    classify_batch, evaluate_band, BandEvaluation, BandTally, ClassificationSummary,
    SupernovaSource,
};
pub use common::{
    absolute_magnitude, apparent_magnitude, interpolate, DomainError, LightCurve, Reading,
    SupernovaRecord,
};
pub use phillips::{expected_apparent_magnitude, within_margin, Band, BandConfig, BandConfigs};
pub use qualify::{qualify, Qualification, QualifierParams, TARGET_OFFSET_DAYS};
pub use report::{write_band_table, write_observation_log, write_summary, ReportError};

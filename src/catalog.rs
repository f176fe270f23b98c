use std::time::Duration;

use csv::ReaderBuilder;
use thiserror::Error;
use tracing::{debug, warn};

use crate::common::{LightCurve, Reading, SupernovaRecord};
use crate::phillips::Band;

/// Open Astronomy Catalogs REST API root.
pub const BASE_URL: &str = "https://api.astrocats.space";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("catalog response missing column `{0}`")]
    MissingColumn(&'static str),
    #[error("csv parse error: {0}")]
    Csv(#[from] csv::Error),
}

/// Client for the Open Astronomy Catalogs supernova API.
///
/// The catalog fetch is fallible; photometry fetches degrade to an empty
/// light curve on any failure, so one unreachable event never aborts a
/// batch run.
pub struct AstrocatsClient {
    client: reqwest::blocking::Client,
    base: String,
}

impl AstrocatsClient {
    pub fn new() -> Result<Self, CatalogError> {
        Self::with_base(BASE_URL)
    }

    /// Client against a non-default API root, e.g. a local mirror.
    pub fn with_base(base: impl Into<String>) -> Result<Self, CatalogError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("phillips-classifier/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            base: base.into(),
        })
    }

    /// Fetch all catalogued supernovae with a claimed Ia subtype and a
    /// usable luminosity distance.
    pub fn fetch_catalog(&self) -> Result<Vec<SupernovaRecord>, CatalogError> {
        let url = format!(
            "{}/catalog/lumdist+claimedtype?claimedtype=Ia-(.*)&format=csv",
            self.base
        );
        debug!(%url, "fetching supernova catalog");
        let body = self.client.get(&url).send()?.error_for_status()?.text()?;
        parse_catalog_csv(&body)
    }

    /// Fetch one event's photometry in one band.
    ///
    /// Any failure (network, HTTP status, unparseable body) is logged and
    /// reported as an empty curve, which downstream simply fails the time
    /// criterion.
    pub fn fetch_photometry(&self, event: &str, band: Band) -> LightCurve {
        let url = format!(
            "{}/{}/photometry/time+magnitude+e_magnitude+band?format=csv&band={}",
            self.base,
            event,
            band.label()
        );
        debug!(%url, "fetching photometry");
        let body = match self
            .client
            .get(&url)
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.text())
        {
            Ok(body) => body,
            Err(err) => {
                warn!(event, %band, %err, "photometry unavailable, treating as empty");
                return LightCurve::default();
            }
        };
        parse_photometry_csv(&body)
    }
}

// ---------------------------------------------------------------------------
// CSV parsing
// ---------------------------------------------------------------------------

fn column_index(headers: &csv::StringRecord, name: &'static str) -> Result<usize, CatalogError> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or(CatalogError::MissingColumn(name))
}

/// Parse the catalog CSV (`event`, `lumdist`, ... columns).
///
/// Rows with a missing, non-numeric, or non-positive luminosity distance are
/// skipped: they cannot enter the magnitude conversions anyway.
pub fn parse_catalog_csv(body: &str) -> Result<Vec<SupernovaRecord>, CatalogError> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .from_reader(body.as_bytes());
    let headers = reader.headers()?.clone();
    let event_col = column_index(&headers, "event")?;
    let lumdist_col = column_index(&headers, "lumdist")?;

    let mut records = Vec::new();
    for row in reader.records() {
        let row = match row {
            Ok(row) => row,
            Err(err) => {
                debug!(%err, "skipping malformed catalog row");
                continue;
            }
        };
        let event = match row.get(event_col) {
            Some(event) if !event.is_empty() => event.to_string(),
            _ => continue,
        };
        let lumdist_mpc = match row.get(lumdist_col).and_then(|v| v.parse::<f64>().ok()) {
            Some(d) if d.is_finite() && d > 0.0 => d,
            _ => {
                debug!(%event, "skipping catalog row without usable lumdist");
                continue;
            }
        };
        records.push(SupernovaRecord { event, lumdist_mpc });
    }
    Ok(records)
}

/// Parse a photometry CSV (`time`, `magnitude`, ... columns) into a light
/// curve, dropping rows whose time or magnitude does not parse to a finite
/// number. A body without the required columns yields an empty curve.
pub fn parse_photometry_csv(body: &str) -> LightCurve {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .from_reader(body.as_bytes());
    let headers = match reader.headers() {
        Ok(headers) => headers.clone(),
        Err(err) => {
            warn!(%err, "unreadable photometry header, treating as empty");
            return LightCurve::default();
        }
    };
    let (time_col, mag_col) = match (
        headers.iter().position(|h| h == "time"),
        headers.iter().position(|h| h == "magnitude"),
    ) {
        (Some(t), Some(m)) => (t, m),
        _ => {
            warn!("photometry response missing time/magnitude columns");
            return LightCurve::default();
        }
    };

    let mut readings = Vec::new();
    for row in reader.records() {
        let row = match row {
            Ok(row) => row,
            Err(err) => {
                debug!(%err, "skipping malformed photometry row");
                continue;
            }
        };
        let time = row.get(time_col).and_then(|v| v.parse::<f64>().ok());
        let magnitude = row.get(mag_col).and_then(|v| v.parse::<f64>().ok());
        if let (Some(time), Some(magnitude)) = (time, magnitude) {
            readings.push(Reading { time, magnitude });
        }
    }
    // LightCurve::new sorts and drops any remaining non-finite values.
    LightCurve::new(readings)
}

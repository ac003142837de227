//! Source schema for the JSON dataset and its conversion into core records.

use std::collections::HashMap;
use std::fmt;

use geo::Coord;
use log::{debug, warn};
use parkfinder_core::{
    CatalogError, MalformedReason, Metric, Park, ParkCatalog, ParkDetails, ParkMetrics, SiteId,
};
use serde::Deserialize;
use serde_json::Value;

/// Decimal places kept for metric values.
const METRIC_DECIMALS: usize = 3;

/// Top-level dataset document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawDataset {
    /// Park rows in catalog order.
    #[serde(default)]
    pub parks: Vec<RawPark>,
    /// Optional facility table joined onto parks by site id.
    #[serde(default)]
    pub facilities: Vec<RawFacility>,
}

/// A site identifier as written in the source: a number or a string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawSiteId {
    /// Numeric identifier.
    Number(serde_json::Number),
    /// Textual identifier.
    Text(String),
}

impl fmt::Display for RawSiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(number) => fmt::Display::fmt(number, f),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<&RawSiteId> for SiteId {
    fn from(raw: &RawSiteId) -> Self {
        Self::new(raw)
    }
}

/// One park row.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPark {
    /// Site identifier.
    #[serde(default)]
    pub site_id: Option<RawSiteId>,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Postal code as text or a number.
    #[serde(default)]
    pub postcode: Option<Value>,
    /// Community council or area as text or a number.
    #[serde(default)]
    pub community: Option<Value>,
    /// Latitude as a number or numeric string.
    #[serde(default)]
    pub lat: Option<Value>,
    /// Longitude as a number or numeric string.
    #[serde(default)]
    pub lon: Option<Value>,
    /// Deprivation decile as a whole number, a numeric string or a
    /// placeholder such as `"N/A"`.
    #[serde(default)]
    pub decile: Option<Value>,
    /// Composite recreation index.
    #[serde(default)]
    pub recreation: Option<Value>,
    /// Quality score.
    #[serde(default)]
    pub quality: Option<Value>,
    /// Safety score.
    #[serde(default)]
    pub safety: Option<Value>,
    /// Accessibility score.
    #[serde(default)]
    pub accessibility: Option<Value>,
    /// Quantity and variety score.
    #[serde(default, alias = "quantityVariety")]
    pub quantity_variety: Option<Value>,
    /// Facilities listed inline on the park row.
    #[serde(default)]
    pub facilities: Vec<String>,
    /// Image references.
    #[serde(default)]
    pub images: Vec<String>,
}

/// One row of the facility table.
#[derive(Debug, Clone, Deserialize)]
pub struct RawFacility {
    /// Park the facility belongs to.
    pub site_id: RawSiteId,
    /// Facility name; rows without one are ignored.
    #[serde(default)]
    pub facility_name: Option<String>,
}

impl RawDataset {
    /// Convert every row and build the validated catalog.
    ///
    /// # Errors
    /// Returns [`CatalogError::MalformedRecord`] for the first row that cannot
    /// be converted or fails catalog validation.
    pub fn into_catalog(self) -> Result<ParkCatalog, CatalogError> {
        let mut table = facility_table(self.facilities);
        let mut parks = Vec::with_capacity(self.parks.len());
        for (index, raw) in self.parks.into_iter().enumerate() {
            let mut park = raw
                .into_park()
                .map_err(|reason| CatalogError::MalformedRecord { index, reason })?;
            if let Some(extra) = table.remove(&park.site_id) {
                park.facilities.extend(extra);
            }
            parks.push(park);
        }
        for (site_id, names) in &table {
            warn!(
                "skipping {} facility rows for unknown site id {site_id}",
                names.len()
            );
        }
        ParkCatalog::new(parks)
    }
}

impl RawPark {
    /// Convert the row into a core [`Park`].
    ///
    /// # Errors
    /// Returns [`MalformedReason::MissingCoordinate`] when latitude or
    /// longitude is absent and [`MalformedReason::Unreadable`] when either is
    /// not numeric. Remaining checks happen in the catalog.
    pub fn into_park(self) -> Result<Park, MalformedReason> {
        let site_id = self.site_id.as_ref().map(SiteId::from).unwrap_or_default();
        let lat = coordinate("lat", self.lat)?;
        let lon = coordinate("lon", self.lon)?;

        let mut metrics = ParkMetrics::default();
        for (metric, value) in [
            (Metric::Recreation, self.recreation),
            (Metric::Quality, self.quality),
            (Metric::Safety, self.safety),
            (Metric::Accessibility, self.accessibility),
            (Metric::QuantityVariety, self.quantity_variety),
        ] {
            metrics.set(metric, metric_value(&site_id, metric, value));
        }

        let details = ParkDetails {
            postcode: text_value(&site_id, "postcode", self.postcode),
            community: text_value(&site_id, "community", self.community),
            decile: decile_value(&site_id, self.decile),
            images: self.images,
        };
        Ok(Park::new(site_id, self.name.trim(), Coord { x: lon, y: lat })
            .with_metrics(metrics)
            .with_facilities(self.facilities)
            .with_details(details))
    }
}

fn facility_table(rows: Vec<RawFacility>) -> HashMap<SiteId, Vec<String>> {
    let mut table: HashMap<SiteId, Vec<String>> = HashMap::new();
    for row in rows {
        let Some(name) = row.facility_name.filter(|name| !name.trim().is_empty()) else {
            continue;
        };
        table.entry(SiteId::from(&row.site_id)).or_default().push(name);
    }
    table
}

fn coordinate(field: &str, value: Option<Value>) -> Result<f64, MalformedReason> {
    match value {
        None | Some(Value::Null) => Err(MalformedReason::MissingCoordinate),
        Some(Value::Number(number)) => number.as_f64().ok_or_else(|| unreadable(field, &number)),
        Some(Value::String(text)) => text.trim().parse().map_err(|_| unreadable(field, &text)),
        Some(other) => Err(unreadable(field, &other)),
    }
}

fn unreadable(field: &str, value: &dyn fmt::Display) -> MalformedReason {
    MalformedReason::Unreadable {
        detail: format!("{field} '{value}' is not a number"),
    }
}

/// Coerce a metric cell: numbers are rounded to three decimal places,
/// anything else is unknown.
fn metric_value(site_id: &SiteId, metric: Metric, value: Option<Value>) -> Option<f64> {
    match value? {
        Value::Number(number) => number.as_f64().map(round_metric),
        Value::Null => None,
        other => {
            debug!("treating non-numeric {metric} value {other} for site {site_id} as unknown");
            None
        }
    }
}

/// Round to [`METRIC_DECIMALS`] places from the value's exact decimal
/// expansion, with exact halves going to the even digit. `0.8125` becomes
/// `0.812`, while `0.8115` (stored just below the half) becomes `0.811`.
fn round_metric(value: f64) -> f64 {
    format!("{:.*}", METRIC_DECIMALS, value)
        .parse()
        .unwrap_or(value)
}

/// Coerce an optional descriptive cell: text is trimmed, numbers keep their
/// JSON spelling, blanks and anything else are unknown.
fn text_value(site_id: &SiteId, field: &str, value: Option<Value>) -> Option<String> {
    let text = match value? {
        Value::String(text) => text.trim().to_owned(),
        Value::Number(number) => number.to_string(),
        Value::Null => return None,
        other => {
            debug!("treating non-textual {field} value {other} for site {site_id} as unknown");
            return None;
        }
    };
    (!text.is_empty()).then_some(text)
}

/// Coerce a decile cell. Whole numbers, including `9.0` and `"9"`, are kept;
/// placeholders such as `"N/A"` and anything out of range are unknown.
fn decile_value(site_id: &SiteId, value: Option<Value>) -> Option<u8> {
    let text = match value? {
        Value::Number(number) => number.to_string(),
        Value::String(text) => text.trim().to_owned(),
        Value::Null => return None,
        other => other.to_string(),
    };
    let decile = text.parse::<u8>().ok().or_else(|| {
        text.parse::<f64>()
            .ok()
            .and_then(|whole| whole.to_string().parse::<u8>().ok())
    });
    if decile.is_none() && !text.is_empty() {
        debug!("treating decile value {text} for site {site_id} as unknown");
    }
    decile
}

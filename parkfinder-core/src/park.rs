//! Park records as held by the catalog.
//!
//! Coordinates are WGS84 with `x = longitude` and `y = latitude`, matching
//! `geo`'s convention.

use std::fmt;

use geo::Coord;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::facility::FacilitySet;
use crate::metric::Metric;

/// Stable identifier of a park.
///
/// External sources disagree on whether site IDs are numbers or strings, so
/// the identifier is always kept in its trimmed textual form.
///
/// # Examples
/// ```
/// use parkfinder_core::SiteId;
///
/// assert_eq!(SiteId::from(42_u64), SiteId::from(" 42 "));
/// assert_eq!(SiteId::from(42_u64).as_str(), "42");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct SiteId(String);

impl SiteId {
    /// Build an identifier from anything with a textual form.
    pub fn new<T: fmt::Display + ?Sized>(raw: &T) -> Self {
        Self(raw.to_string().trim().to_owned())
    }

    /// Borrow the identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Report whether the identifier is blank.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<u64> for SiteId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for SiteId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for SiteId {
    fn from(id: String) -> Self {
        Self::new(id.as_str())
    }
}

impl fmt::Display for SiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Quality scores attached to a park.
///
/// Each score is optional; `None` means the source had no value.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct ParkMetrics {
    /// Overall quality score.
    pub quality: Option<f64>,
    /// Perceived safety score.
    pub safety: Option<f64>,
    /// Accessibility score.
    pub accessibility: Option<f64>,
    /// Quantity and variety of amenities.
    pub quantity_variety: Option<f64>,
    /// Composite recreation index (final weighted score).
    pub recreation: Option<f64>,
}

impl ParkMetrics {
    /// Return the raw stored value for `metric`.
    #[must_use]
    pub const fn get(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::Quality => self.quality,
            Metric::Safety => self.safety,
            Metric::Accessibility => self.accessibility,
            Metric::QuantityVariety => self.quantity_variety,
            Metric::Recreation => self.recreation,
        }
    }

    /// Return the value for `metric` only when it can be ranked.
    ///
    /// Missing, `NaN` and infinite values are all treated as unknown.
    #[must_use]
    pub fn rankable(&self, metric: Metric) -> Option<f64> {
        self.get(metric).filter(|value| value.is_finite())
    }

    /// Set the value for `metric`, returning the updated scores.
    ///
    /// # Examples
    /// ```
    /// use parkfinder_core::{Metric, ParkMetrics};
    ///
    /// let metrics = ParkMetrics::default().with(Metric::Safety, 0.4);
    /// assert_eq!(metrics.get(Metric::Safety), Some(0.4));
    /// assert_eq!(metrics.get(Metric::Quality), None);
    /// ```
    #[must_use]
    pub const fn with(mut self, metric: Metric, value: f64) -> Self {
        *self.slot_mut(metric) = Some(value);
        self
    }

    /// Overwrite the value for `metric`, including clearing it with `None`.
    pub const fn set(&mut self, metric: Metric, value: Option<f64>) {
        *self.slot_mut(metric) = value;
    }

    const fn slot_mut(&mut self, metric: Metric) -> &mut Option<f64> {
        match metric {
            Metric::Quality => &mut self.quality,
            Metric::Safety => &mut self.safety,
            Metric::Accessibility => &mut self.accessibility,
            Metric::QuantityVariety => &mut self.quantity_variety,
            Metric::Recreation => &mut self.recreation,
        }
    }
}

/// Descriptive fields carried through untouched for presentation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ParkDetails {
    /// Postal code of the site entrance.
    pub postcode: Option<String>,
    /// Community council or area the park belongs to.
    pub community: Option<String>,
    /// Deprivation decile of the surrounding data zone.
    pub decile: Option<u8>,
    /// Image references for popups.
    pub images: Vec<String>,
}

/// A single park.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use parkfinder_core::Park;
///
/// let park = Park::new(7_u64, "The Meadows", Coord { x: -3.191872, y: 55.941430 })
///     .with_facilities(["Toilets", "Playground"]);
///
/// assert_eq!(park.latitude(), 55.941430);
/// assert!(park.has_facility(" toilets "));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Park {
    /// Unique identifier.
    pub site_id: SiteId,
    /// Display name; also a case-insensitive lookup key.
    pub name: String,
    /// Geospatial position. Serialised as `{"lat": .., "lon": ..}`.
    #[cfg_attr(feature = "serde", serde(with = "lat_lon"))]
    pub location: Coord<f64>,
    /// Quality scores used for ranking.
    pub metrics: ParkMetrics,
    /// Facilities available on site.
    pub facilities: FacilitySet,
    /// Opaque descriptive fields.
    pub details: ParkDetails,
}

impl Park {
    /// Construct a park with no metrics, facilities or details.
    pub fn new(site_id: impl Into<SiteId>, name: impl Into<String>, location: Coord<f64>) -> Self {
        Self {
            site_id: site_id.into(),
            name: name.into(),
            location,
            metrics: ParkMetrics::default(),
            facilities: FacilitySet::new(),
            details: ParkDetails::default(),
        }
    }

    /// Replace the park's metrics.
    #[must_use]
    pub fn with_metrics(mut self, metrics: ParkMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Replace the park's facilities.
    #[must_use]
    pub fn with_facilities<I, S>(mut self, facilities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.facilities = facilities.into_iter().collect();
        self
    }

    /// Replace the park's descriptive fields.
    #[must_use]
    pub fn with_details(mut self, details: ParkDetails) -> Self {
        self.details = details;
        self
    }

    /// Latitude in degrees.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.location.y
    }

    /// Longitude in degrees.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.location.x
    }

    /// Report whether the park offers `facility` (trimmed, case-insensitive).
    #[must_use]
    pub fn has_facility(&self, facility: &str) -> bool {
        self.facilities.contains(facility)
    }
}

/// Serde adapter that names coordinate axes instead of using `x`/`y`.
#[cfg(feature = "serde")]
mod lat_lon {
    use geo::Coord;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    struct LatLon {
        lat: f64,
        lon: f64,
    }

    pub(super) fn serialize<S: Serializer>(
        location: &Coord<f64>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        LatLon {
            lat: location.y,
            lon: location.x,
        }
        .serialize(serializer)
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Coord<f64>, D::Error> {
        let LatLon { lat, lon } = LatLon::deserialize(deserializer)?;
        Ok(Coord { x: lon, y: lat })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(SiteId::from(12_u64), "12")]
    #[case(SiteId::from("  A-7 "), "A-7")]
    #[case(SiteId::from(String::from("0042")), "0042")]
    fn site_ids_are_trimmed_text(#[case] id: SiteId, #[case] expected: &str) {
        assert_eq!(id.as_str(), expected);
    }

    #[rstest]
    fn metrics_builder_sets_only_requested_slot() {
        let metrics = ParkMetrics::default().with(Metric::QuantityVariety, 0.25);
        assert_eq!(metrics.quantity_variety, Some(0.25));
        assert_eq!(metrics.quality, None);
        assert_eq!(metrics.recreation, None);
    }

    #[rstest]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    #[case(f64::NEG_INFINITY)]
    fn non_finite_metrics_are_not_rankable(#[case] value: f64) {
        let metrics = ParkMetrics::default().with(Metric::Quality, value);
        assert!(metrics.get(Metric::Quality).is_some());
        assert_eq!(metrics.rankable(Metric::Quality), None);
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn location_serialises_with_named_axes() {
        let park = Park::new(5_u64, "The Meadows", Coord { x: -3.191872, y: 55.941430 });
        let value = serde_json::to_value(&park).expect("serialise park");
        assert_eq!(
            value["location"],
            serde_json::json!({ "lat": 55.941430, "lon": -3.191872 })
        );

        let decoded: Park = serde_json::from_value(value).expect("deserialise park");
        assert_eq!(decoded, park);
    }

    #[rstest]
    fn set_clears_a_value() {
        let mut metrics = ParkMetrics::default().with(Metric::Safety, 0.3);
        metrics.set(Metric::Safety, None);
        assert_eq!(metrics.safety, None);
    }
}

//! The read-only park catalog.
//!
//! [`ParkCatalog`] owns the session's parks in insertion order and indexes
//! them by site id and by case-insensitive name. It is validated once at
//! construction and never changes afterwards.

use std::collections::{BTreeMap, HashMap, hash_map::Entry};
use std::fmt;

use log::debug;
use thiserror::Error;

use crate::facility::normalise;
use crate::park::{Park, SiteId};

/// Why a record was rejected while building the catalog.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MalformedReason {
    /// The record had no usable site id.
    #[error("site id is empty")]
    EmptySiteId,
    /// The record had no usable name.
    #[error("name is empty")]
    EmptyName,
    /// Latitude or longitude was absent from the source.
    #[error("latitude or longitude is missing")]
    MissingCoordinate,
    /// Latitude or longitude was not a finite in-range value.
    #[error("coordinate ({lat}, {lon}) is not a valid latitude/longitude pair")]
    InvalidCoordinate {
        /// Latitude in degrees.
        lat: f64,
        /// Longitude in degrees.
        lon: f64,
    },
    /// Another record already used this site id.
    #[error("site id {site_id} is already used by record {first}")]
    DuplicateSiteId {
        /// The repeated identifier.
        site_id: SiteId,
        /// Index of the record that claimed it first.
        first: usize,
    },
    /// Another record already used this name (ignoring case).
    #[error("name '{name}' is already used by record {first}")]
    DuplicateName {
        /// The repeated name.
        name: String,
        /// Index of the record that claimed it first.
        first: usize,
    },
    /// The source record could not be interpreted.
    #[error("{detail}")]
    Unreadable {
        /// Description of the problem.
        detail: String,
    },
}

/// Errors raised while building a [`ParkCatalog`].
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogError {
    /// A record failed validation; the whole load is rejected.
    #[error("malformed park record at index {index}: {reason}")]
    MalformedRecord {
        /// Position of the record in the input.
        index: usize,
        /// What was wrong with it.
        reason: MalformedReason,
    },
}

/// Immutable collection of parks with O(1) lookups.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use parkfinder_core::{Park, ParkCatalog};
///
/// # fn main() -> Result<(), parkfinder_core::CatalogError> {
/// let catalog = ParkCatalog::new(vec![
///     Park::new(101_u64, "Inverleith Park", Coord { x: -3.217358, y: 55.963483 }),
/// ])?;
///
/// assert!(catalog.find_by_name("inverleith park").is_some());
/// assert!(catalog.find_by_site_id(&101).is_some());
/// assert!(catalog.find_by_site_id("101").is_some());
/// assert!(catalog.find_by_site_id("102").is_none());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ParkCatalog {
    parks: Vec<Park>,
    by_site_id: HashMap<SiteId, usize>,
    by_name: HashMap<String, usize>,
}

impl ParkCatalog {
    /// Validate `parks` and build the lookup indexes.
    ///
    /// # Errors
    /// Returns [`CatalogError::MalformedRecord`] for the first record with an
    /// empty id or name, an invalid coordinate, or an id or name already used
    /// by an earlier record.
    pub fn new(parks: Vec<Park>) -> Result<Self, CatalogError> {
        let mut by_site_id = HashMap::with_capacity(parks.len());
        let mut by_name = HashMap::with_capacity(parks.len());

        for (index, park) in parks.iter().enumerate() {
            let malformed = |reason| CatalogError::MalformedRecord { index, reason };
            validate_record(park).map_err(malformed)?;

            match by_site_id.entry(park.site_id.clone()) {
                Entry::Occupied(existing) => {
                    return Err(malformed(MalformedReason::DuplicateSiteId {
                        site_id: park.site_id.clone(),
                        first: *existing.get(),
                    }));
                }
                Entry::Vacant(slot) => {
                    slot.insert(index);
                }
            }
            match by_name.entry(name_key(&park.name)) {
                Entry::Occupied(existing) => {
                    return Err(malformed(MalformedReason::DuplicateName {
                        name: park.name.clone(),
                        first: *existing.get(),
                    }));
                }
                Entry::Vacant(slot) => {
                    slot.insert(index);
                }
            }
        }

        debug!("built park catalog with {} records", parks.len());
        Ok(Self {
            parks,
            by_site_id,
            by_name,
        })
    }

    /// All parks in insertion order.
    #[must_use]
    pub fn all(&self) -> &[Park] {
        &self.parks
    }

    /// Iterate over all parks in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Park> {
        self.parks.iter()
    }

    /// Number of parks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parks.len()
    }

    /// Report whether the catalog holds no parks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parks.is_empty()
    }

    /// Look a park up by name, ignoring case and surrounding whitespace.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&Park> {
        self.by_name
            .get(&name_key(name))
            .and_then(|&index| self.parks.get(index))
    }

    /// Look a park up by site id.
    ///
    /// Numbers and strings are compared by their trimmed text, so `42` and
    /// `" 42"` find the same park.
    #[must_use]
    pub fn find_by_site_id<T: fmt::Display + ?Sized>(&self, id: &T) -> Option<&Park> {
        self.by_site_id
            .get(&SiteId::new(id))
            .and_then(|&index| self.parks.get(index))
    }

    /// Distinct facility names across the catalog.
    ///
    /// Names are de-duplicated ignoring case and whitespace, keeping the first
    /// spelling seen, and sorted by their normalised form.
    #[must_use]
    pub fn facility_names(&self) -> Vec<&str> {
        let mut names: BTreeMap<&str, &str> = BTreeMap::new();
        for park in &self.parks {
            for (key, name) in park.facilities.entries() {
                names.entry(key).or_insert(name);
            }
        }
        names.into_values().collect()
    }
}

impl<'a> IntoIterator for &'a ParkCatalog {
    type Item = &'a Park;
    type IntoIter = std::slice::Iter<'a, Park>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn name_key(name: &str) -> String {
    normalise(name)
}

fn validate_record(park: &Park) -> Result<(), MalformedReason> {
    if park.site_id.is_empty() {
        return Err(MalformedReason::EmptySiteId);
    }
    if park.name.trim().is_empty() {
        return Err(MalformedReason::EmptyName);
    }
    let (lat, lon) = (park.latitude(), park.longitude());
    let in_range = lat.is_finite()
        && lon.is_finite()
        && (-90.0..=90.0).contains(&lat)
        && (-180.0..=180.0).contains(&lon);
    if !in_range {
        return Err(MalformedReason::InvalidCoordinate { lat, lon });
    }
    Ok(())
}

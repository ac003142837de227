//! Facility names and conjunctive facility matching.
//!
//! Facility names from the dataset and from callers rarely agree on casing or
//! stray whitespace, so every comparison goes through [`normalise`]. The
//! original spelling is kept for display.

use std::collections::BTreeMap;

/// Fold a facility name into its comparison key.
///
/// # Examples
/// ```
/// use parkfinder_core::facility::normalise;
///
/// assert_eq!(normalise("  Public Toilets "), "public toilets");
/// ```
#[must_use]
pub fn normalise(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Facilities offered by a park, keyed by their normalised name.
///
/// The first spelling inserted for a key is the one reported by [`iter`].
///
/// [`iter`]: FacilitySet::iter
///
/// # Examples
/// ```
/// use parkfinder_core::FacilitySet;
///
/// let set: FacilitySet = ["Toilets", "toilets ", "Parking"].into_iter().collect();
/// assert_eq!(set.len(), 2);
/// assert!(set.contains("TOILETS"));
/// assert_eq!(set.iter().collect::<Vec<_>>(), ["Parking", "Toilets"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FacilitySet {
    entries: BTreeMap<String, String>,
}

impl FacilitySet {
    /// Construct an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Insert a facility name.
    ///
    /// Blank names are ignored. Returns `true` when the normalised name was
    /// not already present.
    pub fn insert(&mut self, name: &str) -> bool {
        let key = normalise(name);
        if key.is_empty() || self.entries.contains_key(&key) {
            return false;
        }
        self.entries.insert(key, name.trim().to_owned());
        true
    }

    /// Report whether the set contains `name` after normalisation.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&normalise(name))
    }

    /// Return the stored spelling for `name`, if present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.get_normalised(&normalise(name))
    }

    fn get_normalised(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Number of distinct facilities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Report whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over display names, ordered by normalised key.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.values().map(String::as_str)
    }

    /// Iterate over `(normalised key, display name)` pairs.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.entries
            .iter()
            .map(|(key, name)| (key.as_str(), name.as_str()))
    }
}

impl<S: AsRef<str>> FromIterator<S> for FacilitySet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<S: AsRef<str>> Extend<S> for FacilitySet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for name in iter {
            self.insert(name.as_ref());
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for FacilitySet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for FacilitySet {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let names = Vec::<String>::deserialize(deserializer)?;
        Ok(names.into_iter().collect())
    }
}

/// The facilities a proximity search requires, all of which must match.
///
/// Names are normalised, blank names dropped and duplicates collapsed while
/// keeping the caller's order.
///
/// # Examples
/// ```
/// use parkfinder_core::FacilityQuery;
///
/// let query = FacilityQuery::new(["Toilets", " toilets", "", "Parking"]);
/// assert_eq!(query.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FacilityQuery {
    required: Vec<String>,
}

impl FacilityQuery {
    /// Build a query from caller-supplied facility names.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut required: Vec<String> = Vec::new();
        for name in names {
            let key = normalise(name.as_ref());
            if !key.is_empty() && !required.contains(&key) {
                required.push(key);
            }
        }
        Self { required }
    }

    /// Number of distinct required facilities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.required.len()
    }

    /// Report whether nothing is required.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.required.is_empty()
    }

    /// Normalised names in request order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.required.iter().map(String::as_str)
    }

    /// Match `facilities` against every required name.
    ///
    /// Returns the park's own spelling of each required facility in request
    /// order, or `None` as soon as one is missing.
    #[must_use]
    pub fn matches<'a>(&self, facilities: &'a FacilitySet) -> Option<Vec<&'a str>> {
        self.required
            .iter()
            .map(|key| facilities.get_normalised(key))
            .collect()
    }
}

impl<S: AsRef<str>> FromIterator<S> for FacilityQuery {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

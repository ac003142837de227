//! Ranking metrics and sort direction.
//!
//! # Examples
//! ```
//! use parkfinder_core::{Metric, SortOrder};
//!
//! assert_eq!("quantity_variety".parse::<Metric>(), Ok(Metric::QuantityVariety));
//! assert_eq!(Metric::QuantityVariety.to_string(), "quantityVariety");
//! assert_eq!("asc".parse::<SortOrder>(), Ok(SortOrder::Ascending));
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::ranking::RankError;

/// A quality score parks can be ranked by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
pub enum Metric {
    /// Overall quality.
    Quality,
    /// Perceived safety.
    Safety,
    /// Accessibility.
    Accessibility,
    /// Quantity and variety of amenities.
    QuantityVariety,
    /// Composite recreation index.
    Recreation,
}

impl Metric {
    /// Every metric, in display order.
    pub const ALL: [Self; 5] = [
        Self::Quality,
        Self::Safety,
        Self::Accessibility,
        Self::QuantityVariety,
        Self::Recreation,
    ];

    /// Return the canonical key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Quality => "quality",
            Self::Safety => "safety",
            Self::Accessibility => "accessibility",
            Self::QuantityVariety => "quantityVariety",
            Self::Recreation => "recreation",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metric {
    type Err = RankError;

    /// Parse a metric key.
    ///
    /// Matching ignores case, surrounding whitespace, `_` and `-`, so
    /// `quantityVariety`, `quantity_variety` and `Quantity-Variety` are all
    /// accepted. `composite` is an alias for [`Metric::Recreation`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded: String = s
            .trim()
            .chars()
            .filter(|ch| !matches!(ch, '_' | '-'))
            .flat_map(char::to_lowercase)
            .collect();
        match folded.as_str() {
            "quality" => Ok(Self::Quality),
            "safety" => Ok(Self::Safety),
            "accessibility" => Ok(Self::Accessibility),
            "quantityvariety" => Ok(Self::QuantityVariety),
            "recreation" | "composite" => Ok(Self::Recreation),
            _ => Err(RankError::InvalidMetric { key: s.to_owned() }),
        }
    }
}

/// Direction of a ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum SortOrder {
    /// Lowest value first.
    Ascending,
    /// Highest value first.
    #[default]
    Descending,
}

impl SortOrder {
    /// Return the canonical name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ascending => "ascending",
            Self::Descending => "descending",
        }
    }

    /// Compare two finite metric values so that "better" sorts first.
    #[must_use]
    pub fn compare(self, lhs: f64, rhs: f64) -> Ordering {
        let ascending = lhs.partial_cmp(&rhs).unwrap_or(Ordering::Equal);
        match self {
            Self::Ascending => ascending,
            Self::Descending => ascending.reverse(),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = RankError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Ascending),
            "desc" | "descending" => Ok(Self::Descending),
            _ => Err(RankError::InvalidOrder {
                value: s.to_owned(),
            }),
        }
    }
}

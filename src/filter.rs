//! Multi-criteria demon filter.
//!
//! Every criterion must hold for a demon to be kept: name substring
//! (case-insensitive), power range, danger range, and type. Filtering borrows
//! from the catalog and always returns a subsequence in catalog order.

use crate::catalog::{Demon, DemonType};
use crate::tier::{DANGER_DOMAIN, POWER_DOMAIN};
use anyhow::{Context, Result, bail};
use std::fmt;
use tracing::debug;

/// Selector value meaning "no type restriction".
pub const ALL_TYPES: &str = "all";

/// Inclusive rating interval. `min > max` is allowed and matches nothing.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct RatingRange {
    pub min: u8,
    pub max: u8,
}

impl RatingRange {
    pub const fn new(min: u8, max: u8) -> Self {
        Self { min, max }
    }

    pub const fn full_power() -> Self {
        Self::new(*POWER_DOMAIN.start(), *POWER_DOMAIN.end())
    }

    pub const fn full_danger() -> Self {
        Self::new(*DANGER_DOMAIN.start(), *DANGER_DOMAIN.end())
    }

    pub fn contains(&self, value: u8) -> bool {
        self.min <= value && value <= self.max
    }

    /// Parse `MIN-MAX` or a single `N` (meaning `N-N`).
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            bail!("empty range");
        }
        let (min, max) = match trimmed.split_once('-') {
            Some((min, max)) => (parse_bound(min, raw)?, parse_bound(max, raw)?),
            None => {
                let value = parse_bound(trimmed, raw)?;
                (value, value)
            }
        };
        Ok(Self { min, max })
    }
}

fn parse_bound(bound: &str, raw: &str) -> Result<u8> {
    bound
        .trim()
        .parse::<u8>()
        .with_context(|| format!("invalid range '{raw}'; expected MIN-MAX or N"))
}

impl fmt::Display for RatingRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.min, self.max)
    }
}

/// Type selector: either every type or exactly one.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum TypeSelector {
    #[default]
    All,
    Only(DemonType),
}

impl TypeSelector {
    /// `"all"` selects every type; anything else is an exact type label.
    pub fn parse(raw: &str) -> Self {
        if raw == ALL_TYPES {
            TypeSelector::All
        } else {
            TypeSelector::Only(DemonType::from_label(raw))
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            TypeSelector::All => ALL_TYPES,
            TypeSelector::Only(kind) => kind.as_str(),
        }
    }

    pub fn accepts(&self, kind: &DemonType) -> bool {
        match self {
            TypeSelector::All => true,
            TypeSelector::Only(selected) => selected == kind,
        }
    }
}

/// Current filter values. The default keeps every demon.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FilterCriteria {
    pub search: String,
    pub power: RatingRange,
    pub danger: RatingRange,
    pub kind: TypeSelector,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            search: String::new(),
            power: RatingRange::full_power(),
            danger: RatingRange::full_danger(),
            kind: TypeSelector::All,
        }
    }
}

impl FilterCriteria {
    pub fn matches(&self, demon: &Demon) -> bool {
        self.matches_with(&self.search.to_lowercase(), demon)
    }

    fn matches_with(&self, needle: &str, demon: &Demon) -> bool {
        let matches_search = needle.is_empty() || demon.name.to_lowercase().contains(needle);
        matches_search
            && self.power.contains(demon.power)
            && self.danger.contains(demon.danger)
            && self.kind.accepts(&demon.kind)
    }
}

/// Return the demons matching `criteria`, in catalog order.
pub fn filter_demons<'a>(catalog: &'a [Demon], criteria: &FilterCriteria) -> Vec<&'a Demon> {
    let needle = criteria.search.to_lowercase();
    let kept: Vec<&Demon> = catalog
        .iter()
        .filter(|demon| criteria.matches_with(&needle, demon))
        .collect();
    debug!(
        search = %criteria.search,
        power = %criteria.power,
        danger = %criteria.danger,
        kind = criteria.kind.as_str(),
        total = catalog.len(),
        kept = kept.len(),
        "filter evaluated"
    );
    kept
}

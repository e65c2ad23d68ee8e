//! Browser state: the filter values plus the active navigation section.
//!
//! A `BrowserState` is immutable per render. Each setter consumes the current
//! state and returns the next one, and `page` re-runs the filter over the full
//! catalog every time.

use crate::catalog::{Demon, DemonType};
use crate::filter::{FilterCriteria, RatingRange, TypeSelector, filter_demons};
use anyhow::{Result, bail};
use std::fmt;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum Section {
    #[default]
    Catalog,
    About,
    Contracts,
    Contact,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Catalog,
        Section::About,
        Section::Contracts,
        Section::Contact,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Section::Catalog => "catalog",
            Section::About => "about",
            Section::Contracts => "contracts",
            Section::Contact => "contact",
        }
    }

    /// Navigation label shown in the header.
    pub fn title(self) -> &'static str {
        match self {
            Section::Catalog => "Каталог",
            Section::About => "О демонах",
            Section::Contracts => "Контракты",
            Section::Contact => "Контакты",
        }
    }

    pub fn parse(raw: &str) -> Result<Self> {
        match Section::ALL.into_iter().find(|section| section.as_str() == raw) {
            Some(section) => Ok(section),
            None => bail!(
                "unknown section '{raw}'; expected one of {}",
                Section::ALL.map(Section::as_str).join(", ")
            ),
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the catalog section shows for the current criteria.
#[derive(Debug, PartialEq, Eq)]
pub enum CatalogPage<'a> {
    Matches(Vec<&'a Demon>),
    NoResults,
}

impl<'a> CatalogPage<'a> {
    pub fn demons(&self) -> &[&'a Demon] {
        match self {
            CatalogPage::Matches(demons) => demons,
            CatalogPage::NoResults => &[],
        }
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct BrowserState {
    criteria: FilterCriteria,
    section: Section,
}

impl BrowserState {
    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn section(&self) -> Section {
        self.section
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.criteria.search = search.into();
        self
    }

    pub fn with_power(mut self, range: RatingRange) -> Self {
        self.criteria.power = range;
        self
    }

    pub fn with_danger(mut self, range: RatingRange) -> Self {
        self.criteria.danger = range;
        self
    }

    pub fn with_type(mut self, selector: TypeSelector) -> Self {
        self.criteria.kind = selector;
        self
    }

    pub fn with_section(mut self, section: Section) -> Self {
        self.section = section;
        self
    }

    /// Restore the default criteria; the active section is kept.
    pub fn reset_filters(mut self) -> Self {
        self.criteria = FilterCriteria::default();
        self
    }

    /// Selector entries: `all` followed by the catalog's types in order.
    pub fn type_options(types: &[DemonType]) -> Vec<TypeSelector> {
        std::iter::once(TypeSelector::All)
            .chain(types.iter().cloned().map(TypeSelector::Only))
            .collect()
    }

    pub fn page<'a>(&self, catalog: &'a [Demon]) -> CatalogPage<'a> {
        let demons = filter_demons(catalog, &self.criteria);
        if demons.is_empty() {
            CatalogPage::NoResults
        } else {
            CatalogPage::Matches(demons)
        }
    }
}

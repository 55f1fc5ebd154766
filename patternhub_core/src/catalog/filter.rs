//! Filter state and the predicate built from it.
//!
//! Every dimension is independent: an unset dimension never constrains, and
//! active dimensions are combined with logical AND. Multi-valued dimensions
//! match when the record shares at least one slug with the selection.

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use super::sort::SortKey;
use super::types::{Category, PatternRecord};

/// Category constraint. Values that do not name a known category are kept
/// as `Unknown` and match nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryFilter {
    Is(Category),
    Unknown(String),
}

impl CategoryFilter {
    /// Normalise free input. Blank input means "no constraint".
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        Some(
            raw.parse::<Category>()
                .map_or_else(|_| Self::Unknown(raw.to_string()), Self::Is),
        )
    }

    fn matches(&self, category: Category) -> bool {
        match self {
            Self::Is(expected) => *expected == category,
            Self::Unknown(_) => false,
        }
    }
}

/// A set of selected taxonomy slugs. Empty means "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selection(BTreeSet<String>);

impl Selection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn contains(&self, slug: &str) -> bool {
        self.0.contains(slug)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Add the slug if absent, remove it otherwise.
    pub fn toggle(&mut self, slug: &str) {
        if !self.0.remove(slug) {
            self.0.insert(slug.to_string());
        }
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Parse a comma separated list, ignoring blank entries.
    #[must_use]
    pub fn from_csv(raw: &str) -> Self {
        raw.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }

    fn matches(&self, values: &[String]) -> bool {
        self.is_empty() || values.iter().any(|v| self.0.contains(v))
    }
}

impl<S: Into<String>> FromIterator<S> for Selection {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Every recognised filter, search and sort selection for one view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterState {
    pub category: Option<CategoryFilter>,
    pub architectures: Selection,
    pub languages: Selection,
    pub frameworks: Selection,
    pub difficulty: Option<u8>,
    pub favorites_only: bool,
    pub search_query: String,
    pub sort: SortKey,
}

impl FilterState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(CategoryFilter::Is(category));
        self
    }

    #[must_use]
    pub fn with_category_str(mut self, raw: &str) -> Self {
        self.category = CategoryFilter::parse(raw);
        self
    }

    #[must_use]
    pub fn with_architectures(mut self, selection: Selection) -> Self {
        self.architectures = selection;
        self
    }

    #[must_use]
    pub fn with_languages(mut self, selection: Selection) -> Self {
        self.languages = selection;
        self
    }

    #[must_use]
    pub fn with_frameworks(mut self, selection: Selection) -> Self {
        self.frameworks = selection;
        self
    }

    #[must_use]
    pub const fn with_difficulty(mut self, difficulty: Option<u8>) -> Self {
        self.difficulty = difficulty;
        self
    }

    #[must_use]
    pub const fn with_favorites_only(mut self, favorites_only: bool) -> Self {
        self.favorites_only = favorites_only;
        self
    }

    #[must_use]
    pub fn with_search(mut self, query: impl Into<String>) -> Self {
        self.search_query = query.into();
        self
    }

    #[must_use]
    pub const fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    /// True when no dimension constrains the result.
    #[must_use]
    pub fn is_unconstrained(&self) -> bool {
        self.category.is_none()
            && self.architectures.is_empty()
            && self.languages.is_empty()
            && self.frameworks.is_empty()
            && self.difficulty.is_none()
            && !self.favorites_only
            && self.search_query.trim().is_empty()
    }
}

/// Predicate compiled from a [`FilterState`] and the caller's favorite ids.
pub struct Predicate<'a> {
    state: &'a FilterState,
    favorite_ids: &'a HashSet<i64>,
    needle: Option<String>,
}

impl<'a> Predicate<'a> {
    #[must_use]
    pub fn new(state: &'a FilterState, favorite_ids: &'a HashSet<i64>) -> Self {
        let trimmed = state.search_query.trim();
        let needle = (!trimmed.is_empty()).then(|| trimmed.to_lowercase());
        Self {
            state,
            favorite_ids,
            needle,
        }
    }

    #[must_use]
    pub fn matches(&self, record: &PatternRecord) -> bool {
        let state = self.state;

        if state
            .category
            .as_ref()
            .is_some_and(|category| !category.matches(record.category))
        {
            return false;
        }
        if !state.architectures.matches(&record.architectures)
            || !state.languages.matches(&record.languages)
            || !state.frameworks.matches(&record.frameworks)
        {
            return false;
        }
        if state.difficulty.is_some_and(|d| d != record.difficulty) {
            return false;
        }
        if state.favorites_only && !self.favorite_ids.contains(&record.id) {
            return false;
        }
        self.needle
            .as_deref()
            .is_none_or(|needle| text_matches(record, needle))
    }
}

fn text_matches(record: &PatternRecord, needle: &str) -> bool {
    record.name.to_lowercase().contains(needle)
        || record.description.to_lowercase().contains(needle)
        || record
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(needle))
}

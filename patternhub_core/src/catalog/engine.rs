//! Catalog filter engine.
//!
//! A pure function of `(records, state, favorite ids)`. Inputs are never
//! mutated and identical inputs always yield the same ordering, so callers
//! may memoise on them freely. Recompute on every state change; there is
//! no incremental maintenance.

use std::collections::{HashMap, HashSet};

use super::filter::{FilterState, Predicate};
use super::types::PatternRecord;

/// Filter `records` by `state` and order the survivors by `state.sort`.
#[must_use]
pub fn filter_and_sort<'a>(
    records: &'a [PatternRecord],
    state: &FilterState,
    favorite_ids: &HashSet<i64>,
) -> Vec<&'a PatternRecord> {
    let predicate = Predicate::new(state, favorite_ids);
    let mut visible: Vec<&PatternRecord> = records.iter().filter(|r| predicate.matches(r)).collect();
    state.sort.sort(&mut visible);
    visible
}

/// Slug lookup over a loaded collection.
pub struct CatalogIndex<'a> {
    by_slug: HashMap<&'a str, &'a PatternRecord>,
}

impl<'a> CatalogIndex<'a> {
    #[must_use]
    pub fn new(records: &'a [PatternRecord]) -> Self {
        Self {
            by_slug: records.iter().map(|r| (r.slug.as_str(), r)).collect(),
        }
    }

    #[must_use]
    pub fn get(&self, slug: &str) -> Option<&'a PatternRecord> {
        self.by_slug.get(slug).copied()
    }

    #[must_use]
    pub fn contains(&self, slug: &str) -> bool {
        self.by_slug.contains_key(slug)
    }

    /// Related patterns of `record` that are present, in declared order.
    /// Dangling slugs are skipped.
    #[must_use]
    pub fn related(&self, record: &PatternRecord) -> Vec<&'a PatternRecord> {
        record
            .related_patterns
            .iter()
            .filter_map(|slug| self.get(slug))
            .collect()
    }
}

/// Convenience over [`CatalogIndex::related`] for one-off lookups.
#[must_use]
pub fn resolve_related<'a>(
    record: &PatternRecord,
    records: &'a [PatternRecord],
) -> Vec<&'a PatternRecord> {
    CatalogIndex::new(records).related(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::filter::Selection;
    use crate::catalog::sort::SortKey;
    use crate::catalog::types::Category;

    fn singleton() -> PatternRecord {
        PatternRecord {
            id: 1,
            slug: "singleton".to_string(),
            name: "Singleton".to_string(),
            description: "Ensure a class has only one instance".to_string(),
            content: String::new(),
            category: Category::Creational,
            difficulty: 1,
            tags: vec!["instance".to_string(), "global".to_string()],
            architectures: vec![],
            languages: vec!["javascript".to_string(), "php".to_string()],
            frameworks: vec![],
            related_patterns: vec!["factory-method".to_string(), "ghost".to_string()],
            code_examples: vec![],
        }
    }

    fn observer() -> PatternRecord {
        PatternRecord {
            id: 2,
            slug: "observer".to_string(),
            name: "Observer".to_string(),
            description: "Notify dependents of state changes".to_string(),
            content: String::new(),
            category: Category::Behavioral,
            difficulty: 2,
            tags: vec!["notification".to_string()],
            architectures: vec![],
            languages: vec!["javascript".to_string()],
            frameworks: vec![],
            related_patterns: vec![],
            code_examples: vec![],
        }
    }

    fn pattern(id: i64, slug: &str, category: Category, difficulty: u8, langs: &[&str]) -> PatternRecord {
        PatternRecord {
            id,
            slug: slug.to_string(),
            name: slug.to_string(),
            description: String::new(),
            content: String::new(),
            category,
            difficulty,
            tags: vec![],
            architectures: vec![],
            languages: langs.iter().map(ToString::to_string).collect(),
            frameworks: vec![],
            related_patterns: vec![],
            code_examples: vec![],
        }
    }

    fn catalog() -> Vec<PatternRecord> {
        vec![
            pattern(1, "singleton", Category::Creational, 1, &["rust", "java"]),
            pattern(2, "builder", Category::Creational, 2, &["go"]),
            pattern(3, "adapter", Category::Structural, 1, &["rust"]),
            pattern(4, "observer", Category::Behavioral, 2, &["java"]),
            pattern(5, "strategy", Category::Behavioral, 1, &["rust", "go"]),
            pattern(6, "cqrs", Category::Architectural, 3, &[]),
        ]
    }

    fn ids(view: &[&PatternRecord]) -> Vec<i64> {
        view.iter().map(|r| r.id).collect()
    }

    #[test]
    fn unconstrained_state_is_identity() {
        let records = catalog();
        let view = filter_and_sort(&records, &FilterState::new(), &HashSet::new());
        assert_eq!(ids(&view), [1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn combined_filters_equal_intersection_of_single_filters() {
        let records = catalog();
        let none = HashSet::new();
        let by_category = FilterState::new().with_category(Category::Creational);
        let by_language = FilterState::new().with_languages(Selection::from_csv("rust"));
        let both = by_category.clone().with_languages(Selection::from_csv("rust"));

        let a: HashSet<i64> = ids(&filter_and_sort(&records, &by_category, &none)).into_iter().collect();
        let b: HashSet<i64> = ids(&filter_and_sort(&records, &by_language, &none)).into_iter().collect();
        let combined: HashSet<i64> = ids(&filter_and_sort(&records, &both, &none)).into_iter().collect();

        assert_eq!(combined, a.intersection(&b).copied().collect());
        assert_eq!(combined, [1].into_iter().collect());
    }

    #[test]
    fn multi_select_is_union_within_dimension() {
        let records = catalog();
        let state = FilterState::new().with_languages(Selection::from_csv("go,java"));
        let view = filter_and_sort(&records, &state, &HashSet::new());
        assert_eq!(ids(&view), [1, 2, 4, 5]);
    }

    #[test]
    fn favorites_only_with_no_favorites_is_empty() {
        let records = catalog();
        let state = FilterState::new()
            .with_favorites_only(true)
            .with_category(Category::Behavioral);
        assert!(filter_and_sort(&records, &state, &HashSet::new()).is_empty());

        let favorites: HashSet<i64> = [4, 6].into_iter().collect();
        assert_eq!(ids(&filter_and_sort(&records, &state, &favorites)), [4]);
    }

    #[test]
    fn equal_keys_keep_source_order() {
        let mut records = catalog();
        records.push(pattern(7, "builder", Category::Creational, 2, &[]));
        let state = FilterState::new().with_sort(SortKey::Difficulty);
        let view = filter_and_sort(&records, &state, &HashSet::new());
        assert_eq!(ids(&view), [3, 1, 5, 2, 7, 4, 6]);
    }

    #[test]
    fn repeated_calls_are_identical_and_input_untouched() {
        let records = catalog();
        let snapshot = records.clone();
        let state = FilterState::new()
            .with_sort(SortKey::Alphabetical)
            .with_search("e");
        let first = ids(&filter_and_sort(&records, &state, &HashSet::new()));
        let second = ids(&filter_and_sort(&records, &state, &HashSet::new()));
        assert_eq!(first, second);
        assert_eq!(records, snapshot);
    }

    #[test]
    fn singleton_observer_scenario() {
        let records = vec![singleton(), observer()];
        let none = HashSet::new();

        let state = FilterState::new().with_category(Category::Behavioral);
        assert_eq!(ids(&filter_and_sort(&records, &state, &none)), [2]);

        let state = FilterState::new().with_search("glob");
        assert_eq!(ids(&filter_and_sort(&records, &state, &none)), [1]);

        let state = FilterState::new()
            .with_difficulty(Some(1))
            .with_sort(SortKey::Alphabetical);
        assert_eq!(ids(&filter_and_sort(&records, &state, &none)), [1]);

        let state = FilterState::new().with_search("FACT");
        assert!(filter_and_sort(&records, &state, &none).is_empty());
    }

    #[test]
    fn dangling_related_slugs_are_skipped() {
        let mut records = vec![singleton(), observer()];
        records.push(pattern(3, "factory-method", Category::Creational, 2, &[]));
        let related = resolve_related(&records[0], &records);
        assert_eq!(ids(&related), [3]);

        let index = CatalogIndex::new(&records);
        assert!(index.contains("observer"));
        assert!(index.get("ghost").is_none());
    }
}

mod engine;
mod filter;
mod repository;
mod sort;
mod types;

pub use engine::{CatalogIndex, filter_and_sort, resolve_related};
pub use filter::{CategoryFilter, FilterState, Predicate, Selection};
pub use repository::{FavoritesProvider, PatternProvider, TaxonomyProvider};
pub use sort::SortKey;
pub use types::{Architecture, Category, CodeExample, Favorite, PatternRecord, SessionId};

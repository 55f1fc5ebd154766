//! sea-orm entities for the catalog tables.
//!
//! Set-valued pattern fields (tags, taxonomy slugs, related slugs, code
//! examples) are stored as JSON text columns.

pub mod architectures;
pub mod favorites;
pub mod patterns;

pub mod prelude {
    pub use super::architectures::Entity as Architectures;
    pub use super::favorites::Entity as Favorites;
    pub use super::patterns::Entity as Patterns;
}

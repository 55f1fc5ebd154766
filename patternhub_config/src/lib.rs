#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

mod schema;

pub use schema::{
    CatalogConfig, Config, DatabaseConfig, ProviderConfig, ProvidersConfig, ServerConfig,
};

//! Static strategy pattern for CLI commands.
//!
//! Each subcommand is a separate strategy type with its own input, so
//! dispatch in `main` is monomorphized and every command can be tested in
//! isolation.

use std::sync::Arc;

use patternhub_config::Config;
use patternhub_core::{LLMProvider, PatternAdvisor};
use patternhub_providers::ChatCompletionsProvider;
use patternhub_server::Advisor;
use patternhub_store::CatalogStore;
use tracing::info;

mod favorite;
mod generate;
mod info;
mod init;
mod list;
mod recommend;
mod seed;
mod serve;
mod show;
mod version;

pub use favorite::{FavoriteInput, FavoriteStrategy};
pub use generate::{GenerateInput, GenerateStrategy};
pub use info::InfoStrategy;
pub use init::InitStrategy;
pub use list::{ListInput, ListStrategy};
pub use recommend::{RecommendInput, RecommendStrategy};
pub use seed::{SeedInput, SeedStrategy};
pub use serve::{ServeInput, ServeStrategy};
pub use show::{ShowInput, ShowStrategy};
pub use version::VersionStrategy;

/// Contract shared by every command strategy.
///
/// Each strategy names its own input type, so parameters are passed without
/// runtime casting or boxing.
pub trait CommandStrategy: Send + Sync + 'static {
    type Input;

    /// # Errors
    /// Returns an error if command execution fails.
    async fn execute(&self, input: Self::Input) -> anyhow::Result<()>;
}

/// Open the configured catalog database.
async fn open_store(config: &Config) -> anyhow::Result<CatalogStore> {
    info!("Opening catalog database");
    CatalogStore::connect(&config.database.url).await
}

/// Build the model-backed advisor. Fails when no API key is configured.
fn build_advisor(config: &Config) -> anyhow::Result<Advisor> {
    let llm = &config.providers.llm;
    if llm.is_placeholder() {
        anyhow::bail!(
            "No LLM API key configured. Set providers.llm.api_key in ~/patternhub/config.json"
        );
    }
    let provider: Arc<dyn LLMProvider> = Arc::new(
        ChatCompletionsProvider::new(llm.api_key.clone())
            .with_base_url(llm.base_url.clone())
            .with_model(llm.model.clone()),
    );
    Ok(PatternAdvisor::new(provider))
}

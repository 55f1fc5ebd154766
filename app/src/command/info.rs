use patternhub_config::Config;
use patternhub_core::{PatternProvider, TaxonomyProvider};
use patternhub_store::CatalogStore;
use tracing::info;

/// Prints the configuration with secrets masked, then checks that the
/// catalog database is reachable.
#[derive(Debug, Clone, Copy)]
pub struct InfoStrategy;

impl super::CommandStrategy for InfoStrategy {
    type Input = ();

    async fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load()?;

        println!("=== patternhub Configuration ===\n");

        println!("Server:");
        println!("  Address: {}", config.server.bind_address());
        println!();

        println!("LLM Provider:");
        let llm = &config.providers.llm;
        if llm.is_placeholder() {
            println!("  API Key: (not set)");
        } else {
            println!("  API Key: {}", mask_secret(&llm.api_key));
        }
        println!("  Base URL: {}", llm.base_url);
        println!("  Model: {}", llm.model);
        println!();

        println!("Database:");
        let db_url = &config.database.url;
        println!("  URL: {}", mask_database_url(db_url));

        info!("Testing database connection");
        match CatalogStore::connect(db_url).await {
            Ok(store) => {
                println!("  Status: Connected");
                let patterns = store.all_patterns().await?.len();
                let architectures = store.all_architectures().await?.len();
                println!("  Patterns: {patterns}");
                println!("  Architectures: {architectures}");
            }
            Err(e) => {
                println!("  Status: Connection failed");
                println!("  Error: {e}");
            }
        }
        println!();

        println!("Catalog:");
        match &config.catalog.seed_path {
            Some(path) => println!("  Seed File: {}", path.display()),
            None => println!("  Seed File: (not set)"),
        }

        Ok(())
    }
}

fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() > 8 {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}...{tail}")
    } else {
        "***".to_string()
    }
}

fn mask_database_url(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_string();
    };

    let Some((credentials, after_at)) = rest.split_once('@') else {
        return url.to_string();
    };

    let Some((username, _password)) = credentials.split_once(':') else {
        return url.to_string();
    };

    format!("{scheme}://{username}:***@{after_at}")
}

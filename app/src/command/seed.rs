use std::path::PathBuf;

use patternhub_config::Config;
use patternhub_store::{SeedFile, seed};

use super::open_store;

#[derive(Debug, Clone, Default)]
pub struct SeedInput {
    /// Falls back to `catalog.seed_path`
    pub file: Option<PathBuf>,
}

/// Imports a JSON catalog file into the database.
#[derive(Debug, Clone, Copy)]
pub struct SeedStrategy;

impl super::CommandStrategy for SeedStrategy {
    type Input = SeedInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load()?;
        let path = input
            .file
            .or_else(|| config.catalog.seed_path.clone())
            .ok_or_else(|| {
                anyhow::anyhow!("No seed file given and catalog.seed_path is not set")
            })?;

        let seed_file = SeedFile::from_path(&path)?;
        let store = open_store(&config).await?;
        let report = seed::import(&store, &seed_file).await?;

        println!("Imported {}", path.display());
        println!(
            "  Patterns: {} new, {} updated",
            report.patterns_inserted, report.patterns_updated
        );
        println!(
            "  Architectures: {} new, {} updated",
            report.architectures_inserted, report.architectures_updated
        );
        Ok(())
    }
}

use patternhub_config::Config;

/// Writes the template configuration to `~/patternhub/config.json`.
#[derive(Debug, Clone, Copy)]
pub struct InitStrategy;

impl super::CommandStrategy for InitStrategy {
    type Input = ();

    async fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        let path = Config::create_config()?;
        println!("Created config at {}", path.display());
        println!("Edit providers.llm.api_key to enable recommendations and code generation.");
        Ok(())
    }
}

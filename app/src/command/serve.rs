use std::net::SocketAddr;
use std::sync::Arc;

use patternhub_config::Config;
use patternhub_server::AppState;
use tracing::{info, warn};

use super::{build_advisor, open_store};

#[derive(Debug, Clone, Default)]
pub struct ServeInput {
    /// Overrides `server.host`
    pub host: Option<String>,
    /// Overrides `server.port`
    pub port: Option<u16>,
}

/// Runs the HTTP API until interrupted.
#[derive(Debug, Clone, Copy)]
pub struct ServeStrategy;

impl super::CommandStrategy for ServeStrategy {
    type Input = ServeInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let mut config = Config::load()?;
        if let Some(host) = input.host {
            config.server.host = host;
        }
        if let Some(port) = input.port {
            config.server.port = port;
        }

        let store = open_store(&config).await?;
        let mut state = AppState::new(Arc::new(store));
        match build_advisor(&config) {
            Ok(advisor) => {
                info!("Recommendations enabled with model {}", advisor.model());
                state = state.with_advisor(advisor);
            }
            Err(e) => warn!("Recommendations disabled: {e}"),
        }

        let bind = config.server.bind_address();
        let addr: SocketAddr = tokio::net::lookup_host(bind.as_str())
            .await?
            .next()
            .ok_or_else(|| anyhow::anyhow!("Cannot resolve server address {bind}"))?;
        patternhub_server::serve(state, addr).await
    }
}

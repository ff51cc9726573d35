use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use common::{Action, Plugin, Runtime};
use tracing::info;

use crate::action::TokenInfoAction;
use crate::gecko::base_url;

pub const NAME: &str = "gecko-terminal-plugin";

pub struct GeckoTerminalPlugin;

#[async_trait]
impl Plugin for GeckoTerminalPlugin {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "GeckoTerminal API integration for Solana token information and security analysis"
    }

    async fn init(&self, runtime: &dyn Runtime) -> Result<()> {
        info!(base_url = %base_url(runtime), "GeckoTerminal plugin initialized");
        Ok(())
    }

    fn actions(&self) -> Vec<Arc<dyn Action>> {
        vec![Arc::new(TokenInfoAction)]
    }
}

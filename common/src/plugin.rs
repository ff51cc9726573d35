use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use crate::action::Action;
use crate::runtime::Runtime;

#[async_trait]
pub trait Plugin: Send + Sync {
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// Called once when the runtime registers the plugin.
    async fn init(&self, _runtime: &dyn Runtime) -> Result<()> {
        Ok(())
    }

    fn actions(&self) -> Vec<Arc<dyn Action>>;
}

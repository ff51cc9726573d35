use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use common::{Action, Plugin, Runtime};
use tracing::{info, warn};

use crate::actions::{GetTokenNewsAction, SearchTokenIdAction};
use crate::api::DEFAULT_BASE_URL;

pub const NAME: &str = "soso-news-plugin";

pub struct SosoNewsPlugin;

#[async_trait]
impl Plugin for SosoNewsPlugin {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "SoSoValue cryptocurrency ID search and news"
    }

    async fn init(&self, runtime: &dyn Runtime) -> Result<()> {
        if runtime.get_setting("SOSO_API_KEY").is_none() {
            warn!("SOSO_API_KEY is not set, SoSoValue actions will stay disabled");
            return Ok(());
        }
        let base_url = runtime
            .get_setting("SOSO_BASE_URL")
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        info!(base_url = %base_url, "SoSoValue plugin ready");
        Ok(())
    }

    fn actions(&self) -> Vec<Arc<dyn Action>> {
        vec![Arc::new(GetTokenNewsAction), Arc::new(SearchTokenIdAction)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::Settings;

    #[tokio::test]
    async fn init_tolerates_missing_key() {
        assert!(SosoNewsPlugin.init(&Settings::new()).await.is_ok());
    }

    #[test]
    fn news_is_offered_before_search() {
        // the search gate also accepts most news requests
        let names: Vec<_> = SosoNewsPlugin.actions().iter().map(|a| a.name()).collect();
        assert_eq!(names, vec!["GET_TOKEN_NEWS", "SEARCH_TOKEN_ID"]);
    }
}

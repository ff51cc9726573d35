pub mod search_token_id;
pub mod token_news;

use common::{AgentError, Runtime};

use crate::api::{SosoConfig, SosoValueClient};

pub use search_token_id::SearchTokenIdAction;
pub use token_news::GetTokenNewsAction;

pub(crate) fn has_api_key(runtime: &dyn Runtime) -> bool {
    runtime.get_setting("SOSO_API_KEY").is_some()
}

pub(crate) fn new_client(runtime: &dyn Runtime) -> anyhow::Result<SosoValueClient> {
    let config = SosoConfig::from_runtime(runtime).ok_or(AgentError::MissingSetting("SOSO_API_KEY"))?;
    Ok(SosoValueClient::new(config)?)
}

use std::sync::Arc;

use anyhow::{Context, Result};
use common::{
    ActionResult, AgentRuntime, Character, CustomOpenAiClient, CustomOpenAiPlugin, HandlerCallback, Message,
    ModelSize, Plugin, Settings, TextParams,
};
use gecko_terminal::GeckoTerminalPlugin;
use soso_news::SosoNewsPlugin;
use tracing::{debug, info};

const SENDER: &str = "user";
const SOURCE: &str = "cli";

/// What happened to one line of user input.
#[derive(Debug)]
pub enum Reply {
    /// An action handled the message; its callback already delivered the text.
    Action(ActionResult),
    /// No action matched and the model answered.
    Model(String),
    /// No action matched and no model is configured.
    Unhandled,
}

pub struct Session {
    runtime: AgentRuntime,
    model: Option<CustomOpenAiClient>,
    character: &'static Character,
}

impl Session {
    pub async fn start(settings: Settings, character: &'static Character) -> Result<Self> {
        let model = settings
            .get("OPENAI_API_KEY")
            .map(|_| CustomOpenAiClient::from_runtime(&settings));

        let mut runtime = AgentRuntime::new(settings, character);
        let plugins: [Arc<dyn Plugin>; 3] = [
            Arc::new(CustomOpenAiPlugin),
            Arc::new(SosoNewsPlugin),
            Arc::new(GeckoTerminalPlugin),
        ];
        for plugin in plugins {
            runtime.register(plugin);
        }
        runtime.init_plugins().await.context("Failed to initialize plugins")?;

        info!(
            character = character.name,
            plugins = runtime.plugins().len(),
            actions = runtime.actions().len(),
            model = model.is_some(),
            "Session started"
        );

        Ok(Self {
            runtime,
            model,
            character,
        })
    }

    pub fn character(&self) -> &'static Character {
        self.character
    }

    pub async fn respond(&mut self, text: &str, callback: Option<&dyn HandlerCallback>) -> Result<Reply> {
        let message = Message::new(SENDER, text).with_source(SOURCE);

        if let Some(result) = self.runtime.process_message(&message, callback).await {
            return Ok(Reply::Action(result));
        }

        let Some(model) = &self.model else {
            debug!("No action matched and no model configured");
            return Ok(Reply::Unhandled);
        };

        let answer = model
            .generate_text(ModelSize::Small, TextParams::new(text).system(self.character.system))
            .await
            .context("Model request failed")?;
        Ok(Reply::Model(answer))
    }
}

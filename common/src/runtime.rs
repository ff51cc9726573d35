use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde_json::Map;
use tracing::{debug, info};

use crate::action::{Action, ActionResult, HandlerCallback, Message, State};
use crate::character::Character;
use crate::plugin::Plugin;
use crate::settings::Settings;

/// What actions and plugins can see of the hosting agent.
pub trait Runtime: Send + Sync {
    fn get_setting(&self, key: &str) -> Option<String>;

    fn character(&self) -> Option<&Character> {
        None
    }
}

impl Runtime for Settings {
    fn get_setting(&self, key: &str) -> Option<String> {
        self.get(key).map(str::to_string)
    }
}

pub struct AgentRuntime {
    settings: Settings,
    character: &'static Character,
    plugins: Vec<Arc<dyn Plugin>>,
    state: HashMap<String, State>,
}

impl AgentRuntime {
    pub fn new(settings: Settings, character: &'static Character) -> Self {
        Self {
            settings,
            character,
            plugins: Vec::new(),
            state: HashMap::new(),
        }
    }

    /// Registers a plugin the character asked for; others are skipped.
    pub fn register(&mut self, plugin: Arc<dyn Plugin>) -> bool {
        if !self.character.uses_plugin(plugin.name()) {
            debug!(plugin = plugin.name(), character = self.character.name, "Plugin not used by character");
            return false;
        }
        self.plugins.push(plugin);
        true
    }

    pub fn plugins(&self) -> &[Arc<dyn Plugin>] {
        &self.plugins
    }

    pub async fn init_plugins(&self) -> Result<()> {
        for plugin in &self.plugins {
            info!(plugin = plugin.name(), "Initializing plugin");
            plugin
                .init(self)
                .await
                .with_context(|| format!("Failed to initialize plugin {}", plugin.name()))?;
        }
        Ok(())
    }

    pub fn actions(&self) -> Vec<Arc<dyn Action>> {
        self.plugins.iter().flat_map(|p| p.actions()).collect()
    }

    /// Runs the first action whose `validate` accepts the message.
    pub async fn process_message(
        &mut self,
        message: &Message,
        callback: Option<&dyn HandlerCallback>,
    ) -> Option<ActionResult> {
        let mut outcome = None;
        {
            let runtime: &dyn Runtime = &*self;
            for action in self.actions() {
                if !action.validate(runtime, message).await {
                    continue;
                }

                info!(action = action.name(), sender = %message.sender, "Dispatching message to action");
                let state = self.state.get(&message.sender);
                let result = action
                    .handler(runtime, message, state, &Map::new(), callback)
                    .await;
                outcome = Some((action.name(), result));
                break;
            }
        }

        let (name, result) = outcome?;
        self.state
            .entry(message.sender.clone())
            .or_default()
            .insert("lastAction".to_string(), name.into());
        Some(result)
    }
}

impl Runtime for AgentRuntime {
    fn get_setting(&self, key: &str) -> Option<String> {
        self.settings.get_setting(key)
    }

    fn character(&self) -> Option<&Character> {
        Some(self.character)
    }
}

use anyhow::Result;
use async_trait::async_trait;
use colored::*;
use common::{Content, HandlerCallback};

/// Prints action replies to stdout under the character's name.
pub struct ConsoleCallback {
    speaker: &'static str,
}

impl ConsoleCallback {
    pub fn new(speaker: &'static str) -> Self {
        Self { speaker }
    }

    pub fn say(&self, text: &str) {
        println!("\n{}: {}", self.speaker.green().bold(), text);
    }

    pub fn fail(&self, text: &str) {
        println!("\n{}: {}", self.speaker.red().bold(), text.red());
    }
}

#[async_trait]
impl HandlerCallback for ConsoleCallback {
    async fn call(&self, content: Content) -> Result<()> {
        if content.error {
            self.fail(&content.text);
        } else {
            self.say(&content.text);
        }
        Ok(())
    }
}

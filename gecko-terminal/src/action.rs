use anyhow::anyhow;
use async_trait::async_trait;
use common::action::notify;
use common::{Action, ActionExample, ActionResult, Content, HandlerCallback, HandlerOptions, Message, Runtime, State};
use serde_json::json;
use tracing::error;

use crate::format::format_token_info;
use crate::gecko::GeckoTerminalClient;
use crate::matchers::find_solana_address;

pub const NAME: &str = "TOKEN_INFO";

pub struct TokenInfoAction;

#[async_trait]
impl Action for TokenInfoAction {
    fn name(&self) -> &'static str {
        NAME
    }

    fn similes(&self) -> &'static [&'static str] {
        &["GET_TOKEN_INFO", "TOKEN_INFORMATION", "TOKEN_DETAILS", "CHECK_TOKEN", "查询代币信息", "代币详细信息"]
    }

    fn description(&self) -> &'static str {
        "Get detailed token information from GeckoTerminal API by token address"
    }

    fn examples(&self) -> &'static [ActionExample] {
        &[
            ActionExample {
                user: "Can you get info for token address HGafL7qFRtS6zYyUMn1jJc3z67itxZYd55D94mfupump?",
                reply: "I'll get the detailed token information for that address.",
            },
            ActionExample {
                user: "查询代币信息：So11111111111111111111111111111111111111112",
                reply: "正在查询该代币的详细信息...",
            },
        ]
    }

    async fn validate(&self, _runtime: &dyn Runtime, message: &Message) -> bool {
        find_solana_address(message.text()).is_some()
    }

    async fn handler(
        &self,
        runtime: &dyn Runtime,
        message: &Message,
        _state: Option<&State>,
        _options: &HandlerOptions,
        callback: Option<&dyn HandlerCallback>,
    ) -> ActionResult {
        let source = message.content.source.clone();

        match token_info(runtime, message).await {
            Ok(result) => {
                let mut content = Content::reply(result.text(), NAME, source);
                content.data = Some(result.data.clone());
                notify(callback, content).await;
                result
            }
            Err(e) => {
                error!(error = %e, "Error fetching token info from GeckoTerminal");
                let text = format!("❌ 获取代币信息失败: {}", e);
                let mut content = Content::reply(&text, NAME, source);
                content.error = true;
                notify(callback, content).await;
                ActionResult::failure(text.clone(), text)
            }
        }
    }
}

async fn token_info(runtime: &dyn Runtime, message: &Message) -> anyhow::Result<ActionResult> {
    let address = find_solana_address(message.text())
        .ok_or_else(|| anyhow!("No valid Solana token address found in message"))?;

    let client = GeckoTerminalClient::from_runtime(runtime);
    let info = client.fetch_by_address(address).await?;

    Ok(ActionResult::success(
        format_token_info(&info),
        json!({ "tokenAddress": address, "tokenInfo": info }),
    ))
}

use async_trait::async_trait;
use common::action::notify;
use common::{Action, ActionExample, ActionResult, Content, HandlerCallback, HandlerOptions, Message, Runtime, State};
use serde_json::json;
use tracing::{error, info};

use super::{has_api_key, new_client};
use crate::api::{fuzzy_match, suggest};
use crate::extract::extract_query;
use crate::format::{format_not_found, format_token};
use crate::matchers::is_search_intent;

pub const NAME: &str = "SEARCH_TOKEN_ID";
const MISSING_QUERY: &str = "无法识别要查询的代币名称";
const MAX_SUGGESTIONS: usize = 5;

pub struct SearchTokenIdAction;

#[async_trait]
impl Action for SearchTokenIdAction {
    fn name(&self) -> &'static str {
        NAME
    }

    fn similes(&self) -> &'static [&'static str] {
        &["FIND_TOKEN", "TOKEN_SEARCH", "LOOKUP_TOKEN", "SEARCH_COIN", "查询代币", "代币ID"]
    }

    fn description(&self) -> &'static str {
        "Search for cryptocurrency ID by name or symbol using SoSoValue API"
    }

    fn examples(&self) -> &'static [ActionExample] {
        &[
            ActionExample {
                user: "Bitcoin 的代币ID是多少？",
                reply: "💎 代币信息：\n**Bitcoin** (BTC)\n🆔 ID: 1673723677362319866",
            },
            ActionExample {
                user: "查一下 SOL 的信息",
                reply: "💎 代币信息：\n**Solana** (SOL)\n🆔 ID: 1673723677362319870",
            },
        ]
    }

    async fn validate(&self, runtime: &dyn Runtime, message: &Message) -> bool {
        has_api_key(runtime) && is_search_intent(message.text())
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

        let outcome = search(runtime, message).await;

        match outcome {
            Ok(result) => {
                notify(callback, Content::reply(result.text(), NAME, source)).await;
                result
            }
            Err(e) => {
                error!(error = %e, "Error in SEARCH_TOKEN_ID action");
                let text = format!("查询代币信息时出错：{}", e);
                let mut content = Content::reply(&text, NAME, source);
                content.error = true;
                notify(callback, content).await;
                ActionResult::failure(text, e.to_string())
            }
        }
    }
}

async fn search(runtime: &dyn Runtime, message: &Message) -> anyhow::Result<ActionResult> {
    let query = extract_query(message.text(), MISSING_QUERY)?;
    info!(query = %query, "Searching for token");

    let client = new_client(runtime)?;
    let currencies = client.list_all().await?;

    let result = match fuzzy_match(&query, &currencies) {
        Some(token) => ActionResult::success(
            format_token(token),
            json!({
                "tokenId": token.currency_id,
                "tokenName": token.currency_name,
                "fullName": token.full_name,
            }),
        ),
        None => {
            let suggestions = suggest(&query, &currencies, MAX_SUGGESTIONS);
            ActionResult::miss(
                format_not_found(&query, &suggestions),
                json!({ "query": query, "suggestions": suggestions }),
            )
        }
    };
    Ok(result)
}

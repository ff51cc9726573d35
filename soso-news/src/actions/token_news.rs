use async_trait::async_trait;
use common::action::notify;
use common::{Action, ActionExample, ActionResult, Content, HandlerCallback, HandlerOptions, Message, Runtime, State};
use serde_json::json;
use tracing::{error, info};

use super::{has_api_key, new_client};
use crate::api::NewsQuery;
use crate::extract::extract_query;
use crate::format::{format_news, format_news_not_found};
use crate::matchers::is_news_intent;

pub const NAME: &str = "GET_TOKEN_NEWS";
const MISSING_QUERY: &str = "请指定要查询哪个代币的新闻";
const NEWS_PAGE_SIZE: u32 = 5;

pub struct GetTokenNewsAction;

#[async_trait]
impl Action for GetTokenNewsAction {
    fn name(&self) -> &'static str {
        NAME
    }

    fn similes(&self) -> &'static [&'static str] {
        &["TOKEN_NEWS", "CRYPTO_NEWS", "COIN_NEWS", "LATEST_NEWS", "新闻", "资讯", "最新消息"]
    }

    fn description(&self) -> &'static str {
        "Get latest news for a specific cryptocurrency using SoSoValue API"
    }

    fn examples(&self) -> &'static [ActionExample] {
        &[
            ActionExample {
                user: "Bitcoin 有什么最新新闻？",
                reply: "📈 Bitcoin (BTC) 最新资讯：\n\n| # | 标题 | 日期 | 分类 | 作者 | 标签 | 链接 |\n| --- | --- | --- | --- | --- | --- | --- |\n| 1 | **Bitcoin ETF approved** | 2024-10-25 | 新闻 | Reuters | ETF, SEC | [查看原文](https://example.com) |\n",
            },
            ActionExample {
                user: "SOL 最近怎么样？",
                reply: "📈 Solana (SOL) 最新资讯：\n\n| # | 标题 | 日期 | 分类 | 作者 | 标签 | 链接 |\n| --- | --- | --- | --- | --- | --- | --- |\n| 1 | **Solana network upgrade completed** | 2024-10-24 | 新闻 | Solana Foundation | - | [查看原文](https://example.com) |\n",
            },
        ]
    }

    async fn validate(&self, runtime: &dyn Runtime, message: &Message) -> bool {
        has_api_key(runtime) && is_news_intent(message.text())
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

        let outcome = latest_news(runtime, message).await;

        match outcome {
            Ok(result) => {
                notify(callback, Content::reply(result.text(), NAME, source)).await;
                result
            }
            Err(e) => {
                error!(error = %e, "Error in GET_TOKEN_NEWS action");
                let text = format!("获取代币新闻时出错：{}", e);
                let mut content = Content::reply(&text, NAME, source);
                content.error = true;
                notify(callback, content).await;
                ActionResult::failure(text, e.to_string())
            }
        }
    }
}

async fn latest_news(runtime: &dyn Runtime, message: &Message) -> anyhow::Result<ActionResult> {
    let query = extract_query(message.text(), MISSING_QUERY)?;
    info!(query = %query, "Getting news for token");

    let client = new_client(runtime)?;
    let Some(token) = client.search(&query).await? else {
        return Ok(ActionResult::miss(format_news_not_found(&query), json!({ "query": query })));
    };

    let news = client
        .news_for(&token.currency_id, &NewsQuery::page(1, NEWS_PAGE_SIZE))
        .await?;

    Ok(ActionResult::success(
        format_news(&news, &token),
        json!({
            "tokenId": token.currency_id,
            "tokenName": token.currency_name,
            "fullName": token.full_name,
            "newsCount": news.len(),
            "news": news,
        }),
    ))
}

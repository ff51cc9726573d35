use std::sync::Mutex;

use async_trait::async_trait;
use common::{Action, Content, HandlerCallback, HandlerOptions, Message, Settings};
use gecko_terminal::{GeckoTerminalClient, TokenInfoAction, TriState};
use httpmock::prelude::*;
use serde_json::{json, Value};

const WSOL: &str = "So11111111111111111111111111111111111111112";
const PUMP: &str = "HGafL7qFRtS6zYyUMn1jJc3z67itxZYd55D94mfupump";

#[derive(Default)]
struct Recorder {
    replies: Mutex<Vec<Content>>,
}

#[async_trait]
impl HandlerCallback for Recorder {
    async fn call(&self, content: Content) -> anyhow::Result<()> {
        self.replies.lock().unwrap().push(content);
        Ok(())
    }
}

fn pump_token() -> Value {
    json!({
        "data": {
            "id": format!("solana_{PUMP}"),
            "type": "token",
            "attributes": {
                "address": PUMP,
                "name": "Pump Example",
                "symbol": "PEX",
                "decimals": 6,
                "image_url": "missing.png",
                "coingecko_coin_id": null,
                "websites": ["https://pump.example"],
                "discord_url": null,
                "telegram_handle": "pumpexample",
                "twitter_handle": null,
                "description": null,
                "gt_score": 41.28,
                "gt_score_details": { "pool": 20.5, "transaction": 10, "creation": 50, "info": 30 },
                "categories": [],
                "gt_category_ids": [],
                "holders": {
                    "count": 15234,
                    "distribution_percentage": { "top_10": "32.1", "11_20": "8.4", "21_40": "9.7", "rest": "49.8" },
                    "last_updated": "2024-10-25T00:00:00Z"
                },
                "mint_authority": "no",
                "freeze_authority": "no",
                "is_honeypot": "yes",
                "launchpad_details": {
                    "graduation_percentage": 100,
                    "completed": true,
                    "completed_at": "2024-10-20T12:00:00Z",
                    "migrated_destination_pool_address": "7xKXtg2CW87d97TXJSDpbD5jBkheTqA83TZRuJosgAsU"
                }
            }
        }
    })
}

#[tokio::test]
async fn fetch_by_address_parses_attributes() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path(format!("/api/v2/networks/solana/tokens/{PUMP}/info"))
                .header("accept", "application/json");
            then.status(200).json_body(pump_token());
        })
        .await;

    let info = GeckoTerminalClient::new(server.base_url())
        .fetch_by_address(PUMP)
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(info.symbol.as_deref(), Some("PEX"));
    assert_eq!(info.holders.unwrap().count, Some(15_234));
    assert_eq!(info.is_honeypot, TriState::Yes);
    assert_eq!(info.launchpad_details.unwrap().completed, Some(true));
}

#[tokio::test]
async fn missing_launchpad_details_is_tolerated() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(format!("/api/v2/networks/solana/tokens/{WSOL}/info"));
            then.status(200).json_body(json!({
                "data": {
                    "id": format!("solana_{WSOL}"),
                    "type": "token",
                    "attributes": { "address": WSOL, "name": "Wrapped SOL", "symbol": "SOL", "decimals": 9 }
                }
            }));
        })
        .await;

    let info = GeckoTerminalClient::new(server.base_url())
        .fetch_by_address(WSOL)
        .await
        .unwrap();
    assert!(info.launchpad_details.is_none());
    assert_eq!(info.mint_authority, TriState::Unknown);
}

#[tokio::test]
async fn error_status_is_reported() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(format!("/api/v2/networks/solana/tokens/{WSOL}/info"));
            then.status(403);
        })
        .await;

    let err = GeckoTerminalClient::new(server.base_url())
        .fetch_by_address(WSOL)
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(403));
    assert_eq!(err.to_string(), "GeckoTerminal API error: 403 Forbidden");
}

#[tokio::test]
async fn action_reports_token_details() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(format!("/api/v2/networks/solana/tokens/{PUMP}/info"));
            then.status(200).json_body(pump_token());
        })
        .await;

    let runtime = Settings::new().with("GECKO_BASE_URL", server.base_url());
    let message = Message::new("user", format!("Can you get info for token address {PUMP}?"));
    let recorder = Recorder::default();

    let action = TokenInfoAction;
    assert!(action.validate(&runtime, &message).await);
    let result = action
        .handler(&runtime, &message, None, &HandlerOptions::new(), Some(&recorder))
        .await;

    assert!(result.success);
    assert_eq!(result.data["tokenAddress"], PUMP);
    assert_eq!(result.data["tokenInfo"]["symbol"], "PEX");
    assert!(result.text().contains("👥 持有者数量: 15,234"));
    assert!(result.text().contains("🚨 蜜罐检测: 是"));
    assert!(result.text().contains("📅 完成时间: 2024-10-20 12:00:00 UTC"));
    assert!(result.text().contains("📱 Telegram: pumpexample"));

    let replies = recorder.replies.lock().unwrap();
    assert_eq!(replies.len(), 1);
    assert_eq!(replies[0].actions, vec!["TOKEN_INFO".to_string()]);
    assert_eq!(replies[0].data.as_ref().unwrap()["tokenAddress"], PUMP);
}

#[tokio::test]
async fn action_failure_goes_through_callback() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path(format!("/api/v2/networks/solana/tokens/{WSOL}/info"));
            then.status(404);
        })
        .await;

    let runtime = Settings::new().with("GECKO_BASE_URL", server.base_url());
    let recorder = Recorder::default();
    let result = TokenInfoAction
        .handler(&runtime, &Message::new("user", WSOL), None, &HandlerOptions::new(), Some(&recorder))
        .await;

    assert!(!result.success);
    assert_eq!(result.error.as_deref(), Some("❌ 获取代币信息失败: GeckoTerminal API error: 404 Not Found"));
    let replies = recorder.replies.lock().unwrap();
    assert!(replies[0].error);
}

#[tokio::test]
async fn messages_without_address_are_not_handled() {
    let runtime = Settings::new();
    assert!(!TokenInfoAction.validate(&runtime, &Message::new("user", "what is SOL?")).await);
}

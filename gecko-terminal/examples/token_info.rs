use anyhow::Result;
use common::Settings;
use gecko_terminal::format::format_token_info;
use gecko_terminal::GeckoTerminalClient;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let address = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "So11111111111111111111111111111111111111112".to_string());

    let client = GeckoTerminalClient::from_runtime(&Settings::from_env());
    let info = client.fetch_by_address(&address).await?;
    println!("{}", format_token_info(&info));

    Ok(())
}

use anyhow::{Context, Result};
use common::Settings;
use soso_news::format::{format_news, format_token};
use soso_news::{NewsQuery, SosoConfig, SosoValueClient};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let settings = Settings::from_env();
    let config = SosoConfig::from_runtime(&settings).context("SOSO_API_KEY must be set")?;
    let client = SosoValueClient::new(config)?;

    let query = std::env::args().nth(1).unwrap_or_else(|| "BTC".to_string());
    let Some(currency) = client.search(&query).await? else {
        println!("No currency matches {}", query);
        return Ok(());
    };
    println!("{}\n", format_token(&currency));

    let news = client.news_for(&currency.currency_id, &NewsQuery::page(1, 5)).await?;
    println!("{}", format_news(&news, &currency));

    Ok(())
}

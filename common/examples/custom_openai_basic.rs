use anyhow::Result;
use common::character::TOKEN_VIEW;
use common::providers::custom_openai::{Client, ModelSize, TextParams};
use common::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::from_env();
    let client = Client::from_runtime(&settings);

    // Example 1: plain prompt with the small model
    let reply = client
        .generate_text(ModelSize::Small, TextParams::new("What is Solana in one sentence?"))
        .await?;
    println!("Small model: {}", reply);

    // Example 2: persona system prompt with the large model
    let reply = client
        .generate_text(
            ModelSize::Large,
            TextParams::new("What should I check before buying a new pump.fun token?").system(TOKEN_VIEW.system),
        )
        .await?;
    println!("TokenView: {}", reply);

    // Example 3: structured output
    let object = client
        .generate_object(
            ModelSize::Small,
            "Return a JSON object with the ticker symbols mentioned in: 'BTC and SOL rallied today'",
            None,
        )
        .await?;
    println!("Object: {}", object);

    Ok(())
}

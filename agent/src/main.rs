mod console;
mod session;

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use common::{Character, Settings};
use tokio::io::{self, AsyncBufReadExt, BufReader};
use tracing::error;

use crate::console::ConsoleCallback;
use crate::session::{Reply, Session};

const DEFAULT_CHARACTER: &str = "SoSoNews";

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Character to run: SoSoNews, SolanaData or TokenView
    #[clap(long, env = "AGENT_CHARACTER")]
    character: Option<String>,

    /// TOML file with extra settings (overrides the environment)
    #[clap(long)]
    config: Option<PathBuf>,

    /// Handle a single message and exit
    #[clap(long)]
    message: Option<String>,
}

fn load_settings(args: &Args) -> Result<Settings> {
    let settings = Settings::from_env();
    match &args.config {
        Some(path) => Ok(settings.merge(
            Settings::from_toml_file(path).with_context(|| format!("Failed to load config {}", path.display()))?,
        )),
        None => Ok(settings),
    }
}

async fn handle(session: &mut Session, console: &ConsoleCallback, input: &str) {
    match session.respond(input, Some(console)).await {
        Ok(Reply::Action(_)) => {}
        Ok(Reply::Model(answer)) => console.say(&answer),
        Ok(Reply::Unhandled) => console.say("I can look up token IDs, news and Solana token details. Try \"BTC 最新新闻\"."),
        Err(e) => {
            error!(error = %e, "Failed to handle message");
            console.fail(&format!("{:#}", e));
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let settings = load_settings(&args)?;

    let name = match &args.character {
        Some(name) => name.as_str(),
        None => settings.get_or("AGENT_CHARACTER", DEFAULT_CHARACTER),
    };
    let character = Character::by_name(name)?;

    let mut session = Session::start(settings, character).await?;
    let console = ConsoleCallback::new(session.character().name);

    if let Some(message) = &args.message {
        handle(&mut session, &console, message).await;
        return Ok(());
    }

    println!("\n🤖 {} is ready", character.name.green().bold());
    for line in character.bio {
        println!("   {}", line.dimmed());
    }
    println!("Type 'exit' to quit\n");

    let mut lines = BufReader::new(io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
            println!("👋 Goodbye!");
            break;
        }

        handle(&mut session, &console, input).await;
    }

    Ok(())
}

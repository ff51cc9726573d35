mod client;
mod error;
mod types;

pub use client::{base_url, GeckoTerminalClient, DEFAULT_BASE_URL, SOLANA_NETWORK};
pub use error::GeckoError;
pub use types::{GtScoreDetails, HolderDistribution, Holders, LaunchpadDetails, TokenInfo, TriState};

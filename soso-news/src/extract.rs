//! Pulls the currency the user is asking about out of free text.
//!
//! Patterns are tried in order and the first hit wins. When none matches the
//! last whitespace-separated word is used, which is only a heuristic.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref TOKEN_PATTERNS: Vec<Regex> = vec![
        // ASCII word edges, so `SOL的` still yields `SOL`
        Regex::new(
            r"(?i)(?:^|[^A-Za-z0-9_])(btc|bitcoin|eth|ethereum|sol|solana|doge|dogecoin|ada|cardano|dot|polkadot|bnb|binance|usdt|tether|usdc|circle|xrp|ripple)(?:[^A-Za-z0-9_]|$)"
        )
        .unwrap(),
        Regex::new(r"(?i)(?:^|[^A-Za-z0-9_])([a-z][a-z0-9]{1,15})(?:[^A-Za-z0-9_]|$)\s*(?:代币|token|coin)?").unwrap(),
    ];
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct ExtractError(pub &'static str);

/// Returns the query to resolve against the currency list.
pub fn extract_query(text: &str, missing: &'static str) -> Result<String, ExtractError> {
    for pattern in TOKEN_PATTERNS.iter() {
        if let Some(symbol) = pattern.captures(text).and_then(|c| c.get(1)) {
            return Ok(symbol.as_str().to_string());
        }
    }

    text.split_whitespace()
        .filter(|word| word.chars().count() > 1)
        .last()
        .map(str::to_string)
        .ok_or(ExtractError(missing))
}

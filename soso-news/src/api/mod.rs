mod client;
mod error;
mod types;

pub use client::{fuzzy_match, proxy_from_env, suggest, NewsQuery, SosoConfig, SosoValueClient, DEFAULT_BASE_URL};
pub use error::SosoError;
pub use types::{Currency, LocalizedContent, MatchedCurrency, NewsCategory, NewsItem};

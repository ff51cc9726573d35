//! SoSoValue integration: currency ID lookup and per-currency news.

pub mod actions;
pub mod api;
pub mod extract;
pub mod format;
pub mod matchers;
pub mod plugin;

pub use actions::{GetTokenNewsAction, SearchTokenIdAction};
pub use api::{Currency, NewsItem, NewsQuery, SosoConfig, SosoError, SosoValueClient};
pub use plugin::SosoNewsPlugin;

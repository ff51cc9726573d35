//! GeckoTerminal token details for Solana addresses.

pub mod action;
pub mod format;
pub mod gecko;
pub mod matchers;
pub mod plugin;

pub use action::TokenInfoAction;
pub use gecko::{GeckoError, GeckoTerminalClient, TokenInfo, TriState};
pub use plugin::GeckoTerminalPlugin;

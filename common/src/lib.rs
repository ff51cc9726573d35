pub mod action;
pub mod character;
pub mod de;
pub mod error;
pub mod http;
pub mod plugin;
pub mod providers;
pub mod runtime;
pub mod settings;

pub use action::{Action, ActionExample, ActionResult, Content, HandlerCallback, HandlerOptions, Message, State};
pub use character::Character;
pub use error::AgentError;
pub use http::{RequestClient, RequestError, RequestOptions};
pub use plugin::Plugin;
pub use providers::*;
pub use runtime::{AgentRuntime, Runtime};
pub use settings::Settings;

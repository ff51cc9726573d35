use thiserror::Error;

#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Missing setting: {0}")]
    MissingSetting(&'static str),

    #[error("Unknown character: {0}")]
    UnknownCharacter(String),
}

pub mod custom_openai;

pub use self::custom_openai::{
    Client as CustomOpenAiClient,
    CustomOpenAiPlugin,
    ModelSettings,
    ModelSize,
    ProviderError,
    TextParams,
};

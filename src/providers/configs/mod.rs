pub mod openai;

pub use openai::OpenAiProviderConfig;

use async_trait::async_trait;
use llm::builder::{LLMBackend, LLMBuilder};
use llm::chat::ChatMessage;

use crate::{CompletionProvider, OracleError};

#[derive(Debug, Clone, PartialEq)]
pub struct LlmSettings {
    pub provider: String,
    pub model: String,
    pub api_key: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

fn map_backend(provider: &str) -> Result<LLMBackend, OracleError> {
    match provider {
        "openai" => Ok(LLMBackend::OpenAI),
        "anthropic" => Ok(LLMBackend::Anthropic),
        "google" => Ok(LLMBackend::Google),
        "ollama" => Ok(LLMBackend::Ollama),
        "groq" => Ok(LLMBackend::Groq),
        "mistral" => Ok(LLMBackend::Mistral),
        "deepseek" => Ok(LLMBackend::DeepSeek),
        other => Err(OracleError::UnknownProvider(other.to_string())),
    }
}

/// Completion provider backed by the `llm` crate's chat backends.
pub struct LlmCompletion {
    settings: LlmSettings,
}

impl LlmCompletion {
    /// Fails early on a provider name no backend exists for.
    pub fn new(settings: LlmSettings) -> Result<Self, OracleError> {
        map_backend(&settings.provider)?;
        Ok(Self { settings })
    }

    pub fn settings(&self) -> &LlmSettings {
        &self.settings
    }
}

#[async_trait]
impl CompletionProvider for LlmCompletion {
    async fn complete(&self, system: &str, user_msg: &str) -> Result<String, OracleError> {
        let settings = &self.settings;
        let backend = map_backend(&settings.provider)?;

        let mut builder = LLMBuilder::new()
            .backend(backend)
            .model(&settings.model)
            .temperature(settings.temperature)
            .max_tokens(settings.max_tokens)
            .system(system);

        if !settings.api_key.is_empty() {
            builder = builder.api_key(&settings.api_key);
        }

        let llm = builder.build().map_err(|e| OracleError::Build(e.to_string()))?;

        let messages = vec![ChatMessage::user().content(user_msg).build()];

        log::debug!("Sending prompt to {} ({})", settings.provider, settings.model);
        let response = llm
            .chat(&messages)
            .await
            .map_err(|e| OracleError::Chat(e.to_string()))?;

        match response.text() {
            Some(text) if !text.trim().is_empty() => Ok(text),
            _ => Err(OracleError::EmptyReply),
        }
    }
}

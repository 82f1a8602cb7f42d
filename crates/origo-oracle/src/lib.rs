pub mod engine;
mod parse;
mod prompt;

pub use engine::{LlmCompletion, LlmSettings};
pub use parse::split_suggestions;
pub use prompt::{build_prompt, ChatRequestContext, Depth, Mode, SYSTEM_PROMPT};

use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OracleError {
    #[error("unknown provider: {0}")]
    UnknownProvider(String),
    #[error("build LLM: {0}")]
    Build(String),
    #[error("chat: {0}")]
    Chat(String),
    #[error("LLM returned no text")]
    EmptyReply,
}

/// A text-completion backend: one system prompt, one user turn, one reply.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, system: &str, user_msg: &str) -> Result<String, OracleError>;
}

/// A model reply with its follow-up suggestions separated out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub reply: String,
    pub suggestions: Vec<String>,
}

/// Build the prompt for `ctx`, ask the provider, split off suggestions.
pub async fn ask(provider: &dyn CompletionProvider, ctx: &ChatRequestContext) -> Result<Answer, OracleError> {
    let user_msg = build_prompt(ctx);
    let raw = provider.complete(SYSTEM_PROMPT, &user_msg).await?;
    let (_, suggestions) = split_suggestions(&raw);
    log::info!("Oracle replied with {} chars, {} suggestions", raw.len(), suggestions.len());
    Ok(Answer { reply: raw, suggestions })
}

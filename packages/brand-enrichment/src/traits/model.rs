//! Language model trait.

use async_trait::async_trait;
use openai_client::{ChatRequest, OpenAIClient};

use crate::error::InferenceError;

/// Chat-style language model: a request in, the answer text out.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Send one completion request. Blank answers are an error.
    async fn complete(&self, request: ChatRequest) -> Result<String, InferenceError>;
}

#[async_trait]
impl LanguageModel for OpenAIClient {
    async fn complete(&self, request: ChatRequest) -> Result<String, InferenceError> {
        let response = self.chat_completion(request).await?;
        if response.content.trim().is_empty() {
            return Err(InferenceError::EmptyAnswer);
        }
        Ok(response.content)
    }
}

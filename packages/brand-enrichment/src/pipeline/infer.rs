//! Inference client: evidence in, free-text brand answer out.

use openai_client::{ChatRequest, Message};
use std::sync::Arc;
use tracing::debug;

use super::prompts;
use crate::config::PipelineConfig;
use crate::error::InferenceError;
use crate::retry::RetryPolicy;
use crate::traits::model::LanguageModel;
use crate::types::evidence::truncate_chars;

/// Sends a fixed-shape instruction to the language model with bounded retry.
///
/// Unlike the retriever, failure here is an error: the caller marks the
/// row failed.
pub struct InferenceClient {
    model: Arc<dyn LanguageModel>,
    retry: RetryPolicy,
    model_name: String,
    temperature: f32,
    char_budget: usize,
}

impl InferenceClient {
    pub fn new(model: Arc<dyn LanguageModel>, config: &PipelineConfig) -> Self {
        Self {
            model,
            retry: config.retry,
            model_name: config.model.clone(),
            temperature: config.temperature,
            char_budget: config.evidence_char_budget,
        }
    }

    /// Build the chat request for one product.
    pub fn request(&self, evidence_summary: &str, product_name: &str) -> ChatRequest {
        let evidence = truncate_chars(evidence_summary, self.char_budget);
        ChatRequest::new(&self.model_name)
            .message(Message::system(prompts::system_policy()))
            .message(Message::user(prompts::user_prompt(product_name, evidence)))
            .temperature(self.temperature)
    }

    pub async fn infer(
        &self,
        evidence_summary: &str,
        product_name: &str,
    ) -> Result<String, InferenceError> {
        let request = self.request(evidence_summary, product_name);

        self.retry
            .run("inference", move |attempt| {
                debug!(model = %self.model_name, product = product_name, attempt, "requesting inference");
                self.model.complete(request.clone())
            })
            .await
    }
}

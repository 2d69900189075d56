use std::sync::Arc;
use std::time::Duration;

use prepcoach_provider::{LlmProvider, LlmRequest};

use crate::config::ProviderSettings;

/// Message returned when no credential has been supplied.
pub const NOT_CONFIGURED_MESSAGE: &str = "Please configure an API key for the completion service.";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompletionError {
    #[error("{}", NOT_CONFIGURED_MESSAGE)]
    NotConfigured,
    #[error("Error getting AI response: {0}")]
    Remote(String),
}

/// Wraps a single text-completion call behind the coach prompt template.
///
/// The client holds the credential-bearing provider for the life of the
/// process. It never panics on service failure: every failure comes back as
/// a [`CompletionError`], and [`CompletionClient::complete_or_message`]
/// flattens that into a printable string.
pub struct CompletionClient {
    provider: Option<Arc<dyn LlmProvider>>,
    model: String,
    max_tokens: u32,
    timeout: Option<Duration>,
}

impl CompletionClient {
    pub fn new(model: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            provider: None,
            model: model.into(),
            max_tokens,
            timeout: None,
        }
    }

    pub fn from_settings(settings: &ProviderSettings) -> Self {
        let mut client = Self::new(settings.model.clone(), settings.max_tokens);
        client.timeout = settings.request_timeout_secs.map(Duration::from_secs);
        client
    }

    pub fn with_provider(mut self, provider: Arc<dyn LlmProvider>) -> Self {
        self.configure(provider);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn configure(&mut self, provider: Arc<dyn LlmProvider>) {
        self.provider = Some(provider);
    }

    pub fn is_configured(&self) -> bool {
        self.provider.is_some()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn build_prompt(prompt: &str, context: &str) -> String {
        format!(
            "You are an expert Amazon SDE II interview coach. You provide detailed, constructive feedback and guidance.\n\
             \n\
             Context: {context}\n\
             \n\
             User: {prompt}\n\
             \n\
             Provide a comprehensive response that includes:\n\
             1. Direct answer to the question/request\n\
             2. Specific feedback and suggestions\n\
             3. Areas for improvement\n\
             4. Follow-up questions if appropriate\n"
        )
    }

    pub async fn complete(&self, prompt: &str, context: &str) -> Result<String, CompletionError> {
        let Some(provider) = &self.provider else {
            return Err(CompletionError::NotConfigured);
        };

        let full_prompt = Self::build_prompt(prompt, context);
        tracing::debug!(prompt_len = full_prompt.len(), model = %self.model, "requesting completion");
        let request =
            LlmRequest::simple(self.model.clone(), None, full_prompt).with_max_tokens(self.max_tokens);

        let call = provider.chat(request);
        let outcome = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, call).await {
                Ok(result) => result,
                Err(_) => {
                    return Err(CompletionError::Remote(format!(
                        "request timed out after {}s",
                        limit.as_secs()
                    )))
                }
            },
            None => call.await,
        };

        outcome
            .map(|resp| resp.text)
            .map_err(|e| CompletionError::Remote(e.to_string()))
    }

    /// Same as [`complete`](Self::complete), with failures rendered as text.
    pub async fn complete_or_message(&self, prompt: &str, context: &str) -> String {
        match self.complete(prompt, context).await {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!("completion degraded: {err}");
                err.to_string()
            }
        }
    }
}

pub mod anthropic;
pub mod types;

use std::sync::Arc;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use anthropic::{AnthropicProvider, ProviderErrorKind};
pub use types::*;

pub const DEFAULT_ANTHROPIC_BASE: &str = "https://api.anthropic.com";

#[async_trait]
pub trait LlmProvider: Send + Sync {
    async fn chat(&self, request: LlmRequest) -> Result<LlmResponse>;
}

// ============================================================
// Provider Configuration
// ============================================================

/// Provider type identifier.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    #[default]
    Anthropic,
    /// Offline echo provider, no network access.
    Stub,
}

/// How the caller authenticates against the completion service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credential {
    /// Sent as `x-api-key`.
    ApiKey(String),
    /// Sent as `authorization: Bearer ...`.
    SessionToken(String),
}

impl Credential {
    /// Session tokens are recognised by their prefix, everything else is an API key.
    pub fn from_secret(secret: impl Into<String>) -> Self {
        let secret = secret.into();
        if secret.starts_with("sk-ant-oat") {
            Self::SessionToken(secret)
        } else {
            Self::ApiKey(secret)
        }
    }

    pub fn secret(&self) -> &str {
        match self {
            Self::ApiKey(s) | Self::SessionToken(s) => s.as_str(),
        }
    }
}

/// Create a provider for the given type. Anthropic requires a non-empty credential.
pub fn create_provider(
    provider_type: ProviderType,
    credential: Option<Credential>,
    base_url: Option<&str>,
) -> Result<Arc<dyn LlmProvider>> {
    let provider: Arc<dyn LlmProvider> = match provider_type {
        ProviderType::Anthropic => {
            let credential = credential
                .filter(|c| !c.secret().trim().is_empty())
                .ok_or_else(|| anyhow!("anthropic requires api_key"))?;
            let base_url = base_url.unwrap_or(DEFAULT_ANTHROPIC_BASE);
            Arc::new(AnthropicProvider::with_credential(credential, base_url))
        }
        ProviderType::Stub => Arc::new(StubProvider),
    };
    tracing::info!("Created provider: {provider_type:?}");
    Ok(provider)
}

pub struct StubProvider;

#[async_trait]
impl LlmProvider for StubProvider {
    async fn chat(&self, request: LlmRequest) -> Result<LlmResponse> {
        let full_text = format!("[stub:{}] {} [finish]", request.model, request.last_text());
        Ok(LlmResponse::text(full_text))
    }
}

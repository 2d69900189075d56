pub mod answer;
pub mod coach;
pub mod completion;
pub mod config;
pub mod evaluator;
pub mod ledger;
pub mod score;
pub mod session;

#[cfg(test)]
pub(crate) mod testing;

pub use answer::*;
pub use coach::*;
pub use completion::*;
pub use config::*;
pub use evaluator::*;
pub use ledger::*;
pub use score::*;
pub use session::*;

use anyhow::Result;
use prepcoach_provider::{create_provider, Credential, ProviderType};

/// Build a completion client from config, installing a provider when a
/// credential is available (or none is needed).
///
/// An Anthropic config without a key yields an unconfigured client; callers
/// may ask the user for a key and call [`configure_with_key`] later.
pub fn completion_client_from_config(config: &PrepConfig) -> Result<CompletionClient> {
    let mut client = CompletionClient::from_settings(&config.provider);
    match (config.provider.provider_type, config.api_key()) {
        (ProviderType::Stub, _) => {
            client.configure(create_provider(ProviderType::Stub, None, None)?);
        }
        (ProviderType::Anthropic, Some(key)) => {
            configure_with_key(&mut client, config, key)?;
        }
        (ProviderType::Anthropic, None) => {
            tracing::info!("no api key configured, completion client left unconfigured");
        }
    }
    Ok(client)
}

pub fn configure_with_key(
    client: &mut CompletionClient,
    config: &PrepConfig,
    key: &str,
) -> Result<()> {
    let provider = create_provider(
        config.provider.provider_type,
        Some(Credential::from_secret(key.trim())),
        Some(&config.provider.api_base),
    )?;
    client.configure(provider);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anthropic_without_key_is_unconfigured() {
        let config = PrepConfig::default();
        let client = completion_client_from_config(&config).unwrap();
        assert!(!client.is_configured());
    }

    #[test]
    fn anthropic_with_key_is_configured() {
        let mut config = PrepConfig::default();
        config.provider.api_key = Some("sk-ant-test".into());
        let client = completion_client_from_config(&config).unwrap();
        assert!(client.is_configured());
    }

    #[test]
    fn stub_needs_no_key() {
        let mut config = PrepConfig::default();
        config.provider.provider_type = ProviderType::Stub;
        let client = completion_client_from_config(&config).unwrap();
        assert!(client.is_configured());
    }

    #[test]
    fn configure_with_blank_key_fails() {
        let config = PrepConfig::default();
        let mut client = CompletionClient::from_settings(&config.provider);
        assert!(configure_with_key(&mut client, &config, "  ").is_err());
        assert!(!client.is_configured());
    }
}

use std::{fs, path::Path};

use anyhow::{anyhow, Context, Result};
use prepcoach_provider::{ProviderType, DEFAULT_ANTHROPIC_BASE};
use serde::{Deserialize, Serialize};

use crate::session::RotationPolicy;

pub const MAIN_CONFIG_FILE: &str = "main.yaml";

fn default_api_base() -> String {
    DEFAULT_ANTHROPIC_BASE.to_string()
}

fn default_model() -> String {
    "claude-3-sonnet-20240229".to_string()
}

fn default_max_tokens() -> u32 {
    1500
}

fn default_days_until_interview() -> u32 {
    3
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderSettings {
    #[serde(default, rename = "type")]
    pub provider_type: ProviderType,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Empty after env expansion means "ask at startup".
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            provider_type: ProviderType::default(),
            api_base: default_api_base(),
            api_key: None,
            model: default_model(),
            max_tokens: default_max_tokens(),
            request_timeout_secs: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PracticeSettings {
    #[serde(default)]
    pub rotation: RotationPolicy,
    #[serde(default = "default_days_until_interview")]
    pub days_until_interview: u32,
}

impl Default for PracticeSettings {
    fn default() -> Self {
        Self {
            rotation: RotationPolicy::default(),
            days_until_interview: default_days_until_interview(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PrepConfig {
    #[serde(default)]
    pub provider: ProviderSettings,
    #[serde(default)]
    pub practice: PracticeSettings,
}

impl PrepConfig {
    /// Configured key, `None` when absent or blank.
    pub fn api_key(&self) -> Option<&str> {
        self.provider
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }
}

pub fn resolve_env_var(raw: &str) -> String {
    let mut output = String::new();
    let mut rest = raw;

    while let Some(start) = rest.find("${") {
        output.push_str(&rest[..start]);

        let candidate = &rest[start + 2..];
        let Some(end) = candidate.find('}') else {
            output.push_str(&rest[start..]);
            return output;
        };

        let key = &candidate[..end];
        output.push_str(&std::env::var(key).unwrap_or_default());
        rest = &candidate[end + 1..];
    }

    output.push_str(rest);
    output
}

/// Load `<root>/main.yaml`. A missing file yields the defaults.
pub fn load_config(root: &Path) -> Result<PrepConfig> {
    let path = root.join(MAIN_CONFIG_FILE);
    let mut config = if path.exists() {
        read_yaml_file::<PrepConfig>(&path)?
    } else {
        tracing::info!("No config at {}, using defaults", path.display());
        PrepConfig::default()
    };

    resolve_provider_env(&mut config.provider);
    validate_config(&config)?;
    Ok(config)
}

pub fn validate_config(config: &PrepConfig) -> Result<()> {
    if config.provider.model.trim().is_empty() {
        return Err(anyhow!("provider.model must not be empty"));
    }
    if config.provider.api_base.trim().is_empty() {
        return Err(anyhow!("provider.api_base must not be empty"));
    }
    if config.provider.max_tokens == 0 {
        return Err(anyhow!("provider.max_tokens must be greater than zero"));
    }
    if config.provider.request_timeout_secs == Some(0) {
        return Err(anyhow!("provider.request_timeout_secs must be greater than zero"));
    }
    Ok(())
}

fn read_yaml_file<T>(path: &Path) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    serde_yaml::from_str(&content)
        .with_context(|| format!("failed to parse yaml file: {}", path.display()))
}

fn resolve_provider_env(provider: &mut ProviderSettings) {
    provider.api_base = resolve_env_var(&provider.api_base);
    provider.model = resolve_env_var(&provider.model);
    if let Some(key) = &mut provider.api_key {
        *key = resolve_env_var(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_main(dir: &Path, yaml: &str) {
        fs::write(dir.join(MAIN_CONFIG_FILE), yaml).unwrap();
    }

    #[test]
    fn resolve_env_var_replaces_known_vars() {
        std::env::set_var("PREPCOACH_TEST_KEY", "sk-ant-123");
        assert_eq!(
            resolve_env_var("key=${PREPCOACH_TEST_KEY}!"),
            "key=sk-ant-123!"
        );
    }

    #[test]
    fn resolve_env_var_missing_var_is_empty() {
        assert_eq!(resolve_env_var("${PREPCOACH_SURELY_UNSET_VAR}"), "");
    }

    #[test]
    fn resolve_env_var_unterminated_is_kept() {
        assert_eq!(resolve_env_var("abc ${OOPS"), "abc ${OOPS");
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(dir.path()).unwrap();
        assert_eq!(config.provider.model, "claude-3-sonnet-20240229");
        assert_eq!(config.provider.max_tokens, 1500);
        assert_eq!(config.provider.provider_type, ProviderType::Anthropic);
        assert_eq!(config.practice.rotation, RotationPolicy::HistoryLength);
        assert_eq!(config.practice.days_until_interview, 3);
        assert!(config.api_key().is_none());
    }

    #[test]
    fn loads_full_config_with_env_expansion() {
        std::env::set_var("PREPCOACH_CFG_TEST_KEY", "sk-ant-from-env");
        let dir = tempfile::tempdir().unwrap();
        write_main(
            dir.path(),
            r#"
provider:
  api_base: http://localhost:9999
  api_key: ${PREPCOACH_CFG_TEST_KEY}
  model: claude-3-5-haiku-latest
  max_tokens: 800
  request_timeout_secs: 30
practice:
  rotation: per_category
  days_until_interview: 7
"#,
        );

        let config = load_config(dir.path()).unwrap();
        assert_eq!(config.provider.api_base, "http://localhost:9999");
        assert_eq!(config.api_key(), Some("sk-ant-from-env"));
        assert_eq!(config.provider.model, "claude-3-5-haiku-latest");
        assert_eq!(config.provider.max_tokens, 800);
        assert_eq!(config.provider.request_timeout_secs, Some(30));
        assert_eq!(config.practice.rotation, RotationPolicy::PerCategory);
        assert_eq!(config.practice.days_until_interview, 7);
    }

    #[test]
    fn blank_api_key_counts_as_unset() {
        let dir = tempfile::tempdir().unwrap();
        write_main(
            dir.path(),
            "provider:\n  api_key: ${PREPCOACH_SURELY_UNSET_VAR}\n",
        );
        let config = load_config(dir.path()).unwrap();
        assert!(config.api_key().is_none());
    }

    #[test]
    fn stub_provider_type_parses() {
        let dir = tempfile::tempdir().unwrap();
        write_main(dir.path(), "provider:\n  type: stub\n");
        let config = load_config(dir.path()).unwrap();
        assert_eq!(config.provider.provider_type, ProviderType::Stub);
    }

    #[test]
    fn zero_max_tokens_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        write_main(dir.path(), "provider:\n  max_tokens: 0\n");
        let err = load_config(dir.path()).unwrap_err();
        assert!(err.to_string().contains("max_tokens"));
    }

    #[test]
    fn invalid_yaml_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        write_main(dir.path(), "provider: [unclosed");
        let err = load_config(dir.path()).unwrap_err();
        assert!(err.to_string().contains("failed to parse yaml file"));
    }
}

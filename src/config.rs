//! Runtime configuration.
//!
//! Everything comes from the environment with builder-style overrides on top,
//! so the binary and tests share one code path. The provider API key is looked
//! up in the OS keyring first, then in `ANAM_API_KEY`.

use crate::persona::Persona;
use crate::prompt::PromptSource;
use crate::{Error, ErrorContext, Result};
use keyring::Entry;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://api.anam.ai/v1/auth/session-token";
pub const DEFAULT_RECIPES_PATH: &str = "data/recipes.json";
pub const DEFAULT_BIND: &str = "127.0.0.1:3000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const KEYRING_SERVICE: &str = "avatar-chef";
const KEYRING_USER: &str = "anam";

#[derive(Clone)]
pub struct AppConfig {
    pub api_key: Option<String>,
    pub endpoint: String,
    pub timeout: Duration,
    pub recipes_path: PathBuf,
    pub bind: String,
    pub default_recipe: Option<String>,
    pub prompt_source: PromptSource,
    pub persona: Persona,
}

// Keeps the secret out of logs.
impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("endpoint", &self.endpoint)
            .field("timeout", &self.timeout)
            .field("recipes_path", &self.recipes_path)
            .field("bind", &self.bind)
            .field("default_recipe", &self.default_recipe)
            .field("prompt_source", &self.prompt_source)
            .field("persona", &self.persona)
            .finish()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            recipes_path: PathBuf::from(DEFAULT_RECIPES_PATH),
            bind: DEFAULT_BIND.to_string(),
            default_recipe: None,
            prompt_source: PromptSource::default(),
            persona: Persona::default(),
        }
    }
}

impl AppConfig {
    /// Read configuration from the process environment and keyring.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::from_lookup(|key| std::env::var(key).ok())?;
        if let Some(key) = keyring_api_key() {
            config.api_key = Some(key);
        }
        Ok(config)
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        config.api_key = var("ANAM_API_KEY");
        if let Some(endpoint) = var("AVATAR_CHEF_ENDPOINT") {
            config.endpoint = endpoint;
        }
        if let Some(raw) = var("AVATAR_CHEF_TIMEOUT_SECS") {
            let secs = raw.parse::<u64>().map_err(|_| {
                Error::configuration_with_context(
                    "timeout must be a whole number of seconds",
                    ErrorContext::new()
                        .with_field_path("AVATAR_CHEF_TIMEOUT_SECS")
                        .with_details(raw.clone()),
                )
            })?;
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(path) = var("AVATAR_CHEF_RECIPES") {
            config.recipes_path = PathBuf::from(path);
        }
        if let Some(bind) = var("AVATAR_CHEF_BIND") {
            config.bind = bind;
        }
        config.default_recipe = var("AVATAR_CHEF_DEFAULT_RECIPE");
        if let Some(source) = var("AVATAR_CHEF_PROMPT_SOURCE") {
            config.prompt_source = source.parse()?;
        }

        if let Some(name) = var("AVATAR_CHEF_PERSONA_NAME") {
            config.persona = config.persona.with_name(name);
        }
        if let Some(id) = var("ANAM_AVATAR_ID") {
            config.persona = config.persona.with_avatar_id(id);
        }
        if let Some(id) = var("ANAM_VOICE_ID") {
            config.persona = config.persona.with_voice_id(id);
        }
        if let Some(id) = var("ANAM_LLM_ID") {
            config.persona = config.persona.with_llm_id(id);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_recipes_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.recipes_path = path.into();
        self
    }

    pub fn with_bind(mut self, bind: impl Into<String>) -> Self {
        self.bind = bind.into();
        self
    }

    pub fn with_default_recipe(mut self, id: impl Into<String>) -> Self {
        self.default_recipe = Some(id.into());
        self
    }

    pub fn with_prompt_source(mut self, source: PromptSource) -> Self {
        self.prompt_source = source;
        self
    }

    /// Check the endpoint is an absolute http(s) URL.
    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.endpoint).map_err(|e| {
            Error::configuration_with_context(
                format!("invalid provider endpoint: {}", e),
                ErrorContext::new()
                    .with_field_path("AVATAR_CHEF_ENDPOINT")
                    .with_details(self.endpoint.clone()),
            )
        })?;
        if url.scheme() != "https" && url.scheme() != "http" {
            return Err(Error::configuration_with_context(
                "provider endpoint must use http or https",
                ErrorContext::new()
                    .with_field_path("AVATAR_CHEF_ENDPOINT")
                    .with_details(self.endpoint.clone()),
            ));
        }
        Ok(())
    }

    /// The API key, or a configuration error naming where to put it.
    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            Error::configuration_with_context(
                "API key required",
                ErrorContext::new()
                    .with_field_path("ANAM_API_KEY")
                    .with_details(format!(
                        "set ANAM_API_KEY or store it in the keyring ({}/{})",
                        KEYRING_SERVICE, KEYRING_USER
                    )),
            )
        })
    }
}

fn keyring_api_key() -> Option<String> {
    let entry = Entry::new(KEYRING_SERVICE, KEYRING_USER).ok()?;
    entry.get_password().ok().filter(|k| !k.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.recipes_path, PathBuf::from(DEFAULT_RECIPES_PATH));
        assert_eq!(config.prompt_source, PromptSource::Recipe);
        assert!(config.api_key.is_none());
        assert!(config.require_api_key().is_err());
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            ("ANAM_API_KEY", "sk-test"),
            ("AVATAR_CHEF_ENDPOINT", "http://localhost:9999/token"),
            ("AVATAR_CHEF_TIMEOUT_SECS", "5"),
            ("AVATAR_CHEF_PROMPT_SOURCE", "static"),
            ("AVATAR_CHEF_PERSONA_NAME", "Marta"),
            ("AVATAR_CHEF_DEFAULT_RECIPE", "carbonara"),
        ]))
        .unwrap();
        assert_eq!(config.require_api_key().unwrap(), "sk-test");
        assert_eq!(config.endpoint, "http://localhost:9999/token");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.prompt_source, PromptSource::Static);
        assert_eq!(config.persona.name, "Marta");
        assert_eq!(config.default_recipe.as_deref(), Some("carbonara"));
    }

    #[test]
    fn test_blank_values_are_ignored() {
        let config = AppConfig::from_lookup(lookup(&[("ANAM_API_KEY", "  ")])).unwrap();
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_bad_timeout() {
        let err = AppConfig::from_lookup(lookup(&[("AVATAR_CHEF_TIMEOUT_SECS", "soon")]))
            .unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
    }

    #[test]
    fn test_bad_endpoint() {
        assert!(AppConfig::from_lookup(lookup(&[("AVATAR_CHEF_ENDPOINT", "not a url")])).is_err());
        assert!(AppConfig::from_lookup(lookup(&[("AVATAR_CHEF_ENDPOINT", "ftp://x/y")])).is_err());
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = AppConfig::default().with_api_key("sk-secret");
        let shown = format!("{:?}", config);
        assert!(!shown.contains("sk-secret"));
        assert!(shown.contains("<redacted>"));
    }
}

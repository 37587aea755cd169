// crates/craft-core/src/config.rs - Option Resolution
//
// This module turns the scattered sources of connection settings into one
// immutable ResolvedConfig per invocation.
//
// CONFIGURATION HIERARCHY (highest to lowest priority):
// 1. Command-line arguments (--url, --token)
// 2. Environment variables (CRAFT_API_URL, CRAFT_API_TOKEN)
// 3. Built-in defaults
//
// Resolution is a pure function of its layers. Reading the process
// environment happens in exactly one place (ConfigLayer::from_env) so the
// merge itself can be tested without touching global state.

use std::env;

use crate::error::{CraftError, CraftResult};

/// Environment variable holding the default API base URL
pub const URL_ENV: &str = "CRAFT_API_URL";

/// Environment variable holding the default bearer token
pub const TOKEN_ENV: &str = "CRAFT_API_TOKEN";

/// Hard timeout applied to every request, in milliseconds
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// One source of connection settings
///
/// Every field is optional: a layer only contributes what it knows.
/// Empty strings are treated the same as absent values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigLayer {
    pub url: Option<String>,
    pub token: Option<String>,
}

impl ConfigLayer {
    /// Build a layer from explicit values (typically the global CLI flags)
    pub fn new(url: Option<String>, token: Option<String>) -> Self {
        Self { url, token }
    }

    /// Read the layer from CRAFT_API_URL / CRAFT_API_TOKEN
    pub fn from_env() -> Self {
        Self {
            url: env::var(URL_ENV).ok(),
            token: env::var(TOKEN_ENV).ok(),
        }
    }

    fn url(&self) -> Option<&str> {
        self.url.as_deref().filter(|value| !value.is_empty())
    }

    fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|value| !value.is_empty())
    }
}

/// Fully resolved connection settings for a single invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Base URL without a trailing slash
    pub base_url: String,

    /// Bearer token; `None` means requests are sent unauthenticated
    pub token: Option<String>,

    /// Hard request timeout in milliseconds (always > 0)
    pub timeout_ms: u64,
}

/// Configuration loading and merging
pub struct ConfigManager;

impl ConfigManager {
    /// Merge the layers in priority order: flags over env over defaults
    ///
    /// Fails when no layer provides a base URL. The token is optional.
    pub fn resolve(
        defaults: &ConfigLayer,
        env: &ConfigLayer,
        flags: &ConfigLayer,
    ) -> CraftResult<ResolvedConfig> {
        let layers = [flags, env, defaults];

        let base_url = layers
            .iter()
            .find_map(|layer| layer.url())
            .ok_or_else(|| {
                CraftError::Configuration(format!(
                    "Missing API base URL. Provide --url or set {URL_ENV} \
                     (e.g. https://connect.craft.do/links/<share-id>/api/v1)."
                ))
            })?;

        let token = layers.iter().find_map(|layer| layer.token());

        Ok(ResolvedConfig {
            base_url: normalize_base_url(base_url),
            token: token.map(str::to_string),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        })
    }

    /// Resolve explicit flags against the process environment
    pub fn resolve_with_env(flags: &ConfigLayer) -> CraftResult<ResolvedConfig> {
        Self::resolve(&ConfigLayer::default(), &ConfigLayer::from_env(), flags)
    }
}

/// Strip exactly one trailing slash, nothing else
pub fn normalize_base_url(url: &str) -> String {
    url.strip_suffix('/').unwrap_or(url).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layer(url: Option<&str>, token: Option<&str>) -> ConfigLayer {
        ConfigLayer::new(url.map(String::from), token.map(String::from))
    }

    #[test]
    fn test_env_values_used_by_default() {
        let env = layer(Some("https://env.example/api/v1"), Some("env-token"));
        let resolved =
            ConfigManager::resolve(&ConfigLayer::default(), &env, &ConfigLayer::default())
                .unwrap();

        assert_eq!(resolved.base_url, "https://env.example/api/v1");
        assert_eq!(resolved.token.as_deref(), Some("env-token"));
        assert_eq!(resolved.timeout_ms, DEFAULT_TIMEOUT_MS);
    }

    #[test]
    fn test_flags_override_env() {
        let env = layer(Some("https://env.example/api/v1"), Some("env-token"));
        let flags = layer(Some("https://opt.example/api/v1/"), Some("opt-token"));
        let resolved = ConfigManager::resolve(&ConfigLayer::default(), &env, &flags).unwrap();

        assert_eq!(resolved.base_url, "https://opt.example/api/v1");
        assert_eq!(resolved.token.as_deref(), Some("opt-token"));
    }

    #[test]
    fn test_missing_url_fails() {
        let err = ConfigManager::resolve(
            &ConfigLayer::default(),
            &layer(None, Some("token")),
            &ConfigLayer::default(),
        )
        .unwrap_err();

        assert!(matches!(err, CraftError::Configuration(_)));
        assert!(err.to_string().contains("Missing API base URL"));
    }

    #[test]
    fn test_empty_values_count_as_absent() {
        let env = layer(Some("https://env.example"), Some(""));
        let flags = layer(Some(""), None);
        let resolved = ConfigManager::resolve(&ConfigLayer::default(), &env, &flags).unwrap();

        assert_eq!(resolved.base_url, "https://env.example");
        assert_eq!(resolved.token, None);
    }

    #[test]
    fn test_token_from_env_with_url_from_flag() {
        let env = layer(None, Some("env-token"));
        let flags = layer(Some("https://x/api"), None);
        let resolved = ConfigManager::resolve(&ConfigLayer::default(), &env, &flags).unwrap();

        assert_eq!(resolved.base_url, "https://x/api");
        assert_eq!(resolved.token.as_deref(), Some("env-token"));
    }

    #[test]
    fn test_normalize_strips_exactly_one_slash() {
        assert_eq!(normalize_base_url("https://x/api/v1/"), "https://x/api/v1");
        assert_eq!(normalize_base_url("https://x/api/v1"), "https://x/api/v1");
        assert_eq!(normalize_base_url("https://x/api/v1//"), "https://x/api/v1/");
    }
}

//! Runtime configuration, resolved from the environment.

/// Process-wide configuration. Built once at startup; the credential is the
/// only required piece and its absence is a fatal startup condition handled
/// by the agent entry point.
#[derive(Debug, Clone)]
pub struct Config {
    /// Provider key for the factory (currently only `openai`).
    pub provider: String,
    /// Model identifier passed to the provider.
    pub model: String,
    /// Sampling temperature for agent turns.
    pub temperature: f64,
    /// Service credential; `None` when the environment has no key.
    pub api_key: Option<String>,
    /// Optional custom API base URL (proxies, compatible endpoints).
    pub api_url: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            model: "gpt-4o-mini".to_string(),
            temperature: 0.7,
            api_key: None,
            api_url: None,
        }
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults for everything except the credential.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            provider: non_empty_env("DESKMATE_PROVIDER").unwrap_or(defaults.provider),
            model: non_empty_env("DESKMATE_MODEL").unwrap_or(defaults.model),
            temperature: defaults.temperature,
            api_key: non_empty_env("OPENAI_API_KEY").or_else(|| non_empty_env("DESKMATE_API_KEY")),
            api_url: non_empty_env("DESKMATE_API_URL"),
        }
    }
}

//! Configuration for an [`crate::Assistant`] session.
//!
//! Every knob lives in [`AssistantConfig`], built via its
//! [`AssistantConfigBuilder`]. The defaults reproduce the documented
//! behaviour: 4000-character extraction budgets, a 2000-character web excerpt
//! in the prompt, `User-Agent: Mozilla/5.0`, and the
//! `openai/gpt-3.5-turbo-0613` model served through OpenRouter.

use crate::error::AskDocError;
use edgequake_llm::LLMProvider;
use std::fmt;
use std::sync::Arc;

/// Default chat-completion model identifier.
pub const DEFAULT_MODEL: &str = "openai/gpt-3.5-turbo-0613";

/// Default provider name passed to `edgequake_llm::ProviderFactory`.
pub const DEFAULT_PROVIDER: &str = "openrouter";

/// Default `User-Agent` header for web fetches.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";

/// Character budget for extracted PDF text.
pub const DEFAULT_PDF_CHAR_LIMIT: usize = 4000;

/// Character budget for the joined paragraph text of a web page.
pub const DEFAULT_WEB_CHAR_LIMIT: usize = 4000;

/// Characters of web content embedded in the prompt.
///
/// Applied on top of [`DEFAULT_WEB_CHAR_LIMIT`], so the effective web budget
/// in the final prompt is the smaller of the two.
pub const DEFAULT_PROMPT_CONTENT_LIMIT: usize = 2000;

/// Configuration for extraction and question answering.
///
/// # Example
/// ```rust
/// use edgequake_askdoc::AssistantConfig;
///
/// let config = AssistantConfig::builder()
///     .model("openai/gpt-4o-mini")
///     .fetch_timeout_secs(30)
///     .build()
///     .unwrap();
/// assert_eq!(config.pdf_char_limit, 4000);
/// ```
#[derive(Clone)]
pub struct AssistantConfig {
    /// Chat-completion model identifier. Default: [`DEFAULT_MODEL`].
    pub model: String,

    /// LLM provider name (e.g. "openrouter", "openai", "ollama").
    /// If None, the provider is resolved from the environment.
    pub provider_name: Option<String>,

    /// Pre-constructed LLM provider. Takes precedence over `provider_name`.
    pub provider: Option<Arc<dyn LLMProvider>>,

    /// Sampling temperature. Default: None (provider default).
    pub temperature: Option<f32>,

    /// Maximum tokens in the answer. Default: None (provider default).
    pub max_tokens: Option<usize>,

    /// Maximum characters kept from a PDF's joined page text. Default: 4000.
    pub pdf_char_limit: usize,

    /// Maximum characters kept from a web page's joined paragraphs. Default: 4000.
    pub web_char_limit: usize,

    /// Maximum characters of web content placed in the prompt. Default: 2000.
    pub prompt_content_limit: usize,

    /// `User-Agent` header sent with web fetches. Default: "Mozilla/5.0".
    pub user_agent: String,

    /// Web fetch timeout in seconds. Default: None (transport default).
    pub fetch_timeout_secs: Option<u64>,

    /// PDF user password for encrypted documents.
    pub password: Option<String>,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            provider_name: None,
            provider: None,
            temperature: None,
            max_tokens: None,
            pdf_char_limit: DEFAULT_PDF_CHAR_LIMIT,
            web_char_limit: DEFAULT_WEB_CHAR_LIMIT,
            prompt_content_limit: DEFAULT_PROMPT_CONTENT_LIMIT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            fetch_timeout_secs: None,
            password: None,
        }
    }
}

impl fmt::Debug for AssistantConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssistantConfig")
            .field("model", &self.model)
            .field("provider_name", &self.provider_name)
            .field("provider", &self.provider.as_ref().map(|_| "<dyn LLMProvider>"))
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("pdf_char_limit", &self.pdf_char_limit)
            .field("web_char_limit", &self.web_char_limit)
            .field("prompt_content_limit", &self.prompt_content_limit)
            .field("user_agent", &self.user_agent)
            .field("fetch_timeout_secs", &self.fetch_timeout_secs)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl AssistantConfig {
    /// Create a new builder for `AssistantConfig`.
    pub fn builder() -> AssistantConfigBuilder {
        AssistantConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`AssistantConfig`].
#[derive(Debug)]
pub struct AssistantConfigBuilder {
    config: AssistantConfig,
}

impl AssistantConfigBuilder {
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    pub fn provider_name(mut self, name: impl Into<String>) -> Self {
        self.config.provider_name = Some(name.into());
        self
    }

    pub fn provider(mut self, provider: Arc<dyn LLMProvider>) -> Self {
        self.config.provider = Some(provider);
        self
    }

    pub fn temperature(mut self, t: f32) -> Self {
        self.config.temperature = Some(t.clamp(0.0, 2.0));
        self
    }

    pub fn max_tokens(mut self, n: usize) -> Self {
        self.config.max_tokens = Some(n);
        self
    }

    pub fn pdf_char_limit(mut self, n: usize) -> Self {
        self.config.pdf_char_limit = n;
        self
    }

    pub fn web_char_limit(mut self, n: usize) -> Self {
        self.config.web_char_limit = n;
        self
    }

    pub fn prompt_content_limit(mut self, n: usize) -> Self {
        self.config.prompt_content_limit = n;
        self
    }

    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.config.user_agent = ua.into();
        self
    }

    pub fn fetch_timeout_secs(mut self, secs: u64) -> Self {
        self.config.fetch_timeout_secs = Some(secs);
        self
    }

    pub fn password(mut self, pwd: impl Into<String>) -> Self {
        self.config.password = Some(pwd.into());
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<AssistantConfig, AskDocError> {
        let c = &self.config;
        if c.model.trim().is_empty() {
            return Err(AskDocError::InvalidConfig("model must not be empty".into()));
        }
        for (name, value) in [
            ("pdf_char_limit", c.pdf_char_limit),
            ("web_char_limit", c.web_char_limit),
            ("prompt_content_limit", c.prompt_content_limit),
        ] {
            if value == 0 {
                return Err(AskDocError::InvalidConfig(format!("{name} must be ≥ 1")));
            }
        }
        if c.user_agent.trim().is_empty() {
            return Err(AskDocError::InvalidConfig(
                "user_agent must not be empty".into(),
            ));
        }
        if c.fetch_timeout_secs == Some(0) {
            return Err(AskDocError::InvalidConfig(
                "fetch timeout must be ≥ 1 second".into(),
            ));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_budgets() {
        let c = AssistantConfig::default();
        assert_eq!(c.model, "openai/gpt-3.5-turbo-0613");
        assert_eq!(c.pdf_char_limit, 4000);
        assert_eq!(c.web_char_limit, 4000);
        assert_eq!(c.prompt_content_limit, 2000);
        assert_eq!(c.user_agent, "Mozilla/5.0");
        assert!(c.fetch_timeout_secs.is_none());
        assert!(c.temperature.is_none());
    }

    #[test]
    fn builder_rejects_zero_limits() {
        let err = AssistantConfig::builder()
            .prompt_content_limit(0)
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("prompt_content_limit"));
    }

    #[test]
    fn builder_rejects_blank_user_agent() {
        assert!(AssistantConfig::builder().user_agent("  ").build().is_err());
    }

    #[test]
    fn builder_clamps_temperature() {
        let c = AssistantConfig::builder().temperature(9.0).build().unwrap();
        assert_eq!(c.temperature, Some(2.0));
    }

    #[test]
    fn debug_redacts_password() {
        let c = AssistantConfig::builder().password("hunter2").build().unwrap();
        let dbg = format!("{c:?}");
        assert!(!dbg.contains("hunter2"));
        assert!(dbg.contains("<redacted>"));
    }
}

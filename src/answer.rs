//! Question answering: prompt rendering plus one chat-completion call.
//!
//! The external call sits behind [`AnswerBackend`] so the service can be
//! driven by any LLM client. [`LlmBackend`] is the production implementation
//! on top of `edgequake-llm`. Exactly one call is made per question; errors are
//! returned as-is and never retried.

use crate::config::{AssistantConfig, DEFAULT_PROVIDER};
use crate::context::Context;
use crate::error::AskDocError;
use crate::prompts::{render_prompt, NO_DATA_MESSAGE};
use edgequake_llm::{ChatMessage, CompletionOptions, LLMProvider, ProviderFactory};
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// A chat-completion endpoint that turns one prompt into one answer.
pub trait AnswerBackend: Send + Sync {
    /// Send `prompt` as a single user message and return the first reply verbatim.
    fn complete(&self, prompt: &str) -> impl Future<Output = Result<String, AskDocError>> + Send;
}

/// [`AnswerBackend`] backed by an `edgequake_llm` provider.
#[derive(Clone)]
pub struct LlmBackend {
    provider: Arc<dyn LLMProvider>,
    options: CompletionOptions,
}

impl LlmBackend {
    pub fn new(provider: Arc<dyn LLMProvider>, config: &AssistantConfig) -> Self {
        Self {
            provider,
            options: build_options(config),
        }
    }

    /// Resolve the provider described by `config` and wrap it.
    pub fn from_config(config: &AssistantConfig) -> Result<Self, AskDocError> {
        let provider = resolve_provider(config)?;
        Ok(Self::new(provider, config))
    }
}

impl AnswerBackend for LlmBackend {
    async fn complete(&self, prompt: &str) -> Result<String, AskDocError> {
        let start = Instant::now();
        let messages = vec![ChatMessage::user(prompt)];

        let response = self
            .provider
            .chat(&messages, Some(&self.options))
            .await
            .map_err(|e| AskDocError::LlmApiError {
                message: e.to_string(),
            })?;

        debug!(
            "{} input tokens, {} output tokens, {:?}",
            response.prompt_tokens,
            response.completion_tokens,
            start.elapsed()
        );
        Ok(response.content)
    }
}

/// Renders prompts and dispatches them to an [`AnswerBackend`].
pub struct AnswerService<B> {
    backend: B,
    web_content_limit: usize,
}

impl<B: AnswerBackend> AnswerService<B> {
    pub fn new(backend: B, web_content_limit: usize) -> Self {
        Self {
            backend,
            web_content_limit,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Answer `question` against `context`.
    ///
    /// With no context, returns [`NO_DATA_MESSAGE`] without calling the backend.
    pub async fn answer(
        &self,
        question: &str,
        context: Option<&Context>,
    ) -> Result<String, AskDocError> {
        let Some(context) = context else {
            debug!("No context in session; skipping LLM call");
            return Ok(NO_DATA_MESSAGE.to_string());
        };

        let prompt = render_prompt(question, context, self.web_content_limit);
        info!(
            "Asking about {} context ({} prompt chars)",
            context.kind(),
            prompt.chars().count()
        );
        self.backend.complete(&prompt).await
    }
}

/// Build `CompletionOptions` from the config; unset fields stay provider defaults.
fn build_options(config: &AssistantConfig) -> CompletionOptions {
    CompletionOptions {
        temperature: config.temperature,
        max_tokens: config.max_tokens,
        ..Default::default()
    }
}

fn create_provider(provider_name: &str, model: &str) -> Result<Arc<dyn LLMProvider>, AskDocError> {
    ProviderFactory::create_llm_provider(provider_name, model).map_err(|e| {
        AskDocError::ProviderNotConfigured {
            provider: provider_name.to_string(),
            hint: format!("{e}"),
        }
    })
}

/// Resolve the LLM provider, from most-specific to least-specific.
///
/// 1. **Pre-built provider** (`config.provider`) — used as-is.
/// 2. **Named provider** (`config.provider_name`) with `config.model`.
/// 3. **Environment provider** (`EDGEQUAKE_LLM_PROVIDER`) with `config.model`.
/// 4. **OpenRouter** when `OPENROUTER_API_KEY` is set, with `config.model`.
/// 5. **Full auto-detection** (`ProviderFactory::from_env`). The detected
///    provider is rebuilt with `config.model`, so the model never silently
///    falls back to the provider's own default.
pub fn resolve_provider(config: &AssistantConfig) -> Result<Arc<dyn LLMProvider>, AskDocError> {
    if let Some(ref provider) = config.provider {
        return Ok(Arc::clone(provider));
    }

    if let Some(ref name) = config.provider_name {
        return create_provider(name, &config.model);
    }

    if let Some(name) = non_empty(std::env::var("EDGEQUAKE_LLM_PROVIDER").ok()) {
        return create_provider(&name, &config.model);
    }

    if non_empty(std::env::var("OPENROUTER_API_KEY").ok()).is_some() {
        return create_provider(DEFAULT_PROVIDER, &config.model);
    }

    let (detected, _embedding) =
        ProviderFactory::from_env().map_err(|e| AskDocError::ProviderNotConfigured {
            provider: "auto".to_string(),
            hint: format!(
                "No LLM provider could be auto-detected from environment.\n\
                Set OPENROUTER_API_KEY (or OPENAI_API_KEY, ANTHROPIC_API_KEY, …).\n\
                Error: {}",
                e
            ),
        })?;

    if detected.model() == config.model {
        return Ok(detected);
    }
    info!(
        "Auto-detected provider '{}'; using model {}",
        detected.name(),
        config.model
    );
    match create_provider(detected.name(), &config.model) {
        Ok(provider) => Ok(provider),
        Err(e) => {
            warn!(
                "Cannot rebuild '{}' with model {}: {}; keeping {}",
                detected.name(),
                config.model,
                e,
                detected.model()
            );
            Ok(detected)
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

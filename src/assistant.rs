//! The session-level entry point: load material, then ask about it.
//!
//! An [`Assistant`] owns one [`Session`]. Each `load_*` call runs one
//! extraction and, only if it succeeds, replaces the session's context.
//! [`Assistant::ask`] reads the context and never changes it, so a failed
//! answer can simply be retried.

use crate::answer::{AnswerBackend, AnswerService, LlmBackend};
use crate::config::AssistantConfig;
use crate::context::{Context, PdfContext, Session};
use crate::error::AskDocError;
use crate::extract::{pdf, web};
use reqwest::Client;
use std::io::Read;
use std::path::Path;
use tracing::info;

/// Extraction plus question answering over a single session.
pub struct Assistant<B = LlmBackend> {
    config: AssistantConfig,
    http: Client,
    answers: AnswerService<B>,
    session: Session,
}

impl Assistant<LlmBackend> {
    /// Build an assistant whose answers come from the provider in `config`.
    ///
    /// # Errors
    /// [`AskDocError::ProviderNotConfigured`] when no provider can be resolved.
    pub fn from_config(config: AssistantConfig) -> Result<Self, AskDocError> {
        let backend = LlmBackend::from_config(&config)?;
        Self::with_backend(config, backend)
    }
}

impl<B: AnswerBackend> Assistant<B> {
    /// Build an assistant around any [`AnswerBackend`].
    pub fn with_backend(config: AssistantConfig, backend: B) -> Result<Self, AskDocError> {
        let http = Client::builder()
            .build()
            .map_err(|e| AskDocError::Internal(format!("Failed to build HTTP client: {e}")))?;
        let answers = AnswerService::new(backend, config.prompt_content_limit);

        Ok(Self {
            config,
            http,
            answers,
            session: Session::new(),
        })
    }

    pub fn config(&self) -> &AssistantConfig {
        &self.config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn backend(&self) -> &B {
        self.answers.backend()
    }

    /// Extract a local PDF file into the session.
    pub async fn load_pdf(&mut self, path: impl AsRef<Path>) -> Result<&Context, AskDocError> {
        let path = path.as_ref();
        info!("Loading PDF: {}", path.display());
        let bytes = pdf::read_pdf_file(path)?;
        self.load_pdf_bytes(bytes).await
    }

    /// Extract a PDF from any byte stream into the session.
    pub async fn load_pdf_reader<R: Read>(&mut self, reader: R) -> Result<&Context, AskDocError> {
        let bytes = pdf::read_pdf_stream(reader)?;
        self.load_pdf_bytes(bytes).await
    }

    /// Extract an in-memory PDF into the session.
    pub async fn load_pdf_bytes(&mut self, bytes: Vec<u8>) -> Result<&Context, AskDocError> {
        let text = pdf::extract_pdf_text(
            bytes,
            self.config.password.as_deref(),
            self.config.pdf_char_limit,
        )
        .await?;
        Ok(self.load_context(PdfContext { text }))
    }

    /// Fetch and extract a web page into the session.
    pub async fn load_website(&mut self, url: &str) -> Result<&Context, AskDocError> {
        let opts = web::FetchOptions {
            user_agent: &self.config.user_agent,
            timeout_secs: self.config.fetch_timeout_secs,
            char_limit: self.config.web_char_limit,
        };
        let page = web::fetch_page(&self.http, url, &opts).await?;
        Ok(self.load_context(page))
    }

    /// Answer `question` using the current context.
    pub async fn ask(&self, question: &str) -> Result<String, AskDocError> {
        self.answers.answer(question, self.session.context()).await
    }

    /// Drop the current context, returning it if there was one.
    pub fn end_session(&mut self) -> Option<Context> {
        self.session.clear()
    }

    /// Make an already-extracted context the active one.
    pub fn load_context(&mut self, context: impl Into<Context>) -> &Context {
        let context = context.into();
        if let Some(previous) = self.session.clear() {
            info!(
                "Replacing {} context with {} context",
                previous.kind(),
                context.kind()
            );
        }
        self.session.set_context(context)
    }
}

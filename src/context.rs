//! Extracted source material and the session that holds it.
//!
//! A [`Session`] owns at most one [`Context`]. Storing a new context replaces
//! the previous one wholesale, so a question is always answered from exactly
//! one source.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Text extracted from a PDF, already bounded by the PDF character budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PdfContext {
    pub text: String,
}

/// Structured summary of a scraped web page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebContext {
    /// Page `<title>`, or `"No Title"` when absent.
    pub title: String,
    /// Text of every `h1`/`h2`/`h3`, in document order.
    pub headings: Vec<String>,
    /// Paragraph text joined with single spaces, bounded by the web budget.
    pub content: String,
}

/// The material questions are answered against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Context {
    Pdf(PdfContext),
    Web(WebContext),
}

/// Which variant a [`Context`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextKind {
    Pdf,
    Web,
}

impl fmt::Display for ContextKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextKind::Pdf => f.write_str("pdf"),
            ContextKind::Web => f.write_str("web"),
        }
    }
}

impl Context {
    pub fn kind(&self) -> ContextKind {
        match self {
            Context::Pdf(_) => ContextKind::Pdf,
            Context::Web(_) => ContextKind::Web,
        }
    }

    /// Character count of the text this context contributes.
    pub fn char_len(&self) -> usize {
        match self {
            Context::Pdf(pdf) => pdf.text.chars().count(),
            Context::Web(web) => web.content.chars().count(),
        }
    }
}

impl From<PdfContext> for Context {
    fn from(pdf: PdfContext) -> Self {
        Context::Pdf(pdf)
    }
}

impl From<WebContext> for Context {
    fn from(web: WebContext) -> Self {
        Context::Web(web)
    }
}

/// Observable state of a [`Session`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    NoContext,
    HasContext(ContextKind),
}

/// Session-scoped holder of the active [`Context`].
///
/// Created empty, written by successful extractions, read by the answer
/// service, and dropped with the session.
#[derive(Debug, Default, Clone)]
pub struct Session {
    context: Option<Context>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionState {
        match &self.context {
            None => SessionState::NoContext,
            Some(ctx) => SessionState::HasContext(ctx.kind()),
        }
    }

    pub fn context(&self) -> Option<&Context> {
        self.context.as_ref()
    }

    /// Store `context`, discarding whatever was there before.
    pub fn set_context(&mut self, context: impl Into<Context>) -> &Context {
        self.context.insert(context.into())
    }

    /// Drop the active context.
    pub fn clear(&mut self) -> Option<Context> {
        self.context.take()
    }
}

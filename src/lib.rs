//! # edgequake-askdoc
//!
//! Ask natural-language questions about a PDF document or a web page, answered
//! by a chat-completion LLM that sees the extracted text as context.
//!
//! ## Flow
//!
//! ```text
//! load_pdf / load_website ──▶ Session (one Context) ──▶ ask ──▶ prompt ──▶ LLM ──▶ answer
//! ```
//!
//! * PDF text is decoded with pdfium, pages joined by single spaces and cut to
//!   4000 characters.
//! * Web pages are fetched once with `User-Agent: Mozilla/5.0`; the title,
//!   `h1`–`h3` headings and paragraph text (4000 characters) are kept.
//! * A question is rendered into a deterministic prompt (web content is cut
//!   again to 2000 characters) and sent in exactly one call. Nothing is
//!   retried.
//!
//! Loading new material replaces the old; a session never mixes two sources.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use edgequake_askdoc::{Assistant, AssistantConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Provider resolved from OPENROUTER_API_KEY (or other provider keys)
//!     let mut assistant = Assistant::from_config(AssistantConfig::default())?;
//!     assistant.load_website("https://example.com").await?;
//!     println!("{}", assistant.ask("What is this page about?").await?);
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `askdoc` binary (clap + anyhow + tracing-subscriber + indicatif) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod answer;
pub mod assistant;
pub mod config;
pub mod context;
pub mod error;
pub mod extract;
pub mod prompts;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use answer::{AnswerBackend, AnswerService, LlmBackend};
pub use assistant::Assistant;
pub use config::{AssistantConfig, AssistantConfigBuilder};
pub use context::{Context, ContextKind, PdfContext, Session, SessionState, WebContext};
pub use error::{AskDocError, ErrorKind};
pub use prompts::NO_DATA_MESSAGE;

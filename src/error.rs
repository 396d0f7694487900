//! Error types for the edgequake-askdoc library.
//!
//! Every failure is terminal for the single user action that triggered it:
//! nothing is retried and nothing is partially applied. [`AskDocError::kind`]
//! groups the variants into the three user-facing failure modes:
//!
//! * [`ErrorKind::Extraction`] — the PDF could not be read or decoded. No
//!   context is written.
//! * [`ErrorKind::Fetch`] — the web page could not be retrieved (transport
//!   failure or a non-200 status). No context is written.
//! * [`ErrorKind::Answer`] — the chat-completion call failed. The current
//!   context is left untouched so the question can be asked again.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the edgequake-askdoc library.
#[derive(Debug, Error)]
pub enum AskDocError {
    // ── PDF input errors ──────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("PDF file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// Reading the PDF stream failed part-way.
    #[error("Failed to read PDF input: {source}")]
    ReadFailed {
        #[source]
        source: std::io::Error,
    },

    /// The input was read, but it is not a PDF.
    #[error("Input is not a valid PDF (first bytes: {magic:?})")]
    NotAPdf { magic: Vec<u8> },

    /// pdfium could not parse the document.
    #[error("PDF is corrupt: {detail}\nTry repairing with: qpdf input.pdf output.pdf")]
    CorruptPdf { detail: String },

    /// PDF requires a password but none was provided.
    #[error("PDF is encrypted and requires a password.\nProvide it with --password <PASSWORD>.")]
    PasswordRequired,

    /// A password was provided but it is wrong.
    #[error("Wrong password for encrypted PDF")]
    WrongPassword,

    /// Text extraction failed for one page.
    #[error("Text extraction failed for page {page}: {detail}")]
    PageTextFailed { page: usize, detail: String },

    /// Could not bind to a pdfium library.
    #[error(
        "Failed to bind to pdfium library: {0}\n\n\
You can:\n\
  • Set PDFIUM_LIB_PATH=/path/to/libpdfium to use an existing copy.\n\
  • Place libpdfium next to the binary or in the working directory.\n\
  • Install pdfium system-wide from https://github.com/bblanchon/pdfium-binaries.\n"
    )]
    PdfiumBindingFailed(String),

    // ── Web fetch errors ──────────────────────────────────────────────────
    /// The server answered with something other than HTTP 200.
    #[error("Failed to fetch page, Status Code: {status}")]
    HttpStatus { url: String, status: u16 },

    /// The request never produced a response (DNS, connect, TLS, body read).
    #[error("Failed to fetch '{url}': {reason}\nCheck the URL and your internet connection.")]
    FetchFailed { url: String, reason: String },

    /// The configured fetch timeout elapsed.
    #[error("Fetching '{url}' timed out after {secs}s\nIncrease --fetch-timeout.")]
    FetchTimeout { url: String, secs: u64 },

    // ── LLM errors ────────────────────────────────────────────────────────
    /// The configured provider is not initialised (missing API key etc.).
    #[error("LLM provider '{provider}' is not configured.\n{hint}")]
    ProviderNotConfigured { provider: String, hint: String },

    /// The chat-completion call failed.
    #[error("LLM API error: {message}")]
    LlmApiError { message: String },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Coarse grouping of [`AskDocError`] variants by the action that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// PDF input could not be read or decoded.
    Extraction,
    /// Web page could not be fetched.
    Fetch,
    /// Chat-completion call failed.
    Answer,
    /// Invalid configuration or provider setup.
    Config,
    /// Anything else.
    Internal,
}

impl AskDocError {
    /// Which user-facing failure mode this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            AskDocError::FileNotFound { .. }
            | AskDocError::PermissionDenied { .. }
            | AskDocError::ReadFailed { .. }
            | AskDocError::NotAPdf { .. }
            | AskDocError::CorruptPdf { .. }
            | AskDocError::PasswordRequired
            | AskDocError::WrongPassword
            | AskDocError::PageTextFailed { .. }
            | AskDocError::PdfiumBindingFailed(_) => ErrorKind::Extraction,
            AskDocError::HttpStatus { .. }
            | AskDocError::FetchFailed { .. }
            | AskDocError::FetchTimeout { .. } => ErrorKind::Fetch,
            AskDocError::LlmApiError { .. } => ErrorKind::Answer,
            AskDocError::ProviderNotConfigured { .. } | AskDocError::InvalidConfig(_) => {
                ErrorKind::Config
            }
            AskDocError::Internal(_) => ErrorKind::Internal,
        }
    }
}

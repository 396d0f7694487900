//! Content extraction stages.
//!
//! Each submodule turns one kind of raw input into a bounded [`Context`]
//! variant. Both stages share [`truncate_chars`] so the character budgets are
//! applied identically.
//!
//! ## Data Flow
//!
//! ```text
//! PDF bytes ──▶ pdf::extract_pdf_text ──▶ PdfContext { text }
//! URL       ──▶ web::fetch_page ──▶ web::parse_page ──▶ WebContext { title, headings, content }
//! ```
//!
//! 1. [`pdf`] — validate the input, decode page text with pdfium on a blocking
//!    thread, join pages with single spaces and truncate
//! 2. [`web`] — one GET with a browser-like `User-Agent`, then pull title,
//!    headings and paragraphs out of the HTML
//!
//! [`Context`]: crate::context::Context

pub mod pdf;
pub mod web;

/// Keep at most the first `limit` characters of `text`.
///
/// Counts Unicode scalar values, so a multi-byte character is never split.
pub fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_unchanged() {
        assert_eq!(truncate_chars("hello", 10), "hello");
        assert_eq!(truncate_chars("hello", 5), "hello");
        assert_eq!(truncate_chars("", 3), "");
    }

    #[test]
    fn long_text_is_cut_at_limit() {
        assert_eq!(truncate_chars("hello world", 5), "hello");
        assert_eq!(truncate_chars("abc", 0), "");
    }

    #[test]
    fn multibyte_characters_are_not_split() {
        let text = "naïve café";
        let cut = truncate_chars(text, 4);
        assert_eq!(cut, "naïv");
        assert_eq!(cut.chars().count(), 4);
    }
}

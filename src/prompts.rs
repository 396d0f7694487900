//! Prompt templates for answering questions against a [`Context`].
//!
//! Rendering is pure and deterministic: the same question and context always
//! produce the same prompt, so templates can be tested without an LLM.

use crate::context::{Context, PdfContext, WebContext};
use crate::extract::truncate_chars;

/// Returned instead of an answer when the session has no context.
pub const NO_DATA_MESSAGE: &str = "No data available in session.";

const PREAMBLE: &str = "You are an expert AI assistant.";

const CLOSING: &str =
    "Provide a concise and relevant answer using only the material above.";

/// Render the prompt for `question` against `context`.
///
/// Web content is cut to `web_content_limit` characters; PDF text is used as
/// extracted.
pub fn render_prompt(question: &str, context: &Context, web_content_limit: usize) -> String {
    match context {
        Context::Web(web) => render_web_prompt(question, web, web_content_limit),
        Context::Pdf(pdf) => render_pdf_prompt(question, pdf),
    }
}

/// Prompt for a scraped web page: title, one heading per line, content excerpt.
pub fn render_web_prompt(question: &str, web: &WebContext, content_limit: usize) -> String {
    format!(
        "{PREAMBLE} Answer the question based only on the provided website data.\n\n\
Website Title: {title}\n\
Headings: {headings}\n\
Main Content: {content}\n\n\
Question: {question}\n\n\
{CLOSING}",
        title = web.title,
        headings = web.headings.join("\n"),
        content = truncate_chars(&web.content, content_limit),
    )
}

/// Prompt for an extracted PDF document.
pub fn render_pdf_prompt(question: &str, pdf: &PdfContext) -> String {
    format!(
        "{PREAMBLE} Answer the question based only on the provided PDF document.\n\n\
PDF Content: {text}\n\n\
Question: {question}\n\n\
{CLOSING}",
        text = pdf.text,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example_web() -> WebContext {
        WebContext {
            title: "Example".into(),
            headings: vec!["H1".into()],
            content: "hello world".into(),
        }
    }

    #[test]
    fn web_prompt_keeps_every_field() {
        let prompt = render_prompt("What is this?", &Context::Web(example_web()), 2000);
        for needle in ["Example", "H1", "hello world", "What is this?"] {
            assert!(prompt.contains(needle), "missing {needle:?} in:\n{prompt}");
        }
    }

    #[test]
    fn web_headings_are_newline_joined() {
        let web = WebContext {
            headings: vec!["Intro".into(), "Usage".into(), "FAQ".into()],
            ..example_web()
        };
        let prompt = render_web_prompt("q", &web, 2000);
        assert!(prompt.contains("Headings: Intro\nUsage\nFAQ\n"));
    }

    #[test]
    fn web_content_is_cut_to_prompt_limit() {
        let web = WebContext {
            content: format!("{}{}", "a".repeat(2000), "TAIL"),
            ..example_web()
        };
        let prompt = render_web_prompt("q", &web, 2000);
        assert!(prompt.contains(&"a".repeat(2000)));
        assert!(!prompt.contains("TAIL"));
    }

    #[test]
    fn pdf_prompt_includes_full_text() {
        let text = "x".repeat(3999) + "END";
        let prompt = render_prompt(
            "Summarise",
            &Context::Pdf(PdfContext { text: text.clone() }),
            2000,
        );
        assert!(prompt.contains(&text));
        assert!(prompt.contains("Question: Summarise"));
        assert!(prompt.contains("PDF document"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let ctx = Context::Web(example_web());
        assert_eq!(render_prompt("q", &ctx, 2000), render_prompt("q", &ctx, 2000));
    }
}

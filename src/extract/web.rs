//! Web page fetching and HTML text extraction.
//!
//! A page is reduced to three fields: its `<title>`, the text of its
//! `h1`/`h2`/`h3` headings and the text of its paragraphs. Navigation,
//! scripts and everything else are ignored simply by never being selected.

use super::truncate_chars;
use crate::context::WebContext;
use crate::error::AskDocError;
use reqwest::header::USER_AGENT;
use reqwest::{Client, StatusCode};
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Title used when a page has no `<title>` element, or one without text.
pub const NO_TITLE: &str = "No Title";

/// Options for a single page fetch.
#[derive(Debug, Clone)]
pub struct FetchOptions<'a> {
    pub user_agent: &'a str,
    pub timeout_secs: Option<u64>,
    pub char_limit: usize,
}

/// Fetch `url` and extract a [`WebContext`] from it.
///
/// Anything but HTTP 200 is returned as [`AskDocError::HttpStatus`].
pub async fn fetch_page(
    client: &Client,
    url: &str,
    opts: &FetchOptions<'_>,
) -> Result<WebContext, AskDocError> {
    info!("Fetching web page: {}", url);

    let mut request = client.get(url).header(USER_AGENT, opts.user_agent);
    if let Some(secs) = opts.timeout_secs {
        request = request.timeout(Duration::from_secs(secs));
    }

    let response = request
        .send()
        .await
        .map_err(|e| transport_error(url, opts.timeout_secs, e))?;

    let status = response.status();
    if status != StatusCode::OK {
        warn!("{}: HTTP {}", url, status);
        return Err(AskDocError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response
        .text()
        .await
        .map_err(|e| transport_error(url, opts.timeout_secs, e))?;
    debug!("{}: {} bytes of HTML", url, body.len());

    let page = parse_page(&body, opts.char_limit);
    info!(
        "Extracted '{}': {} headings, {} chars of content",
        page.title,
        page.headings.len(),
        page.content.chars().count()
    );
    Ok(page)
}

fn transport_error(url: &str, timeout_secs: Option<u64>, e: reqwest::Error) -> AskDocError {
    match timeout_secs {
        Some(secs) if e.is_timeout() => AskDocError::FetchTimeout {
            url: url.to_string(),
            secs,
        },
        _ => AskDocError::FetchFailed {
            url: url.to_string(),
            reason: e.to_string(),
        },
    }
}

/// Extract title, headings and paragraph text from an HTML document.
///
/// Every matched heading and paragraph yields one entry, even when empty.
/// Paragraphs are joined with single spaces and the result is bounded to
/// `char_limit` characters. Headings are not truncated.
pub fn parse_page(html: &str, char_limit: usize) -> WebContext {
    let doc = Html::parse_document(html);

    let title_sel = Selector::parse("title").expect("static selector");
    let heading_sel = Selector::parse("h1, h2, h3").expect("static selector");
    let para_sel = Selector::parse("p").expect("static selector");

    // Title text is kept verbatim, surrounding whitespace included.
    let title = doc
        .select(&title_sel)
        .next()
        .map(|el| el.text().collect::<String>())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| NO_TITLE.to_string());

    let headings: Vec<String> = doc.select(&heading_sel).map(element_text).collect();

    let paragraphs: Vec<String> = doc.select(&para_sel).map(element_text).collect();
    let joined = paragraphs.join(" ");

    WebContext {
        title,
        headings,
        content: truncate_chars(&joined, char_limit).to_string(),
    }
}

/// Concatenated descendant text of an element, trimmed.
fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<!doctype html>
<html>
  <head><title> Example Domain </title></head>
  <body>
    <nav><p>Home</p></nav>
    <h1>Main heading</h1>
    <p>First paragraph.</p>
    <h2>Section <em>two</em></h2>
    <p>Second <b>bold</b> paragraph.</p>
    <h4>Not collected</h4>
    <h3>Sub section</h3>
    <p>   </p>
    <div>Loose text is ignored</div>
  </body>
</html>"#;

    #[test]
    fn title_headings_and_paragraphs_in_document_order() {
        let page = parse_page(PAGE, 4000);
        assert_eq!(page.title, " Example Domain ");
        assert_eq!(
            page.headings,
            vec!["Main heading", "Section two", "Sub section"]
        );
        assert_eq!(
            page.content,
            "Home First paragraph. Second bold paragraph. "
        );
    }

    #[test]
    fn empty_headings_and_paragraphs_keep_their_slot() {
        let page = parse_page(
            "<h1>A</h1><h2></h2><h3>B</h3><p>x</p><p></p><p>y</p>",
            4000,
        );
        assert_eq!(page.headings, vec!["A", "", "B"]);
        assert_eq!(page.content, "x  y");
    }

    #[test]
    fn missing_title_uses_placeholder() {
        let page = parse_page("<html><body><p>text</p></body></html>", 4000);
        assert_eq!(page.title, "No Title");
    }

    #[test]
    fn empty_title_uses_placeholder() {
        let page = parse_page("<html><head><title></title></head></html>", 4000);
        assert_eq!(page.title, NO_TITLE);
    }

    #[test]
    fn whitespace_title_is_kept_verbatim() {
        let page = parse_page("<html><head><title>  </title></head></html>", 4000);
        assert_eq!(page.title, "  ");
    }

    #[test]
    fn content_is_truncated_to_limit() {
        let body: String = (0..500).map(|i| format!("<p>paragraph {i}</p>")).collect();
        let page = parse_page(&format!("<html><body>{body}</body></html>"), 4000);
        assert_eq!(page.content.chars().count(), 4000);
        assert!(page.content.starts_with("paragraph 0 paragraph 1 "));
    }

    #[test]
    fn page_without_text_is_empty_not_error() {
        let page = parse_page("", 4000);
        assert_eq!(page.title, NO_TITLE);
        assert!(page.headings.is_empty());
        assert!(page.content.is_empty());
    }
}

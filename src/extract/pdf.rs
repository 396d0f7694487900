//! PDF text extraction via pdfium.
//!
//! ## Why spawn_blocking?
//!
//! `pdfium-render` wraps the pdfium C++ library, which keeps thread-local
//! state and is not safe to drive from async code. Decoding runs on Tokio's
//! blocking pool so a large document never stalls the runtime.
//!
//! ## Why bytes, not paths?
//!
//! The input is a stream (an uploaded file, a pipe, a buffer from elsewhere).
//! Everything is read into memory first and handed to
//! `load_pdf_from_byte_vec`, so file paths are only a convenience on top.

use super::truncate_chars;
use crate::error::AskDocError;
use pdfium_render::prelude::*;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const PDF_MAGIC: &[u8; 4] = b"%PDF";

/// Read a local PDF file, validating existence, permissions and magic bytes.
pub fn read_pdf_file(path: &Path) -> Result<Vec<u8>, AskDocError> {
    if !path.exists() {
        return Err(AskDocError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let file = match std::fs::File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return Err(AskDocError::PermissionDenied {
                path: path.to_path_buf(),
            });
        }
        Err(_) => {
            return Err(AskDocError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
    };

    let bytes = read_pdf_stream(file)?;
    debug!("Read {} bytes from {}", bytes.len(), path.display());
    Ok(bytes)
}

/// Read a PDF from any byte stream and check the `%PDF` header.
pub fn read_pdf_stream<R: Read>(mut reader: R) -> Result<Vec<u8>, AskDocError> {
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|source| AskDocError::ReadFailed { source })?;
    check_magic(&bytes)?;
    Ok(bytes)
}

fn check_magic(bytes: &[u8]) -> Result<(), AskDocError> {
    if bytes.len() < PDF_MAGIC.len() || &bytes[..PDF_MAGIC.len()] != PDF_MAGIC {
        return Err(AskDocError::NotAPdf {
            magic: bytes.iter().take(PDF_MAGIC.len()).copied().collect(),
        });
    }
    Ok(())
}

/// Join per-page text with single spaces and keep the first `limit` characters.
pub fn join_page_texts<I, S>(pages: I, limit: usize) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let joined = pages
        .into_iter()
        .map(|p| p.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(" ");
    truncate_chars(&joined, limit).to_string()
}

/// Decode the text of every page and return it bounded to `limit` characters.
///
/// Runs inside `spawn_blocking` since pdfium operations are CPU-bound.
pub async fn extract_pdf_text(
    bytes: Vec<u8>,
    password: Option<&str>,
    limit: usize,
) -> Result<String, AskDocError> {
    check_magic(&bytes)?;
    let password = password.map(str::to_string);

    tokio::task::spawn_blocking(move || {
        let pages = page_texts_blocking(bytes, password.as_deref())?;
        let text = join_page_texts(&pages, limit);
        info!(
            "Extracted {} chars from {} pages",
            text.chars().count(),
            pages.len()
        );
        Ok(text)
    })
    .await
    .map_err(|e| AskDocError::Internal(format!("PDF extraction task panicked: {}", e)))?
}

/// Blocking implementation: load the document and collect page text in order.
fn page_texts_blocking(bytes: Vec<u8>, password: Option<&str>) -> Result<Vec<String>, AskDocError> {
    let pdfium = bind_pdfium()?;

    let document = pdfium.load_pdf_from_byte_vec(bytes, password).map_err(|e| {
        let err_str = format!("{:?}", e);
        if err_str.contains("Password") || err_str.contains("password") {
            if password.is_some() {
                AskDocError::WrongPassword
            } else {
                AskDocError::PasswordRequired
            }
        } else {
            AskDocError::CorruptPdf { detail: err_str }
        }
    })?;

    let pages = document.pages();
    debug!("PDF loaded: {} pages", pages.len());

    let mut texts = Vec::with_capacity(pages.len() as usize);
    for (idx, page) in pages.iter().enumerate() {
        let text = page.text().map_err(|e| AskDocError::PageTextFailed {
            page: idx + 1,
            detail: format!("{:?}", e),
        })?;
        texts.push(text.all());
    }

    Ok(texts)
}

/// Bind to a pdfium library.
///
/// Lookup order: `PDFIUM_LIB_PATH`, a platform library in the working
/// directory, then the system library search path.
fn bind_pdfium() -> Result<Pdfium, AskDocError> {
    let bindings = match std::env::var("PDFIUM_LIB_PATH") {
        Ok(p) if !p.is_empty() => Pdfium::bind_to_library(PathBuf::from(p)),
        _ => Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
            .or_else(|_| Pdfium::bind_to_system_library()),
    };

    bindings
        .map(Pdfium::new)
        .map_err(|e| AskDocError::PdfiumBindingFailed(format!("{:?}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn short_text_is_pages_joined_by_single_spaces() {
        let pages = ["First page.", "Second page.", "Third."];
        assert_eq!(
            join_page_texts(pages, 4000),
            "First page. Second page. Third."
        );
    }

    #[test]
    fn long_text_is_exact_prefix_of_joined_pages() {
        let pages: Vec<String> = (0..50).map(|i| format!("page-{i} ").repeat(20)).collect();
        let full = pages.join(" ");
        assert!(full.chars().count() > 4000);

        let out = join_page_texts(&pages, 4000);
        assert_eq!(out.chars().count(), 4000);
        assert!(full.starts_with(&out));
    }

    #[test]
    fn single_page_has_no_separator() {
        assert_eq!(join_page_texts(["only"], 4000), "only");
        assert_eq!(join_page_texts(Vec::<String>::new(), 4000), "");
    }

    #[test]
    fn empty_pages_still_take_a_separator() {
        assert_eq!(join_page_texts(["a", "", "b"], 4000), "a  b");
    }

    #[test]
    fn missing_file_is_reported() {
        let err = read_pdf_file(Path::new("/definitely/not/here.pdf")).unwrap_err();
        assert!(matches!(err, AskDocError::FileNotFound { .. }));
    }

    #[test]
    fn non_pdf_file_is_rejected() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(b"<html>not a pdf</html>").unwrap();

        let err = read_pdf_file(tmp.path()).unwrap_err();
        match err {
            AskDocError::NotAPdf { magic } => assert_eq!(magic, b"<htm".to_vec()),
            other => panic!("expected NotAPdf, got {other:?}"),
        }
    }

    #[test]
    fn stream_with_pdf_header_is_accepted() {
        let bytes = read_pdf_stream(&b"%PDF-1.7\n..."[..]).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn truncated_stream_is_rejected() {
        let err = read_pdf_stream(&b"%P"[..]).unwrap_err();
        assert!(matches!(err, AskDocError::NotAPdf { .. }));
    }

    #[tokio::test]
    async fn extract_rejects_garbage_before_touching_pdfium() {
        let err = extract_pdf_text(b"garbage".to_vec(), None, 4000)
            .await
            .unwrap_err();
        assert!(matches!(err, AskDocError::NotAPdf { .. }));
    }
}

//! PDF text extraction via pdfium.
//!
//! ## Why spawn_blocking?
//!
//! The `pdfium-render` crate wraps the pdfium C++ library, which is not
//! async-safe. `tokio::task::spawn_blocking` keeps text extraction off the
//! Tokio worker threads.
//!
//! The file is validated (exists, readable, `%PDF` magic bytes) before
//! pdfium is touched, so callers get a meaningful error rather than a pdfium
//! failure for the common mistakes.

use crate::error::StudyError;
use pdfium_render::prelude::*;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// Environment variable pointing at an existing pdfium library.
pub const PDFIUM_LIB_PATH_ENV: &str = "PDFIUM_LIB_PATH";

/// Extract the text layer of every page.
///
/// Non-blank pages are emitted as `--- Page N ---` followed by the page text,
/// separated by blank lines. Fails with [`StudyError::InsufficientText`] when
/// fewer than `min_chars` characters survive trimming, which usually means a
/// scanned document.
pub async fn extract_text(path: impl AsRef<Path>, min_chars: usize) -> Result<String, StudyError> {
    let path = path.as_ref().to_path_buf();
    validate_pdf(&path)?;

    let text = tokio::task::spawn_blocking(move || extract_text_blocking(&path))
        .await
        .map_err(|e| StudyError::Internal(format!("Extraction task panicked: {}", e)))??;

    check_min_length(&text, min_chars)?;
    Ok(text)
}

/// Reject text shorter than `min_chars` once trimmed.
pub fn check_min_length(text: &str, min_chars: usize) -> Result<(), StudyError> {
    let found = text.trim().chars().count();
    if found < min_chars {
        return Err(StudyError::InsufficientText {
            found,
            minimum: min_chars,
        });
    }
    Ok(())
}

/// Check existence, permissions and PDF magic bytes.
fn validate_pdf(path: &Path) -> Result<(), StudyError> {
    if !path.exists() {
        return Err(StudyError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    match std::fs::File::open(path) {
        Ok(mut f) => {
            let mut magic = [0u8; 4];
            if f.read_exact(&mut magic).is_ok() && &magic != b"%PDF" {
                return Err(StudyError::NotAPdf {
                    path: path.to_path_buf(),
                    magic,
                });
            }
        }
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return Err(StudyError::PermissionDenied {
                path: path.to_path_buf(),
            });
        }
        Err(_) => {
            return Err(StudyError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
    }

    debug!("Validated PDF: {}", path.display());
    Ok(())
}

/// Bind pdfium from `PDFIUM_LIB_PATH`, else from the system library path.
fn bind_pdfium() -> Result<Pdfium, StudyError> {
    let bindings = match std::env::var_os(PDFIUM_LIB_PATH_ENV) {
        Some(lib) => Pdfium::bind_to_library(lib.to_string_lossy().into_owned()),
        None => Pdfium::bind_to_system_library(),
    }
    .map_err(|e| StudyError::PdfiumBindingFailed(format!("{:?}", e)))?;
    Ok(Pdfium::new(bindings))
}

/// Blocking implementation of text extraction.
fn extract_text_blocking(pdf_path: &Path) -> Result<String, StudyError> {
    let pdfium = bind_pdfium()?;

    let document = pdfium
        .load_pdf_from_file(pdf_path, None)
        .map_err(|e| StudyError::CorruptPdf {
            path: pdf_path.to_path_buf(),
            detail: format!("{:?}", e),
        })?;

    let mut pages = Vec::new();
    for (idx, page) in document.pages().iter().enumerate() {
        let text = page
            .text()
            .map_err(|e| StudyError::CorruptPdf {
                path: pdf_path.to_path_buf(),
                detail: format!("page {}: {:?}", idx + 1, e),
            })?
            .all();
        if !text.trim().is_empty() {
            pages.push((idx + 1, text));
        }
    }

    info!(
        "Extracted text from {}/{} pages",
        pages.len(),
        document.pages().len()
    );
    Ok(join_pages(&pages))
}

fn join_pages(pages: &[(usize, String)]) -> String {
    pages
        .iter()
        .map(|(num, text)| format!("--- Page {} ---\n{}", num, text.trim_end()))
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn missing_file_is_reported() {
        let err = extract_text("/definitely/not/here.pdf", 50).await.unwrap_err();
        assert!(matches!(err, StudyError::FileNotFound { .. }), "got {err:?}");
    }

    #[tokio::test]
    async fn non_pdf_is_rejected_before_pdfium() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"hello, this is plain text").unwrap();
        let err = extract_text(f.path(), 50).await.unwrap_err();
        match err {
            StudyError::NotAPdf { magic, .. } => assert_eq!(&magic, b"hell"),
            other => panic!("expected NotAPdf, got {other:?}"),
        }
    }

    #[test]
    fn short_text_rejected() {
        let err = check_min_length("   tiny   ", 50).unwrap_err();
        match err {
            StudyError::InsufficientText { found, minimum } => {
                assert_eq!(found, 4);
                assert_eq!(minimum, 50);
            }
            other => panic!("expected InsufficientText, got {other:?}"),
        }
        assert!(check_min_length(&"a".repeat(50), 50).is_ok());
    }

    #[test]
    fn pages_are_marked_and_joined() {
        let joined = join_pages(&[(1, "Intro\n".into()), (3, "Cells".into())]);
        assert_eq!(joined, "--- Page 1 ---\nIntro\n\n--- Page 3 ---\nCells");
    }
}

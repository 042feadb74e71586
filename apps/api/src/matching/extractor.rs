//! Document Text Extractor: PDF → plain text, fail-soft.
//!
//! Any failure inside the PDF library (I/O, corrupt xref, unsupported encoding, or a
//! panic in the parser) is logged and collapses to an empty string. The caller turns
//! empty text into a 0.0 score instead of blocking the application workflow.
//!
//! Extraction is blocking; async callers run it under `tokio::task::spawn_blocking`.

use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use tracing::{debug, warn};

pub trait TextExtractor: Send + Sync {
    /// Plain text of the document at `path`, or `""` when nothing can be extracted.
    fn extract(&self, path: &Path) -> String;
}

/// `pdf-extract` backed extractor: pages joined by a single space, result trimmed.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfTextExtractor;

impl TextExtractor for PdfTextExtractor {
    fn extract(&self, path: &Path) -> String {
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_by_pages(path)
        }));

        match result {
            Ok(Ok(pages)) => {
                let text = join_pages(&pages);
                debug!(
                    path = %path.display(),
                    pages = pages.len(),
                    chars = text.len(),
                    "Extracted resume text"
                );
                text
            }
            Ok(Err(e)) => {
                warn!(path = %path.display(), "Error reading PDF: {e}");
                String::new()
            }
            Err(_) => {
                warn!(path = %path.display(), "PDF parser panicked; treating as no text");
                String::new()
            }
        }
    }
}

fn join_pages(pages: &[String]) -> String {
    pages.join(" ").trim().to_string()
}

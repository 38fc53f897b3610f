//! Document text extraction, one chunk per page or segment

use std::path::Path;

use crate::error::{Error, Result};

/// Extract a document into an ordered sequence of text chunks.
///
/// PDFs yield one chunk per page; pages with no extractable text become
/// empty chunks so chunk ids stay aligned with page numbers. Plain text and
/// Markdown yield one chunk per blank-line-separated segment. Whether the
/// result is worth indexing is the caller's decision, not enforced here.
pub fn extract_chunks(path: &Path) -> Result<Vec<String>> {
    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("document")
        .to_string();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "pdf" => extract_pdf(path, &filename),
        "txt" | "text" | "md" | "markdown" => extract_text(path),
        other => Err(Error::file_parse(
            filename,
            format!("Unsupported file type '{}' (expected pdf, txt, or md)", other),
        )),
    }
}

/// Extract a PDF page by page
fn extract_pdf(path: &Path, filename: &str) -> Result<Vec<String>> {
    let data = std::fs::read(path)?;

    let pages = pdf_extract::extract_text_from_mem_by_pages(&data)
        .map_err(|e| Error::file_parse(filename, format!("PDF extraction failed: {}", e)))?;

    if pages.is_empty() {
        return Err(Error::file_parse(
            filename,
            "No pages could be extracted from PDF",
        ));
    }

    // Cross-check against the document's own page count; extraction can
    // silently skip damaged pages
    if let Ok(doc) = lopdf::Document::load_mem(&data) {
        let reported = doc.get_pages().len();
        if reported != pages.len() {
            tracing::warn!(
                "PDF reports {} pages but {} were extracted",
                reported,
                pages.len()
            );
        }
    }

    Ok(pages.iter().map(|p| cleanup_page(p)).collect())
}

/// Extract plain text or Markdown as blank-line-separated segments
fn extract_text(path: &Path) -> Result<Vec<String>> {
    // Normalize CRLF so blank-line detection works on Windows-edited files
    let content = std::fs::read_to_string(path)?.replace("\r\n", "\n");

    let chunks: Vec<String> = content
        .split("\n\n")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    Ok(chunks)
}

/// Normalize extracted page text: strip nulls, trim lines, drop blank lines
fn cleanup_page(raw: &str) -> String {
    raw.replace('\0', "")
        .lines()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

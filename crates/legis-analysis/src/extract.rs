//! PDF text extraction.
//!
//! Wraps `pdf-extract`; parse failures are returned to the caller unchanged.
use std::path::Path;

use tracing::debug;

use crate::error::ExtractError;

/// Extract the text of every page, joined by blank lines.
///
/// Within a page each line is trimmed and blank lines are dropped.
pub fn extract_text(pdf_bytes: &[u8]) -> Result<String, ExtractError> {
    let pages = pdf_extract::extract_text_from_mem_by_pages(pdf_bytes)?;
    debug!(pages = pages.len(), bytes = pdf_bytes.len(), "extracted pdf text");
    Ok(join_pages(pages.as_slice()))
}

pub fn extract_text_from_path(path: &Path) -> Result<String, ExtractError> {
    let bytes = std::fs::read(path).map_err(|source| ExtractError::Io {
        path: path.display().to_string(),
        source,
    })?;
    extract_text(&bytes)
}

fn join_pages<S: AsRef<str>>(pages: &[S]) -> String {
    pages
        .iter()
        .map(|page| {
            page.as_ref()
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .collect::<Vec<_>>()
                .join("\n")
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixture_pdf;

    #[test]
    fn join_pages_trims_and_drops_blank_lines() {
        let pages = ["  Part 1  \n\n   \nIntroduction\n", "\nSection 2\t\n"];
        assert_eq!(join_pages(&pages), "Part 1\nIntroduction\n\nSection 2");
    }

    #[test]
    fn join_pages_keeps_empty_page_slot() {
        let pages = ["first", "   \n", "third"];
        assert_eq!(join_pages(&pages), "first\n\n\n\nthird");
    }

    #[test]
    fn extracts_text_from_generated_pdf() {
        let pdf = fixture_pdf(&[
            &["Universal Credit Act 2025", "Part 1"],
            &["A severe conditions claimant is eligible."],
        ]);
        let text = extract_text(&pdf).expect("extract");
        assert!(text.contains("Universal Credit Act 2025"), "got: {text:?}");
        assert!(text.contains("eligible"), "got: {text:?}");
        assert!(text.lines().all(|l| l == l.trim()));
    }

    #[test]
    fn garbage_bytes_are_a_pdf_error() {
        let err = extract_text(b"this is not a pdf").expect_err("should fail");
        assert!(matches!(err, ExtractError::Pdf(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = extract_text_from_path(Path::new("/nonexistent/act.pdf")).expect_err("should fail");
        assert!(matches!(err, ExtractError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/act.pdf"));
    }
}

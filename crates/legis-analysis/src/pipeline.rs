use tracing::info;

use crate::clean::clean_text;
use crate::error::ExtractError;
use crate::extract::extract_text;
use crate::model::{DocumentAnalysis, RuleStatus};
use crate::rules::rule_checks;
use crate::sections::extract_sections;
use crate::summary::summarize;

/// Run the deterministic path over a PDF: extract, clean, summarize,
/// segment and check.
pub fn process(document_bytes: &[u8]) -> Result<DocumentAnalysis, ExtractError> {
    let raw = extract_text(document_bytes)?;
    Ok(analyze_text(&raw))
}

/// Same as [`process`] for text that has already been extracted.
pub fn analyze_text(raw: &str) -> DocumentAnalysis {
    let cleaned_text = clean_text(raw);
    let summary = summarize(&cleaned_text);
    let sections = extract_sections(&cleaned_text);
    let rule_checks = rule_checks(&sections);

    let passed = rule_checks
        .iter()
        .filter(|r| r.status == RuleStatus::Pass)
        .count();
    info!(
        chars = cleaned_text.chars().count(),
        passed,
        total = rule_checks.len(),
        "document analyzed"
    );

    DocumentAnalysis {
        cleaned_text,
        summary,
        sections,
        rule_checks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixture_pdf;
    use crate::model::PREVIEW_CHARS;

    #[test]
    fn analyze_text_wires_every_stage() {
        let raw = "Universal Credit Act 2025\n\n\nPart 1\nThe Secretary of State must uprate the standard allowance by CPI.\nSection 2\nA terminally ill claimant keeps the protected amount.";
        let analysis = analyze_text(raw);

        assert!(analysis.cleaned_text.contains("\n\nPart 1"));
        assert_eq!(analysis.summary.len(), 7);
        assert!(!analysis.sections.obligations.is_empty());
        assert!(!analysis.sections.payments.is_empty());
        assert!(!analysis.sections.eligibility.is_empty());
        assert!(analysis.sections.penalties.is_empty());
        assert_eq!(analysis.rule_checks.len(), 6);
        assert_eq!(analysis.rule_checks[1].status, RuleStatus::Pass);
        assert_eq!(analysis.rule_checks[3].status, RuleStatus::Fail);
    }

    #[test]
    fn preview_is_bounded() {
        let raw = "word ".repeat(2000);
        let analysis = analyze_text(&raw);
        assert_eq!(analysis.preview().chars().count(), PREVIEW_CHARS);
        assert!(analysis.cleaned_text.chars().count() > PREVIEW_CHARS);
    }

    #[test]
    fn process_runs_on_pdf_bytes() {
        let pdf = fixture_pdf(&[&["Part 1", "Penalty for late evidence"]]);
        let analysis = process(&pdf).expect("process");
        assert!(analysis.sections.penalties.to_lowercase().contains("penalty"));
        assert!(!analysis.sections.record_keeping.is_empty());
    }

    #[test]
    fn process_propagates_parse_failures() {
        assert!(process(b"%PDF-broken").is_err());
    }
}

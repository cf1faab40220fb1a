use std::sync::LazyLock;

use regex::Regex;

static BLANK_RUN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{2,}").expect("valid regex"));

// The regex crate has no lookahead, so the header prefix is captured and re-emitted.
static HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\n((?:section|schedule|part)\s+\d)").expect("valid regex")
});

/// Normalize extracted text.
///
/// Removes form feeds, collapses blank-line runs, then puts a blank line in
/// front of every `Section N`, `Schedule N` or `Part N` line so structural
/// boundaries survive as paragraphs. Applying it twice changes nothing.
pub fn clean_text(raw: &str) -> String {
    let without_form_feeds = raw.replace('\x0c', "");
    let collapsed = BLANK_RUN_RE.replace_all(&without_form_feeds, "\n");
    let marked = HEADER_RE.replace_all(&collapsed, "\n\n$1");
    marked.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removes_form_feeds() {
        assert_eq!(clean_text("page one\x0c\npage two"), "page one\npage two");
    }

    #[test]
    fn collapses_blank_runs() {
        assert_eq!(clean_text("a\n\n\n\nb\n\nc"), "a\nb\nc");
    }

    #[test]
    fn breaks_before_structural_headers() {
        let raw = "Universal Credit Act 2025\nPart 1\nIntro\nSection 2 Uprating\nSchedule 1\nDefinitions";
        assert_eq!(
            clean_text(raw),
            "Universal Credit Act 2025\n\nPart 1\nIntro\n\nSection 2 Uprating\n\nSchedule 1\nDefinitions"
        );
    }

    #[test]
    fn header_match_is_case_insensitive() {
        assert_eq!(clean_text("x\nSECTION 4\ny\nschedule 2"), "x\n\nSECTION 4\ny\n\nschedule 2");
    }

    #[test]
    fn header_needs_a_number() {
        assert_eq!(clean_text("x\nSection heading\nPartial 3"), "x\nSection heading\nPartial 3");
    }

    #[test]
    fn trims_outer_whitespace() {
        assert_eq!(clean_text("\n\n  body text \n\n"), "body text");
    }

    #[test]
    fn is_idempotent() {
        let samples = [
            "",
            "plain",
            "\x0cPart 1\n\n\nSection 1 Title\nbody\n\n\x0cSchedule 2\n\nSection 3\n",
            "  lead\nsection   12\tthing\n\nPART 9\n",
            "Section 1\nSection 2\nSection 3",
        ];
        for raw in samples {
            let once = clean_text(raw);
            assert_eq!(clean_text(&once), once, "not idempotent for {raw:?}");
        }
    }
}

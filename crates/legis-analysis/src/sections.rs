//! Keyword-windowed section extraction.
//!
//! Each category has an ordered keyword list. The first keyword (in list
//! order, not position in the text) that occurs anywhere wins, and the
//! section is the text around that occurrence.
use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};
use tracing::debug;

use crate::model::{SectionKey, SectionMap};

/// Characters of context kept on each side of a keyword match.
pub const CONTEXT_CHARS: usize = 400;

pub const SECTION_KEYWORDS: [(SectionKey, &[&str]); 7] = [
    (
        SectionKey::Definitions,
        &["Schedule 1", "definition", "pre-2026 claimant"],
    ),
    (
        SectionKey::Obligations,
        &["Secretary of State", "must exercise powers"],
    ),
    (SectionKey::Responsibilities, &["Department for Communities"]),
    (
        SectionKey::Eligibility,
        &["eligibility", "severe conditions", "terminally ill"],
    ),
    (SectionKey::Payments, &["standard allowance", "CPI", "uplift"]),
    (SectionKey::Penalties, &["penalty", "enforcement"]),
    (
        SectionKey::RecordKeeping,
        &["reg 41", "reg 43", "reg 44", "evidence"],
    ),
];

struct CompiledCategory {
    key: SectionKey,
    patterns: Vec<Regex>,
}

static CATEGORIES: LazyLock<Vec<CompiledCategory>> = LazyLock::new(|| {
    SECTION_KEYWORDS
        .iter()
        .map(|(key, keywords)| CompiledCategory {
            key: *key,
            patterns: keywords.iter().copied().map(window_regex).collect(),
        })
        .collect()
});

fn window_regex(keyword: &str) -> Regex {
    let pattern = format!(
        "(.{{0,{ctx}}}{kw}.{{0,{ctx}}})",
        ctx = CONTEXT_CHARS,
        kw = regex::escape(keyword)
    );
    RegexBuilder::new(&pattern)
        .case_insensitive(true)
        .dot_matches_new_line(true)
        .size_limit(1 << 25)
        .build()
        .expect("valid regex")
}

/// Segment cleaned text into the seven categories. Never fails; a category
/// with no matching keyword is left empty.
pub fn extract_sections(cleaned: &str) -> SectionMap {
    let mut sections = SectionMap::default();
    for category in CATEGORIES.iter() {
        let found = category
            .patterns
            .iter()
            .find_map(|re| re.find(cleaned))
            .map(|m| m.as_str().trim().to_string());
        match found {
            Some(text) => {
                debug!(section = %category.key, chars = text.chars().count(), "section found");
                sections.set(category.key, text);
            }
            None => debug!(section = %category.key, "no keyword matched"),
        }
    }
    sections
}

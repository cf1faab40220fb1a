use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Number of characters of cleaned text shown in previews.
pub const PREVIEW_CHARS: usize = 4000;

/// One of the seven semantic categories a document is segmented into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SectionKey {
    Definitions,
    Obligations,
    Responsibilities,
    Eligibility,
    Payments,
    Penalties,
    RecordKeeping,
}

impl SectionKey {
    pub const ALL: [SectionKey; 7] = [
        SectionKey::Definitions,
        SectionKey::Obligations,
        SectionKey::Responsibilities,
        SectionKey::Eligibility,
        SectionKey::Payments,
        SectionKey::Penalties,
        SectionKey::RecordKeeping,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SectionKey::Definitions => "definitions",
            SectionKey::Obligations => "obligations",
            SectionKey::Responsibilities => "responsibilities",
            SectionKey::Eligibility => "eligibility",
            SectionKey::Payments => "payments",
            SectionKey::Penalties => "penalties",
            SectionKey::RecordKeeping => "record_keeping",
        }
    }
}

impl std::fmt::Display for SectionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keyword-extracted snippet per category. Empty string means no keyword matched.
///
/// Field order is the serialized key order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SectionMap {
    pub definitions: String,
    pub obligations: String,
    pub responsibilities: String,
    pub eligibility: String,
    pub payments: String,
    pub penalties: String,
    pub record_keeping: String,
}

impl SectionMap {
    pub fn get(&self, key: SectionKey) -> &str {
        match key {
            SectionKey::Definitions => &self.definitions,
            SectionKey::Obligations => &self.obligations,
            SectionKey::Responsibilities => &self.responsibilities,
            SectionKey::Eligibility => &self.eligibility,
            SectionKey::Payments => &self.payments,
            SectionKey::Penalties => &self.penalties,
            SectionKey::RecordKeeping => &self.record_keeping,
        }
    }

    pub(crate) fn set(&mut self, key: SectionKey, value: String) {
        let slot = match key {
            SectionKey::Definitions => &mut self.definitions,
            SectionKey::Obligations => &mut self.obligations,
            SectionKey::Responsibilities => &mut self.responsibilities,
            SectionKey::Eligibility => &mut self.eligibility,
            SectionKey::Payments => &mut self.payments,
            SectionKey::Penalties => &mut self.penalties,
            SectionKey::RecordKeeping => &mut self.record_keeping,
        };
        *slot = value;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum RuleStatus {
    Pass,
    Fail,
}

/// Outcome of one checklist rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RuleResult {
    pub rule: String,
    pub status: RuleStatus,
    /// At most 300 characters of the mapped section; empty when the rule fails.
    pub evidence: String,
    /// 0-100.
    pub confidence: u8,
}

/// Everything the deterministic path derives from one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DocumentAnalysis {
    pub cleaned_text: String,
    pub summary: Vec<String>,
    pub sections: SectionMap,
    pub rule_checks: Vec<RuleResult>,
}

impl DocumentAnalysis {
    /// The first [`PREVIEW_CHARS`] characters of the cleaned text.
    pub fn preview(&self) -> &str {
        truncate_chars(&self.cleaned_text, PREVIEW_CHARS)
    }
}

/// Longest prefix of `s` holding at most `max` characters.
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_map_serializes_in_declared_order() {
        let json = serde_json::to_string(&SectionMap::default()).expect("serialize");
        let keys: Vec<&str> = SectionKey::ALL.iter().map(|k| k.as_str()).collect();
        let mut last = 0;
        for key in keys {
            let pos = json
                .find(&format!("\"{key}\""))
                .unwrap_or_else(|| panic!("missing key {key}"));
            assert!(pos >= last, "{key} out of order");
            last = pos;
        }
    }

    #[test]
    fn get_and_set_agree() {
        let mut map = SectionMap::default();
        for key in SectionKey::ALL {
            map.set(key, key.to_string());
        }
        for key in SectionKey::ALL {
            assert_eq!(map.get(key), key.as_str());
        }
    }

    #[test]
    fn status_is_lowercase() {
        assert_eq!(serde_json::to_string(&RuleStatus::Pass).unwrap(), "\"pass\"");
        assert_eq!(serde_json::to_string(&RuleStatus::Fail).unwrap(), "\"fail\"");
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate_chars("a→b→c", 3), "a→b");
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("", 5), "");
    }
}

use crate::model::{truncate_chars, RuleResult, RuleStatus, SectionKey, SectionMap};

pub const EVIDENCE_CHARS: usize = 300;
pub const PASS_CONFIDENCE: u8 = 92;
pub const FAIL_CONFIDENCE: u8 = 65;

/// The checklist, in evaluation order. Each rule passes when its section is non-empty.
pub const RULES: [(&str, SectionKey); 6] = [
    ("Act must define key terms", SectionKey::Definitions),
    ("Act must specify eligibility criteria", SectionKey::Eligibility),
    (
        "Act must specify responsibilities of the administering authority",
        SectionKey::Responsibilities,
    ),
    ("Act must include enforcement or penalties", SectionKey::Penalties),
    (
        "Act must include payment calculation or entitlement structure",
        SectionKey::Payments,
    ),
    (
        "Act must include record-keeping or reporting requirements",
        SectionKey::RecordKeeping,
    ),
];

pub fn rule_checks(sections: &SectionMap) -> Vec<RuleResult> {
    RULES
        .iter()
        .map(|(rule, key)| {
            let text = sections.get(*key);
            let passed = !text.is_empty();
            RuleResult {
                rule: rule.to_string(),
                status: if passed { RuleStatus::Pass } else { RuleStatus::Fail },
                evidence: truncate_chars(text, EVIDENCE_CHARS).to_string(),
                confidence: if passed { PASS_CONFIDENCE } else { FAIL_CONFIDENCE },
            }
        })
        .collect()
}

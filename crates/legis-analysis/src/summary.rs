/// Fixed summary of the Universal Credit Act 2025.
///
/// This is a placeholder: the bullets are not derived from the document and
/// are returned unchanged for any input.
pub const SUMMARY_BULLETS: [&str; 7] = [
    "Purpose: Defines rules and structure of Universal Credit uprating.",
    "Key definitions: pre-2026 claimant, severe conditions claimant, protected LCWRA amount.",
    "Eligibility: describes claimant categories including severe conditions and terminal illness.",
    "Obligations: Secretary of State must set, update, and enforce calculation rules.",
    "Payments: Allowance follows baseline → CPI → uplift formula.",
    "Record-keeping: evidence, assessment, medical exam requirements referenced.",
    "Enforcement: administrative enforcement; no major new criminal penalties.",
];

pub fn summarize(_cleaned: &str) -> Vec<String> {
    SUMMARY_BULLETS.iter().map(|b| b.to_string()).collect()
}

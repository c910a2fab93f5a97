//! Reclassifies the model's free-text note into fixed, emoji-tagged sections.
//!
//! Each line of the raw response is tested against an ordered rule table;
//! the first matching rule wins and later rules are never consulted, even
//! when several trigger substrings occur in the same line.

/// One classification branch: a lowercase trigger substring, the header it
/// emits, and the text stripped from the matched line. A `None` strip
/// target discards the line content entirely, keeping only the header.
struct SectionRule {
    trigger: &'static str,
    header: &'static str,
    strip: Option<&'static str>,
}

/// Priority-ordered section rules.
///
/// "assessment" and "plan" are deliberately broad substrings and also match
/// inside longer words. The Assessment strip target differs from its
/// trigger on purpose: a line that spells the section any other way keeps
/// its full text under the header.
const SECTION_RULES: &[SectionRule] = &[
    SectionRule {
        trigger: "chief complaint",
        header: "📝 Chief Complaint",
        strip: Some("Chief Complaint"),
    },
    SectionRule {
        trigger: "history of present illness",
        header: "📖 History of Present Illness",
        strip: Some("History of Present Illness"),
    },
    SectionRule {
        trigger: "relevant past history",
        header: "📜 Relevant Past History",
        strip: Some("Relevant Past History"),
    },
    SectionRule {
        trigger: "symptoms & examination findings",
        header: "🔍 Symptoms & Examination Findings",
        strip: Some("Symptoms & Examination Findings"),
    },
    SectionRule {
        trigger: "assessment",
        header: "🩺 Assessment / Impression",
        strip: Some("Assessment / Impression"),
    },
    SectionRule {
        trigger: "plan",
        header: "🧾 Plan",
        strip: Some("Plan"),
    },
    SectionRule {
        trigger: "suggested medications",
        header: "💊 Suggested Medications (with purpose)",
        strip: None,
    },
    SectionRule {
        trigger: "predicted medications",
        header: "💊 Predicted Medications (with purpose)",
        strip: None,
    },
    SectionRule {
        trigger: "predicted disease",
        header: "🩸 Predicted Disease",
        strip: None,
    },
];

/// Walk the raw model response line by line and rebuild it as a structured
/// note with section headers.
///
/// Matching is case-insensitive; the emitted and stripped text keeps its
/// original case. Lines matching no rule pass through unchanged. Empty
/// input yields empty output.
pub fn classify(raw: &str) -> String {
    let mut note = String::new();

    for line in raw.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let lower = line.to_lowercase();
        match SECTION_RULES.iter().find(|rule| lower.contains(rule.trigger)) {
            Some(rule) => {
                note.push('\n');
                note.push_str(rule.header);
                note.push('\n');
                if let Some(strip) = rule.strip {
                    note.push_str(line.replace(strip, "").trim());
                    note.push('\n');
                }
            }
            None => {
                note.push_str(line);
                note.push('\n');
            }
        }
    }

    note
}

//! Prompt construction for the note-generation model.
//!
//! The rule block and the output-contract suffix are part of the model
//! contract: the classifier keys on the section vocabulary these
//! instructions establish, so their wording must not drift casually.

/// Formatting rules embedded verbatim in every prompt
pub const PROMPT_RULES: &str = r#"1. Write only clinical information from the conversation.
2. Use concise, professional medical language.
3. Structure output as:
   - Chief Complaint
   - History of Present Illness
   - Relevant Past History (if mentioned)
   - Symptoms & Examination Findings
   - Assessment / Impression
   - Plan
4. Do not invent or assume details.
5. Do not include demographics, identifiers, or dates.
6. Use ICD-10-CM codes only if it is correct, double check that otherwise leave it.
7. If it is not a doctor-patient conversation, output: "Not a conversation".
8. End after **Probable Diagnosis** and do not repeat the note."#;

/// Suffix requesting the medication and disease predictions, in the order
/// the classifier expects them to appear
const OUTPUT_CONTRACT: &str = r#"At the end, provide:
- SUGGESTED MEDICATIONS with PURPOSE
- Try to predict Medications for the disease with purpose
- Predicted disease (if confident), only disease name otherwise give exactly "NOT SURE""#;

/// Compose the full prompt: task header, rule block, timestamped
/// conversation, output contract. Pure string composition.
pub fn build_prompt(transcript: &str) -> String {
    format!(
        "Convert the following doctor-patient conversation into standard format.\n\
         Follow these rules:\n{PROMPT_RULES}\n\
         Conversation with timestamp:\n{transcript}\n\n{OUTPUT_CONTRACT}\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_contains_transcript() {
        let prompt = build_prompt("[0.00s - 1.00s] : Good morning doctor");
        assert!(prompt.contains("[0.00s - 1.00s] : Good morning doctor"));
    }

    #[test]
    fn test_prompt_section_order() {
        let prompt = build_prompt("THE-CONVERSATION");
        let rules_pos = prompt.find("Write only clinical information").unwrap();
        let transcript_pos = prompt.find("THE-CONVERSATION").unwrap();
        let contract_pos = prompt.find("SUGGESTED MEDICATIONS").unwrap();
        assert!(rules_pos < transcript_pos);
        assert!(transcript_pos < contract_pos);
    }

    #[test]
    fn test_prompt_carries_contract_phrases() {
        let prompt = build_prompt("");
        assert!(prompt.contains("\"Not a conversation\""));
        assert!(prompt.contains("\"NOT SURE\""));
        assert!(prompt.contains("ICD-10-CM"));
    }

    #[test]
    fn test_prompt_lists_all_sections() {
        let prompt = build_prompt("");
        for section in [
            "Chief Complaint",
            "History of Present Illness",
            "Relevant Past History",
            "Symptoms & Examination Findings",
            "Assessment / Impression",
            "Plan",
        ] {
            assert!(prompt.contains(section), "missing section: {}", section);
        }
    }
}

//! Healthcare template.
//!
//! Structural invariant: the identity-verification step is emitted strictly
//! before any sentence that permits discussing protected health information,
//! so a model following the script top to bottom cannot reveal PHI to an
//! unverified caller.

use crate::compiler::scaffold::VerticalTemplate;
use crate::compiler::verticals::numbered_procedure;
use crate::model::{BusinessFacts, VerificationMethod, Vertical};

/// Used when the practice has not configured its own keyword list.
pub const DEFAULT_EMERGENCY_KEYWORDS: &[&str] = &[
    "chest pain",
    "difficulty breathing",
    "severe bleeding",
    "stroke",
    "unconscious",
];

pub struct HealthcareTemplate;

impl HealthcareTemplate {
    fn verification_phrase(method: VerificationMethod) -> &'static str {
        match method {
            VerificationMethod::NameAndDob => "their full name and date of birth",
            VerificationMethod::AccountNumber => "their account number",
        }
    }

    fn emergency_keywords(facts: &BusinessFacts) -> String {
        if facts.emergency_keywords.is_empty() {
            DEFAULT_EMERGENCY_KEYWORDS.join(", ")
        } else {
            facts.emergency_keywords.join(", ")
        }
    }
}

impl VerticalTemplate for HealthcareTemplate {
    fn vertical(&self) -> Vertical {
        Vertical::Healthcare
    }

    fn identity_line(&self, facts: &BusinessFacts) -> String {
        let mut line = match facts.specialty.as_deref() {
            Some(specialty) => format!(
                "You are the phone receptionist for {}, a {} practice.",
                facts.name, specialty
            ),
            None => format!(
                "You are the phone receptionist for {}, a medical practice.",
                facts.name
            ),
        };
        if !facts.providers.is_empty() {
            line.push_str(&format!(
                " The practice's providers are: {}.",
                facts.providers.join(", ")
            ));
        }
        line
    }

    fn procedural_script(&self, facts: &BusinessFacts) -> String {
        let verification = Self::verification_phrase(facts.verification_method);
        let steps = vec![
            "Greet the caller and ask how you can help.".to_string(),
            format!(
                "Before discussing any appointment, prescription, test result, or other \
protected health information, verify the caller's identity by asking for {verification}. \
Do not reveal anything until verification succeeds."
            ),
            "Once the caller is verified, you may discuss protected health information: \
help with scheduling, rescheduling, prescription refill requests, and questions about \
their care."
                .to_string(),
            "General questions about the practice — hours, location, accepted insurance — \
do not require verification."
                .to_string(),
        ];
        numbered_procedure("Call procedure", &steps)
    }

    fn safety_rules(&self, facts: &BusinessFacts) -> Vec<String> {
        let keywords = Self::emergency_keywords(facts);
        let emergency = match facts.triage_line.as_deref() {
            Some(line) => format!(
                "If the caller mentions any of the following, or any other medical emergency \
({keywords}), do not continue the conversation normally: tell them to hang up and call 911 \
immediately, or offer to transfer them to the triage line at {line}."
            ),
            None => format!(
                "If the caller mentions any of the following, or any other medical emergency \
({keywords}), do not continue the conversation normally: tell them to hang up and call 911 \
immediately."
            ),
        };
        vec![
            emergency,
            "Never reveal appointment details, test results, or any other protected health \
information before the identity verification step has succeeded."
                .to_string(),
            "Never give medical advice or a diagnosis; clinical questions go to the \
clinical staff."
                .to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verification_precedes_phi_discussion() {
        let template = HealthcareTemplate;
        let script = template.procedural_script(&BusinessFacts {
            name: "Lakeside Family Medicine".to_string(),
            ..Default::default()
        });
        let verification = script.find("verify the caller's identity").unwrap();
        let phi = script
            .find("you may discuss protected health information")
            .unwrap();
        assert!(verification < phi);
    }

    #[test]
    fn verification_method_is_respected() {
        let template = HealthcareTemplate;
        let by_account = template.procedural_script(&BusinessFacts {
            name: "Lakeside".to_string(),
            verification_method: VerificationMethod::AccountNumber,
            ..Default::default()
        });
        assert!(by_account.contains("account number"));
        assert!(!by_account.contains("date of birth"));
    }

    #[test]
    fn emergency_rule_uses_configured_keywords() {
        let template = HealthcareTemplate;
        let rules = template.safety_rules(&BusinessFacts {
            name: "Lakeside".to_string(),
            emergency_keywords: vec!["anaphylaxis".to_string()],
            triage_line: Some("555-0199".to_string()),
            ..Default::default()
        });
        let emergency = &rules[0];
        assert!(emergency.contains("anaphylaxis"));
        assert!(emergency.contains("call 911"));
        assert!(emergency.contains("555-0199"));
        assert!(!emergency.contains("chest pain"));
    }

    #[test]
    fn emergency_rule_falls_back_to_default_keywords() {
        let template = HealthcareTemplate;
        let rules = template.safety_rules(&BusinessFacts::default());
        assert!(rules[0].contains("chest pain"));
        assert!(rules[0].contains("call 911"));
    }

    #[test]
    fn identity_line_lists_specialty_and_providers() {
        let template = HealthcareTemplate;
        let line = template.identity_line(&BusinessFacts {
            name: "Lakeside Family Medicine".to_string(),
            specialty: Some("family medicine".to_string()),
            providers: vec!["Dr. Okafor".to_string(), "Dr. Lindqvist".to_string()],
            ..Default::default()
        });
        assert!(line.contains("family medicine practice"));
        assert!(line.contains("Dr. Okafor, Dr. Lindqvist"));
    }
}

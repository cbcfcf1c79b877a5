//! Validation gate — precondition checks that run before any remote call.
//!
//! Side-effect free, and collects every violation instead of failing fast so
//! the onboarding UI can present the full list at once.

use crate::error::ValidationIssue;
use crate::model::OnboardingConfiguration;

/// Minimum length for operator-authored instructions in advanced mode.
pub const MIN_FREE_TEXT_LEN: usize = 50;

/// Check a configuration against the compilation preconditions.
pub fn validate(config: &OnboardingConfiguration) -> Result<(), Vec<ValidationIssue>> {
    let mut issues = Vec::new();

    if config.business.name.trim().is_empty() {
        issues.push(ValidationIssue::new(
            "business.name",
            "business or practice name is required",
        ));
    }

    if config.voice_selection.trim().is_empty() {
        issues.push(ValidationIssue::new(
            "voice_selection",
            "a voice must be selected",
        ));
    }

    // Exactly one of personality sliders / free-text instructions.
    match (&config.personality, config.free_text_instructions.as_deref()) {
        (Some(_), Some(_)) => issues.push(ValidationIssue::new(
            "personality",
            "provide either personality sliders or free-text instructions, not both",
        )),
        (None, None) => issues.push(ValidationIssue::new(
            "personality",
            "either personality sliders or free-text instructions are required",
        )),
        (None, Some(text)) if text.trim().chars().count() < MIN_FREE_TEXT_LEN => {
            issues.push(ValidationIssue::new(
                "free_text_instructions",
                format!(
                    "free-text instructions must be at least {MIN_FREE_TEXT_LEN} characters"
                ),
            ));
        }
        _ => {}
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BusinessFacts, Personality, Vertical};

    fn valid_config() -> OnboardingConfiguration {
        OnboardingConfiguration {
            owner_id: "acct-1".to_string(),
            vertical: Vertical::Restaurant,
            business: BusinessFacts {
                name: "Tony's Pizza".to_string(),
                ..Default::default()
            },
            personality: Some(Personality::new(8, 5, 7, 2)),
            voice_selection: "v1".to_string(),
            free_text_instructions: None,
        }
    }

    #[test]
    fn valid_configuration_passes() {
        assert!(validate(&valid_config()).is_ok());
    }

    #[test]
    fn all_violations_are_reported_at_once() {
        let config = OnboardingConfiguration {
            owner_id: "acct-1".to_string(),
            vertical: Vertical::Restaurant,
            business: BusinessFacts::default(),
            personality: None,
            voice_selection: "  ".to_string(),
            free_text_instructions: None,
        };
        let issues = validate(&config).unwrap_err();
        let fields: Vec<&str> = issues.iter().map(|i| i.field).collect();
        assert_eq!(issues.len(), 3);
        assert!(fields.contains(&"business.name"));
        assert!(fields.contains(&"voice_selection"));
        assert!(fields.contains(&"personality"));
    }

    #[test]
    fn both_personality_and_free_text_is_rejected() {
        let mut config = valid_config();
        config.free_text_instructions = Some(
            "Speak briskly, keep answers short, and always confirm the order back to the caller."
                .to_string(),
        );
        let issues = validate(&config).unwrap_err();
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("not both"));
    }

    #[test]
    fn short_free_text_is_rejected() {
        let mut config = valid_config();
        config.personality = None;
        config.free_text_instructions = Some("Be nice.".to_string());
        let issues = validate(&config).unwrap_err();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].field, "free_text_instructions");
    }

    #[test]
    fn fifty_character_free_text_is_accepted() {
        let mut config = valid_config();
        config.personality = None;
        config.free_text_instructions = Some("x".repeat(MIN_FREE_TEXT_LEN));
        assert!(validate(&config).is_ok());
    }
}

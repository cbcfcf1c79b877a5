//! Shared prompt scaffold.
//!
//! All four verticals emit the same section ordering — identity, behavior,
//! business facts, hours, knowledge, procedural script, safety rules,
//! closing — and differ only in the hooks a [`VerticalTemplate`] provides.
//! Keeping the scaffold in one place stops the per-vertical prompts drifting
//! out of sync.

use crate::compiler::personality;
use crate::model::{BusinessFacts, OnboardingConfiguration, Personality, Vertical};

/// Per-vertical hooks into the shared scaffold.
pub trait VerticalTemplate: Send + Sync {
    fn vertical(&self) -> Vertical;

    /// The opening identity line ("You are ...").
    fn identity_line(&self, facts: &BusinessFacts) -> String;

    /// Heading for the knowledge section ("Menu" for restaurants).
    fn knowledge_heading(&self) -> &'static str {
        "Knowledge"
    }

    /// The vertical's procedural script section.
    fn procedural_script(&self, facts: &BusinessFacts) -> String;

    /// The vertical's safety rules, one per line (rendered under "Never do").
    fn safety_rules(&self, facts: &BusinessFacts) -> Vec<String>;
}

const CLOSING: &str = "If the caller asks for something you cannot help with, say so honestly \
and offer to take a message. When the caller is done, thank them and end the call politely.";

/// Assemble the full system prompt for a configuration.
///
/// Deterministic: fixed section order, fixed weekday order, no timestamps.
pub fn assemble(template: &dyn VerticalTemplate, config: &OnboardingConfiguration) -> String {
    let facts = &config.business;
    let mut sections: Vec<String> = Vec::with_capacity(8);

    sections.push(template.identity_line(facts));
    sections.push(format!(
        "## How to speak\n{}",
        behavior_section(config)
    ));
    sections.push(facts_section(facts));
    sections.push(hours_section(facts));
    if let Some(knowledge) = facts.knowledge.as_deref() {
        if !knowledge.trim().is_empty() {
            sections.push(format!("## {}\n{}", template.knowledge_heading(), knowledge.trim()));
        }
    }
    sections.push(template.procedural_script(facts));

    let rules = template.safety_rules(facts);
    let rule_lines: Vec<String> = rules.iter().map(|r| format!("- {r}")).collect();
    sections.push(format!("## Never do\n{}", rule_lines.join("\n")));

    sections.push(CLOSING.to_string());

    sections.join("\n\n")
}

/// Behavior instructions: operator free text in advanced mode, otherwise the
/// personality-derived fragments in their fixed order.
fn behavior_section(config: &OnboardingConfiguration) -> String {
    if let Some(text) = config.free_text_instructions.as_deref() {
        return text.trim().to_string();
    }
    let personality = config
        .personality
        .unwrap_or(Personality::new(5, 5, 5, 5));
    personality::map(personality).fragments.join("\n")
}

fn facts_section(facts: &BusinessFacts) -> String {
    let mut lines = vec![
        "## Business information".to_string(),
        format!("Name: {}", facts.name),
    ];
    if !facts.phone.is_empty() {
        lines.push(format!("Phone: {}", facts.phone));
    }
    if !facts.address.is_empty() {
        lines.push(format!("Address: {}", facts.address));
    }
    lines.join("\n")
}

fn hours_section(facts: &BusinessFacts) -> String {
    let mut lines = vec!["## Hours".to_string()];
    for (day, hours) in facts.hours.days() {
        if hours.closed || hours.open.is_empty() {
            lines.push(format!("{day}: Closed"));
        } else {
            lines.push(format!("{day}: {} to {}", hours.open, hours.close));
        }
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DayHours;

    struct PlainTemplate;

    impl VerticalTemplate for PlainTemplate {
        fn vertical(&self) -> Vertical {
            Vertical::Receptionist
        }

        fn identity_line(&self, facts: &BusinessFacts) -> String {
            format!("You are the virtual receptionist for {}.", facts.name)
        }

        fn procedural_script(&self, _facts: &BusinessFacts) -> String {
            "## Handling calls\nIdentify what the caller needs.".to_string()
        }

        fn safety_rules(&self, _facts: &BusinessFacts) -> Vec<String> {
            vec!["Never guess at information you do not have.".to_string()]
        }
    }

    fn config_with(facts: BusinessFacts) -> OnboardingConfiguration {
        OnboardingConfiguration {
            owner_id: "acct".to_string(),
            vertical: Vertical::Receptionist,
            business: facts,
            personality: Some(Personality::new(5, 5, 5, 5)),
            voice_selection: "v1".to_string(),
            free_text_instructions: None,
        }
    }

    #[test]
    fn sections_appear_in_scaffold_order() {
        let prompt = assemble(
            &PlainTemplate,
            &config_with(BusinessFacts {
                name: "Acme".to_string(),
                phone: "555-0100".to_string(),
                knowledge: Some("We sell anvils.".to_string()),
                ..Default::default()
            }),
        );

        let identity = prompt.find("You are the virtual receptionist").unwrap();
        let behavior = prompt.find("## How to speak").unwrap();
        let facts = prompt.find("## Business information").unwrap();
        let hours = prompt.find("## Hours").unwrap();
        let knowledge = prompt.find("## Knowledge").unwrap();
        let procedure = prompt.find("## Handling calls").unwrap();
        let safety = prompt.find("## Never do").unwrap();
        let closing = prompt.find("end the call politely").unwrap();

        assert!(identity < behavior);
        assert!(behavior < facts);
        assert!(facts < hours);
        assert!(hours < knowledge);
        assert!(knowledge < procedure);
        assert!(procedure < safety);
        assert!(safety < closing);
    }

    #[test]
    fn empty_knowledge_emits_no_section() {
        let prompt = assemble(
            &PlainTemplate,
            &config_with(BusinessFacts {
                name: "Acme".to_string(),
                knowledge: Some("   ".to_string()),
                ..Default::default()
            }),
        );
        assert!(!prompt.contains("## Knowledge"));
    }

    #[test]
    fn hours_render_every_weekday() {
        let mut facts = BusinessFacts {
            name: "Acme".to_string(),
            ..Default::default()
        };
        facts.hours.monday = DayHours::open("9:00 AM", "5:00 PM");
        let prompt = assemble(&PlainTemplate, &config_with(facts));
        assert!(prompt.contains("Monday: 9:00 AM to 5:00 PM"));
        assert!(prompt.contains("Sunday: Closed"));
    }

    #[test]
    fn free_text_replaces_personality_fragments() {
        let mut config = config_with(BusinessFacts {
            name: "Acme".to_string(),
            ..Default::default()
        });
        config.personality = None;
        config.free_text_instructions =
            Some("Always speak like a 1940s radio announcer, briskly and with flair.".to_string());

        let prompt = assemble(&PlainTemplate, &config);
        assert!(prompt.contains("1940s radio announcer"));
        assert!(!prompt.contains("relaxed, natural pace"));
    }
}

//! Contact-center template — support queue duties plus escalation rules.

use crate::compiler::scaffold::VerticalTemplate;
use crate::compiler::verticals::capability_sections;
use crate::model::{BusinessFacts, Vertical};

pub struct ContactCenterTemplate;

impl VerticalTemplate for ContactCenterTemplate {
    fn vertical(&self) -> Vertical {
        Vertical::ContactCenter
    }

    fn identity_line(&self, facts: &BusinessFacts) -> String {
        format!(
            "You are a customer support agent for {}, handling inbound support calls.",
            facts.name
        )
    }

    fn procedural_script(&self, facts: &BusinessFacts) -> String {
        let mut parts = vec![
            "## Handling calls\nFind out what the caller's issue is, gather the details \
needed to act on it (name, contact information, order or account reference), and \
summarize the issue back before resolving or escalating."
                .to_string(),
        ];
        parts.extend(capability_sections(facts));
        if let Some(rules) = facts.escalation_rules.as_deref() {
            parts.push(format!("### Escalation\n{}", rules.trim()));
        }
        parts.join("\n\n")
    }

    fn safety_rules(&self, _facts: &BusinessFacts) -> Vec<String> {
        vec![
            "Never promise refunds, credits, or policy exceptions; escalate those requests \
instead."
                .to_string(),
            "Never argue with an upset caller; stay calm and follow the escalation rules."
                .to_string(),
        ]
    }
}

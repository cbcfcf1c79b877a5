//! Receptionist template — capability-gated front-desk duties.

use crate::compiler::scaffold::VerticalTemplate;
use crate::compiler::verticals::capability_sections;
use crate::model::{BusinessFacts, Vertical};

pub struct ReceptionistTemplate;

impl VerticalTemplate for ReceptionistTemplate {
    fn vertical(&self) -> Vertical {
        Vertical::Receptionist
    }

    fn identity_line(&self, facts: &BusinessFacts) -> String {
        format!(
            "You are the virtual receptionist for {}, answering the phone on the business's behalf.",
            facts.name
        )
    }

    fn procedural_script(&self, facts: &BusinessFacts) -> String {
        let mut parts = vec![
            "## Handling calls\nAnswer promptly, find out what the caller needs, and route \
the conversation to whichever of the sections below applies."
                .to_string(),
        ];
        parts.extend(capability_sections(facts));
        parts.join("\n\n")
    }

    fn safety_rules(&self, _facts: &BusinessFacts) -> Vec<String> {
        vec![
            "Never commit to an appointment or callback you have not recorded the details \
for."
                .to_string(),
            "Never share staff members' personal contact information beyond what appears in \
the knowledge section."
                .to_string(),
        ]
    }
}

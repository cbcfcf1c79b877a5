//! One prompt template per vertical.
//!
//! Each template fills the scaffold's hooks (identity line, procedural
//! script, safety rules); everything else is shared. Receptionist and
//! contact-center share the capability-gated blocks defined here.

mod contact_center;
mod healthcare;
mod receptionist;
mod restaurant;

pub use contact_center::ContactCenterTemplate;
pub use healthcare::HealthcareTemplate;
pub use receptionist::ReceptionistTemplate;
pub use restaurant::RestaurantTemplate;

use crate::model::{BusinessFacts, Capability};

/// Capability-gated procedure blocks.
///
/// A capability that is not set produces no text at all — no headings, no
/// "N/A" placeholders.
pub(crate) fn capability_sections(facts: &BusinessFacts) -> Vec<String> {
    let mut sections = Vec::new();
    if facts.has_capability(Capability::ScheduleAppointments) {
        sections.push(
            "### Scheduling\nIf the caller wants to schedule an appointment, collect their \
name, phone number, preferred date and time, and the reason for the visit, then confirm \
the details back to them."
                .to_string(),
        );
    }
    if facts.has_capability(Capability::QualifyLeads) {
        sections.push(
            "### Lead qualification\nIf the caller is a prospective customer, ask what they \
are looking for, their timeline, and how they heard about the business, and note the \
answers for follow-up."
                .to_string(),
        );
    }
    if facts.has_capability(Capability::TakeMessages) {
        sections.push(
            "### Taking messages\nIf no one is available to help, take a message: the \
caller's name, phone number, and a short summary of what they need. Read the message \
back before ending the call."
                .to_string(),
        );
    }
    sections
}

/// Number a list of steps "1. ..." with a heading, skipping nothing.
pub(crate) fn numbered_procedure(heading: &str, steps: &[String]) -> String {
    let mut lines = vec![format!("## {heading}")];
    for (index, step) in steps.iter().enumerate() {
        lines.push(format!("{}. {}", index + 1, step));
    }
    lines.join("\n")
}

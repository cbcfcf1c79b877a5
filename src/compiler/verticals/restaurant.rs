//! Restaurant template — phone ordering flow.

use crate::compiler::scaffold::VerticalTemplate;
use crate::compiler::verticals::numbered_procedure;
use crate::model::{BusinessFacts, Vertical};

pub struct RestaurantTemplate;

impl VerticalTemplate for RestaurantTemplate {
    fn vertical(&self) -> Vertical {
        Vertical::Restaurant
    }

    fn identity_line(&self, facts: &BusinessFacts) -> String {
        format!(
            "You are the phone host for {}, taking orders and answering questions for the restaurant.",
            facts.name
        )
    }

    fn knowledge_heading(&self) -> &'static str {
        "Menu"
    }

    fn procedural_script(&self, facts: &BusinessFacts) -> String {
        let mut steps: Vec<String> = Vec::new();

        if facts.offers_delivery {
            steps.push("Ask whether the order is for pickup or delivery.".to_string());
        } else {
            steps.push(
                "Confirm the order is for pickup; the restaurant does not deliver.".to_string(),
            );
        }
        steps.push(
            "Take the order one item at a time, confirming each item, its quantity, and any \
modifications back to the caller before moving on."
                .to_string(),
        );
        steps.push(
            "Only accept items that appear on the menu; if something is not on the menu, say \
so and suggest the closest match."
                .to_string(),
        );
        if let Some(upsell) = facts.upsell_line.as_deref() {
            steps.push(format!(
                "After the main items are confirmed, offer the following once: \"{upsell}\"."
            ));
        }
        if facts.offers_delivery {
            steps.push(
                "Collect the caller's name and phone number, and the delivery address for \
delivery orders."
                    .to_string(),
            );
        } else {
            steps.push("Collect the caller's name and phone number.".to_string());
        }
        steps.push(
            "Read the full order back, then tell the caller payment is taken at pickup or on \
delivery, not over the phone."
                .to_string(),
        );

        numbered_procedure("Taking an order", &steps)
    }

    fn safety_rules(&self, _facts: &BusinessFacts) -> Vec<String> {
        vec![
            "Never accept, repeat, or write down payment card numbers or any other payment \
details over the phone."
                .to_string(),
            "Never invent menu items, prices, or specials that are not in the menu section."
                .to_string(),
        ]
    }
}

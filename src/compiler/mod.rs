//! Agent configuration compiler.
//!
//! Turns an `OnboardingConfiguration` into a deterministic prompt spec plus
//! a clamped voice-engine parameter set. No I/O: the only ambient input is
//! the injected clock, used for the time-of-day word in the formal greeting.

pub mod output;
pub mod personality;
pub mod scaffold;
pub mod verticals;

pub use output::{AmbientSoundProfile, CompiledPromptSpec, VoiceEngineParameters};
pub use scaffold::VerticalTemplate;

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::clock::{time_of_day_phrase, Clock};
use crate::error::ConfigurationError;
use crate::model::{OnboardingConfiguration, Vertical};

/// Everything compilation produces for one submission.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledOutput {
    pub prompt: CompiledPromptSpec,
    pub engine: VoiceEngineParameters,
}

/// Template registry keyed by vertical.
pub struct Compiler {
    templates: HashMap<Vertical, Box<dyn VerticalTemplate>>,
    clock: Arc<dyn Clock>,
}

impl Compiler {
    /// A compiler with all four built-in vertical templates registered.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        let mut templates: HashMap<Vertical, Box<dyn VerticalTemplate>> = HashMap::new();
        templates.insert(
            Vertical::Restaurant,
            Box::new(verticals::RestaurantTemplate),
        );
        templates.insert(
            Vertical::Healthcare,
            Box::new(verticals::HealthcareTemplate),
        );
        templates.insert(
            Vertical::Receptionist,
            Box::new(verticals::ReceptionistTemplate),
        );
        templates.insert(
            Vertical::ContactCenter,
            Box::new(verticals::ContactCenterTemplate),
        );
        Self { templates, clock }
    }

    /// A compiler with an explicit template set (tests use this to exercise
    /// the unregistered-vertical path).
    pub fn with_templates(
        templates: HashMap<Vertical, Box<dyn VerticalTemplate>>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self { templates, clock }
    }

    /// Compile a configuration into its prompt spec and engine parameters.
    ///
    /// The only failure is an unregistered vertical; validation of the
    /// configuration itself happens before compilation.
    pub fn compile(
        &self,
        config: &OnboardingConfiguration,
    ) -> Result<CompiledOutput, ConfigurationError> {
        let template = self
            .templates
            .get(&config.vertical)
            .ok_or(ConfigurationError::UnregisteredVertical(config.vertical))?;

        let prompt = CompiledPromptSpec {
            greeting: greeting(config, self.clock.now()),
            system_prompt: scaffold::assemble(template.as_ref(), config),
        };

        let mut engine = VoiceEngineParameters::defaults_for(config.vertical);
        if let Some(personality) = config.personality {
            let mapping = personality::map(personality);
            engine.voice_speed = mapping.voice_speed;
            engine.responsiveness = mapping.responsiveness;
            engine.backchannel_frequency = mapping.backchannel_frequency;
        }

        Ok(CompiledOutput {
            prompt,
            engine: engine.clamped(),
        })
    }
}

/// Single-sentence greeting from the formality/warmth thresholds.
///
/// The formal variant is the declared determinism exception: it embeds a
/// time-of-day word taken from `now`.
fn greeting(config: &OnboardingConfiguration, now: DateTime<Utc>) -> String {
    let name = &config.business.name;
    match config.personality {
        Some(p) if p.formality >= 8 => format!(
            "Good {}. Thank you for calling {}. How may I assist you?",
            time_of_day_phrase(now),
            name
        ),
        Some(p) if p.warmth >= 8 && p.formality <= 3 => {
            format!("Hey there, thanks for calling {name}! What can I do for you?")
        }
        Some(_) => format!("Thanks for calling {name}. How can I help you today?"),
        None => format!("Thank you for calling {name}. How can I help?"),
    }
}

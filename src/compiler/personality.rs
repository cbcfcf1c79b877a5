//! Personality mapping engine.
//!
//! Pure, total function from the four onboarding sliders to instruction
//! fragments and numeric engine overrides. The band thresholds and the
//! numeric formulas are contracts: every vertical template and the
//! regression tests rely on them exactly as written.

use crate::model::Personality;

/// Slider band. Boundary values go to the outer bands: ≤3 is low, ≥8 is
/// high, 4–7 is mid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    Low,
    Mid,
    High,
}

/// Bucket a slider value. Inputs outside [1, 10] are clamped first so the
/// mapping stays total.
pub fn band(value: u8) -> Band {
    match value.clamp(1, 10) {
        0..=3 => Band::Low,
        8..=10 => Band::High,
        _ => Band::Mid,
    }
}

/// Output of the mapping engine: one instruction sentence per dimension in
/// fixed order (warmth, pace, chattiness, formality) plus the numeric
/// overrides applied on top of the vertical's parameter defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct PersonalityMapping {
    pub fragments: Vec<&'static str>,
    pub voice_speed: f64,
    pub responsiveness: f64,
    pub backchannel_frequency: f64,
}

/// Map the four sliders to instruction fragments and engine overrides.
pub fn map(personality: Personality) -> PersonalityMapping {
    let warmth = match band(personality.warmth) {
        Band::Low => "Keep a courteous, businesslike distance; be polite but reserved.",
        Band::Mid => "Be friendly and approachable without overdoing it.",
        Band::High => "Be warm and personable; make the caller feel genuinely welcome.",
    };
    let pace = match band(personality.pace) {
        Band::Low => "Speak slowly and deliberately, giving the caller time to think.",
        Band::Mid => "Speak at a relaxed, natural pace.",
        Band::High => "Keep the conversation moving at a brisk, energetic pace.",
    };
    let chattiness = match band(personality.chattiness) {
        Band::Low => "Keep responses short and to the point; avoid small talk.",
        Band::Mid => "Offer a little conversation where it helps, but stay focused.",
        Band::High => "Be talkative and engaging; volunteer helpful details freely.",
    };
    let formality = match band(personality.formality) {
        Band::Low => "Use casual, everyday language, like chatting with a regular.",
        Band::Mid => "Use plain, professional language.",
        Band::High => "Use formal, polished language and complete sentences at all times.",
    };

    let pace_value = f64::from(personality.pace.clamp(1, 10));
    let chattiness_value = f64::from(personality.chattiness.clamp(1, 10));

    PersonalityMapping {
        fragments: vec![warmth, pace, chattiness, formality],
        voice_speed: (0.7 + (pace_value / 10.0) * 0.6).clamp(0.5, 2.0),
        responsiveness: chattiness_value / 10.0,
        backchannel_frequency: if chattiness_value > 5.0 { 0.7 } else { 0.5 },
    }
}

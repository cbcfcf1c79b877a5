//! Compiled artifacts: the prompt spec and the voice-engine parameter set.

use serde::{Deserialize, Serialize};

use crate::model::Vertical;

/// Deterministic natural-language instruction document for the
/// conversational model.
///
/// Byte-identical for byte-identical input; the only declared exception is
/// the time-of-day word in the formal greeting, which comes from the
/// injected clock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompiledPromptSpec {
    /// Single-sentence greeting spoken when the call connects.
    pub greeting: String,
    /// Ordered concatenation of the scaffold sections.
    pub system_prompt: String,
}

/// Background audio mixed into the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AmbientSoundProfile {
    None,
    CoffeeShop,
    Office,
    Restaurant,
}

/// Numeric and enum parameters sent to the voice engine.
///
/// Every numeric field is clamped to its declared closed range before it
/// leaves the compiler, regardless of upstream input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceEngineParameters {
    /// [0.5, 2.0]
    pub voice_speed: f64,
    /// [0.0, 1.0]
    pub responsiveness: f64,
    /// [0.0, 1.0]
    pub interruption_sensitivity: f64,
    /// [0.0, 1.0]
    pub backchannel_frequency: f64,
    /// [0.0, 1.0]
    pub ambient_volume: f64,
    pub enable_backchannel: bool,
    pub enable_voicemail_detection: bool,
    pub ambient_sound_profile: AmbientSoundProfile,
    /// [60_000, 3_600_000]
    pub max_call_duration_ms: u64,
    /// [10_000, 600_000]
    pub end_call_after_silence_ms: u64,
}

impl VoiceEngineParameters {
    /// Baseline parameters per vertical, before personality overrides.
    ///
    /// Also used as-is in advanced (free-text) mode, which carries no
    /// personality sliders.
    pub fn defaults_for(vertical: Vertical) -> Self {
        let base = Self {
            voice_speed: 1.0,
            responsiveness: 0.5,
            interruption_sensitivity: 0.5,
            backchannel_frequency: 0.5,
            ambient_volume: 0.2,
            enable_backchannel: true,
            enable_voicemail_detection: false,
            ambient_sound_profile: AmbientSoundProfile::Office,
            max_call_duration_ms: 1_800_000,
            end_call_after_silence_ms: 30_000,
        };
        match vertical {
            Vertical::Restaurant => Self {
                ambient_sound_profile: AmbientSoundProfile::Restaurant,
                ambient_volume: 0.3,
                ..base
            },
            Vertical::Healthcare => Self {
                ambient_sound_profile: AmbientSoundProfile::None,
                ambient_volume: 0.0,
                ..base
            },
            Vertical::Receptionist => base,
            Vertical::ContactCenter => Self {
                enable_voicemail_detection: true,
                ..base
            },
        }
    }

    /// Clamp every numeric field to its declared range.
    pub fn clamped(mut self) -> Self {
        self.voice_speed = self.voice_speed.clamp(0.5, 2.0);
        self.responsiveness = self.responsiveness.clamp(0.0, 1.0);
        self.interruption_sensitivity = self.interruption_sensitivity.clamp(0.0, 1.0);
        self.backchannel_frequency = self.backchannel_frequency.clamp(0.0, 1.0);
        self.ambient_volume = self.ambient_volume.clamp(0.0, 1.0);
        self.max_call_duration_ms = self.max_call_duration_ms.clamp(60_000, 3_600_000);
        self.end_call_after_silence_ms = self.end_call_after_silence_ms.clamp(10_000, 600_000);
        self
    }

    /// Whether every numeric field is inside its declared range.
    pub fn in_range(&self) -> bool {
        (0.5..=2.0).contains(&self.voice_speed)
            && (0.0..=1.0).contains(&self.responsiveness)
            && (0.0..=1.0).contains(&self.interruption_sensitivity)
            && (0.0..=1.0).contains(&self.backchannel_frequency)
            && (0.0..=1.0).contains(&self.ambient_volume)
            && (60_000..=3_600_000).contains(&self.max_call_duration_ms)
            && (10_000..=600_000).contains(&self.end_call_after_silence_ms)
    }
}

//! Onboarding configuration and provisioning record models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Business category. Each vertical has its own procedural and safety
/// template; everything else in the compiled prompt is shared scaffold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Vertical {
    Restaurant,
    Healthcare,
    Receptionist,
    ContactCenter,
}

impl Vertical {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Restaurant => "restaurant",
            Self::Healthcare => "healthcare",
            Self::Receptionist => "receptionist",
            Self::ContactCenter => "contact-center",
        }
    }
}

impl std::fmt::Display for Vertical {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Opening hours for one weekday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayHours {
    #[serde(default)]
    pub closed: bool,
    #[serde(default)]
    pub open: String,
    #[serde(default)]
    pub close: String,
}

impl DayHours {
    pub fn open(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self {
            closed: false,
            open: open.into(),
            close: close.into(),
        }
    }

    pub fn closed() -> Self {
        Self {
            closed: true,
            open: String::new(),
            close: String::new(),
        }
    }
}

impl Default for DayHours {
    fn default() -> Self {
        Self::closed()
    }
}

/// Hours by weekday, Monday first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyHours {
    #[serde(default)]
    pub monday: DayHours,
    #[serde(default)]
    pub tuesday: DayHours,
    #[serde(default)]
    pub wednesday: DayHours,
    #[serde(default)]
    pub thursday: DayHours,
    #[serde(default)]
    pub friday: DayHours,
    #[serde(default)]
    pub saturday: DayHours,
    #[serde(default)]
    pub sunday: DayHours,
}

impl WeeklyHours {
    /// Days in fixed Monday-to-Sunday order, for deterministic rendering.
    pub fn days(&self) -> [(&'static str, &DayHours); 7] {
        [
            ("Monday", &self.monday),
            ("Tuesday", &self.tuesday),
            ("Wednesday", &self.wednesday),
            ("Thursday", &self.thursday),
            ("Friday", &self.friday),
            ("Saturday", &self.saturday),
            ("Sunday", &self.sunday),
        ]
    }
}

/// How a healthcare practice verifies a caller before any PHI is discussed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationMethod {
    NameAndDob,
    AccountNumber,
}

impl Default for VerificationMethod {
    fn default() -> Self {
        Self::NameAndDob
    }
}

/// What a receptionist / contact-center agent is allowed to handle.
///
/// Blocks for capabilities not listed here must not appear in the compiled
/// prompt at all (no placeholders).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    ScheduleAppointments,
    QualifyLeads,
    TakeMessages,
}

/// Facts about the business, collected during onboarding.
///
/// The vertical-specific fields are optional with serde defaults; each
/// vertical's template reads only the fields it cares about.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BusinessFacts {
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub hours: WeeklyHours,
    /// Menu text (restaurant) or knowledge-base text (everyone else).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub knowledge: Option<String>,

    // Restaurant
    #[serde(default)]
    pub offers_delivery: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upsell_line: Option<String>,

    // Healthcare
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialty: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub providers: Vec<String>,
    #[serde(default)]
    pub verification_method: VerificationMethod,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub emergency_keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub triage_line: Option<String>,

    // Receptionist / contact-center
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub capabilities: Vec<Capability>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub escalation_rules: Option<String>,
}

impl BusinessFacts {
    pub fn has_capability(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }
}

/// Four personality sliders, each nominally in [1, 10].
///
/// The mapping engine clamps out-of-range values so every input has a
/// defined output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Personality {
    pub warmth: u8,
    pub pace: u8,
    pub chattiness: u8,
    pub formality: u8,
}

impl Personality {
    pub fn new(warmth: u8, pace: u8, chattiness: u8, formality: u8) -> Self {
        Self {
            warmth,
            pace,
            chattiness,
            formality,
        }
    }
}

/// One onboarding submission — immutable input to compilation and
/// provisioning.
///
/// Invariant (enforced by the validation gate): exactly one of `personality`
/// and `free_text_instructions` (length ≥ 50) is present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OnboardingConfiguration {
    pub owner_id: String,
    pub vertical: Vertical,
    pub business: BusinessFacts,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personality: Option<Personality>,
    /// Identifier of a pre-existing voice resource. Opaque, not validated
    /// locally beyond presence.
    pub voice_selection: String,
    /// Operator-authored instructions (advanced mode). When present they
    /// substitute for the personality-derived behavior section.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub free_text_instructions: Option<String>,
}

/// Lifecycle of a provisioning record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordStatus {
    Draft,
    Creating,
    Active,
    Failed,
}

impl RecordStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Creating => "creating",
            Self::Active => "active",
            Self::Failed => "failed",
        }
    }
}

impl std::fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Durable record of one provisioning attempt.
///
/// Created in `creating` the instant the first remote call is dispatched, so
/// partial failures are observable even if the process crashes mid-flight.
/// Never deleted by this subsystem; failed records are retained for operator
/// diagnosis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProvisionedAgentRecord {
    pub local_id: Uuid,
    pub owner_id: String,
    pub vertical: Vertical,
    pub model_resource_id: Option<String>,
    pub agent_resource_id: Option<String>,
    pub status: RecordStatus,
    pub error_message: Option<String>,
    /// The full configuration plus derived specs, for auditability and
    /// replay.
    pub config_snapshot: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProvisionedAgentRecord {
    /// A fresh record in `creating` status with no remote ids yet.
    pub fn creating(
        owner_id: impl Into<String>,
        vertical: Vertical,
        config_snapshot: serde_json::Value,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            local_id: Uuid::new_v4(),
            owner_id: owner_id.into(),
            vertical,
            model_resource_id: None,
            agent_resource_id: None,
            status: RecordStatus::Creating,
            error_message: None,
            config_snapshot,
            created_at: now,
            updated_at: now,
        }
    }
}

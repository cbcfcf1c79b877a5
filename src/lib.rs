//! Callsmith — agent configuration compiler and provisioning orchestrator.
//!
//! Turns a business owner's onboarding answers into a deterministic system
//! prompt, a clamped voice-engine parameter set, two remote resources on the
//! agent platform, and a durable local record of the attempt.

pub mod clock;
pub mod compiler;
pub mod config;
pub mod error;
pub mod model;
pub mod platform;
pub mod provision;
pub mod store;
pub mod validate;

// ABOUTME: Core data models shared between session readers and the metrics engine
// ABOUTME: Re-exports heart rate samples and athlete attributes

/// Timestamped heart rate readings
mod sample;

/// Athlete attributes consumed by scoring models
mod athlete;

pub use athlete::{Sex, UnknownSexError};
pub use sample::HeartRateSample;

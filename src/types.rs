// src/types.rs

use std::fmt;

use serde::{Deserialize, Serialize};

/// Difficulty tier of a topic.
///
/// Callers may supply any tier; the planner overwrites it from performance
/// signals once per run (see [`crate::plan::difficulty`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DifficultyTier {
    #[serde(alias = "easy")]
    Easy,
    #[default]
    #[serde(alias = "medium")]
    Medium,
    #[serde(alias = "hard")]
    Hard,
}

impl DifficultyTier {
    pub fn label(self) -> &'static str {
        match self {
            DifficultyTier::Easy => "Easy",
            DifficultyTier::Medium => "Medium",
            DifficultyTier::Hard => "Hard",
        }
    }
}

impl fmt::Display for DifficultyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}


/// Coarse time-of-day preference; decides where each study day starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimePreference {
    #[default]
    #[serde(alias = "morning")]
    Morning,
    #[serde(alias = "afternoon")]
    Afternoon,
}

impl TimePreference {
    /// Hour of day (24h clock) at which the first session starts.
    pub fn start_hour(self) -> u32 {
        match self {
            TimePreference::Morning => 9,
            TimePreference::Afternoon => 14,
        }
    }
}

impl fmt::Display for TimePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimePreference::Morning => f.write_str("Morning"),
            TimePreference::Afternoon => f.write_str("Afternoon"),
        }
    }
}


/// Label attached to a scheduled session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionType {
    #[serde(rename = "Deep Work")]
    DeepWork,
    /// Urgency cue for weak topics; assigned by a random draw.
    #[serde(rename = "Emergency Practice")]
    EmergencyPractice,
}

impl fmt::Display for SessionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionType::DeepWork => f.write_str("Deep Work"),
            SessionType::EmergencyPractice => f.write_str("Emergency Practice"),
        }
    }
}

/// Lifecycle status of a session. The planner only ever emits `Planned`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionStatus {
    #[default]
    Planned,
    Completed,
    Missed,
    Rescheduled,
}

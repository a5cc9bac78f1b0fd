// src/config/model.rs

use serde::{Deserialize, Serialize};

use crate::plan::model::{LearnerProfile, PlanRequest, Topic};

/// Plan file as read from disk, before validation.
///
/// ```toml
/// request_id = "week-42"
///
/// [planner]
/// horizon_days = 7
///
/// [profile]
/// name = "Ada"
///
/// [profile.preferences]
/// daily_study_hours = 4.0
/// preferred_time = "Morning"
///
/// [profile.behavior]
/// missed_streak = 1
///
/// [[topic]]
/// id = "trees"
/// name = "Trees"
/// subject_id = "dsa"
/// avg_quiz_score = 35
///
/// [[topic]]
/// id = "graphs"
/// name = "Graph Theory"
/// subject_id = "dsa"
/// prerequisites = ["trees"]
/// ```
///
/// JSON files use the same shape, with `topics` accepted for the topic list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPlanFile {
    #[serde(default)]
    pub request_id: Option<String>,

    /// Planner tunables from `[planner]`.
    #[serde(default)]
    pub planner: PlannerSection,

    #[serde(default)]
    pub profile: LearnerProfile,

    /// Topics in request order from `[[topic]]`.
    #[serde(default, rename = "topic", alias = "topics")]
    pub topics: Vec<Topic>,
}

/// Validated plan file. Build it with `PlanFile::try_from(raw)`.
#[derive(Debug, Clone)]
pub struct PlanFile {
    pub planner: PlannerSection,
    pub request: PlanRequest,
}

impl PlanFile {
    pub(crate) fn new_unchecked(planner: PlannerSection, request: PlanRequest) -> Self {
        Self { planner, request }
    }
}

/// `[planner]` section. Every field defaults to the standard planning policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerSection {
    /// Number of days planned, starting today.
    #[serde(default = "default_horizon_days")]
    pub horizon_days: u32,

    /// How many sessions are returned to the caller; the full schedule is
    /// still cached for mission lookups.
    #[serde(default = "default_max_returned_sessions")]
    pub max_returned_sessions: usize,

    /// Capacity multiplier applied when the missed streak is too long.
    #[serde(default = "default_reduced_capacity_factor")]
    pub reduced_capacity_factor: f64,

    /// Missed streaks strictly above this reduce capacity.
    #[serde(default = "default_missed_streak_threshold")]
    pub missed_streak_threshold: u32,

    /// Probability that a weak topic is labelled Emergency Practice.
    #[serde(default = "default_emergency_probability")]
    pub emergency_probability: f64,

    /// Topics scoring below this are eligible for the Emergency Practice draw.
    #[serde(default = "default_emergency_score_threshold")]
    pub emergency_score_threshold: f64,
}

fn default_horizon_days() -> u32 {
    7
}

fn default_max_returned_sessions() -> usize {
    20
}

fn default_reduced_capacity_factor() -> f64 {
    0.7
}

fn default_missed_streak_threshold() -> u32 {
    2
}

fn default_emergency_probability() -> f64 {
    0.3
}

fn default_emergency_score_threshold() -> f64 {
    50.0
}

impl Default for PlannerSection {
    fn default() -> Self {
        Self {
            horizon_days: default_horizon_days(),
            max_returned_sessions: default_max_returned_sessions(),
            reduced_capacity_factor: default_reduced_capacity_factor(),
            missed_streak_threshold: default_missed_streak_threshold(),
            emergency_probability: default_emergency_probability(),
            emergency_score_threshold: default_emergency_score_threshold(),
        }
    }
}

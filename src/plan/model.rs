// src/plan/model.rs

//! Request, session and response records exchanged with callers.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::types::{DifficultyTier, SessionStatus, SessionType, TimePreference};

/// Canonical topic identifier type used throughout the planner.
pub type TopicId = String;

/// One unit of study content together with its performance history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    pub id: TopicId,
    pub name: String,
    pub subject_id: String,

    /// Rewritten by the difficulty adapter on every planning run.
    #[serde(default, alias = "difficulty_level")]
    pub difficulty: DifficultyTier,

    /// Average quiz score in percent (0-100).
    #[serde(default)]
    pub avg_quiz_score: f64,

    #[serde(default)]
    pub revisions_completed: u32,

    #[serde(default, alias = "failure_frequency")]
    pub failure_count: u32,

    /// Topics that must be studied before this one.
    #[serde(default)]
    pub prerequisites: Vec<TopicId>,
}

impl Topic {
    pub fn new(id: impl Into<String>, name: impl Into<String>, subject_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            subject_id: subject_id.into(),
            difficulty: DifficultyTier::default(),
            avg_quiz_score: 0.0,
            revisions_completed: 0,
            failure_count: 0,
            prerequisites: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyPreferences {
    #[serde(default = "default_daily_study_hours")]
    pub daily_study_hours: f64,

    #[serde(default)]
    pub preferred_time: TimePreference,
}

fn default_daily_study_hours() -> f64 {
    4.0
}

impl Default for StudyPreferences {
    fn default() -> Self {
        Self {
            daily_study_hours: default_daily_study_hours(),
            preferred_time: TimePreference::default(),
        }
    }
}

/// Behaviour signals tracked for the learner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearnerBehavior {
    /// Consecutive planning periods with missed sessions.
    #[serde(default)]
    pub missed_streak: u32,

    #[serde(default)]
    pub last_session_delay_minutes: u32,

    /// Fraction of planned sessions completed over the last 7 days (0-1).
    #[serde(default = "default_completion_rate")]
    pub completion_rate_7d: f64,
}

fn default_completion_rate() -> f64 {
    0.8
}

impl Default for LearnerBehavior {
    fn default() -> Self {
        Self {
            missed_streak: 0,
            last_session_delay_minutes: 0,
            completion_rate_7d: default_completion_rate(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LearnerProfile {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub preferences: StudyPreferences,

    #[serde(default)]
    pub behavior: LearnerBehavior,
}

/// Everything one planning run needs from the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanRequest {
    /// Cache key for the resulting plan; `None` means [`crate::engine::DEFAULT_REQUEST_ID`].
    #[serde(default)]
    pub request_id: Option<String>,

    pub profile: LearnerProfile,

    #[serde(default)]
    pub topics: Vec<Topic>,
}

/// A scheduled, time-boxed block of study assigned to exactly one topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudySession {
    pub id: String,
    pub subject_name: String,
    pub topic_id: TopicId,
    pub topic_name: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub duration_minutes: u32,
    pub session_type: SessionType,
    /// Adapted tier of the topic at scheduling time.
    pub difficulty: DifficultyTier,
    pub priority_score: f64,
    pub reason: String,
    pub status: SessionStatus,
}

impl StudySession {
    pub fn date(&self) -> NaiveDate {
        self.start_time.date()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyMission {
    pub date: NaiveDate,
    pub focus_theme: String,
    pub sessions: Vec<StudySession>,
    pub energy_tip: String,
}

/// Read-only dashboard figures derived from one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analytics {
    /// 0-100, from the 7-day completion rate.
    pub consistency_score: u8,
    pub predicted_confidence: f64,
    /// At most three topic names.
    pub risk_subjects: Vec<String>,
    pub top_productive_hour: String,
    /// Topic id -> ids of topics that directly depend on it.
    pub dependency_graph: BTreeMap<TopicId, Vec<TopicId>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanResponse {
    pub request_id: String,
    pub student_name: String,
    pub generated_at: NaiveDateTime,
    pub daily_mission: DailyMission,
    /// First sessions of the schedule in day-major order, capped.
    pub upcoming_schedule: Vec<StudySession>,
    pub analytics: Analytics,
    pub insights: Vec<String>,
}

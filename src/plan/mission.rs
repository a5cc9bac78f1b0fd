// src/plan/mission.rs

//! "Today" view derived from a schedule.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::plan::model::{DailyMission, StudySession};
use crate::plan::scheduler::Schedule;
use crate::types::DifficultyTier;

pub const ENERGY_TIP: &str = "Cognitive load is high. Take a 10m walk every 45m.";

/// More sessions than this on one day make it a sprint day.
const HIGH_VELOCITY_SESSIONS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissionTheme {
    /// At least one Hard topic is on the day.
    DeepClimb,
    HighVelocity,
    MomentumBuilder,
}

impl MissionTheme {
    pub fn for_sessions(sessions: &[StudySession]) -> Self {
        if sessions.iter().any(|s| s.difficulty == DifficultyTier::Hard) {
            MissionTheme::DeepClimb
        } else if sessions.len() > HIGH_VELOCITY_SESSIONS {
            MissionTheme::HighVelocity
        } else {
            MissionTheme::MomentumBuilder
        }
    }
}

impl fmt::Display for MissionTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissionTheme::DeepClimb => f.write_str("Deep Climb Day"),
            MissionTheme::HighVelocity => f.write_str("High Velocity Sprints"),
            MissionTheme::MomentumBuilder => f.write_str("Momentum Builder"),
        }
    }
}

/// Sessions for `today`, or for the day after when today has none.
///
/// Only one day of lookahead is done; if tomorrow is empty too the mission is
/// dated tomorrow and carries no sessions.
pub fn compose_daily_mission(schedule: &Schedule, today: NaiveDate) -> DailyMission {
    let mut date = today;
    let mut sessions: Vec<StudySession> = schedule.on_date(today).into_iter().cloned().collect();

    if sessions.is_empty() {
        if let Some(tomorrow) = today.succ_opt() {
            date = tomorrow;
            sessions = schedule.on_date(tomorrow).into_iter().cloned().collect();
        }
    }

    DailyMission {
        date,
        focus_theme: MissionTheme::for_sessions(&sessions).to_string(),
        sessions,
        energy_tip: ENERGY_TIP.to_string(),
    }
}

// src/config/validate.rs

use std::collections::HashSet;

use crate::config::model::{PlanFile, PlannerSection, RawPlanFile};
use crate::errors::{PlannerError, Result};
use crate::plan::model::{PlanRequest, Topic};

impl TryFrom<RawPlanFile> for PlanFile {
    type Error = PlannerError;

    fn try_from(raw: RawPlanFile) -> std::result::Result<Self, Self::Error> {
        validate_planner_section(&raw.planner)?;
        let request = PlanRequest {
            request_id: raw.request_id,
            profile: raw.profile,
            topics: raw.topics,
        };
        validate_request(&request)?;
        Ok(PlanFile::new_unchecked(raw.planner, request))
    }
}

/// Check a request before planning.
///
/// An empty topic list is valid and yields an empty schedule.
pub fn validate_request(request: &PlanRequest) -> Result<()> {
    validate_profile(request)?;
    validate_topics(&request.topics)?;
    Ok(())
}

pub fn validate_planner_section(planner: &PlannerSection) -> Result<()> {
    if planner.horizon_days == 0 {
        return Err(PlannerError::ConfigError(
            "[planner].horizon_days must be >= 1 (got 0)".to_string(),
        ));
    }

    if !(0.0..=1.0).contains(&planner.reduced_capacity_factor) {
        return Err(PlannerError::ConfigError(format!(
            "[planner].reduced_capacity_factor must be within 0..=1 (got {})",
            planner.reduced_capacity_factor
        )));
    }

    if !(0.0..=1.0).contains(&planner.emergency_probability) {
        return Err(PlannerError::ConfigError(format!(
            "[planner].emergency_probability must be within 0..=1 (got {})",
            planner.emergency_probability
        )));
    }

    Ok(())
}

fn validate_profile(request: &PlanRequest) -> Result<()> {
    let prefs = &request.profile.preferences;
    let hours = prefs.daily_study_hours;

    if !hours.is_finite() || hours < 0.0 {
        return Err(PlannerError::ConfigError(format!(
            "daily_study_hours must be a non-negative number (got {hours})"
        )));
    }

    // Sessions must not run past midnight, or they would land on the next day.
    let start_hour = prefs.preferred_time.start_hour();
    let available = f64::from(24 - start_hour);
    if hours > available {
        return Err(PlannerError::ConfigError(format!(
            "daily_study_hours {hours} does not fit between {start_hour}:00 and midnight \
             ({} preference allows at most {available})",
            prefs.preferred_time
        )));
    }

    let rate = request.profile.behavior.completion_rate_7d;
    if !(0.0..=1.0).contains(&rate) {
        return Err(PlannerError::ConfigError(format!(
            "completion_rate_7d must be within 0..=1 (got {rate})"
        )));
    }

    Ok(())
}

fn validate_topics(topics: &[Topic]) -> Result<()> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(topics.len());

    for topic in topics {
        if topic.id.trim().is_empty() {
            return Err(PlannerError::ConfigError(format!(
                "topic '{}' has an empty id",
                topic.name
            )));
        }
        if !seen.insert(topic.id.as_str()) {
            return Err(PlannerError::ConfigError(format!(
                "duplicate topic id '{}'",
                topic.id
            )));
        }
        if !(0.0..=100.0).contains(&topic.avg_quiz_score) {
            return Err(PlannerError::ConfigError(format!(
                "topic '{}' has avg_quiz_score {} outside 0..=100",
                topic.id, topic.avg_quiz_score
            )));
        }
    }

    Ok(())
}

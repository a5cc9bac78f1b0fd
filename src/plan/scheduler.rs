// src/plan/scheduler.rs

use std::collections::{HashMap, HashSet};

use chrono::{Days, NaiveDate, NaiveDateTime, TimeDelta};
use rand::Rng;
use tracing::{debug, info};

use crate::config::model::PlannerSection;
use crate::errors::{PlannerError, Result};
use crate::plan::graph::DependencyGraph;
use crate::plan::model::{LearnerProfile, StudySession, Topic, TopicId};
use crate::plan::priority::PriorityScorer;
use crate::types::{DifficultyTier, SessionStatus, SessionType};

/// Length of one session for a topic of the given tier, in minutes.
pub fn session_minutes(tier: DifficultyTier) -> u32 {
    match tier {
        DifficultyTier::Hard => 90,
        DifficultyTier::Easy | DifficultyTier::Medium => 60,
    }
}

/// Study hours available on each day of the run.
///
/// A missed streak above the planner threshold shrinks every day of the run
/// by the same factor.
pub fn effective_capacity_hours(profile: &LearnerProfile, planner: &PlannerSection) -> f64 {
    let nominal = profile.preferences.daily_study_hours.max(0.0);
    if profile.behavior.missed_streak > planner.missed_streak_threshold {
        nominal * planner.reduced_capacity_factor
    } else {
        nominal
    }
}

/// Capacity in whole minutes. The epsilon absorbs float noise such as
/// `4.0 * 0.7 = 2.8000000000000003`.
fn capacity_minutes(hours: f64) -> u32 {
    (hours * 60.0 + 1e-6).floor() as u32
}

/// The complete, uncapped output of one allocation, in generation order
/// (day-major, then topic order within the day).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schedule {
    sessions: Vec<StudySession>,
}

impl Schedule {
    pub fn new(sessions: Vec<StudySession>) -> Self {
        Self { sessions }
    }

    pub fn sessions(&self) -> &[StudySession] {
        &self.sessions
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// The first `limit` sessions, as returned to callers.
    pub fn upcoming(&self, limit: usize) -> &[StudySession] {
        &self.sessions[..self.sessions.len().min(limit)]
    }

    /// Sessions that start on `date`, in schedule order.
    pub fn on_date(&self, date: NaiveDate) -> Vec<&StudySession> {
        self.sessions.iter().filter(|s| s.date() == date).collect()
    }

    /// Total scheduled minutes on `date`.
    pub fn minutes_on(&self, date: NaiveDate) -> u32 {
        self.on_date(date).iter().map(|s| s.duration_minutes).sum()
    }

    pub fn session_for(&self, topic_id: &str) -> Option<&StudySession> {
        self.sessions.iter().find(|s| s.topic_id == topic_id)
    }
}

/// Greedy first-fit allocator over a fixed planning horizon.
///
/// For each day it walks the topic order, skipping topics that are already
/// placed, and stops the day as soon as the next topic does not fit. It never
/// looks ahead for a smaller topic, never splits a topic across days and never
/// places a topic twice.
#[derive(Debug)]
pub struct TopicScheduler<'a> {
    graph: &'a DependencyGraph,
    scorer: PriorityScorer<'a>,
    topics: HashMap<&'a str, &'a Topic>,
    planner: &'a PlannerSection,
}

impl<'a> TopicScheduler<'a> {
    pub fn new(
        graph: &'a DependencyGraph,
        scorer: PriorityScorer<'a>,
        topics: &'a [Topic],
        planner: &'a PlannerSection,
    ) -> Self {
        let topics = topics.iter().map(|t| (t.id.as_str(), t)).collect();
        Self {
            graph,
            scorer,
            topics,
            planner,
        }
    }

    /// Place topics from `order` into days starting at `today`.
    ///
    /// `rng` decides which weak topics are labelled Emergency Practice; pass a
    /// seeded generator for reproducible schedules.
    pub fn allocate<R>(
        &self,
        order: &[TopicId],
        profile: &LearnerProfile,
        today: NaiveDate,
        rng: &mut R,
    ) -> Result<Schedule>
    where
        R: Rng + ?Sized,
    {
        let capacity_hours = effective_capacity_hours(profile, self.planner);
        let capacity = capacity_minutes(capacity_hours);
        let start_hour = profile.preferences.preferred_time.start_hour();

        info!(
            topics = order.len(),
            capacity_hours,
            start_hour,
            horizon_days = self.planner.horizon_days,
            "allocating study sessions"
        );

        let mut placed: HashSet<&str> = HashSet::with_capacity(order.len());
        let mut sessions = Vec::new();

        for day_offset in 0..self.planner.horizon_days {
            if placed.len() == order.len() {
                break;
            }

            let day = today
                .checked_add_days(Days::new(u64::from(day_offset)))
                .ok_or_else(|| {
                    PlannerError::PlanningFailed(format!(
                        "day {day_offset} after {today} is out of range"
                    ))
                })?;
            let day_start = day.and_hms_opt(start_hour, 0, 0).ok_or_else(|| {
                PlannerError::PlanningFailed(format!("invalid start hour {start_hour} on {day}"))
            })?;

            let mut used = 0u32;
            for id in order {
                if used >= capacity {
                    break;
                }
                if placed.contains(id.as_str()) {
                    continue;
                }

                let topic = self
                    .topics
                    .get(id.as_str())
                    .copied()
                    .ok_or_else(|| PlannerError::TopicNotFound(id.clone()))?;

                let duration = session_minutes(topic.difficulty);
                if used + duration > capacity {
                    debug!(
                        topic = %topic.id,
                        day = %day,
                        used_minutes = used,
                        duration_minutes = duration,
                        "next topic does not fit; closing day"
                    );
                    break;
                }

                let session = self.build_session(topic, day, day_start, used, duration, rng)?;
                debug!(
                    topic = %topic.id,
                    day = %day,
                    start = %session.start_time,
                    session_type = %session.session_type,
                    "placed session"
                );

                sessions.push(session);
                placed.insert(topic.id.as_str());
                used += duration;
            }
        }

        info!(
            sessions = sessions.len(),
            unplaced = order.len() - placed.len(),
            "allocation finished"
        );

        Ok(Schedule::new(sessions))
    }

    fn build_session<R>(
        &self,
        topic: &Topic,
        day: NaiveDate,
        day_start: NaiveDateTime,
        used_minutes: u32,
        duration_minutes: u32,
        rng: &mut R,
    ) -> Result<StudySession>
    where
        R: Rng + ?Sized,
    {
        let offset = |minutes: u32| {
            day_start
                .checked_add_signed(TimeDelta::minutes(i64::from(minutes)))
                .ok_or_else(|| {
                    PlannerError::PlanningFailed(format!(
                        "session time for '{}' on {day} is out of range",
                        topic.id
                    ))
                })
        };
        let start_time = offset(used_minutes)?;
        let end_time = offset(used_minutes + duration_minutes)?;

        let session_type = if topic.avg_quiz_score < self.planner.emergency_score_threshold
            && rng.random_bool(self.planner.emergency_probability)
        {
            SessionType::EmergencyPractice
        } else {
            SessionType::DeepWork
        };

        Ok(StudySession {
            id: format!("{day}-{}", topic.id),
            subject_name: topic.subject_id.clone(),
            topic_id: topic.id.clone(),
            topic_name: topic.name.clone(),
            start_time,
            end_time,
            duration_minutes,
            session_type,
            difficulty: topic.difficulty,
            priority_score: self.scorer.score(topic),
            reason: format!(
                "{} • Prereq Count: {}",
                topic.difficulty,
                self.graph.out_degree(&topic.id)
            ),
            status: SessionStatus::Planned,
        })
    }
}

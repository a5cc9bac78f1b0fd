// src/plan/analytics.rs

//! Dashboard figures and advisory insights for one run.

use std::collections::HashSet;

use chrono::NaiveTime;

use crate::config::model::PlannerSection;
use crate::plan::graph::DependencyGraph;
use crate::plan::model::{Analytics, LearnerProfile, Topic};
use crate::plan::scheduler::effective_capacity_hours;
use crate::types::DifficultyTier;

/// Maximum number of risk subjects reported.
pub const MAX_RISK_SUBJECTS: usize = 3;

/// Quiz scores below this make a Hard topic a risk.
pub const RISK_SCORE: f64 = 30.0;

/// Names of Hard topics scoring below [`RISK_SCORE`], de-duplicated, at most
/// [`MAX_RISK_SUBJECTS`]. Reads the full topic set, not the scheduled subset.
pub fn risk_subjects(topics: &[Topic]) -> Vec<String> {
    let mut seen = HashSet::new();
    topics
        .iter()
        .filter(|t| t.difficulty == DifficultyTier::Hard && t.avg_quiz_score < RISK_SCORE)
        .filter(|t| seen.insert(t.name.as_str()))
        .take(MAX_RISK_SUBJECTS)
        .map(|t| t.name.clone())
        .collect()
}

pub fn build_analytics(profile: &LearnerProfile, topics: &[Topic], graph: &DependencyGraph) -> Analytics {
    let consistency = (profile.behavior.completion_rate_7d * 100.0).round().clamp(0.0, 100.0);

    let predicted_confidence = if topics.is_empty() {
        0.7
    } else {
        topics.iter().map(|t| t.avg_quiz_score).sum::<f64>() / topics.len() as f64 / 100.0
    };

    Analytics {
        consistency_score: consistency as u8,
        predicted_confidence,
        risk_subjects: risk_subjects(topics),
        top_productive_hour: top_productive_hour(profile),
        dependency_graph: graph.adjacency(),
    }
}

/// One hour after the preferred start, e.g. "10:00 AM" for mornings.
fn top_productive_hour(profile: &LearnerProfile) -> String {
    let hour = profile.preferences.preferred_time.start_hour() + 1;
    NaiveTime::from_hms_opt(hour, 0, 0)
        .map(|t| t.format("%I:%M %p").to_string())
        .unwrap_or_default()
}

/// Human-readable advisories shown next to the plan.
pub fn insights(
    profile: &LearnerProfile,
    topics: &[Topic],
    graph: &DependencyGraph,
    planner: &PlannerSection,
) -> Vec<String> {
    let mut out = Vec::new();

    if let Some(bottleneck) = bottleneck(topics, graph) {
        let unlocks = graph.out_degree(&bottleneck.id);
        let prereqs = graph.dependencies_of(&bottleneck.id);
        let mut line = format!(
            "Bottleneck: '{}' unlocks {unlocks} topic(s) and is scheduled ahead of them.",
            bottleneck.name
        );
        if !prereqs.is_empty() {
            line.push_str(&format!(" Prerequisites first: {}.", prereqs.join(", ")));
        }
        out.push(line);
    }

    let prefs = &profile.preferences;
    out.push(format!(
        "Cognitive load aligned to your {} window starting at {:02}:00.",
        prefs.preferred_time,
        prefs.preferred_time.start_hour()
    ));

    let streak = profile.behavior.missed_streak;
    let probability = streak.saturating_mul(10).min(100);
    if streak > planner.missed_streak_threshold {
        out.push(format!(
            "Procrastination probability: {probability}% (daily load eased to {:.1}h).",
            effective_capacity_hours(profile, planner)
        ));
    } else {
        out.push(format!(
            "Procrastination probability: {probability}% (no adjustment needed)."
        ));
    }

    out
}

/// Topic that unlocks the most others; earliest in the request wins ties.
fn bottleneck<'t>(topics: &'t [Topic], graph: &DependencyGraph) -> Option<&'t Topic> {
    let mut best: Option<(&Topic, usize)> = None;
    for topic in topics {
        let degree = graph.out_degree(&topic.id);
        if degree > 0 && best.is_none_or(|(_, d)| degree > d) {
            best = Some((topic, degree));
        }
    }
    best.map(|(t, _)| t)
}

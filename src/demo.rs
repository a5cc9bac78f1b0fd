// src/demo.rs

//! Demo topic sets for trying the planner without writing a plan file.

use crate::config::model::{PlanFile, PlannerSection};
use crate::plan::model::{LearnerProfile, PlanRequest, Topic};
use crate::types::DifficultyTier;

/// Three chained topics per subject: an easy introduction, a medium theory
/// topic that needs it, and a hard advanced topic that needs the theory.
///
/// Ids are `s<n>_t1` .. `s<n>_t3`, numbering subjects from 1.
pub fn demo_topics(subjects: &[String]) -> Vec<Topic> {
    let mut topics = Vec::with_capacity(subjects.len() * 3);

    for (idx, subject) in subjects.iter().enumerate() {
        let sid = format!("s{}", idx + 1);
        let intro = format!("{sid}_t1");
        let theory = format!("{sid}_t2");

        topics.push(Topic {
            difficulty: DifficultyTier::Easy,
            avg_quiz_score: 85.0,
            ..Topic::new(intro.clone(), format!("Intro to {subject}"), subject.clone())
        });
        topics.push(Topic {
            difficulty: DifficultyTier::Medium,
            avg_quiz_score: 60.0,
            prerequisites: vec![intro],
            ..Topic::new(theory.clone(), format!("Theory of {subject}"), subject.clone())
        });
        topics.push(Topic {
            difficulty: DifficultyTier::Hard,
            avg_quiz_score: 40.0,
            prerequisites: vec![theory],
            ..Topic::new(format!("{sid}_t3"), format!("Advanced {subject}"), subject.clone())
        });
    }

    topics
}

/// A ready-to-plan file around [`demo_topics`] with default settings.
pub fn demo_plan_file(subjects: &[String]) -> PlanFile {
    let request = PlanRequest {
        request_id: None,
        profile: LearnerProfile {
            name: "Demo Learner".to_string(),
            ..LearnerProfile::default()
        },
        topics: demo_topics(subjects),
    };
    PlanFile::new_unchecked(PlannerSection::default(), request)
}

// tests/property_allocation.rs

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::{Days, Timelike};
use proptest::prelude::*;
use studyplan::config::PlannerSection;
use studyplan::engine::{PlanCache, Planner, DEFAULT_REQUEST_ID};
use studyplan::plan::difficulty::adapt_difficulty;
use studyplan::plan::model::{LearnerProfile, PlanRequest, Topic};
use studyplan::plan::Schedule;
use studyplan::plan::scheduler::effective_capacity_hours;
use studyplan::types::DifficultyTier;
use studyplan_test_utils::builders::{ProfileBuilder, TopicBuilder};
use studyplan_test_utils::{at, date, seeded_rng};

// Topics may only depend on earlier topics, which keeps the graph acyclic.
// `cyclic = true` lets them depend on any topic instead.
fn topics_strategy(max_topics: usize, cyclic: bool) -> impl Strategy<Value = Vec<Topic>> {
    (1..=max_topics).prop_flat_map(move |num_topics| {
        proptest::collection::vec(
            (
                0.0f64..=100.0,
                0u32..5,
                proptest::collection::vec(any::<usize>(), 0..3),
                any::<bool>(),
            ),
            num_topics,
        )
        .prop_map(move |raw| {
            raw.into_iter()
                .enumerate()
                .map(|(i, (score, failures, deps, orphan))| {
                    let mut builder = TopicBuilder::new(&format!("t{i}"))
                        .name(&format!("Topic {i}"))
                        .score(score)
                        .failures(failures);
                    for dep in deps {
                        let bound = if cyclic { num_topics } else { i };
                        if bound > 0 {
                            builder = builder.after(&format!("t{}", dep % bound));
                        }
                    }
                    if orphan {
                        builder = builder.after("not-in-request");
                    }
                    builder.build()
                })
                .collect()
        })
    })
}

fn profile_strategy() -> impl Strategy<Value = LearnerProfile> {
    (0.0f64..=8.0, 0u32..6, any::<bool>()).prop_map(|(hours, streak, afternoon)| {
        let mut builder = ProfileBuilder::new().hours(hours).missed_streak(streak);
        if afternoon {
            builder = builder.afternoon();
        }
        builder.build()
    })
}

fn plan_full(topics: Vec<Topic>, profile: LearnerProfile, seed: u64) -> Schedule {
    let planner = Planner::new(PlannerSection::default(), Arc::new(PlanCache::new()));
    let request = PlanRequest {
        request_id: None,
        profile,
        topics,
    };
    planner
        .plan(request, at(date(2026, 3, 2), 6, 0), &mut seeded_rng(seed))
        .expect("planning never fails on valid input");
    planner
        .latest(DEFAULT_REQUEST_ID)
        .expect("cached")
        .schedule
        .clone()
}

proptest! {
    #[test]
    fn allocation_respects_prerequisites_capacity_and_start_hour(
        topics in topics_strategy(25, false),
        profile in profile_strategy(),
        seed in any::<u64>(),
    ) {
        let today = date(2026, 3, 2);
        let schedule = plan_full(topics.clone(), profile.clone(), seed);

        // Known topics, each at most once.
        let known: HashSet<&str> = topics.iter().map(|t| t.id.as_str()).collect();
        let mut seen = HashSet::new();
        for s in schedule.sessions() {
            prop_assert!(known.contains(s.topic_id.as_str()), "unknown topic {}", s.topic_id);
            prop_assert!(seen.insert(s.topic_id.clone()), "topic {} placed twice", s.topic_id);
        }

        // Prerequisites start strictly earlier.
        let starts: HashMap<&str, _> = schedule
            .sessions()
            .iter()
            .map(|s| (s.topic_id.as_str(), s.start_time))
            .collect();
        for topic in &topics {
            let Some(start) = starts.get(topic.id.as_str()) else { continue };
            for prereq in topic.prerequisites.iter().filter(|p| known.contains(p.as_str())) {
                let prereq_start = starts.get(prereq.as_str());
                prop_assert!(prereq_start.is_some(), "{} scheduled before its prerequisite {}", topic.id, prereq);
                prop_assert!(prereq_start.unwrap() < start);
            }
        }

        // Daily capacity and start hour.
        let capacity = effective_capacity_hours(&profile, &PlannerSection::default());
        let start_hour = profile.preferences.preferred_time.start_hour();
        for offset in 0..7u64 {
            let day = today + Days::new(offset);
            prop_assert!(f64::from(schedule.minutes_on(day)) <= capacity * 60.0 + 1e-6);
        }
        for s in schedule.sessions() {
            prop_assert!(s.start_time.hour() >= start_hour);
            prop_assert!(s.date() >= today && s.date() < today + Days::new(7));
        }
    }

    #[test]
    fn adaptation_and_risk_subjects_hold(
        topics in topics_strategy(25, false),
        seed in any::<u64>(),
    ) {
        let planner = Planner::new(PlannerSection::default(), Arc::new(PlanCache::new()));
        let request = PlanRequest {
            request_id: None,
            profile: ProfileBuilder::new().hours(8.0).build(),
            topics: topics.clone(),
        };
        let response = planner
            .plan(request, at(date(2026, 3, 2), 6, 0), &mut seeded_rng(seed))
            .expect("plan");

        let mut adapted = topics.clone();
        adapt_difficulty(&mut adapted);
        for topic in &adapted {
            if topic.failure_count > 2 {
                prop_assert_eq!(topic.difficulty, DifficultyTier::Hard);
            }
        }
        let run = planner.latest(DEFAULT_REQUEST_ID).expect("cached");
        for s in run.schedule.sessions() {
            let original = topics.iter().find(|t| t.id == s.topic_id).expect("known");
            if original.failure_count > 2 {
                prop_assert_eq!(s.difficulty, DifficultyTier::Hard);
            }
        }

        let risks = &response.analytics.risk_subjects;
        prop_assert!(risks.len() <= 3);
        for name in risks {
            prop_assert!(adapted.iter().any(|t| &t.name == name
                && t.difficulty == DifficultyTier::Hard
                && t.avg_quiz_score < 30.0));
        }
        prop_assert!(response.upcoming_schedule.len() <= 20);
    }

    #[test]
    fn cyclic_prerequisites_never_fail_planning(
        topics in topics_strategy(15, true),
        profile in profile_strategy(),
        seed in any::<u64>(),
    ) {
        let schedule = plan_full(topics.clone(), profile, seed);

        let mut seen = HashSet::new();
        for s in schedule.sessions() {
            prop_assert!(seen.insert(s.topic_id.clone()));
        }
        prop_assert!(schedule.len() <= topics.len());
    }
}

// tests/daily_mission.rs

use chrono::{NaiveDate, TimeDelta};
use studyplan::plan::mission::{compose_daily_mission, MissionTheme, ENERGY_TIP};
use studyplan::plan::model::StudySession;
use studyplan::plan::scheduler::Schedule;
use studyplan::types::{DifficultyTier, SessionStatus, SessionType};
use studyplan_test_utils::{at, date};

fn today() -> NaiveDate {
    date(2026, 3, 2)
}

fn session(topic: &str, day: NaiveDate, slot: u32, tier: DifficultyTier) -> StudySession {
    let start = at(day, 9, 0) + TimeDelta::hours(i64::from(slot));
    StudySession {
        id: format!("{day}-{topic}"),
        subject_name: "subj".to_string(),
        topic_id: topic.to_string(),
        topic_name: topic.to_string(),
        start_time: start,
        end_time: start + TimeDelta::hours(1),
        duration_minutes: 60,
        session_type: SessionType::DeepWork,
        difficulty: tier,
        priority_score: 0.5,
        reason: format!("{tier} • Prereq Count: 0"),
        status: SessionStatus::Planned,
    }
}

fn medium_day(day: NaiveDate, count: u32) -> Vec<StudySession> {
    (0..count)
        .map(|i| session(&format!("t{i}"), day, i, DifficultyTier::Medium))
        .collect()
}

#[test]
fn picks_todays_sessions_in_schedule_order() {
    let tomorrow = today().succ_opt().expect("tomorrow");
    let mut sessions = medium_day(today(), 2);
    sessions.push(session("later", tomorrow, 0, DifficultyTier::Medium));
    let schedule = Schedule::new(sessions);

    let mission = compose_daily_mission(&schedule, today());

    assert_eq!(mission.date, today());
    let ids: Vec<&str> = mission.sessions.iter().map(|s| s.topic_id.as_str()).collect();
    assert_eq!(ids, vec!["t0", "t1"]);
    assert_eq!(mission.energy_tip, ENERGY_TIP);
}

#[test]
fn hard_topic_makes_a_deep_climb_day() {
    let mut sessions = medium_day(today(), 5);
    sessions.push(session("hard", today(), 5, DifficultyTier::Hard));

    let mission = compose_daily_mission(&Schedule::new(sessions), today());

    assert_eq!(mission.focus_theme, MissionTheme::DeepClimb.to_string());
    assert_eq!(mission.focus_theme, "Deep Climb Day");
}

#[test]
fn more_than_four_sessions_is_high_velocity() {
    let mission = compose_daily_mission(&Schedule::new(medium_day(today(), 5)), today());
    assert_eq!(mission.focus_theme, "High Velocity Sprints");
}

#[test]
fn four_sessions_is_momentum_builder() {
    let mission = compose_daily_mission(&Schedule::new(medium_day(today(), 4)), today());
    assert_eq!(mission.focus_theme, "Momentum Builder");
}

#[test]
fn empty_today_falls_back_to_tomorrow() {
    let tomorrow = today().succ_opt().expect("tomorrow");
    let schedule = Schedule::new(medium_day(tomorrow, 3));

    let mission = compose_daily_mission(&schedule, today());

    assert_eq!(mission.date, tomorrow);
    assert_eq!(mission.sessions.len(), 3);
}

#[test]
fn lookahead_stops_after_one_day() {
    let in_two_days = date(2026, 3, 4);
    let schedule = Schedule::new(medium_day(in_two_days, 2));

    let mission = compose_daily_mission(&schedule, today());

    assert_eq!(mission.date, date(2026, 3, 3));
    assert!(mission.sessions.is_empty());
    assert_eq!(mission.focus_theme, "Momentum Builder");
}

#[test]
fn composing_does_not_change_the_schedule() {
    let schedule = Schedule::new(medium_day(today(), 3));
    let before = schedule.clone();

    let _ = compose_daily_mission(&schedule, today());

    assert_eq!(schedule, before);
}

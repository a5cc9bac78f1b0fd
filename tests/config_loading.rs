// tests/config_loading.rs

use std::io::Write;

use tempfile::{Builder, NamedTempFile};
use studyplan::config::{load_and_validate, load_from_path};
use studyplan::errors::PlannerError;
use studyplan::types::{DifficultyTier, TimePreference};

fn write_plan(suffix: &str, contents: &str) -> NamedTempFile {
    let mut file = Builder::new()
        .suffix(suffix)
        .tempfile()
        .unwrap();
    write!(file, "{contents}").unwrap();
    file
}

#[test]
fn toml_plan_file_is_loaded_in_request_order() {
    let file = write_plan(
        ".toml",
        r#"
request_id = "week-42"

[planner]
max_returned_sessions = 10

[profile]
name = "Ada"

[profile.preferences]
daily_study_hours = 3.5
preferred_time = "Afternoon"

[profile.behavior]
missed_streak = 1

[[topic]]
id = "trees"
name = "Trees"
subject_id = "dsa"
avg_quiz_score = 35.0

[[topic]]
id = "graphs"
name = "Graph Theory"
subject_id = "dsa"
difficulty = "Hard"
prerequisites = ["trees", "missing"]
"#,
    );

    let plan = load_and_validate(file.path()).expect("valid plan file");

    assert_eq!(plan.planner.max_returned_sessions, 10);
    assert_eq!(plan.planner.horizon_days, 7);
    assert_eq!(plan.request.request_id.as_deref(), Some("week-42"));

    let profile = &plan.request.profile;
    assert_eq!(profile.name, "Ada");
    assert_eq!(profile.preferences.daily_study_hours, 3.5);
    assert_eq!(profile.preferences.preferred_time, TimePreference::Afternoon);
    assert_eq!(profile.behavior.missed_streak, 1);
    assert_eq!(profile.behavior.completion_rate_7d, 0.8);

    let ids: Vec<&str> = plan.request.topics.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["trees", "graphs"]);
    assert_eq!(plan.request.topics[0].difficulty, DifficultyTier::Medium);
    assert_eq!(plan.request.topics[1].difficulty, DifficultyTier::Hard);
    assert_eq!(plan.request.topics[1].prerequisites, vec!["trees", "missing"]);
}

#[test]
fn json_request_body_is_accepted() {
    let file = write_plan(
        ".json",
        r#"{
  "profile": {
    "name": "Grace",
    "preferences": { "daily_study_hours": 4, "preferred_time": "Morning" },
    "behavior": { "missed_streak": 3, "last_session_delay_minutes": 15 }
  },
  "topics": [
    { "id": "s1_t1", "name": "Intro", "subject_id": "OS",
      "difficulty_level": "Easy", "avg_quiz_score": 85, "prerequisites": [] },
    { "id": "s1_t2", "name": "Theory", "subject_id": "OS",
      "difficulty_level": "Medium", "avg_quiz_score": 60, "failure_frequency": 3,
      "prerequisites": ["s1_t1"] }
  ]
}"#,
    );

    let plan = load_and_validate(file.path()).expect("valid json");

    assert_eq!(plan.request.request_id, None);
    assert_eq!(plan.request.profile.behavior.missed_streak, 3);
    assert_eq!(plan.request.profile.behavior.last_session_delay_minutes, 15);
    assert_eq!(plan.request.topics.len(), 2);
    assert_eq!(plan.request.topics[0].difficulty, DifficultyTier::Easy);
    assert_eq!(plan.request.topics[1].failure_count, 3);
}

#[test]
fn duplicate_topic_ids_return_config_error() {
    let file = write_plan(
        ".toml",
        r#"
[[topic]]
id = "a"
name = "A"
subject_id = "s"

[[topic]]
id = "a"
name = "A again"
subject_id = "s"
"#,
    );

    match load_and_validate(file.path()) {
        Err(PlannerError::ConfigError(msg)) => {
            assert!(msg.contains("duplicate topic id"));
            assert!(msg.contains("'a'"));
        }
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn quiz_score_out_of_range_returns_config_error() {
    let file = write_plan(
        ".toml",
        r#"
[[topic]]
id = "a"
name = "A"
subject_id = "s"
avg_quiz_score = 120.0
"#,
    );

    match load_and_validate(file.path()) {
        Err(PlannerError::ConfigError(msg)) => assert!(msg.contains("avg_quiz_score")),
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn hours_past_midnight_return_config_error() {
    let file = write_plan(
        ".toml",
        r#"
[profile.preferences]
daily_study_hours = 12.0
preferred_time = "Afternoon"
"#,
    );

    match load_and_validate(file.path()) {
        Err(PlannerError::ConfigError(msg)) => assert!(msg.contains("does not fit")),
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn zero_horizon_returns_config_error() {
    let file = write_plan(".toml", "[planner]\nhorizon_days = 0\n");

    assert!(matches!(
        load_and_validate(file.path()),
        Err(PlannerError::ConfigError(_))
    ));
}

#[test]
fn unknown_prerequisite_and_cycles_are_not_errors() {
    let file = write_plan(
        ".toml",
        r#"
[[topic]]
id = "a"
name = "A"
subject_id = "s"
prerequisites = ["b", "nowhere"]

[[topic]]
id = "b"
name = "B"
subject_id = "s"
prerequisites = ["a"]
"#,
    );

    assert!(load_and_validate(file.path()).is_ok());
}

#[test]
fn malformed_files_return_parse_errors() {
    let toml_file = write_plan(".toml", "[[topic]\nid = ");
    let json_file = write_plan(".json", "{ \"topics\": [ }");

    assert!(matches!(load_from_path(toml_file.path()), Err(PlannerError::TomlError(_))));
    assert!(matches!(load_from_path(json_file.path()), Err(PlannerError::JsonError(_))));
}

#[test]
fn missing_file_returns_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");

    assert!(matches!(load_and_validate(&path), Err(PlannerError::IoError(_))));
}

#[test]
fn lowercase_tier_and_time_names_are_accepted() {
    let file = write_plan(
        ".toml",
        r#"
[profile.preferences]
preferred_time = "afternoon"

[[topic]]
id = "sets"
name = "Sets"
subject_id = "math"
difficulty = "hard"
avg_quiz_score = 70
"#,
    );

    let plan = load_and_validate(file.path()).unwrap();
    assert_eq!(
        plan.request.profile.preferences.preferred_time,
        TimePreference::Afternoon
    );
    assert_eq!(plan.request.topics[0].difficulty, DifficultyTier::Hard);
}

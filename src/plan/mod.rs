// src/plan/mod.rs

//! Study planning core.
//!
//! - [`graph`] builds the prerequisite graph with O(1) out-degree lookups.
//! - [`difficulty`] rewrites topic tiers from performance signals.
//! - [`priority`] scores topics and produces the prerequisite-first order.
//! - [`scheduler`] packs ordered topics into capacity-bounded days.
//! - [`mission`] derives today's focus from a schedule.
//! - [`analytics`] computes dashboard figures and insights.
//! - [`model`] holds the request / session / response records.

pub mod analytics;
pub mod difficulty;
pub mod graph;
pub mod mission;
pub mod model;
pub mod priority;
pub mod scheduler;

pub use graph::{CycleDetected, DependencyGraph};
pub use mission::{compose_daily_mission, MissionTheme};
pub use model::{
    Analytics, DailyMission, LearnerBehavior, LearnerProfile, PlanRequest, PlanResponse,
    StudyPreferences, StudySession, Topic, TopicId,
};
pub use priority::{order_topics, PriorityScorer, PriorityWeights, TopicOrder};
pub use scheduler::{Schedule, TopicScheduler};

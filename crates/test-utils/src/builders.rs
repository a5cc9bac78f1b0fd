#![allow(dead_code)]

use studyplan::config::{PlanFile, PlannerSection, RawPlanFile};
use studyplan::plan::model::{LearnerBehavior, LearnerProfile, PlanRequest, StudyPreferences, Topic};
use studyplan::types::{DifficultyTier, TimePreference};

/// Builder for `Topic`.
pub struct TopicBuilder {
    topic: Topic,
}

impl TopicBuilder {
    /// Topic `id` named after itself, in subject `"subj"`, Medium, score 60.
    pub fn new(id: &str) -> Self {
        let mut topic = Topic::new(id, id, "subj");
        topic.avg_quiz_score = 60.0;
        Self { topic }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.topic.name = name.to_string();
        self
    }

    pub fn subject(mut self, subject: &str) -> Self {
        self.topic.subject_id = subject.to_string();
        self
    }

    pub fn difficulty(mut self, tier: DifficultyTier) -> Self {
        self.topic.difficulty = tier;
        self
    }

    pub fn score(mut self, score: f64) -> Self {
        self.topic.avg_quiz_score = score;
        self
    }

    pub fn failures(mut self, count: u32) -> Self {
        self.topic.failure_count = count;
        self
    }

    pub fn after(mut self, prereq: &str) -> Self {
        self.topic.prerequisites.push(prereq.to_string());
        self
    }

    pub fn build(self) -> Topic {
        self.topic
    }
}

/// Builder for `LearnerProfile`.
pub struct ProfileBuilder {
    profile: LearnerProfile,
}

impl ProfileBuilder {
    pub fn new() -> Self {
        Self {
            profile: LearnerProfile {
                name: "Test Learner".to_string(),
                preferences: StudyPreferences::default(),
                behavior: LearnerBehavior::default(),
            },
        }
    }

    pub fn hours(mut self, hours: f64) -> Self {
        self.profile.preferences.daily_study_hours = hours;
        self
    }

    pub fn afternoon(mut self) -> Self {
        self.profile.preferences.preferred_time = TimePreference::Afternoon;
        self
    }

    pub fn missed_streak(mut self, streak: u32) -> Self {
        self.profile.behavior.missed_streak = streak;
        self
    }

    pub fn completion_rate(mut self, rate: f64) -> Self {
        self.profile.behavior.completion_rate_7d = rate;
        self
    }

    pub fn build(self) -> LearnerProfile {
        self.profile
    }
}

impl Default for ProfileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `PlanFile` (goes through validation) and `PlanRequest`.
pub struct PlanFileBuilder {
    raw: RawPlanFile,
}

impl PlanFileBuilder {
    pub fn new() -> Self {
        Self {
            raw: RawPlanFile {
                request_id: None,
                planner: PlannerSection::default(),
                profile: ProfileBuilder::new().build(),
                topics: Vec::new(),
            },
        }
    }

    pub fn request_id(mut self, id: &str) -> Self {
        self.raw.request_id = Some(id.to_string());
        self
    }

    pub fn profile(mut self, profile: LearnerProfile) -> Self {
        self.raw.profile = profile;
        self
    }

    pub fn planner(mut self, planner: PlannerSection) -> Self {
        self.raw.planner = planner;
        self
    }

    pub fn with_topic(mut self, topic: Topic) -> Self {
        self.raw.topics.push(topic);
        self
    }

    pub fn build(self) -> PlanFile {
        PlanFile::try_from(self.raw).expect("Failed to build valid plan file from builder")
    }

    pub fn request(self) -> PlanRequest {
        self.build().request
    }
}

impl Default for PlanFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// src/engine/core.rs

//! Synchronous planning pipeline.
//!
//! One call to [`Planner::plan`] runs, in order:
//! 1. difficulty adaptation (the only place topic tiers change)
//! 2. dependency graph construction
//! 3. priority scoring and prerequisite-first ordering
//! 4. greedy allocation over the planning horizon
//! 5. mission composition, analytics and insights
//!
//! The run either completes as a whole or fails with a single
//! [`PlannerError::PlanningFailed`]; nothing partial is returned or cached.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use rand::Rng;
use tracing::{error, info};

use crate::config::model::{PlanFile, PlannerSection};
use crate::config::validate::{validate_planner_section, validate_request};
use crate::engine::cache::PlanCache;
use crate::engine::{PlanRun, DEFAULT_REQUEST_ID};
use crate::errors::{PlannerError, Result};
use crate::plan::analytics::{build_analytics, insights};
use crate::plan::difficulty::adapt_difficulty;
use crate::plan::graph::DependencyGraph;
use crate::plan::mission::compose_daily_mission;
use crate::plan::model::{DailyMission, PlanRequest, PlanResponse};
use crate::plan::priority::{order_topics, PriorityScorer};
use crate::plan::scheduler::TopicScheduler;

/// Planning entry point.
///
/// Holds the planner tunables and an injected [`PlanCache`]; it keeps no
/// other state between calls.
#[derive(Debug, Clone)]
pub struct Planner {
    settings: PlannerSection,
    cache: Arc<PlanCache>,
}

impl Planner {
    pub fn new(settings: PlannerSection, cache: Arc<PlanCache>) -> Self {
        Self { settings, cache }
    }

    /// Construct a planner from a validated [`PlanFile`].
    pub fn from_plan_file(plan: &PlanFile, cache: Arc<PlanCache>) -> Self {
        Self::new(plan.planner.clone(), cache)
    }

    pub fn settings(&self) -> &PlannerSection {
        &self.settings
    }

    pub fn cache(&self) -> &Arc<PlanCache> {
        &self.cache
    }

    /// Plan `request` as of `now` and cache the full run under its request id.
    ///
    /// Invalid input is reported with its own error variant before planning
    /// starts. Any failure inside the pipeline is logged and surfaced as
    /// [`PlannerError::PlanningFailed`] carrying the original message.
    pub fn plan<R>(&self, request: PlanRequest, now: NaiveDateTime, rng: &mut R) -> Result<PlanResponse>
    where
        R: Rng + ?Sized,
    {
        validate_planner_section(&self.settings)?;
        validate_request(&request)?;

        let request_id = request
            .request_id
            .clone()
            .unwrap_or_else(|| DEFAULT_REQUEST_ID.to_string());

        match self.run_pipeline(request, &request_id, now, rng) {
            Ok(run) => {
                let response = run.response.clone();
                self.cache.store(&request_id, run);
                Ok(response)
            }
            Err(err) => {
                error!(request_id = %request_id, error = %err, "planning failed");
                Err(match err {
                    PlannerError::PlanningFailed(msg) => PlannerError::PlanningFailed(msg),
                    other => PlannerError::PlanningFailed(other.to_string()),
                })
            }
        }
    }

    /// The cached run for `request_id`, including the uncapped schedule.
    pub fn latest(&self, request_id: &str) -> Result<Arc<PlanRun>> {
        self.cache
            .get(request_id)
            .ok_or_else(|| PlannerError::PlanNotFound(request_id.to_string()))
    }

    /// Recompose the daily mission for `today` from a cached run.
    pub fn mission_for(&self, request_id: &str, today: NaiveDate) -> Result<DailyMission> {
        let run = self.latest(request_id)?;
        Ok(compose_daily_mission(&run.schedule, today))
    }

    fn run_pipeline<R>(
        &self,
        request: PlanRequest,
        request_id: &str,
        now: NaiveDateTime,
        rng: &mut R,
    ) -> Result<PlanRun>
    where
        R: Rng + ?Sized,
    {
        let PlanRequest {
            profile,
            mut topics,
            ..
        } = request;
        let today = now.date();

        info!(
            request_id,
            learner = %profile.name,
            topics = topics.len(),
            %today,
            "planning started"
        );

        let adapted = adapt_difficulty(&mut topics);
        let graph = DependencyGraph::build(&topics);
        let scorer = PriorityScorer::new(&graph);
        let scores = scorer.score_all(&topics);
        let order = order_topics(&graph, &scores);

        let scheduler = TopicScheduler::new(&graph, scorer, &topics, &self.settings);
        let schedule = scheduler.allocate(&order.ids, &profile, today, rng)?;

        let daily_mission = compose_daily_mission(&schedule, today);
        let analytics = build_analytics(&profile, &topics, &graph);
        let mut insights = insights(&profile, &topics, &graph, &self.settings);
        if order.fell_back {
            insights.push(
                "Prerequisite cycle detected: topics are studied in the order given.".to_string(),
            );
        }

        info!(
            request_id,
            adapted,
            sessions = schedule.len(),
            edges = graph.edge_count(),
            cyclic = order.fell_back,
            "planning finished"
        );

        let response = PlanResponse {
            request_id: request_id.to_string(),
            student_name: profile.name.clone(),
            generated_at: now,
            daily_mission,
            upcoming_schedule: schedule.upcoming(self.settings.max_returned_sessions).to_vec(),
            analytics,
            insights,
        };

        Ok(PlanRun { response, schedule })
    }
}

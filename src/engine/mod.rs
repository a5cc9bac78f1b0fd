// src/engine/mod.rs

//! Planning engine for studyplan.
//!
//! This module ties together:
//! - difficulty adaptation, graph building and scoring
//! - the greedy allocator
//! - mission composition and analytics
//! - the per-request plan cache used for later dashboard / mission lookups
//!
//! The synchronous pipeline lives in [`core`]; cached results are held in
//! [`cache`].

use crate::plan::model::PlanResponse;
use crate::plan::scheduler::Schedule;

/// Cache key used when a request carries no id.
pub const DEFAULT_REQUEST_ID: &str = "latest";

/// Everything one successful planning run produced.
///
/// `response` holds the capped schedule handed to callers; `schedule` keeps
/// the complete allocation so missions can be recomposed later.
#[derive(Debug, Clone)]
pub struct PlanRun {
    pub response: PlanResponse,
    pub schedule: Schedule,
}

pub mod cache;
pub mod core;

pub use cache::PlanCache;
pub use core::Planner;

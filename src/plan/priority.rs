// src/plan/priority.rs

//! Priority scoring and the prerequisite-respecting topic order.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::plan::graph::DependencyGraph;
use crate::plan::model::{Topic, TopicId};
use crate::types::DifficultyTier;

/// Coefficients of the priority formula.
///
/// `priority = base + hard_bonus? + out_degree * dependency_boost
///            + (100 - score) / 100 * confidence_weight`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriorityWeights {
    pub base: f64,
    /// Added for Hard topics only.
    pub hard_bonus: f64,
    /// Per direct dependent.
    pub dependency_boost: f64,
    /// Scales the inverse quiz score.
    pub confidence_weight: f64,
}

impl Default for PriorityWeights {
    fn default() -> Self {
        Self {
            base: 0.5,
            hard_bonus: 0.3,
            dependency_boost: 0.15,
            confidence_weight: 0.4,
        }
    }
}

/// Scores topics against one dependency graph.
#[derive(Debug, Clone, Copy)]
pub struct PriorityScorer<'g> {
    graph: &'g DependencyGraph,
    weights: PriorityWeights,
}

impl<'g> PriorityScorer<'g> {
    pub fn new(graph: &'g DependencyGraph) -> Self {
        Self::with_weights(graph, PriorityWeights::default())
    }

    pub fn with_weights(graph: &'g DependencyGraph, weights: PriorityWeights) -> Self {
        Self { graph, weights }
    }

    pub fn weights(&self) -> PriorityWeights {
        self.weights
    }

    /// Priority of a single topic. Pure; recomputed on every call.
    pub fn score(&self, topic: &Topic) -> f64 {
        let w = &self.weights;
        let hard_bonus = if topic.difficulty == DifficultyTier::Hard {
            w.hard_bonus
        } else {
            0.0
        };
        let dependency_boost = self.graph.out_degree(&topic.id) as f64 * w.dependency_boost;
        let confidence_factor = (100.0 - topic.avg_quiz_score) / 100.0;

        w.base + hard_bonus + dependency_boost + confidence_factor * w.confidence_weight
    }

    /// Scores for every topic, keyed by id.
    pub fn score_all(&self, topics: &[Topic]) -> HashMap<TopicId, f64> {
        topics
            .iter()
            .map(|t| (t.id.clone(), self.score(t)))
            .collect()
    }
}

/// Linear order the allocator walks, plus whether it had to give up on the
/// prerequisite constraints.
#[derive(Debug, Clone, PartialEq)]
pub struct TopicOrder {
    pub ids: Vec<TopicId>,
    /// `true` when a cycle forced the request order to be used as-is.
    pub fell_back: bool,
}

/// Order topics so that prerequisites come first, higher priority first among
/// topics that are free to go.
///
/// A prerequisite cycle makes this impossible; the request order is returned
/// unchanged instead and the cycle is logged.
pub fn order_topics(graph: &DependencyGraph, scores: &HashMap<TopicId, f64>) -> TopicOrder {
    let rank = |id: &str| scores.get(id).copied().unwrap_or(0.0);

    match graph.topological_order(rank) {
        Ok(ids) => {
            debug!(topics = ids.len(), "topological order computed");
            TopicOrder {
                ids,
                fell_back: false,
            }
        }
        Err(cycle) => {
            warn!(
                cycles = ?graph.cycle_members(),
                unresolved = cycle.unresolved.len(),
                "prerequisite cycle detected; falling back to request order"
            );
            TopicOrder {
                ids: graph.topics().map(str::to_string).collect(),
                fell_back: true,
            }
        }
    }
}

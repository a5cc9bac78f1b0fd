// src/engine/cache.rs

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::debug;

use crate::engine::PlanRun;

/// In-memory store of the most recent plan per request id.
///
/// A later plan for the same id replaces the earlier one. Readers holding an
/// `Arc<PlanRun>` keep their snapshot even after it is replaced. There is no
/// expiry and nothing is persisted.
#[derive(Debug, Default)]
pub struct PlanCache {
    runs: RwLock<HashMap<String, Arc<PlanRun>>>,
}

impl PlanCache {
    pub fn new() -> Self {
        Self {
            runs: RwLock::new(HashMap::new()),
        }
    }

    /// Store a run, returning the one it replaced (if any).
    pub fn store(&self, request_id: &str, run: PlanRun) -> Option<Arc<PlanRun>> {
        let mut runs = self.runs.write().unwrap_or_else(PoisonError::into_inner);
        let previous = runs.insert(request_id.to_string(), Arc::new(run));
        debug!(
            request_id,
            replaced = previous.is_some(),
            "cached plan"
        );
        previous
    }

    pub fn get(&self, request_id: &str) -> Option<Arc<PlanRun>> {
        let runs = self.runs.read().unwrap_or_else(PoisonError::into_inner);
        runs.get(request_id).cloned()
    }

    pub fn remove(&self, request_id: &str) -> Option<Arc<PlanRun>> {
        let mut runs = self.runs.write().unwrap_or_else(PoisonError::into_inner);
        runs.remove(request_id)
    }

    pub fn len(&self) -> usize {
        self.runs.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

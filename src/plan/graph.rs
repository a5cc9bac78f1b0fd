// src/plan/graph.rs

use std::cmp::Ordering;
use std::collections::{BTreeMap, BinaryHeap, HashMap};

use petgraph::algo::tarjan_scc;
use petgraph::graphmap::DiGraphMap;
use tracing::{debug, warn};

use crate::plan::model::{Topic, TopicId};
use crate::types::DifficultyTier;

/// Internal node structure: stores immediate prerequisites and dependents.
#[derive(Debug, Clone)]
struct TopicNode {
    difficulty: DifficultyTier,
    /// Position of the topic in the request, used for stable ordering.
    position: usize,
    /// Direct prerequisites that are present in the request.
    deps: Vec<TopicId>,
    /// Direct dependents: topics that list this one as a prerequisite.
    dependents: Vec<TopicId>,
}

/// Prerequisite graph for one planning request.
///
/// Edges point from a prerequisite to its dependent. Out-degree is the length
/// of the dependents list, which is filled while edges are added, so lookups
/// are O(1). The graph is not guaranteed to be acyclic.
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    nodes: HashMap<TopicId, TopicNode>,
    /// Topic ids in request order.
    order: Vec<TopicId>,
}

/// Returned by [`DependencyGraph::topological_order`] when prerequisites form
/// a cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleDetected {
    /// Topics that could not be ordered (members of, or downstream of, a cycle).
    pub unresolved: Vec<TopicId>,
}

impl DependencyGraph {
    /// Build the graph from the topic records of one request.
    ///
    /// Prerequisite ids that do not name a topic of the same request are
    /// dropped. Repeated prerequisite entries produce a single edge.
    pub fn build(topics: &[Topic]) -> Self {
        let mut nodes: HashMap<TopicId, TopicNode> = HashMap::with_capacity(topics.len());
        let mut order = Vec::with_capacity(topics.len());

        // First pass: one node per topic.
        for (position, topic) in topics.iter().enumerate() {
            if nodes.contains_key(&topic.id) {
                warn!(topic = %topic.id, "duplicate topic id; keeping first occurrence");
                continue;
            }
            nodes.insert(
                topic.id.clone(),
                TopicNode {
                    difficulty: topic.difficulty,
                    position,
                    deps: Vec::new(),
                    dependents: Vec::new(),
                },
            );
            order.push(topic.id.clone());
        }

        // Second pass: prerequisite -> dependent edges.
        let mut edges = 0usize;
        for (position, topic) in topics.iter().enumerate() {
            if nodes.get(&topic.id).map(|n| n.position) != Some(position) {
                continue;
            }
            for prereq in &topic.prerequisites {
                if !nodes.contains_key(prereq) {
                    warn!(
                        topic = %topic.id,
                        prerequisite = %prereq,
                        "prerequisite not in request; no edge"
                    );
                    continue;
                }

                let Some(node) = nodes.get_mut(&topic.id) else {
                    continue;
                };
                if node.deps.contains(prereq) {
                    continue;
                }
                node.deps.push(prereq.clone());

                if let Some(prereq_node) = nodes.get_mut(prereq) {
                    prereq_node.dependents.push(topic.id.clone());
                }
                edges += 1;
            }
        }

        debug!(nodes = order.len(), edges, "built dependency graph");

        Self { nodes, order }
    }

    /// Topic ids in request order.
    pub fn topics(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Tier label the node was built with.
    pub fn difficulty_of(&self, id: &str) -> Option<DifficultyTier> {
        self.nodes.get(id).map(|n| n.difficulty)
    }

    /// Immediate prerequisites of a topic that exist in the graph.
    pub fn dependencies_of(&self, id: &str) -> &[TopicId] {
        self.nodes
            .get(id)
            .map(|n| n.deps.as_slice())
            .unwrap_or(&[])
    }

    /// Immediate dependents of a topic.
    pub fn dependents_of(&self, id: &str) -> &[TopicId] {
        self.nodes
            .get(id)
            .map(|n| n.dependents.as_slice())
            .unwrap_or(&[])
    }

    /// Number of topics that directly depend on `id` (0 for unknown ids).
    pub fn out_degree(&self, id: &str) -> usize {
        self.dependents_of(id).len()
    }

    pub fn edge_count(&self) -> usize {
        self.nodes.values().map(|n| n.dependents.len()).sum()
    }

    /// Adjacency map for visualization: every topic id mapped to its direct
    /// dependents, including topics with none.
    pub fn adjacency(&self) -> BTreeMap<TopicId, Vec<TopicId>> {
        self.nodes
            .iter()
            .map(|(id, node)| (id.clone(), node.dependents.clone()))
            .collect()
    }

    /// Kahn's algorithm. Among topics whose prerequisites are all placed, the
    /// one with the highest `rank` goes first; equal ranks keep request order.
    pub fn topological_order<F>(&self, rank: F) -> Result<Vec<TopicId>, CycleDetected>
    where
        F: Fn(&str) -> f64,
    {
        let mut in_degree: HashMap<&str, usize> = self
            .nodes
            .iter()
            .map(|(id, node)| (id.as_str(), node.deps.len()))
            .collect();

        let mut ready: BinaryHeap<Ready<'_>> = BinaryHeap::new();
        for id in &self.order {
            if in_degree.get(id.as_str()).copied() == Some(0) {
                ready.push(self.ready_entry(id, &rank));
            }
        }

        let mut sorted = Vec::with_capacity(self.order.len());
        while let Some(Ready { id, .. }) = ready.pop() {
            sorted.push(id.to_string());
            for dependent in self.dependents_of(id) {
                if let Some(degree) = in_degree.get_mut(dependent.as_str()) {
                    *degree -= 1;
                    if *degree == 0 {
                        ready.push(self.ready_entry(dependent, &rank));
                    }
                }
            }
        }

        if sorted.len() == self.order.len() {
            return Ok(sorted);
        }

        let unresolved = self
            .order
            .iter()
            .filter(|id| in_degree.get(id.as_str()).copied().unwrap_or(0) > 0)
            .cloned()
            .collect();
        Err(CycleDetected { unresolved })
    }

    /// Groups of topics that form prerequisite cycles (including a topic
    /// listing itself), for diagnostics.
    pub fn cycle_members(&self) -> Vec<Vec<TopicId>> {
        let mut graph: DiGraphMap<&str, ()> = DiGraphMap::new();
        for id in &self.order {
            graph.add_node(id.as_str());
        }
        for (id, node) in &self.nodes {
            for dependent in &node.dependents {
                graph.add_edge(id.as_str(), dependent.as_str(), ());
            }
        }

        let mut cycles: Vec<Vec<TopicId>> = tarjan_scc(&graph)
            .into_iter()
            .filter(|scc| scc.len() > 1 || graph.contains_edge(scc[0], scc[0]))
            .map(|mut scc| {
                scc.sort_by_key(|id| self.position_of(id));
                scc.into_iter().map(str::to_string).collect()
            })
            .collect();
        cycles.sort_by_key(|scc: &Vec<TopicId>| self.position_of(&scc[0]));
        cycles
    }

    fn position_of(&self, id: &str) -> usize {
        self.nodes.get(id).map(|n| n.position).unwrap_or(usize::MAX)
    }

    fn ready_entry<'a, F>(&'a self, id: &'a str, rank: &F) -> Ready<'a>
    where
        F: Fn(&str) -> f64,
    {
        Ready {
            rank: rank(id),
            position: self.position_of(id),
            id,
        }
    }
}

/// Heap entry for Kahn's ready set: highest rank first, then lowest position.
#[derive(Debug)]
struct Ready<'a> {
    rank: f64,
    position: usize,
    id: &'a str,
}

impl Ord for Ready<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank
            .total_cmp(&other.rank)
            .then_with(|| other.position.cmp(&self.position))
    }
}

impl PartialOrd for Ready<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Ready<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Ready<'_> {}

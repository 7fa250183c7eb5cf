use std::collections::HashSet;

use crate::{
    Error, Result,
    graph::{Graph, VertexId},
    tour::Tour,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Partial paths that were extended and explored further.
    pub expanded: usize,
    /// Branches cut because their partial cost met or exceeded the incumbent.
    pub pruned: usize,
    /// Hamiltonian paths that reached the closing-edge check.
    pub completed: usize,
    /// Number of times the incumbent improved.
    pub improvements: usize,
}

struct Frame {
    vertex: VertexId,
    next_edge: usize,
    cost_before: f64,
}

/// Depth-first branch-and-bound over literal edges only.
///
/// The search keeps its partial path, incumbent and counters in this context
/// object and walks an explicit frame stack, so depth is limited by memory
/// rather than by the call stack.
pub struct BranchAndBound<'g> {
    graph: &'g Graph,
    root: VertexId,
    path: Vec<VertexId>,
    on_path: HashSet<VertexId>,
    cost: f64,
    best_cost: f64,
    best_path: Vec<VertexId>,
    stats: SearchStats,
}

impl<'g> BranchAndBound<'g> {
    pub fn new(graph: &'g Graph, root: VertexId) -> Result<Self> {
        if !graph.contains_vertex(root) {
            return Err(Error::MissingRoot { root });
        }
        Ok(Self {
            graph,
            root,
            path: Vec::with_capacity(graph.vertex_count()),
            on_path: HashSet::with_capacity(graph.vertex_count()),
            cost: 0.0,
            best_cost: f64::INFINITY,
            best_path: Vec::new(),
            stats: SearchStats::default(),
        })
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Runs the search to completion. `None` when no Hamiltonian cycle
    /// exists over the graph's literal edges.
    pub fn run(&mut self) -> Option<Tour> {
        let graph = self.graph;
        let target = graph.vertex_count();
        self.path.clear();
        self.on_path.clear();
        self.cost = 0.0;
        self.best_cost = f64::INFINITY;
        self.best_path.clear();
        self.stats = SearchStats::default();

        self.enter(self.root, 0.0);
        if target == 1 {
            return Some(Tour::new(vec![self.root], 0.0));
        }

        let mut stack = vec![Frame {
            vertex: self.root,
            next_edge: 0,
            cost_before: 0.0,
        }];

        while let Some(frame) = stack.last_mut() {
            let outgoing = graph.outgoing(frame.vertex);
            let Some(&edge_id) = outgoing.get(frame.next_edge) else {
                if let Some(done) = stack.pop() {
                    self.leave(done.vertex, done.cost_before);
                }
                continue;
            };
            frame.next_edge += 1;

            let edge = graph.edge(edge_id);
            let next = edge.dest();
            if self.on_path.contains(&next) {
                continue;
            }

            let extended = self.cost + edge.weight();
            if extended >= self.best_cost {
                self.stats.pruned += 1;
                continue;
            }

            if self.path.len() + 1 == target {
                self.complete(next, extended);
                continue;
            }

            self.stats.expanded += 1;
            let cost_before = self.cost;
            self.enter(next, extended);
            stack.push(Frame {
                vertex: next,
                next_edge: 0,
                cost_before,
            });
        }

        log::debug!(
            "exact: complete n={} expanded={} pruned={} completed={} improvements={}",
            target,
            self.stats.expanded,
            self.stats.pruned,
            self.stats.completed,
            self.stats.improvements
        );

        if self.best_cost.is_finite() {
            Some(Tour::new(self.best_path.clone(), self.best_cost))
        } else {
            None
        }
    }

    fn enter(&mut self, vertex: VertexId, cost: f64) {
        self.path.push(vertex);
        self.on_path.insert(vertex);
        self.cost = cost;
    }

    fn leave(&mut self, vertex: VertexId, cost_before: f64) {
        self.path.pop();
        self.on_path.remove(&vertex);
        self.cost = cost_before;
    }

    /// `last` is the final unvisited vertex; the cycle closes only through a
    /// literal `last -> root` edge.
    fn complete(&mut self, last: VertexId, cost: f64) {
        self.stats.completed += 1;
        let Some(closing) = self.graph.distance(last, self.root) else {
            return;
        };
        let total = cost + closing;
        if total < self.best_cost {
            self.best_cost = total;
            self.best_path.clear();
            self.best_path.extend_from_slice(&self.path);
            self.best_path.push(last);
            self.stats.improvements += 1;
        }
    }
}

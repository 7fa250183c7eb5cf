use std::collections::HashMap;

use crate::graph::{EdgeId, Graph, VertexId};

/// Per-run scratch data for one vertex.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VertexState {
    pub visited: bool,
    pub distance: f64,
    /// Incoming tree/search edge.
    pub parent: Option<EdgeId>,
}

impl Default for VertexState {
    fn default() -> Self {
        Self {
            visited: false,
            distance: f64::INFINITY,
            parent: None,
        }
    }
}

/// Scratch table keyed by vertex id, built fresh for every algorithm run so
/// the graph itself never carries search state.
#[derive(Clone, Debug, Default)]
pub struct SearchState {
    entries: HashMap<VertexId, VertexState>,
}

impl SearchState {
    pub fn for_graph(graph: &Graph) -> Self {
        Self {
            entries: graph
                .vertices()
                .map(|v| (v.id(), VertexState::default()))
                .collect(),
        }
    }

    pub fn get(&self, id: VertexId) -> Option<&VertexState> {
        self.entries.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: VertexId) -> Option<&mut VertexState> {
        self.entries.get_mut(&id)
    }

    pub fn is_visited(&self, id: VertexId) -> bool {
        self.entries.get(&id).is_some_and(|s| s.visited)
    }

    pub fn distance(&self, id: VertexId) -> f64 {
        self.entries.get(&id).map_or(f64::INFINITY, |s| s.distance)
    }

    pub fn parent(&self, id: VertexId) -> Option<EdgeId> {
        self.entries.get(&id).and_then(|s| s.parent)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Ids of visited vertices, ascending.
    pub fn visited_ids(&self) -> Vec<VertexId> {
        let mut ids: Vec<VertexId> = self
            .entries
            .iter()
            .filter(|(_, s)| s.visited)
            .map(|(&id, _)| id)
            .collect();
        ids.sort_unstable();
        ids
    }
}

use super::VertexId;

/// Handle into the graph's edge arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(pub(crate) usize);

impl EdgeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Directed, weighted connection between two vertices.
#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
    pub(crate) origin: VertexId,
    pub(crate) dest: VertexId,
    pub(crate) weight: f64,
    /// Set only when the edge was inserted as half of a bidirectional pair.
    pub(crate) reverse: Option<EdgeId>,
}

impl Edge {
    pub(crate) fn new(origin: VertexId, dest: VertexId, weight: f64) -> Self {
        Self {
            origin,
            dest,
            weight,
            reverse: None,
        }
    }

    pub fn origin(&self) -> VertexId {
        self.origin
    }

    pub fn dest(&self) -> VertexId {
        self.dest
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn reverse(&self) -> Option<EdgeId> {
        self.reverse
    }
}

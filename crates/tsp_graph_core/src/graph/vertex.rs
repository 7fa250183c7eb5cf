use super::{EdgeId, VertexId};
use crate::geo::Coordinate;

#[derive(Clone, Debug, PartialEq)]
pub struct Vertex {
    pub(crate) id: VertexId,
    pub(crate) coordinate: Option<Coordinate>,
    /// Outgoing edges in insertion order.
    pub(crate) outgoing: Vec<EdgeId>,
}

impl Vertex {
    pub(crate) fn new(id: VertexId) -> Self {
        Self {
            id,
            coordinate: None,
            outgoing: Vec::new(),
        }
    }

    pub fn id(&self) -> VertexId {
        self.id
    }

    pub fn coordinate(&self) -> Option<Coordinate> {
        self.coordinate
    }

    pub fn outgoing(&self) -> &[EdgeId] {
        &self.outgoing
    }

    pub fn degree(&self) -> usize {
        self.outgoing.len()
    }
}

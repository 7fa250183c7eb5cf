//! Vertex/edge store and the distance oracle used by every tour algorithm.
//!
//! Edges live in an arena and are addressed by [`EdgeId`]; a bidirectional
//! pair records its partner as a handle, so no ownership cycles exist.

mod edge;
mod vertex;

use std::collections::HashMap;

pub use edge::{Edge, EdgeId};
pub use vertex::Vertex;

use crate::geo::Coordinate;

pub type VertexId = u32;

#[derive(Clone, Debug, Default)]
pub struct Graph {
    vertices: HashMap<VertexId, Vertex>,
    edges: Vec<Edge>,
    edge_lookup: HashMap<(VertexId, VertexId), EdgeId>,
    geodesic_fallback: bool,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_geodesic_fallback(mut self, enabled: bool) -> Self {
        self.geodesic_fallback = enabled;
        self
    }

    pub fn set_geodesic_fallback(&mut self, enabled: bool) {
        self.geodesic_fallback = enabled;
    }

    pub fn geodesic_fallback(&self) -> bool {
        self.geodesic_fallback
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn contains_vertex(&self, id: VertexId) -> bool {
        self.vertices.contains_key(&id)
    }

    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(&id)
    }

    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.vertices.values()
    }

    /// Vertex ids in ascending order.
    pub fn vertex_ids(&self) -> Vec<VertexId> {
        let mut ids: Vec<VertexId> = self.vertices.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.0]
    }

    pub fn find_edge(&self, origin: VertexId, dest: VertexId) -> Option<&Edge> {
        self.edge_lookup
            .get(&(origin, dest))
            .map(|&id| &self.edges[id.0])
    }

    pub fn find_edge_id(&self, origin: VertexId, dest: VertexId) -> Option<EdgeId> {
        self.edge_lookup.get(&(origin, dest)).copied()
    }

    /// Outgoing edge handles of `id`, empty when the vertex is unknown.
    pub fn outgoing(&self, id: VertexId) -> &[EdgeId] {
        self.vertices
            .get(&id)
            .map(Vertex::outgoing)
            .unwrap_or_default()
    }

    /// Returns `false` when a vertex with this id already exists.
    pub fn add_vertex(&mut self, id: VertexId) -> bool {
        if self.vertices.contains_key(&id) {
            return false;
        }
        self.vertices.insert(id, Vertex::new(id));
        true
    }

    /// Attaches a coordinate to an existing vertex.
    pub fn set_coordinate(&mut self, id: VertexId, coordinate: Coordinate) -> bool {
        match self.vertices.get_mut(&id) {
            Some(vertex) => {
                vertex.coordinate = Some(coordinate);
                true
            }
            None => false,
        }
    }

    /// Inserts or overwrites the directed edge `origin -> dest`.
    ///
    /// Fails when either endpoint is missing or the weight is negative or
    /// not finite.
    pub fn add_edge(&mut self, origin: VertexId, dest: VertexId, weight: f64) -> bool {
        self.insert_edge(origin, dest, weight).is_some()
    }

    /// Inserts `a -> b` and `b -> a` with the same weight and links them as
    /// mutual reverses.
    pub fn add_bidirectional_edge(&mut self, a: VertexId, b: VertexId, weight: f64) -> bool {
        if !self.can_connect(a, b, weight) {
            return false;
        }
        let (Some(forward), Some(backward)) = (
            self.insert_edge(a, b, weight),
            self.insert_edge(b, a, weight),
        ) else {
            return false;
        };
        self.edges[forward.0].reverse = Some(backward);
        self.edges[backward.0].reverse = Some(forward);
        true
    }

    /// Weight of the literal edge `v1 -> v2`, `None` when there is none.
    ///
    /// Never synthesises a distance; see [`Graph::distance_with_caching`].
    pub fn distance(&self, v1: VertexId, v2: VertexId) -> Option<f64> {
        self.find_edge(v1, v2).map(Edge::weight)
    }

    /// Weight of `v1 -> v2`, falling back to the haversine distance when no
    /// edge exists and geodesic fallback is enabled.
    ///
    /// A synthesised distance is memoised as a new bidirectional edge pair,
    /// so this call can grow the edge set by two.
    pub fn distance_with_caching(&mut self, v1: VertexId, v2: VertexId) -> Option<f64> {
        if let Some(weight) = self.distance(v1, v2) {
            return Some(weight);
        }
        if v1 == v2 && self.geodesic_fallback {
            return self.vertices.get(&v1)?.coordinate.map(|_| 0.0);
        }
        if !self.geodesic_fallback {
            return None;
        }

        let weight = self.geodesic_distance(v1, v2)?;
        self.add_bidirectional_edge(v1, v2, weight);
        log::trace!("graph: cached geodesic edge {v1}<->{v2} weight={weight:.3}");
        Some(weight)
    }

    /// Haversine distance between the coordinates of two vertices.
    pub fn geodesic_distance(&self, v1: VertexId, v2: VertexId) -> Option<f64> {
        let a = self.vertices.get(&v1)?.coordinate?;
        let b = self.vertices.get(&v2)?.coordinate?;
        Some(a.haversine(&b))
    }

    /// Discards every vertex and edge. The geodesic flag is kept.
    pub fn reset(&mut self) {
        self.vertices.clear();
        self.edges.clear();
        self.edge_lookup.clear();
    }

    fn can_connect(&self, origin: VertexId, dest: VertexId, weight: f64) -> bool {
        weight.is_finite()
            && weight >= 0.0
            && self.vertices.contains_key(&origin)
            && self.vertices.contains_key(&dest)
    }

    fn insert_edge(&mut self, origin: VertexId, dest: VertexId, weight: f64) -> Option<EdgeId> {
        if !self.can_connect(origin, dest, weight) {
            return None;
        }

        if let Some(&id) = self.edge_lookup.get(&(origin, dest)) {
            self.unlink_reverse(id);
            self.edges[id.0].weight = weight;
            return Some(id);
        }

        let id = EdgeId(self.edges.len());
        self.edges.push(Edge::new(origin, dest, weight));
        self.edge_lookup.insert((origin, dest), id);
        self.vertices.get_mut(&origin)?.outgoing.push(id);
        Some(id)
    }

    fn unlink_reverse(&mut self, id: EdgeId) {
        if let Some(partner) = self.edges[id.0].reverse.take()
            && self.edges[partner.0].reverse == Some(id)
        {
            self.edges[partner.0].reverse = None;
        }
    }
}

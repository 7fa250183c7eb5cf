use crate::graph::VertexId;

/// Mean Earth radius used by the haversine distance, in meters.
pub const EARTH_RADIUS: f64 = 6_371_000.0;

/// Every tour starts and ends at this vertex.
pub const ROOT_VERTEX: VertexId = 0;

/// 2-opt exchanges must improve the tour by more than this to be applied.
pub const TWO_OPT_IMPROVEMENT_EPSILON: f64 = 1e-9;

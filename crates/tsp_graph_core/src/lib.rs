//! Graph-and-tour engine for the Traveling Salesman Problem.
//!
//! Exact tours come from branch-and-bound over literal edges; approximate
//! tours come from a Prim MST walked in preorder, optionally refined with
//! 2-opt. Geocoded graphs synthesise missing distances with haversine.

pub mod algo;
mod constants;
mod error;
pub mod geo;
pub mod graph;
mod io;
pub mod logging;
mod solver;
mod tour;

pub use io::{dataset, options};

pub use constants::{EARTH_RADIUS, ROOT_VERTEX, TWO_OPT_IMPROVEMENT_EPSILON};
pub use error::{Error, Result};
pub use geo::Coordinate;
pub use graph::{Edge, EdgeId, Graph, Vertex, VertexId};
pub use io::options::SolverOptions;
pub use solver::{
    refine_tour, solve_approximate, solve_approximate_refined, solve_approximate_refined_with,
    solve_exact,
};
pub use tour::{RefinedTour, Tour, TourMetrics};

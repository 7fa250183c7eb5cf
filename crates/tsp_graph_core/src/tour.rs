use std::fmt;

use crate::graph::{Graph, VertexId};

/// Visiting order starting at the root; the cycle back to the first vertex
/// is implied and included in `cost`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Tour {
    pub path: Vec<VertexId>,
    pub cost: f64,
}

impl Tour {
    pub fn new(path: Vec<VertexId>, cost: f64) -> Self {
        Self { path, cost }
    }

    pub fn len(&self) -> usize {
        self.path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Every leg of the closed cycle, priced with literal edges only.
    /// `None` if some leg has no edge.
    pub fn legs(&self, graph: &Graph) -> Option<Vec<f64>> {
        let n = self.path.len();
        if n < 2 {
            return Some(Vec::new());
        }
        (0..n)
            .map(|i| graph.distance(self.path[i], self.path[(i + 1) % n]))
            .collect()
    }

    pub fn metrics(&self, graph: &Graph) -> Option<TourMetrics> {
        let legs = self.legs(graph)?;
        if legs.is_empty() {
            log::info!("metrics: n < 2 so there's nothing to report");
            return Some(TourMetrics::default());
        }

        let total: f64 = legs.iter().sum();
        let longest = legs.iter().copied().fold(0.0_f64, f64::max);
        let average = total / legs.len() as f64;

        log::info!(
            "metrics: n={} total={total:.3} longest={longest:.3} avg={average:.3}",
            self.path.len()
        );

        Some(TourMetrics {
            legs: legs.len(),
            total,
            longest,
            average,
        })
    }
}

impl fmt::Display for Tour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(first) = self.path.first() else {
            return Ok(());
        };
        for id in &self.path {
            write!(f, "{id} -> ")?;
        }
        write!(f, "{first}")
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TourMetrics {
    pub legs: usize,
    pub total: f64,
    pub longest: f64,
    pub average: f64,
}

/// Approximate tour after 2-opt, with the figures of the refinement run.
#[derive(Clone, Debug, PartialEq)]
pub struct RefinedTour {
    pub tour: Tour,
    pub initial_cost: f64,
    pub passes: usize,
    pub exchanges: usize,
    pub converged: bool,
}

impl RefinedTour {
    pub fn improvement(&self) -> f64 {
        self.initial_cost - self.tour.cost
    }
}

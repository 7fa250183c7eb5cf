//! The three public solve operations.
//!
//! All of them start and end the tour at [`ROOT_VERTEX`]. A missing root is
//! reported as [`Error::MissingRoot`], which callers can tell apart from the
//! exact solver's "no tour" outcome (`Ok(None)`).

use crate::{
    Error, Result,
    algo::{exact::BranchAndBound, mst, preorder, two_opt},
    constants::ROOT_VERTEX,
    graph::Graph,
    tour::{RefinedTour, Tour},
};

/// Provably optimal tour over the graph's literal edges.
///
/// `Ok(None)` when no Hamiltonian cycle exists over those edges. Geodesic
/// distances are never synthesised here, even with fallback enabled.
pub fn solve_exact(graph: &Graph) -> Result<Option<Tour>> {
    let mut search = BranchAndBound::new(graph, ROOT_VERTEX)?;
    let tour = search.run();
    match &tour {
        Some(tour) => log::info!(
            "exact: tour n={} cost={:.3} expanded={}",
            tour.len(),
            tour.cost,
            search.stats().expanded
        ),
        None => log::warn!(
            "exact: no hamiltonian cycle over literal edges n={}",
            graph.vertex_count()
        ),
    }
    Ok(tour)
}

/// MST + preorder tour, closed back to the root.
///
/// Only vertices reachable from the root are visited. Fails with
/// [`Error::NoRoute`] when a leg cannot be priced.
pub fn solve_approximate(graph: &mut Graph) -> Result<Tour> {
    let tree = mst::prim(graph, ROOT_VERTEX)?;
    let (path, mut cost) = preorder::construct(graph, &tree)?;

    if let Some(&last) = path.last()
        && path.len() > 1
    {
        cost += graph
            .distance_with_caching(last, ROOT_VERTEX)
            .ok_or(Error::NoRoute {
                from: last,
                to: ROOT_VERTEX,
            })?;
    }

    log::info!(
        "approximate: tour n={} cost={cost:.3} mst_weight={:.3}",
        path.len(),
        tree.total_weight()
    );
    Ok(Tour::new(path, cost))
}

/// Applies first-improvement 2-opt to an existing tour.
pub fn refine_tour(graph: &mut Graph, mut tour: Tour, max_passes: Option<usize>) -> RefinedTour {
    let initial_cost = tour.cost;
    let outcome = two_opt::refine(graph, &mut tour.path, tour.cost, max_passes);
    tour.cost = outcome.cost;
    RefinedTour {
        tour,
        initial_cost,
        passes: outcome.passes,
        exchanges: outcome.exchanges,
        converged: outcome.converged,
    }
}

/// MST + preorder tour, refined by 2-opt until no improving exchange remains.
pub fn solve_approximate_refined(graph: &mut Graph) -> Result<RefinedTour> {
    solve_approximate_refined_with(graph, None)
}

/// Like [`solve_approximate_refined`], stopping 2-opt after `max_passes`.
pub fn solve_approximate_refined_with(
    graph: &mut Graph,
    max_passes: Option<usize>,
) -> Result<RefinedTour> {
    let tour = solve_approximate(graph)?;
    Ok(refine_tour(graph, tour, max_passes))
}

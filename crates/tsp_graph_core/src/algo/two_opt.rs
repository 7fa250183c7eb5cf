use crate::{
    constants::TWO_OPT_IMPROVEMENT_EPSILON,
    graph::{Graph, VertexId},
};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TwoOptOutcome {
    /// Tour cost after the last applied exchange.
    pub cost: f64,
    pub passes: usize,
    pub exchanges: usize,
    /// `true` when the last pass found no improving exchange.
    pub converged: bool,
}

/// Priced with the caching oracle; a leg that cannot be priced is infinite.
fn leg(graph: &mut Graph, from: VertexId, to: VertexId) -> f64 {
    graph
        .distance_with_caching(from, to)
        .unwrap_or(f64::INFINITY)
}

/// Cost change of replacing legs `(i, i+1)` and `(j, j+1)` with `(i, j)` and
/// `(i+1, j+1)`, positions wrapping around the cyclic tour.
///
/// Infinite when any of the four legs cannot be priced, so the exchange is
/// never applied.
pub fn exchange_delta(graph: &mut Graph, tour: &[VertexId], i: usize, j: usize) -> f64 {
    let n = tour.len();
    let (a, b) = (tour[i], tour[(i + 1) % n]);
    let (c, d) = (tour[j], tour[(j + 1) % n]);
    let removed = leg(graph, a, b) + leg(graph, c, d);
    let added = leg(graph, a, c) + leg(graph, b, d);
    if !removed.is_finite() {
        return f64::INFINITY;
    }
    added - removed
}

/// First-improvement 2-opt over a cyclic tour.
///
/// Every improving exchange is applied as soon as it is found and the scan
/// continues on the mutated tour. Passes repeat until one applies nothing,
/// or until `max_passes` passes have run.
pub fn refine(
    graph: &mut Graph,
    tour: &mut [VertexId],
    cost: f64,
    max_passes: Option<usize>,
) -> TwoOptOutcome {
    let n = tour.len();
    let mut outcome = TwoOptOutcome {
        cost,
        ..TwoOptOutcome::default()
    };
    if n < 2 {
        outcome.converged = true;
        return outcome;
    }

    loop {
        if let Some(limit) = max_passes
            && outcome.passes >= limit
        {
            log::debug!("two_opt: stop reason=max_passes passes={limit}");
            break;
        }
        outcome.passes += 1;

        let mut pass_exchanges = 0usize;
        for i in 0..(n - 1) {
            for j in (i + 1)..n {
                let delta = exchange_delta(graph, tour, i, j);
                if delta < -TWO_OPT_IMPROVEMENT_EPSILON {
                    tour[(i + 1)..=j].reverse();
                    outcome.cost += delta;
                    pass_exchanges += 1;
                }
            }
        }

        outcome.exchanges += pass_exchanges;
        log::debug!(
            "two_opt: pass={} exchanges={} cost={:.3}",
            outcome.passes,
            pass_exchanges,
            outcome.cost
        );

        if pass_exchanges == 0 {
            outcome.converged = true;
            break;
        }
    }

    log::info!(
        "two_opt: complete n={} passes={} exchanges={} cost_before={:.3} cost_after={:.3}",
        n,
        outcome.passes,
        outcome.exchanges,
        cost,
        outcome.cost
    );
    outcome
}

#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng, rngs::StdRng};

    use super::{exchange_delta, refine};
    use crate::{algo::preorder::path_cost, geo::Coordinate, graph::Graph};

    fn random_geodesic_graph(n: u32, seed: u64) -> Graph {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut graph = Graph::new().with_geodesic_fallback(true);
        for id in 0..n {
            graph.add_vertex(id);
            graph.set_coordinate(
                id,
                Coordinate::new(rng.random_range(40.0..42.0), rng.random_range(-9.0..-7.0)),
            );
        }
        graph
    }

    fn cycle_cost(graph: &mut Graph, tour: &[u32]) -> f64 {
        let open = path_cost(graph, tour).expect("open path");
        let closing = graph
            .distance_with_caching(tour[tour.len() - 1], tour[0])
            .expect("closing leg");
        open + closing
    }

    #[test]
    fn refine_untangles_crossed_square() {
        // 0-2 and 1-3 are the diagonals; tour 0,2,1,3 crosses itself.
        let mut graph = Graph::new();
        for id in 0..4 {
            graph.add_vertex(id);
        }
        graph.add_bidirectional_edge(0, 1, 10.0);
        graph.add_bidirectional_edge(1, 2, 10.0);
        graph.add_bidirectional_edge(2, 3, 10.0);
        graph.add_bidirectional_edge(3, 0, 10.0);
        graph.add_bidirectional_edge(0, 2, 14.0);
        graph.add_bidirectional_edge(1, 3, 14.0);

        let mut tour = vec![0, 2, 1, 3];
        let outcome = refine(&mut graph, &mut tour, 48.0, None);

        assert!(outcome.converged);
        assert_eq!(outcome.exchanges, 1);
        assert!((outcome.cost - 40.0).abs() < 1e-9);
        assert_eq!(cycle_cost(&mut graph, &tour), 40.0);
    }

    #[test]
    fn refine_never_increases_cost_and_tracks_true_cost() {
        let mut graph = random_geodesic_graph(40, 11);
        let mut tour: Vec<u32> = (0..40).collect();
        let before = cycle_cost(&mut graph, &tour);

        let outcome = refine(&mut graph, &mut tour, before, None);

        assert!(outcome.cost <= before);
        let actual = cycle_cost(&mut graph, &tour);
        assert!((outcome.cost - actual).abs() < 1e-6 * actual);

        let mut sorted = tour.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..40).collect::<Vec<_>>());
    }

    #[test]
    fn refine_is_idempotent_at_convergence() {
        let mut graph = random_geodesic_graph(25, 3);
        let mut tour: Vec<u32> = (0..25).rev().collect();
        let before = cycle_cost(&mut graph, &tour);

        let first = refine(&mut graph, &mut tour, before, None);
        let snapshot = tour.clone();
        let second = refine(&mut graph, &mut tour, first.cost, None);

        assert!(second.converged);
        assert_eq!(second.passes, 1);
        assert_eq!(second.exchanges, 0);
        assert_eq!(tour, snapshot);
        for i in 0..tour.len() - 1 {
            for j in (i + 1)..tour.len() {
                assert!(exchange_delta(&mut graph, &tour, i, j) >= -1e-9);
            }
        }
    }

    #[test]
    fn refine_honours_pass_limit() {
        let mut graph = random_geodesic_graph(30, 5);
        let mut tour: Vec<u32> = (0..30).collect();
        let before = cycle_cost(&mut graph, &tour);

        let outcome = refine(&mut graph, &mut tour, before, Some(1));
        assert_eq!(outcome.passes, 1);
        assert!(outcome.cost <= before);
    }

    #[test]
    fn refine_skips_exchanges_needing_missing_legs() {
        // Only the ring edges exist; any exchange needs a missing leg.
        let mut graph = Graph::new();
        for id in 0..5 {
            graph.add_vertex(id);
        }
        for id in 0..5 {
            graph.add_bidirectional_edge(id, (id + 1) % 5, 1.0);
        }

        let mut tour = vec![0, 1, 2, 3, 4];
        let outcome = refine(&mut graph, &mut tour, 5.0, None);
        assert_eq!(outcome.exchanges, 0);
        assert_eq!(tour, vec![0, 1, 2, 3, 4]);
        assert_eq!(graph.edge_count(), 10);
    }

    #[test]
    fn refine_keeps_tours_whose_own_legs_are_missing() {
        let mut graph = Graph::new();
        for id in 0..4 {
            graph.add_vertex(id);
        }
        for id in 0..4 {
            graph.add_bidirectional_edge(id, (id + 1) % 4, 1.0);
        }

        // 0 -> 2 and 1 -> 3 have no edge.
        let mut tour = vec![0, 2, 1, 3];
        assert_eq!(exchange_delta(&mut graph, &tour, 0, 2), f64::INFINITY);

        let outcome = refine(&mut graph, &mut tour, f64::INFINITY, None);
        assert_eq!(outcome.exchanges, 0);
        assert_eq!(outcome.cost, f64::INFINITY);
        assert_eq!(tour, vec![0, 2, 1, 3]);
    }

    #[test]
    fn refine_leaves_tiny_tours_alone() {
        let mut graph = Graph::new();
        graph.add_vertex(0);
        let mut tour = vec![0];
        let outcome = refine(&mut graph, &mut tour, 0.0, None);
        assert!(outcome.converged);
        assert_eq!(outcome.passes, 0);
    }
}

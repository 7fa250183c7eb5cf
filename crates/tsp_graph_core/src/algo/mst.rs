use crate::{
    Error, Result,
    algo::{queue::IndexedMinQueue, state::SearchState},
    graph::{EdgeId, Graph, VertexId},
};

/// Prim's tree rooted at one vertex. Vertices unreachable from the root
/// stay unvisited and are not part of the tree.
#[derive(Clone, Debug)]
pub struct SpanningTree {
    root: VertexId,
    state: SearchState,
    spanned: usize,
    total_weight: f64,
}

impl SpanningTree {
    pub fn root(&self) -> VertexId {
        self.root
    }

    pub fn contains(&self, id: VertexId) -> bool {
        self.state.is_visited(id)
    }

    /// Tree edge entering `id`; `None` for the root and unreached vertices.
    pub fn parent_edge(&self, id: VertexId) -> Option<EdgeId> {
        self.state.parent(id)
    }

    pub fn spanned_count(&self) -> usize {
        self.spanned
    }

    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// Children of `id` in the order its outgoing edges were inserted.
    pub fn children<'a>(
        &'a self,
        graph: &'a Graph,
        id: VertexId,
    ) -> impl Iterator<Item = VertexId> + 'a {
        graph.outgoing(id).iter().filter_map(move |&edge_id| {
            let dest = graph.edge(edge_id).dest();
            (self.parent_edge(dest) == Some(edge_id)).then_some(dest)
        })
    }
}

/// Builds a minimum spanning tree with Prim's algorithm.
///
/// A neighbour's key is the weight of the single edge reaching it, not the
/// accumulated path cost.
pub fn prim(graph: &Graph, root: VertexId) -> Result<SpanningTree> {
    if !graph.contains_vertex(root) {
        return Err(Error::MissingRoot { root });
    }

    let mut state = SearchState::for_graph(graph);
    let mut queue = IndexedMinQueue::with_capacity(graph.vertex_count());

    if let Some(entry) = state.get_mut(root) {
        entry.distance = 0.0;
    }
    queue.push(root, 0.0);

    let mut spanned = 0usize;
    let mut total_weight = 0.0;

    while let Some((v, key)) = queue.pop_min() {
        let Some(entry) = state.get_mut(v) else {
            continue;
        };
        entry.visited = true;
        spanned += 1;
        total_weight += key;

        for &edge_id in graph.outgoing(v) {
            let edge = graph.edge(edge_id);
            let Some(neighbour) = state.get_mut(edge.dest()) else {
                continue;
            };
            if neighbour.visited || edge.weight() >= neighbour.distance {
                continue;
            }

            let previous = neighbour.distance;
            neighbour.distance = edge.weight();
            neighbour.parent = Some(edge_id);
            if previous.is_infinite() {
                queue.push(edge.dest(), edge.weight());
            } else {
                queue.decrease_key(edge.dest(), edge.weight());
            }
        }
    }

    let unreachable = graph.vertex_count() - spanned;
    if unreachable > 0 {
        log::warn!("mst: root={root} leaves unreachable={unreachable} vertices out of the tree");
    }
    log::debug!("mst: complete root={root} spanned={spanned} weight={total_weight:.3}");

    Ok(SpanningTree {
        root,
        state,
        spanned,
        total_weight,
    })
}

#[cfg(test)]
mod tests {
    use super::prim;
    use crate::{Error, graph::Graph};

    fn square_with_diagonals() -> Graph {
        let mut graph = Graph::new();
        for id in 0..4 {
            graph.add_vertex(id);
        }
        graph.add_bidirectional_edge(0, 1, 10.0);
        graph.add_bidirectional_edge(1, 2, 10.0);
        graph.add_bidirectional_edge(2, 3, 10.0);
        graph.add_bidirectional_edge(3, 0, 10.0);
        graph.add_bidirectional_edge(0, 2, 14.14);
        graph.add_bidirectional_edge(1, 3, 14.14);
        graph
    }

    #[test]
    fn prim_fails_without_root() {
        let mut graph = Graph::new();
        graph.add_vertex(1);
        let err = prim(&graph, 0).expect_err("root is missing");
        assert!(matches!(err, Error::MissingRoot { root: 0 }));
    }

    #[test]
    fn prim_uses_edge_weight_not_path_cost() {
        // Dijkstra would reach 2 through 0 (cost 5); Prim attaches it to 1 (weight 2).
        let mut graph = Graph::new();
        for id in 0..3 {
            graph.add_vertex(id);
        }
        graph.add_bidirectional_edge(0, 1, 4.0);
        graph.add_bidirectional_edge(1, 2, 2.0);
        graph.add_bidirectional_edge(0, 2, 5.0);

        let tree = prim(&graph, 0).expect("tree");
        let parent = tree.parent_edge(2).expect("2 has a parent");
        assert_eq!(graph.edge(parent).origin(), 1);
        assert_eq!(tree.total_weight(), 6.0);
    }

    #[test]
    fn prim_spans_square_without_diagonals() {
        let graph = square_with_diagonals();
        let tree = prim(&graph, 0).expect("tree");

        assert_eq!(tree.spanned_count(), 4);
        assert_eq!(tree.total_weight(), 30.0);
        assert!(tree.parent_edge(0).is_none());
        for id in 1..4 {
            let edge = graph.edge(tree.parent_edge(id).expect("parent"));
            assert_eq!(edge.weight(), 10.0);
            assert_eq!(edge.dest(), id);
        }
    }

    #[test]
    fn parent_chains_reach_root_without_cycles() {
        let graph = square_with_diagonals();
        let tree = prim(&graph, 0).expect("tree");

        for id in 1..4 {
            let mut current = id;
            let mut steps = 0;
            while let Some(edge) = tree.parent_edge(current) {
                current = graph.edge(edge).origin();
                steps += 1;
                assert!(steps <= graph.vertex_count(), "cycle through {id}");
            }
            assert_eq!(current, tree.root());
        }
    }

    #[test]
    fn unreachable_vertices_stay_out_of_tree() {
        let mut graph = Graph::new();
        for id in 0..4 {
            graph.add_vertex(id);
        }
        graph.add_bidirectional_edge(0, 1, 1.0);
        graph.add_bidirectional_edge(2, 3, 1.0);

        let tree = prim(&graph, 0).expect("tree");
        assert_eq!(tree.spanned_count(), 2);
        assert!(tree.contains(1));
        assert!(!tree.contains(2));
        assert!(tree.state().distance(3).is_infinite());
    }

    #[test]
    fn children_follow_only_tree_edges() {
        let graph = square_with_diagonals();
        let tree = prim(&graph, 0).expect("tree");

        let mut seen: Vec<u32> = (0..4)
            .flat_map(|id| tree.children(&graph, id).collect::<Vec<_>>())
            .collect();
        seen.sort_unstable();
        assert_eq!(seen, vec![1, 2, 3]);
    }
}

use crate::{
    Error, Result,
    algo::mst::SpanningTree,
    graph::{Graph, VertexId},
};

/// Depth-first preorder of the tree, starting at its root.
///
/// Children are visited in the order of the parent's outgoing edges. Uses an
/// explicit stack so deep trees cannot overflow the call stack.
pub fn preorder_walk(graph: &Graph, tree: &SpanningTree) -> Vec<VertexId> {
    let mut order = Vec::with_capacity(tree.spanned_count());
    let mut stack = vec![tree.root()];

    while let Some(v) = stack.pop() {
        order.push(v);
        let children: Vec<VertexId> = tree.children(graph, v).collect();
        stack.extend(children.into_iter().rev());
    }

    order
}

/// Sum of consecutive legs of an open path, priced with the caching
/// distance oracle.
pub fn path_cost(graph: &mut Graph, path: &[VertexId]) -> Result<f64> {
    let mut total = 0.0;
    for pair in path.windows(2) {
        let (from, to) = (pair[0], pair[1]);
        total += graph
            .distance_with_caching(from, to)
            .ok_or(Error::NoRoute { from, to })?;
    }
    Ok(total)
}

/// Preorder visiting sequence plus its open-path cost. The closing leg back
/// to the root is left to the caller.
pub fn construct(graph: &mut Graph, tree: &SpanningTree) -> Result<(Vec<VertexId>, f64)> {
    let order = preorder_walk(graph, tree);
    let cost = path_cost(graph, &order)?;
    log::debug!("preorder: complete n={} open_cost={cost:.3}", order.len());
    Ok((order, cost))
}

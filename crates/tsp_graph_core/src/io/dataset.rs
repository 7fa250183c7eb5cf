//! Loads CSV datasets and synthetic point sets into a [`Graph`].
//!
//! Edge lists (`origin,destination,distance`) describe toy and fully
//! connected graphs; real-world graphs come as a directory with `nodes.csv`
//! (`id,longitude,latitude`) and `edges.csv`. Every file has a header line.

use std::{fs, path::Path};

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    Error, Result,
    geo::Coordinate,
    graph::{Graph, VertexId},
    options::{DatasetKind, SolverOptions},
};

const NODES_FILE: &str = "nodes.csv";
const EDGES_FILE: &str = "edges.csv";

const RANDOM_LAT_RANGE: (f64, f64) = (-60.0, 60.0);
const RANDOM_LNG_RANGE: (f64, f64) = (-180.0, 180.0);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub vertices: usize,
    pub edges: usize,
    /// Edge rows whose endpoints are not known vertices.
    pub skipped_edges: usize,
}

/// Resets `graph` and fills it according to `options`.
pub fn load_from_options(graph: &mut Graph, options: &SolverOptions) -> Result<LoadSummary> {
    match options.kind {
        DatasetKind::Random => generate_random(graph, options.random_points, options.seed),
        kind => {
            let path = options
                .dataset_path()
                .ok_or_else(|| Error::invalid_input("no dataset path given"))?;
            match kind {
                DatasetKind::Real => load_real_world(graph, path),
                _ => load_edge_list(graph, path),
            }
        }
    }
}

/// Loads a toy or fully connected edge list. Geodesic fallback is disabled.
pub fn load_edge_list(graph: &mut Graph, path: &Path) -> Result<LoadSummary> {
    let text = read(path)?;
    parse_edge_list(graph, &text)
}

/// Loads `nodes.csv` and `edges.csv` from `dir`. Geodesic fallback is enabled.
pub fn load_real_world(graph: &mut Graph, dir: &Path) -> Result<LoadSummary> {
    let nodes = read(&dir.join(NODES_FILE))?;
    let edges = read(&dir.join(EDGES_FILE))?;
    parse_real_world(graph, &nodes, &edges)
}

pub fn parse_edge_list(graph: &mut Graph, text: &str) -> Result<LoadSummary> {
    graph.reset();
    graph.set_geodesic_fallback(false);

    for (line_no, fields) in rows(text) {
        let origin = field::<VertexId>(&fields, 0, "origin", line_no)?;
        let dest = field::<VertexId>(&fields, 1, "destination", line_no)?;
        let weight = field::<f64>(&fields, 2, "distance", line_no)?;

        graph.add_vertex(origin);
        graph.add_vertex(dest);
        if !graph.add_bidirectional_edge(origin, dest, weight) {
            return Err(Error::invalid_data(format!(
                "line {line_no}: distance must be a non-negative number, got {weight}"
            )));
        }
    }

    let summary = LoadSummary {
        vertices: graph.vertex_count(),
        edges: graph.edge_count(),
        skipped_edges: 0,
    };
    log::info!(
        "dataset: edge list vertices={} edges={}",
        summary.vertices,
        summary.edges
    );
    Ok(summary)
}

pub fn parse_real_world(graph: &mut Graph, nodes: &str, edges: &str) -> Result<LoadSummary> {
    graph.reset();
    graph.set_geodesic_fallback(true);

    for (line_no, fields) in rows(nodes) {
        let id = field::<VertexId>(&fields, 0, "id", line_no)?;
        let lng = field::<f64>(&fields, 1, "longitude", line_no)?;
        let lat = field::<f64>(&fields, 2, "latitude", line_no)?;

        let coordinate = Coordinate::new(lat, lng);
        if !coordinate.is_valid() {
            return Err(Error::invalid_data(format!(
                "{NODES_FILE} line {line_no}: coordinate out of range: {coordinate}"
            )));
        }
        if !graph.add_vertex(id) {
            log::warn!("dataset: {NODES_FILE} line {line_no}: duplicate vertex id={id}");
        }
        graph.set_coordinate(id, coordinate);
    }

    let mut skipped_edges = 0usize;
    for (line_no, fields) in rows(edges) {
        let origin = field::<VertexId>(&fields, 0, "origin", line_no)?;
        let dest = field::<VertexId>(&fields, 1, "destination", line_no)?;
        let weight = field::<f64>(&fields, 2, "distance", line_no)?;

        if !graph.add_bidirectional_edge(origin, dest, weight) {
            skipped_edges += 1;
            log::debug!("dataset: {EDGES_FILE} line {line_no}: skipped edge {origin}<->{dest}");
        }
    }

    if skipped_edges > 0 {
        log::warn!("dataset: skipped_edges={skipped_edges} with unknown endpoints or bad weights");
    }

    let summary = LoadSummary {
        vertices: graph.vertex_count(),
        edges: graph.edge_count(),
        skipped_edges,
    };
    log::info!(
        "dataset: real world vertices={} edges={} skipped={}",
        summary.vertices,
        summary.edges,
        summary.skipped_edges
    );
    Ok(summary)
}

/// `n` random points with ids `0..n`, fully connected by bidirectional
/// edges weighted with their haversine distance.
pub fn generate_random(graph: &mut Graph, n: usize, seed: u64) -> Result<LoadSummary> {
    let count = VertexId::try_from(n).map_err(|_| {
        Error::invalid_input(format!("random point count {n} exceeds the vertex id range"))
    })?;

    graph.reset();
    graph.set_geodesic_fallback(true);

    let mut rng = StdRng::seed_from_u64(seed);
    let mut points = Vec::with_capacity(n);
    for id in 0..count {
        let lat = rng.random_range(RANDOM_LAT_RANGE.0..RANDOM_LAT_RANGE.1);
        let lng = rng.random_range(RANDOM_LNG_RANGE.0..RANDOM_LNG_RANGE.1);
        let coordinate = Coordinate::new(lat, lng);
        graph.add_vertex(id);
        graph.set_coordinate(id, coordinate);
        points.push((id, coordinate));
    }

    for (idx, &(a, coord_a)) in points.iter().enumerate() {
        for &(b, coord_b) in &points[idx + 1..] {
            graph.add_bidirectional_edge(a, b, coord_a.haversine(&coord_b));
        }
    }

    let summary = LoadSummary {
        vertices: graph.vertex_count(),
        edges: graph.edge_count(),
        skipped_edges: 0,
    };
    log::info!(
        "dataset: random vertices={} edges={} seed={seed}",
        summary.vertices,
        summary.edges
    );
    Ok(summary)
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        Error::invalid_input(format!("failed to read dataset {}: {e}", path.display()))
    })
}

/// Data rows after the header, with 1-based line numbers. Blank lines are skipped.
fn rows(text: &str) -> impl Iterator<Item = (usize, Vec<String>)> + '_ {
    text.lines()
        .enumerate()
        .skip(1)
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| (idx + 1, split_csv_line(line)))
}

fn field<T: std::str::FromStr>(
    fields: &[String],
    idx: usize,
    name: &str,
    line_no: usize,
) -> Result<T> {
    let raw = fields
        .get(idx)
        .ok_or_else(|| Error::invalid_data(format!("line {line_no}: missing {name}")))?;
    raw.trim()
        .parse::<T>()
        .map_err(|_| Error::invalid_data(format!("line {line_no}: invalid {name}: {raw}")))
}

/// Splits one CSV line on commas. Double-quoted fields may contain commas;
/// a doubled quote inside quotes is a literal quote.
pub fn split_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.trim_end_matches('\r').chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);
    fields
}

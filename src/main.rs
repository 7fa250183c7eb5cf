use std::{process, time::Instant};

use log::{info, warn};

use tsp_graph_core::{
    Error, Graph, ROOT_VERTEX, Result, SolverOptions, Tour, dataset, logging, refine_tour,
    solve_approximate, solve_exact,
};

fn main() -> Result<()> {
    let options = match SolverOptions::from_args() {
        Ok(options) => options,
        Err(err) => {
            eprintln!("{err}");
            process::exit(2);
        }
    };
    logging::init_logger(&options)?;

    let now = Instant::now();
    let mut graph = Graph::new();
    let summary = dataset::load_from_options(&mut graph, &options)?;
    info!(
        "input: kind={:?} vertices={} edges={} skipped_edges={} time={:.3}s",
        options.kind,
        summary.vertices,
        summary.edges,
        summary.skipped_edges,
        now.elapsed().as_secs_f32()
    );
    println!("Loaded vertices: {}", graph.vertex_count());

    if !graph.contains_vertex(ROOT_VERTEX) {
        return Err(Error::MissingRoot { root: ROOT_VERTEX });
    }

    if options.algorithm.runs_exact() {
        run_exact(&graph, &options);
    }
    if options.algorithm.runs_approximate() {
        run_approximate(&mut graph, &options)?;
    }
    if options.algorithm.runs_refined() {
        run_refined(&mut graph, &options)?;
    }

    Ok(())
}

fn run_exact(graph: &Graph, options: &SolverOptions) {
    println!("\n== Backtracking (exact) ==");
    if graph.vertex_count() > options.max_exact_vertices {
        warn!(
            "exact: skipped n={} max_exact_vertices={}",
            graph.vertex_count(),
            options.max_exact_vertices
        );
        println!(
            "Skipped: {} vertices exceeds --max-exact-vertices {}",
            graph.vertex_count(),
            options.max_exact_vertices
        );
        return;
    }

    let start = Instant::now();
    match solve_exact(graph) {
        Ok(Some(tour)) => {
            print_tour(&tour, options);
            print_elapsed("The execution time was", start);
        }
        Ok(None) => println!("No Hamiltonian cycle exists over the dataset's edges."),
        Err(err) => println!("Exact solve failed: {err}"),
    }
}

fn run_approximate(graph: &mut Graph, options: &SolverOptions) -> Result<()> {
    println!("\n== Triangular approximation ==");
    let start = Instant::now();
    let tour = solve_approximate(graph)?;
    print_tour(&tour, options);
    print_elapsed("The execution time was", start);
    print_metrics(&tour, graph);
    Ok(())
}

fn run_refined(graph: &mut Graph, options: &SolverOptions) -> Result<()> {
    println!("\n== Triangular approximation + 2-opt ==");
    let start = Instant::now();
    let tour = solve_approximate(graph)?;
    let middle = Instant::now();
    let refined = refine_tour(graph, tour, options.max_two_opt_passes());

    print_tour(&refined.tour, options);
    println!("The total distance without 2-opt was: {:.3}", refined.initial_cost);
    println!("2-opt reduced the path cost by: {:.3}", refined.improvement());
    if !refined.converged {
        println!(
            "2-opt stopped after {} passes before reaching a local optimum",
            refined.passes
        );
    }
    println!(
        "The path creation took: {} microseconds",
        (middle - start).as_micros()
    );
    print_elapsed("The path improvement took", middle);
    print_metrics(&refined.tour, graph);
    Ok(())
}

fn print_tour(tour: &Tour, options: &SolverOptions) {
    if tour.len() <= options.print_path_limit {
        println!("The TSP path is: {tour}");
    } else {
        println!("The TSP path visits {} vertices", tour.len());
    }
    println!("The total distance is: {:.3}", tour.cost);
}

fn print_metrics(tour: &Tour, graph: &Graph) {
    if let Some(metrics) = tour.metrics(graph)
        && metrics.legs > 0
    {
        println!(
            "Longest leg: {:.3}, average leg: {:.3}",
            metrics.longest, metrics.average
        );
    }
}

fn print_elapsed(label: &str, since: Instant) {
    println!("{label}: {} microseconds", since.elapsed().as_micros());
}

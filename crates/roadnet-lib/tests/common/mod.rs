//! Common test utilities and fixture helpers.
//!
//! Builders for small networks, a seeded random network generator, and
//! brute-force reference searches used to check the real ones.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};
use roadnet_lib::{Criterion, Graph, Location, RoadStatus, SpeedTable, Surface};

#[allow(dead_code)]
pub fn loc(name: &str) -> Location {
    Location::new(name)
}

#[allow(dead_code)]
pub fn names(path: &[Location]) -> Vec<&str> {
    path.iter().map(Location::as_str).collect()
}

/// Build a graph from `(from, to, km, surface, status)` tuples.
#[allow(dead_code)]
pub fn network(roads: &[(&str, &str, f64, Surface, RoadStatus)]) -> Graph {
    let mut graph = Graph::new();
    for (from, to, distance, surface, status) in roads {
        graph
            .add_road(&loc(from), &loc(to), *distance, *surface, *status)
            .expect("fixture road is valid");
    }
    graph
}

/// Seeded random network over `n0..n{size}` with integer distances, some
/// closed roads, unpaved roads, and `flood` hazards.
#[allow(dead_code)]
pub fn random_network(seed: u64, size: usize, density: u64) -> Graph {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut graph = Graph::new();
    for a in 0..size {
        for b in (a + 1)..size {
            if rng.random_range(0..100) >= density {
                continue;
            }
            let from = loc(&format!("n{a}"));
            let to = loc(&format!("n{b}"));
            let distance = rng.random_range(1..=20u32) as f64;
            let surface = if rng.random_bool(0.4) {
                Surface::Unpaved
            } else {
                Surface::Paved
            };
            let status = if rng.random_bool(0.15) {
                RoadStatus::Closed
            } else {
                RoadStatus::Open
            };
            graph
                .add_road(&from, &to, distance, surface, status)
                .expect("generated road is valid");
            if rng.random_bool(0.2) {
                graph.add_hazard(&from, &to, "flood").expect("road exists");
            }
        }
    }
    graph
}

/// Cost of `path` under `criterion`, or `None` if some segment is missing or
/// not allowed.
#[allow(dead_code)]
pub fn path_cost(graph: &Graph, path: &[Location], criterion: &Criterion) -> Option<f64> {
    let speeds = SpeedTable::default();
    let mut total = 0.0;
    for pair in path.windows(2) {
        let road = graph.road(&pair[0], &pair[1])?;
        if !criterion.allows(road) {
            return None;
        }
        total += criterion.edge_cost(road, &speeds);
    }
    Some(total)
}

/// Every admissible simple path from `start` to `goal`, by depth-first
/// enumeration.
#[allow(dead_code)]
pub fn all_simple_paths(
    graph: &Graph,
    start: &Location,
    goal: &Location,
    criterion: &Criterion,
) -> Vec<Vec<Location>> {
    fn walk(
        graph: &Graph,
        goal: &Location,
        criterion: &Criterion,
        current: &mut Vec<Location>,
        out: &mut Vec<Vec<Location>>,
    ) {
        let last = current.last().expect("path is never empty").clone();
        if &last == goal {
            out.push(current.clone());
            return;
        }
        let next: Vec<Location> = graph
            .neighbours(&last, |road| criterion.allows(road))
            .map(|edge| edge.target.clone())
            .collect();
        for target in next {
            if current.contains(&target) {
                continue;
            }
            current.push(target);
            walk(graph, goal, criterion, current, out);
            current.pop();
        }
    }

    let mut out = Vec::new();
    if graph.contains_location(start) && graph.contains_location(goal) {
        walk(graph, goal, criterion, &mut vec![start.clone()], &mut out);
    }
    out
}

/// Frontier search with no pruning at all: the whole list of candidate paths
/// is kept, the cheapest (earliest on ties) is taken each round, or the
/// oldest when `fifo` is set.
#[allow(dead_code)]
pub fn naive_search(
    graph: &Graph,
    start: &Location,
    goal: &Location,
    criterion: &Criterion,
    fifo: bool,
) -> Option<Vec<Location>> {
    if !graph.contains_location(start) || !graph.contains_location(goal) {
        return None;
    }
    let speeds = SpeedTable::default();
    let mut frontier: VecDeque<(f64, Vec<Location>)> = VecDeque::new();
    frontier.push_back((0.0, vec![start.clone()]));

    loop {
        let index = if fifo {
            0
        } else {
            let mut best = 0;
            for (i, (cost, _)) in frontier.iter().enumerate() {
                if *cost < frontier[best].0 {
                    best = i;
                }
            }
            best
        };
        let (cost, path) = frontier.remove(index)?;
        let last = path.last().expect("path is never empty").clone();
        if &last == goal {
            return Some(path);
        }
        for edge in graph.neighbours(&last, |road| criterion.allows(road)) {
            if path.contains(edge.target) {
                continue;
            }
            let step = if fifo {
                1.0
            } else {
                criterion.edge_cost(edge.road, &speeds)
            };
            let mut extended = path.clone();
            extended.push(edge.target.clone());
            frontier.push_back((cost + step, extended));
        }
    }
}

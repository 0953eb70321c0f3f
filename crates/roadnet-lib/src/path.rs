use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet, VecDeque};

use tracing::debug;

use crate::cost::{Criterion, SpeedTable};
use crate::graph::{Graph, Location, Road};

/// Path returned by a search together with the cost it accumulated under the
/// criterion that drove it.
#[derive(Debug, Clone, PartialEq)]
pub struct FoundPath {
    pub steps: Vec<Location>,
    pub cost: f64,
}

impl FoundPath {
    /// Number of road segments in the path.
    pub fn hop_count(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }
}

/// Find a route using the search that suits `criterion`: breadth-first for
/// unweighted criteria, uniform-cost otherwise. Uses the default speed table.
pub fn find_route(
    graph: &Graph,
    start: &Location,
    goal: &Location,
    criterion: &Criterion,
) -> Option<FoundPath> {
    if criterion.is_unweighted() {
        find_route_bfs(graph, start, goal, criterion)
    } else {
        find_route_uniform_cost(graph, start, goal, criterion, &SpeedTable::default())
    }
}

/// Run breadth-first search over the roads `criterion` allows.
///
/// The first path dequeued that ends at `goal` is returned; FIFO order makes
/// it one with the fewest segments. The reported cost is the hop count.
pub fn find_route_bfs(
    graph: &Graph,
    start: &Location,
    goal: &Location,
    criterion: &Criterion,
) -> Option<FoundPath> {
    search(graph, start, goal, criterion, |_| 1.0, FifoFrontier::default())
}

/// Run uniform-cost search over the roads `criterion` allows, weighing each
/// road with the criterion's edge cost.
///
/// Candidates are dequeued by lowest accumulated cost, ties going to the one
/// inserted first. The first dequeued candidate ending at `goal` is optimal
/// because every edge cost is non-negative.
pub fn find_route_uniform_cost(
    graph: &Graph,
    start: &Location,
    goal: &Location,
    criterion: &Criterion,
    speeds: &SpeedTable,
) -> Option<FoundPath> {
    search(
        graph,
        start,
        goal,
        criterion,
        |road| criterion.edge_cost(road, speeds),
        CostFrontier::default(),
    )
}

/// One candidate partial path, stored as a link to its parent candidate.
#[derive(Debug, Clone, Copy)]
struct Candidate<'g> {
    location: &'g Location,
    parent: Option<usize>,
    cost: f64,
}

/// Ordering discipline for the candidates awaiting expansion.
trait Frontier {
    fn push(&mut self, candidate: usize, cost: f64);
    fn pop(&mut self) -> Option<usize>;
    fn len(&self) -> usize;
}

#[derive(Debug, Default)]
struct FifoFrontier {
    queue: VecDeque<usize>,
}

impl Frontier for FifoFrontier {
    fn push(&mut self, candidate: usize, _cost: f64) {
        self.queue.push_back(candidate);
    }

    fn pop(&mut self) -> Option<usize> {
        self.queue.pop_front()
    }

    fn len(&self) -> usize {
        self.queue.len()
    }
}

#[derive(Debug, Default)]
struct CostFrontier {
    heap: BinaryHeap<QueueEntry>,
    sequence: u64,
}

impl Frontier for CostFrontier {
    fn push(&mut self, candidate: usize, cost: f64) {
        self.heap.push(QueueEntry {
            cost: FloatOrd(cost),
            sequence: self.sequence,
            candidate,
        });
        self.sequence += 1;
    }

    fn pop(&mut self) -> Option<usize> {
        self.heap.pop().map(|entry| entry.candidate)
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}

// Edge costs are strictly positive and equal-cost candidates leave the
// frontier in insertion order, so the first candidate expanded at a location
// is the cheapest, earliest-found way to reach it. Later candidates for an
// expanded location are dropped; this also keeps every path simple.
fn search<W, F>(
    graph: &Graph,
    start: &Location,
    goal: &Location,
    criterion: &Criterion,
    weigh: W,
    mut frontier: F,
) -> Option<FoundPath>
where
    W: Fn(&Road) -> f64,
    F: Frontier,
{
    let origin = graph.location(start)?;
    if !graph.contains_location(goal) {
        return None;
    }

    let mut candidates = vec![Candidate {
        location: origin,
        parent: None,
        cost: 0.0,
    }];
    let mut expanded: HashSet<&Location> = HashSet::new();
    let mut peak = 1usize;
    frontier.push(0, 0.0);

    while let Some(index) = frontier.pop() {
        let current = candidates[index];
        if current.location == goal {
            debug!(
                %criterion,
                start = %start,
                goal = %goal,
                cost = current.cost,
                expansions = expanded.len(),
                frontier_peak = peak,
                "path found"
            );
            return Some(FoundPath {
                steps: reconstruct_path(&candidates, index),
                cost: current.cost,
            });
        }
        if !expanded.insert(current.location) {
            continue;
        }

        for edge in graph.neighbours(current.location, move |road| criterion.allows(road)) {
            if expanded.contains(edge.target) {
                continue;
            }
            let cost = current.cost + weigh(edge.road);
            candidates.push(Candidate {
                location: edge.target,
                parent: Some(index),
                cost,
            });
            frontier.push(candidates.len() - 1, cost);
        }
        peak = peak.max(frontier.len());
    }

    debug!(
        %criterion,
        start = %start,
        goal = %goal,
        expansions = expanded.len(),
        frontier_peak = peak,
        "frontier exhausted"
    );
    None
}

fn reconstruct_path(candidates: &[Candidate<'_>], index: usize) -> Vec<Location> {
    let mut path = Vec::new();
    let mut current = Some(index);
    while let Some(node) = current {
        path.push(candidates[node].location.clone());
        current = candidates[node].parent;
    }
    path.reverse();
    path
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq(&other.0)
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct QueueEntry {
    cost: FloatOrd,
    sequence: u64,
    candidate: usize,
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by cost, then by
        // insertion sequence.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

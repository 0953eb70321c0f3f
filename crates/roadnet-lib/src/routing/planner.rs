//! Route planning strategies implementing the Strategy pattern.
//!
//! Each search algorithm sits behind the `RoutePlanner` trait so `plan_route`
//! only has to pick one for the requested criterion.

use crate::cost::{Criterion, SpeedTable};
use crate::graph::{Graph, Location};
use crate::path::{find_route_bfs, find_route_uniform_cost, FoundPath};

use super::SearchAlgorithm;

/// Trait for route planning strategies.
pub trait RoutePlanner: Send + Sync {
    /// The algorithm identifier for this planner.
    fn algorithm(&self) -> SearchAlgorithm;

    /// Execute the search on the given graph.
    ///
    /// Returns `Some(path)` if a route is found, `None` otherwise.
    fn find_path(
        &self,
        graph: &Graph,
        start: &Location,
        goal: &Location,
        criterion: &Criterion,
    ) -> Option<FoundPath>;
}

/// Breadth-first planner: fewest segments, distances ignored.
#[derive(Debug, Clone, Default)]
pub struct BreadthFirstPlanner;

impl RoutePlanner for BreadthFirstPlanner {
    fn algorithm(&self) -> SearchAlgorithm {
        SearchAlgorithm::BreadthFirst
    }

    fn find_path(
        &self,
        graph: &Graph,
        start: &Location,
        goal: &Location,
        criterion: &Criterion,
    ) -> Option<FoundPath> {
        find_route_bfs(graph, start, goal, criterion)
    }
}

/// Uniform-cost planner weighing roads by distance or travel time.
#[derive(Debug, Clone, Default)]
pub struct UniformCostPlanner {
    speeds: SpeedTable,
}

impl UniformCostPlanner {
    pub fn new(speeds: SpeedTable) -> Self {
        Self { speeds }
    }
}

impl RoutePlanner for UniformCostPlanner {
    fn algorithm(&self) -> SearchAlgorithm {
        SearchAlgorithm::UniformCost
    }

    fn find_path(
        &self,
        graph: &Graph,
        start: &Location,
        goal: &Location,
        criterion: &Criterion,
    ) -> Option<FoundPath> {
        find_route_uniform_cost(graph, start, goal, criterion, &self.speeds)
    }
}

/// Select the planner that suits `criterion`.
pub fn select_planner(criterion: &Criterion, speeds: SpeedTable) -> Box<dyn RoutePlanner> {
    if criterion.is_unweighted() {
        Box::new(BreadthFirstPlanner)
    } else {
        Box::new(UniformCostPlanner::new(speeds))
    }
}

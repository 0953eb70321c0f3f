//! Route planning module.
//!
//! This module provides:
//! - [`SearchAlgorithm`] - Which search drove a result
//! - [`RouteRequest`] - High-level route planning request
//! - [`RouteResult`] - Path plus distance/time summary
//! - [`plan_route`] - Main entry point for computing routes
//!
//! # Example
//!
//! ```ignore
//! use roadnet_lib::{plan_route, RouteRequest, load_network};
//!
//! let graph = load_network("road_network.pl".as_ref())?;
//! let request = RouteRequest::parse("morant_bay", "port_antonio", "fastest")?;
//! let result = plan_route(&graph, &request)?;
//! println!("{} km in {:.0} min", result.distance, result.time);
//! ```

mod planner;

pub use planner::{select_planner, BreadthFirstPlanner, RoutePlanner, UniformCostPlanner};

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::cost::{Criterion, SpeedTable};
use crate::error::{Error, Result};
use crate::graph::{Graph, Location};
use crate::metrics::compute_metrics;

/// Number of "did you mean" suggestions attached to unknown locations.
const MAX_SUGGESTIONS: usize = 3;

/// Search algorithms backing the criteria.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchAlgorithm {
    /// Cost-ordered frontier (distance and time criteria).
    UniformCost,
    /// FIFO frontier (fewest hops).
    BreadthFirst,
}

impl fmt::Display for SearchAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            SearchAlgorithm::UniformCost => "uniform_cost",
            SearchAlgorithm::BreadthFirst => "breadth_first",
        };
        f.write_str(value)
    }
}

/// High-level route planning request.
#[derive(Debug, Clone)]
pub struct RouteRequest {
    pub start: String,
    pub goal: String,
    pub criterion: Criterion,
    pub speeds: SpeedTable,
}

impl RouteRequest {
    pub fn new(start: impl Into<String>, goal: impl Into<String>, criterion: Criterion) -> Self {
        Self {
            start: start.into(),
            goal: goal.into(),
            criterion,
            speeds: SpeedTable::default(),
        }
    }

    /// Convenience constructor for shortest-distance routes.
    pub fn shortest(start: impl Into<String>, goal: impl Into<String>) -> Self {
        Self::new(start, goal, Criterion::Shortest)
    }

    /// Build a request from a textual criterion such as `fastest` or
    /// `avoid_deep_potholes`.
    pub fn parse(
        start: impl Into<String>,
        goal: impl Into<String>,
        criterion: &str,
    ) -> Result<Self> {
        Ok(Self::new(start, goal, criterion.parse()?))
    }
}

/// Route returned by the library.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteResult {
    pub criterion: String,
    pub criterion_label: String,
    pub algorithm: SearchAlgorithm,
    pub path: Vec<Location>,
    /// Kilometres.
    pub distance: f64,
    /// Minutes.
    pub time: f64,
    pub segments: usize,
    /// Set when some segment of `path` had no road at summary time.
    pub partial: bool,
}

impl RouteResult {
    pub fn start(&self) -> Option<&Location> {
        self.path.first()
    }

    pub fn goal(&self) -> Option<&Location> {
        self.path.last()
    }

    /// Travel time in hours.
    pub fn hours(&self) -> f64 {
        self.time / 60.0
    }
}

/// Resolve a caller-supplied name to a known location.
fn resolve_location(graph: &Graph, name: &str) -> Result<Location> {
    let location = Location::new(name);
    if graph.contains_location(&location) {
        return Ok(location);
    }
    Err(Error::UnknownLocation {
        name: location.to_string(),
        suggestions: graph.fuzzy_location_matches(name, MAX_SUGGESTIONS),
    })
}

/// Compute a route under the requested criterion.
///
/// 1. Resolves both endpoint names
/// 2. Selects the planner for the criterion
/// 3. Runs the search
/// 4. Re-derives distance and time from the graph for the found path
pub fn plan_route(graph: &Graph, request: &RouteRequest) -> Result<RouteResult> {
    let start = resolve_location(graph, &request.start)?;
    let goal = resolve_location(graph, &request.goal)?;

    let planner = select_planner(&request.criterion, request.speeds);
    let found = planner
        .find_path(graph, &start, &goal, &request.criterion)
        .ok_or_else(|| Error::NoPathFound {
            start: start.to_string(),
            goal: goal.to_string(),
        })?;

    let metrics = compute_metrics(graph, &found.steps, &request.speeds);
    debug!(
        criterion = %request.criterion,
        algorithm = %planner.algorithm(),
        search_cost = found.cost,
        distance = metrics.distance,
        time = metrics.time,
        "route planned"
    );

    Ok(RouteResult {
        criterion: request.criterion.to_string(),
        criterion_label: request.criterion.label(),
        algorithm: planner.algorithm(),
        segments: found.hop_count(),
        partial: metrics.is_partial(),
        distance: metrics.distance,
        time: metrics.time,
        path: found.steps,
    })
}

//! Distance and travel-time totals re-derived from the current network.

use serde::Serialize;
use tracing::warn;

use crate::cost::SpeedTable;
use crate::graph::{Graph, Location};

/// Totals for a path, looked up edge by edge from the graph rather than taken
/// from the search's running cost.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathMetrics {
    /// Kilometres.
    pub distance: f64,
    /// Minutes at the speed table's average surface speeds.
    pub time: f64,
    /// Consecutive pairs with no road between them. They contribute zero to
    /// both totals.
    pub missing_segments: Vec<(Location, Location)>,
}

impl PathMetrics {
    /// True when at least one segment could not be resolved.
    pub fn is_partial(&self) -> bool {
        !self.missing_segments.is_empty()
    }
}

/// Sum distance and time over consecutive location pairs of `path`.
///
/// The road's current status is ignored; only its distance and surface are
/// read.
pub fn compute_metrics(graph: &Graph, path: &[Location], speeds: &SpeedTable) -> PathMetrics {
    let mut metrics = PathMetrics {
        distance: 0.0,
        time: 0.0,
        missing_segments: Vec::new(),
    };

    for pair in path.windows(2) {
        match graph.road(&pair[0], &pair[1]) {
            Some(road) => {
                metrics.distance += road.distance;
                metrics.time += speeds.travel_minutes(road);
            }
            None => {
                warn!(from = %pair[0], to = %pair[1], "path segment has no road");
                metrics
                    .missing_segments
                    .push((pair[0].clone(), pair[1].clone()));
            }
        }
    }

    metrics
}

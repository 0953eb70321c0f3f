//! Rural road network library entry points.
//!
//! This crate owns the road network graph, the cost model used to weigh and
//! filter roads, the path finders that search it, and the metrics derived
//! from a finished path. It also provides the fact-file loader and a shared,
//! lock-guarded handle. Higher-level consumers (the CLI) should only depend on
//! the functions exported here instead of reimplementing behavior.
//!

#![deny(warnings)]

pub mod cost;
pub mod dataset;
pub mod error;
pub mod facts;
pub mod graph;
pub mod metrics;
pub mod path;
pub mod routing;
pub mod store;

pub use cost::{Criterion, SpeedTable};
pub use dataset::{
    default_network, default_network_path, ensure_network, resolve_network_path,
    DEFAULT_NETWORK, NETWORK_PATH_ENV,
};
pub use error::{Error, Result};
pub use facts::{append_fact, load_network, parse_facts, render_network, write_network, Fact};
pub use graph::{
    normalize_token, validate_road, validate_token, Edge, Graph, Location, NetworkStats, Road,
    RoadStatus, Surface,
};
pub use metrics::{compute_metrics, PathMetrics};
pub use path::{find_route, find_route_bfs, find_route_uniform_cost, FoundPath};
pub use routing::{plan_route, RouteRequest, RouteResult, SearchAlgorithm};
pub use store::SharedNetwork;

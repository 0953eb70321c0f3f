//! Shared network handle used by interactive collaborators.
//!
//! The graph sits behind a single `RwLock`: each mutation holds the write
//! lock for exactly one call, and each route query holds the read lock for
//! its search and metrics pass, so a search never observes a half-updated
//! road. No lock is held across calls.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::cost::SpeedTable;
use crate::error::Result;
use crate::facts::{append_fact, load_network, Fact};
use crate::graph::{
    normalize_token, validate_road, validate_token, Graph, Location, NetworkStats, RoadStatus,
    Surface,
};
use crate::routing::{plan_route, RouteRequest, RouteResult};

/// Cloneable, thread-safe handle to one road network.
#[derive(Debug, Clone, Default)]
pub struct SharedNetwork {
    graph: Arc<RwLock<Graph>>,
    persist_to: Option<PathBuf>,
    speeds: SpeedTable,
}

impl SharedNetwork {
    pub fn new(graph: Graph) -> Self {
        Self {
            graph: Arc::new(RwLock::new(graph)),
            persist_to: None,
            speeds: SpeedTable::default(),
        }
    }

    /// Load a fact file and append every later mutation back to it.
    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self::new(load_network(path)?).with_persistence(path))
    }

    /// Append successful mutations to `path` as fact lines.
    pub fn with_persistence(mut self, path: impl Into<PathBuf>) -> Self {
        self.persist_to = Some(path.into());
        self
    }

    pub fn with_speeds(mut self, speeds: SpeedTable) -> Self {
        self.speeds = speeds;
        self
    }

    pub fn persistence_path(&self) -> Option<&Path> {
        self.persist_to.as_deref()
    }

    // A panic in another caller cannot leave a road half-written (every
    // mutation is a single field assignment or insert), so poisoning is ignored.
    fn read(&self) -> RwLockReadGuard<'_, Graph> {
        self.graph.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Graph> {
        self.graph.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn list_locations(&self) -> BTreeSet<Location> {
        self.read().locations()
    }

    pub fn stats(&self) -> NetworkStats {
        self.read().stats()
    }

    /// Copy of the current graph for read-heavy reporting.
    pub fn snapshot(&self) -> Graph {
        self.read().clone()
    }

    pub fn add_road(
        &self,
        source: &str,
        dest: &str,
        distance: f64,
        surface: Surface,
        status: RoadStatus,
    ) -> Result<()> {
        let from = Location::new(source);
        let to = Location::new(dest);
        validate_road(&from, &to, distance)?;
        let fact = Fact::Road {
            from,
            to,
            distance,
            surface,
            status,
        };
        let mut graph = self.write();
        self.persist(&fact)?;
        fact.apply(&mut graph)
    }

    pub fn set_road_status(&self, source: &str, dest: &str, status: RoadStatus) -> Result<()> {
        let from = Location::new(source);
        let to = Location::new(dest);
        let mut graph = self.write();
        let road = graph.require_road(&from, &to)?;
        self.persist(&Fact::Road {
            from: from.clone(),
            to: to.clone(),
            distance: road.distance,
            surface: road.surface,
            status,
        })?;
        graph.set_status(&from, &to, status)
    }

    pub fn add_hazard(&self, source: &str, dest: &str, tag: &str) -> Result<()> {
        let from = Location::new(source);
        let to = Location::new(dest);
        let tag = normalize_token(tag);
        validate_token("hazard tag", &tag)?;
        let mut graph = self.write();
        graph.require_road(&from, &to)?;
        let fact = Fact::Hazard { from, to, tag };
        self.persist(&fact)?;
        fact.apply(&mut graph)
    }

    /// Find a route with a textual criterion such as `shortest` or `avoid_flood`.
    pub fn find_path(&self, start: &str, end: &str, criterion: &str) -> Result<RouteResult> {
        let mut request = RouteRequest::parse(start, end, criterion)?;
        request.speeds = self.speeds;
        self.plan(&request)
    }

    pub fn plan(&self, request: &RouteRequest) -> Result<RouteResult> {
        let graph = self.read();
        plan_route(&graph, request)
    }

    // Called with the write lock held, after validation and before the graph
    // changes, so a failed append leaves memory and file in agreement.
    fn persist(&self, fact: &Fact) -> Result<()> {
        match &self.persist_to {
            Some(path) => append_fact(path, fact),
            None => Ok(()),
        }
    }
}

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Minimum Jaro-Winkler similarity for a location to be offered as a suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// Normalise a caller-supplied token: trimmed, lowercase, inner whitespace
/// collapsed to single underscores.
pub fn normalize_token(raw: &str) -> String {
    raw.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}

/// Reject tokens that would not survive a round trip through a fact file:
/// empty after normalisation, or holding anything but `[a-z0-9_]`.
pub fn validate_token(kind: &'static str, token: &str) -> Result<()> {
    let valid = !token.is_empty()
        && token
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_');
    if valid {
        Ok(())
    } else {
        Err(Error::InvalidName {
            kind,
            name: token.to_string(),
        })
    }
}

/// Check the attributes of a prospective road without touching any graph.
pub fn validate_road(a: &Location, b: &Location, distance: f64) -> Result<()> {
    validate_token("location name", a.as_str())?;
    validate_token("location name", b.as_str())?;
    if !distance.is_finite() || distance <= 0.0 {
        return Err(Error::InvalidDistance { distance });
    }
    if a == b {
        return Err(Error::SelfLoop {
            location: a.to_string(),
        });
    }
    Ok(())
}

/// Case-normalised identifier for a settlement in the network.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Location(String);

impl Location {
    /// Build a location from user input, normalising the token.
    pub fn new(name: &str) -> Self {
        Self(normalize_token(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Location {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Road surface, which determines the average travel speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Surface {
    Paved,
    Unpaved,
}

impl fmt::Display for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            Surface::Paved => "paved",
            Surface::Unpaved => "unpaved",
        };
        f.write_str(value)
    }
}

impl FromStr for Surface {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match normalize_token(s).as_str() {
            "paved" => Ok(Surface::Paved),
            "unpaved" => Ok(Surface::Unpaved),
            other => Err(format!("unknown surface '{other}' (expected paved or unpaved)")),
        }
    }
}

/// Operational status of a road.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RoadStatus {
    Open,
    Closed,
}

impl fmt::Display for RoadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            RoadStatus::Open => "open",
            RoadStatus::Closed => "closed",
        };
        f.write_str(value)
    }
}

impl FromStr for RoadStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match normalize_token(s).as_str() {
            "open" => Ok(RoadStatus::Open),
            "closed" => Ok(RoadStatus::Closed),
            other => Err(format!("unknown status '{other}' (expected open or closed)")),
        }
    }
}

/// Attributes of one undirected road. Both traversal directions read this
/// single record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Road {
    pub distance: f64,
    pub surface: Surface,
    pub status: RoadStatus,
    pub hazards: BTreeSet<String>,
}

impl Road {
    pub fn is_open(&self) -> bool {
        self.status == RoadStatus::Open
    }

    pub fn has_hazard(&self, tag: &str) -> bool {
        self.hazards.contains(tag)
    }
}

/// Neighbour view returned by [`Graph::neighbours`].
#[derive(Debug, Clone, Copy)]
pub struct Edge<'a> {
    pub target: &'a Location,
    pub road: &'a Road,
}

/// Unordered pair of endpoints identifying a road.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct RoadKey(Location, Location);

impl RoadKey {
    fn new(a: &Location, b: &Location) -> Self {
        if a <= b {
            Self(a.clone(), b.clone())
        } else {
            Self(b.clone(), a.clone())
        }
    }
}

/// Aggregate counts describing the network.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NetworkStats {
    pub locations: usize,
    pub roads: usize,
    pub open: usize,
    pub closed: usize,
    pub paved: usize,
    pub unpaved: usize,
    pub hazards: usize,
}

/// Road network store: one record per undirected road plus an adjacency index
/// kept in insertion order so searches expand neighbours deterministically.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    roads: HashMap<RoadKey, Road>,
    /// Roads in first-insertion order with the orientation they were entered in.
    order: Vec<(Location, Location)>,
    adjacency: HashMap<Location, Vec<Location>>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the road between `a` and `b`.
    ///
    /// Re-adding an existing pair replaces distance, surface, and status while
    /// keeping its hazard tags and its position in the neighbour order.
    pub fn add_road(
        &mut self,
        a: &Location,
        b: &Location,
        distance: f64,
        surface: Surface,
        status: RoadStatus,
    ) -> Result<()> {
        validate_road(a, b, distance)?;

        let key = RoadKey::new(a, b);
        if let Some(existing) = self.roads.get_mut(&key) {
            existing.distance = distance;
            existing.surface = surface;
            existing.status = status;
            debug!(from = %a, to = %b, distance, %surface, %status, "road overwritten");
            return Ok(());
        }

        self.roads.insert(
            key,
            Road {
                distance,
                surface,
                status,
                hazards: BTreeSet::new(),
            },
        );
        self.order.push((a.clone(), b.clone()));
        self.adjacency.entry(a.clone()).or_default().push(b.clone());
        self.adjacency.entry(b.clone()).or_default().push(a.clone());
        info!(from = %a, to = %b, distance, %surface, %status, "road added");
        Ok(())
    }

    /// Change the status of an existing road, preserving its other attributes.
    pub fn set_status(&mut self, a: &Location, b: &Location, status: RoadStatus) -> Result<()> {
        let road = self.road_mut(a, b)?;
        road.status = status;
        info!(from = %a, to = %b, %status, "road status updated");
        Ok(())
    }

    /// Tag an existing road with a hazard. Tags are normalised and deduplicated.
    pub fn add_hazard(&mut self, a: &Location, b: &Location, tag: &str) -> Result<()> {
        let tag = normalize_token(tag);
        validate_token("hazard tag", &tag)?;
        let road = self.road_mut(a, b)?;
        if road.hazards.insert(tag.clone()) {
            info!(from = %a, to = %b, tag = %tag, "hazard added");
        } else {
            debug!(from = %a, to = %b, tag = %tag, "hazard already present");
        }
        Ok(())
    }

    /// Look up the road between two locations in either direction.
    pub fn road(&self, a: &Location, b: &Location) -> Option<&Road> {
        self.roads.get(&RoadKey::new(a, b))
    }

    /// Like [`Graph::road`], but a missing road is an error.
    pub fn require_road(&self, a: &Location, b: &Location) -> Result<&Road> {
        self.road(a, b).ok_or_else(|| road_not_found(a, b))
    }

    fn road_mut(&mut self, a: &Location, b: &Location) -> Result<&mut Road> {
        self.roads
            .get_mut(&RoadKey::new(a, b))
            .ok_or_else(|| road_not_found(a, b))
    }

    /// Roads touching `location` that satisfy `eligible`, in insertion order.
    pub fn neighbours<'a, F>(
        &'a self,
        location: &Location,
        eligible: F,
    ) -> impl Iterator<Item = Edge<'a>> + 'a
    where
        F: Fn(&Road) -> bool + 'a,
    {
        let targets = self
            .adjacency
            .get(location)
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        let origin = location.clone();
        targets.iter().filter_map(move |target| {
            let road = self.road(&origin, target)?;
            eligible(road).then_some(Edge { target, road })
        })
    }

    /// The stored copy of `location`, if it is an endpoint of any road.
    pub fn location(&self, location: &Location) -> Option<&Location> {
        self.adjacency.get_key_value(location).map(|(stored, _)| stored)
    }

    pub fn contains_location(&self, location: &Location) -> bool {
        self.adjacency.contains_key(location)
    }

    /// Every location that is an endpoint of at least one road, sorted.
    pub fn locations(&self) -> BTreeSet<Location> {
        self.adjacency.keys().cloned().collect()
    }

    /// Iterate roads once each, in first-insertion order.
    pub fn roads(&self) -> impl Iterator<Item = (&Location, &Location, &Road)> {
        self.order
            .iter()
            .filter_map(|(a, b)| self.road(a, b).map(|road| (a, b, road)))
    }

    pub fn road_count(&self) -> usize {
        self.roads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roads.is_empty()
    }

    pub fn stats(&self) -> NetworkStats {
        let mut stats = NetworkStats {
            locations: self.adjacency.len(),
            roads: self.roads.len(),
            ..NetworkStats::default()
        };
        for road in self.roads.values() {
            match road.status {
                RoadStatus::Open => stats.open += 1,
                RoadStatus::Closed => stats.closed += 1,
            }
            match road.surface {
                Surface::Paved => stats.paved += 1,
                Surface::Unpaved => stats.unpaved += 1,
            }
            stats.hazards += road.hazards.len();
        }
        stats
    }

    /// Known locations most similar to `name`, best match first.
    pub fn fuzzy_location_matches(&self, name: &str, limit: usize) -> Vec<String> {
        let needle = normalize_token(name);
        let mut scored: Vec<(f64, &str)> = self
            .adjacency
            .keys()
            .map(|location| {
                (
                    strsim::jaro_winkler(&needle, location.as_str()),
                    location.as_str(),
                )
            })
            .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
            .collect();
        scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
        scored
            .into_iter()
            .take(limit)
            .map(|(_, name)| name.to_string())
            .collect()
    }
}

fn road_not_found(a: &Location, b: &Location) -> Error {
    Error::RoadNotFound {
        from: a.to_string(),
        to: b.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(name: &str) -> Location {
        Location::new(name)
    }

    #[test]
    fn location_tokens_are_normalised() {
        assert_eq!(loc("  Morant   Bay ").as_str(), "morant_bay");
        assert_eq!(loc("BATH").as_str(), "bath");
    }

    #[test]
    fn surface_and_status_parse_case_insensitively() {
        assert_eq!("Paved".parse::<Surface>(), Ok(Surface::Paved));
        assert_eq!("UNPAVED".parse::<Surface>(), Ok(Surface::Unpaved));
        assert_eq!(" closed ".parse::<RoadStatus>(), Ok(RoadStatus::Closed));
        assert!("gravel".parse::<Surface>().is_err());
        assert!("blocked".parse::<RoadStatus>().is_err());
    }

    #[test]
    fn rejects_non_positive_distance() {
        let mut graph = Graph::new();
        for distance in [0.0, -3.0, f64::NAN] {
            let err = graph
                .add_road(&loc("a"), &loc("b"), distance, Surface::Paved, RoadStatus::Open)
                .expect_err("distance rejected");
            assert!(matches!(err, Error::InvalidDistance { .. }));
        }
        assert!(graph.is_empty());
        assert!(graph.locations().is_empty());
    }

    #[test]
    fn rejects_self_loop() {
        let mut graph = Graph::new();
        let err = graph
            .add_road(&loc("a"), &loc("a"), 1.0, Surface::Paved, RoadStatus::Open)
            .expect_err("self loop rejected");
        assert!(matches!(err, Error::SelfLoop { .. }));
    }

    #[test]
    fn rejects_names_that_cannot_be_persisted() {
        let mut graph = Graph::new();
        for name in ["Port, Royal", "   ", "st. thomas", "a(b)"] {
            let err = graph
                .add_road(&loc(name), &loc("bath"), 3.0, Surface::Paved, RoadStatus::Open)
                .expect_err("name rejected");
            assert!(
                matches!(err, Error::InvalidName { kind: "location name", .. }),
                "{name:?}"
            );
        }
        assert!(graph.is_empty());

        graph
            .add_road(&loc("Port Royal 2"), &loc("bath"), 3.0, Surface::Paved, RoadStatus::Open)
            .unwrap();
        assert!(graph.contains_location(&loc("port_royal_2")));
    }

    #[test]
    fn rejects_blank_and_punctuated_hazard_tags() {
        let mut graph = Graph::new();
        graph
            .add_road(&loc("a"), &loc("b"), 1.0, Surface::Paved, RoadStatus::Open)
            .unwrap();
        for tag in ["", "  ", "rock,slide", "flood."] {
            assert!(matches!(
                graph.add_hazard(&loc("a"), &loc("b"), tag),
                Err(Error::InvalidName { kind: "hazard tag", .. })
            ));
        }
        assert!(graph.road(&loc("a"), &loc("b")).unwrap().hazards.is_empty());
    }

    #[test]
    fn re_add_overwrites_and_keeps_hazards() {
        let mut graph = Graph::new();
        graph
            .add_road(&loc("a"), &loc("b"), 10.0, Surface::Paved, RoadStatus::Open)
            .unwrap();
        graph.add_hazard(&loc("b"), &loc("a"), "pothole").unwrap();
        graph
            .add_road(&loc("b"), &loc("a"), 4.0, Surface::Unpaved, RoadStatus::Closed)
            .unwrap();

        assert_eq!(graph.road_count(), 1);
        let road = graph.road(&loc("a"), &loc("b")).unwrap();
        assert_eq!(road.distance, 4.0);
        assert_eq!(road.surface, Surface::Unpaved);
        assert_eq!(road.status, RoadStatus::Closed);
        assert!(road.has_hazard("pothole"));
        assert_eq!(graph.neighbours(&loc("a"), |_| true).count(), 1);
    }

    #[test]
    fn updates_on_missing_roads_fail() {
        let mut graph = Graph::new();
        graph
            .add_road(&loc("a"), &loc("b"), 1.0, Surface::Paved, RoadStatus::Open)
            .unwrap();
        assert!(matches!(
            graph.set_status(&loc("a"), &loc("c"), RoadStatus::Closed),
            Err(Error::RoadNotFound { .. })
        ));
        assert!(matches!(
            graph.add_hazard(&loc("c"), &loc("d"), "flood"),
            Err(Error::RoadNotFound { .. })
        ));
    }

    #[test]
    fn hazards_are_deduplicated() {
        let mut graph = Graph::new();
        graph
            .add_road(&loc("a"), &loc("b"), 1.0, Surface::Paved, RoadStatus::Open)
            .unwrap();
        graph.add_hazard(&loc("a"), &loc("b"), "Deep Potholes").unwrap();
        graph.add_hazard(&loc("b"), &loc("a"), "deep_potholes").unwrap();
        let road = graph.road(&loc("a"), &loc("b")).unwrap();
        assert_eq!(road.hazards.len(), 1);
        assert!(road.has_hazard("deep_potholes"));
    }

    #[test]
    fn neighbours_follow_insertion_order_and_filter() {
        let mut graph = Graph::new();
        graph
            .add_road(&loc("hub"), &loc("c"), 3.0, Surface::Paved, RoadStatus::Open)
            .unwrap();
        graph
            .add_road(&loc("a"), &loc("hub"), 1.0, Surface::Unpaved, RoadStatus::Open)
            .unwrap();
        graph
            .add_road(&loc("hub"), &loc("b"), 2.0, Surface::Paved, RoadStatus::Closed)
            .unwrap();

        let all: Vec<_> = graph
            .neighbours(&loc("hub"), |_| true)
            .map(|edge| edge.target.as_str())
            .collect();
        assert_eq!(all, vec!["c", "a", "b"]);

        let open: Vec<_> = graph
            .neighbours(&loc("hub"), Road::is_open)
            .map(|edge| edge.target.as_str())
            .collect();
        assert_eq!(open, vec!["c", "a"]);

        assert_eq!(graph.neighbours(&loc("nowhere"), |_| true).count(), 0);
    }

    #[test]
    fn stats_count_each_road_once() {
        let mut graph = Graph::new();
        graph
            .add_road(&loc("a"), &loc("b"), 1.0, Surface::Paved, RoadStatus::Open)
            .unwrap();
        graph
            .add_road(&loc("b"), &loc("c"), 1.0, Surface::Unpaved, RoadStatus::Closed)
            .unwrap();
        graph.add_hazard(&loc("c"), &loc("b"), "flood").unwrap();

        let stats = graph.stats();
        assert_eq!(
            stats,
            NetworkStats {
                locations: 3,
                roads: 2,
                open: 1,
                closed: 1,
                paved: 1,
                unpaved: 1,
                hazards: 1,
            }
        );
    }

    #[test]
    fn fuzzy_matches_rank_close_names() {
        let mut graph = Graph::new();
        graph
            .add_road(
                &loc("port_morant"),
                &loc("port_antonio"),
                1.0,
                Surface::Paved,
                RoadStatus::Open,
            )
            .unwrap();
        graph
            .add_road(&loc("bath"), &loc("port_morant"), 1.0, Surface::Paved, RoadStatus::Open)
            .unwrap();

        let matches = graph.fuzzy_location_matches("port morrant", 3);
        assert_eq!(matches.first().map(String::as_str), Some("port_morant"));
        assert!(graph.fuzzy_location_matches("xyzzy", 3).is_empty());
    }
}

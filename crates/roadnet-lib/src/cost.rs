//! Cost model: which roads a criterion may use and what each one costs.
//!
//! Everything here is a pure function of the criterion and the road; the
//! model holds no mutable state.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::Error;
use crate::graph::{normalize_token, Road, Surface};

/// Hazard tag avoided by the legacy `no_potholes` criterion.
pub const POTHOLES: &str = "deep_potholes";
/// Hazard tag avoided by the legacy `no_cisterns` criterion.
pub const CISTERNS: &str = "broken_cisterns";

/// Average travel speed per surface, in km/h.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpeedTable {
    pub paved: f64,
    pub unpaved: f64,
}

impl Default for SpeedTable {
    fn default() -> Self {
        Self {
            paved: 60.0,
            unpaved: 30.0,
        }
    }
}

impl SpeedTable {
    pub fn speed(&self, surface: Surface) -> f64 {
        match surface {
            Surface::Paved => self.paved,
            Surface::Unpaved => self.unpaved,
        }
    }

    /// Minutes needed to drive `road` at its surface's average speed.
    pub fn travel_minutes(&self, road: &Road) -> f64 {
        road.distance / self.speed(road.surface) * 60.0
    }
}

/// Route selection policy requested by a caller.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "hazard")]
pub enum Criterion {
    /// Minimum total distance over open roads.
    Shortest,
    /// Minimum total travel time over open roads.
    Fastest,
    /// Minimum total distance over open, paved roads.
    Paved,
    /// Minimum total distance over open roads not tagged with the hazard.
    AvoidHazard(String),
    /// Fewest road segments over open roads (breadth-first).
    FewestHops,
}

impl Criterion {
    /// Whether a search under this criterion may traverse `road`.
    pub fn allows(&self, road: &Road) -> bool {
        if !road.is_open() {
            return false;
        }
        match self {
            Criterion::Paved => road.surface == Surface::Paved,
            Criterion::AvoidHazard(tag) => !road.has_hazard(tag),
            Criterion::Shortest | Criterion::Fastest | Criterion::FewestHops => true,
        }
    }

    /// Cost of traversing `road` under this criterion.
    pub fn edge_cost(&self, road: &Road, speeds: &SpeedTable) -> f64 {
        match self {
            Criterion::Fastest => speeds.travel_minutes(road),
            Criterion::FewestHops => 1.0,
            Criterion::Shortest | Criterion::Paved | Criterion::AvoidHazard(_) => road.distance,
        }
    }

    /// True when every edge costs the same, so a FIFO frontier is optimal.
    pub fn is_unweighted(&self) -> bool {
        matches!(self, Criterion::FewestHops)
    }

    /// Human-readable name of the policy.
    pub fn label(&self) -> String {
        match self {
            Criterion::Shortest => "Shortest Distance".to_string(),
            Criterion::Fastest => "Fastest Route".to_string(),
            Criterion::Paved => "Paved Roads Only".to_string(),
            Criterion::AvoidHazard(tag) => format!("Avoiding {}", title_case(tag)),
            Criterion::FewestHops => "Fewest Hops".to_string(),
        }
    }
}

fn title_case(tag: &str) -> String {
    tag.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Criterion::Shortest => f.write_str("shortest"),
            Criterion::Fastest => f.write_str("fastest"),
            Criterion::Paved => f.write_str("paved"),
            Criterion::AvoidHazard(tag) => write!(f, "avoid_{tag}"),
            Criterion::FewestHops => f.write_str("fewest_hops"),
        }
    }
}

impl FromStr for Criterion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = normalize_token(s);
        let criterion = match token.as_str() {
            "shortest" => Criterion::Shortest,
            "fastest" => Criterion::Fastest,
            "paved" => Criterion::Paved,
            "bfs" | "fewest_hops" => Criterion::FewestHops,
            "no_potholes" => Criterion::AvoidHazard(POTHOLES.to_string()),
            "no_cisterns" => Criterion::AvoidHazard(CISTERNS.to_string()),
            other => match other
                .strip_prefix("avoid_")
                .or_else(|| other.strip_prefix("avoid:"))
            {
                Some(tag) if !tag.is_empty() => Criterion::AvoidHazard(tag.to_string()),
                _ => {
                    return Err(Error::MalformedQuery {
                        criterion: s.to_string(),
                    })
                }
            },
        };
        Ok(criterion)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::graph::RoadStatus;

    fn road(distance: f64, surface: Surface, status: RoadStatus, hazards: &[&str]) -> Road {
        Road {
            distance,
            surface,
            status,
            hazards: hazards.iter().map(|h| h.to_string()).collect::<BTreeSet<_>>(),
        }
    }

    #[test]
    fn parses_known_criteria() {
        assert_eq!("shortest".parse::<Criterion>().unwrap(), Criterion::Shortest);
        assert_eq!("Fastest".parse::<Criterion>().unwrap(), Criterion::Fastest);
        assert_eq!("paved".parse::<Criterion>().unwrap(), Criterion::Paved);
        assert_eq!("bfs".parse::<Criterion>().unwrap(), Criterion::FewestHops);
        assert_eq!(
            "fewest_hops".parse::<Criterion>().unwrap(),
            Criterion::FewestHops
        );
        assert_eq!(
            "avoid_pothole".parse::<Criterion>().unwrap(),
            Criterion::AvoidHazard("pothole".to_string())
        );
        assert_eq!(
            "avoid:broken_cisterns".parse::<Criterion>().unwrap(),
            Criterion::AvoidHazard(CISTERNS.to_string())
        );
        assert_eq!(
            "no_potholes".parse::<Criterion>().unwrap(),
            Criterion::AvoidHazard(POTHOLES.to_string())
        );
        assert_eq!(
            "no_cisterns".parse::<Criterion>().unwrap(),
            Criterion::AvoidHazard(CISTERNS.to_string())
        );
    }

    #[test]
    fn rejects_unknown_criteria() {
        for raw in ["scenic", "avoid_", "", "dfs"] {
            let err = raw.parse::<Criterion>().expect_err("malformed");
            assert!(matches!(err, Error::MalformedQuery { .. }), "{raw}");
        }
    }

    #[test]
    fn display_round_trips_through_parse() {
        for criterion in [
            Criterion::Shortest,
            Criterion::Fastest,
            Criterion::Paved,
            Criterion::FewestHops,
            Criterion::AvoidHazard("flooding".to_string()),
        ] {
            let parsed: Criterion = criterion.to_string().parse().unwrap();
            assert_eq!(parsed, criterion);
        }
    }

    #[test]
    fn closed_roads_are_never_eligible() {
        let closed = road(5.0, Surface::Paved, RoadStatus::Closed, &[]);
        for criterion in [
            Criterion::Shortest,
            Criterion::Fastest,
            Criterion::Paved,
            Criterion::FewestHops,
            Criterion::AvoidHazard("x".to_string()),
        ] {
            assert!(!criterion.allows(&closed), "{criterion}");
        }
    }

    #[test]
    fn paved_and_hazard_filters() {
        let unpaved = road(5.0, Surface::Unpaved, RoadStatus::Open, &["pothole"]);
        assert!(Criterion::Shortest.allows(&unpaved));
        assert!(!Criterion::Paved.allows(&unpaved));
        assert!(!Criterion::AvoidHazard("pothole".to_string()).allows(&unpaved));
        assert!(Criterion::AvoidHazard("flood".to_string()).allows(&unpaved));
    }

    #[test]
    fn edge_costs_per_criterion() {
        let speeds = SpeedTable::default();
        let unpaved = road(5.0, Surface::Unpaved, RoadStatus::Open, &[]);
        let paved = road(10.0, Surface::Paved, RoadStatus::Open, &[]);

        assert_eq!(Criterion::Shortest.edge_cost(&unpaved, &speeds), 5.0);
        assert_eq!(Criterion::Paved.edge_cost(&paved, &speeds), 10.0);
        assert_eq!(Criterion::Fastest.edge_cost(&unpaved, &speeds), 10.0);
        assert_eq!(Criterion::Fastest.edge_cost(&paved, &speeds), 10.0);
        assert_eq!(Criterion::FewestHops.edge_cost(&paved, &speeds), 1.0);
    }

    #[test]
    fn labels_match_policy_names() {
        assert_eq!(Criterion::Shortest.label(), "Shortest Distance");
        assert_eq!(Criterion::Fastest.label(), "Fastest Route");
        assert_eq!(Criterion::Paved.label(), "Paved Roads Only");
        assert_eq!(Criterion::FewestHops.label(), "Fewest Hops");
        assert_eq!(
            Criterion::AvoidHazard(POTHOLES.to_string()).label(),
            "Avoiding Deep Potholes"
        );
    }
}

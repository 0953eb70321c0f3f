//! Flat fact-file persistence for the road network.
//!
//! A network file holds one fact per line:
//!
//! ```text
//! road(morant_bay, port_morant, 12, paved, open).
//! road_condition(port_morant, golden_grove, deep_potholes).
//! ```
//!
//! Comments (`%`), rules (`:-`), and other predicates such as `speed/2` are
//! skipped. Facts are applied in file order, so a later `road` fact for the
//! same pair overwrites the earlier one.

use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::graph::{normalize_token, Graph, Location, RoadStatus, Surface};

/// One persisted statement about the network.
#[derive(Debug, Clone, PartialEq)]
pub enum Fact {
    Road {
        from: Location,
        to: Location,
        distance: f64,
        surface: Surface,
        status: RoadStatus,
    },
    Hazard {
        from: Location,
        to: Location,
        tag: String,
    },
}

impl Fact {
    /// Apply this fact to `graph` through the store's mutation API.
    pub fn apply(&self, graph: &mut Graph) -> Result<()> {
        match self {
            Fact::Road {
                from,
                to,
                distance,
                surface,
                status,
            } => graph.add_road(from, to, *distance, *surface, *status),
            Fact::Hazard { from, to, tag } => graph.add_hazard(from, to, tag),
        }
    }

    /// Parse a single line. Returns `Ok(None)` for lines that carry no fact.
    pub fn parse_line(line: &str) -> std::result::Result<Option<Fact>, String> {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('%') || trimmed.contains(":-") {
            return Ok(None);
        }

        let body = trimmed
            .strip_suffix('.')
            .ok_or_else(|| "fact must end with '.'".to_string())?;
        let (name, rest) = body
            .split_once('(')
            .ok_or_else(|| "expected '(' after predicate name".to_string())?;
        let args = rest
            .trim_end()
            .strip_suffix(')')
            .ok_or_else(|| "expected ')' before '.'".to_string())?;
        let args: Vec<&str> = args.split(',').map(str::trim).collect();

        match name.trim() {
            "road" => {
                let [from, to, distance, surface, status] = args.as_slice() else {
                    return Err(format!("road/5 expects 5 arguments, got {}", args.len()));
                };
                let distance: f64 = distance
                    .parse()
                    .map_err(|_| format!("invalid distance '{distance}'"))?;
                Ok(Some(Fact::Road {
                    from: atom(from)?,
                    to: atom(to)?,
                    distance,
                    surface: surface.parse()?,
                    status: status.parse()?,
                }))
            }
            "road_condition" => {
                let [from, to, tag] = args.as_slice() else {
                    return Err(format!(
                        "road_condition/3 expects 3 arguments, got {}",
                        args.len()
                    ));
                };
                Ok(Some(Fact::Hazard {
                    from: atom(from)?,
                    to: atom(to)?,
                    tag: normalize_token(tag),
                }))
            }
            other => {
                debug!(predicate = other, "skipping unrelated fact");
                Ok(None)
            }
        }
    }
}

fn atom(raw: &str) -> std::result::Result<Location, String> {
    let location = Location::new(raw);
    if location.as_str().is_empty() {
        return Err("empty location name".to_string());
    }
    Ok(location)
}

impl fmt::Display for Fact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fact::Road {
                from,
                to,
                distance,
                surface,
                status,
            } => write!(f, "road({from}, {to}, {distance}, {surface}, {status})."),
            Fact::Hazard { from, to, tag } => write!(f, "road_condition({from}, {to}, {tag})."),
        }
    }
}

/// Build a graph from fact-file text.
pub fn parse_facts(source: &str) -> Result<Graph> {
    let mut graph = Graph::new();
    for (index, line) in source.lines().enumerate() {
        let line_number = index + 1;
        let fact = Fact::parse_line(line).map_err(|message| Error::InvalidFact {
            line: line_number,
            message,
        })?;
        if let Some(fact) = fact {
            fact.apply(&mut graph).map_err(|err| Error::InvalidFact {
                line: line_number,
                message: err.to_string(),
            })?;
        }
    }
    Ok(graph)
}

/// Load a network from a fact file on disk.
pub fn load_network(path: &Path) -> Result<Graph> {
    let source = fs::read_to_string(path)?;
    let graph = parse_facts(&source)?;
    info!(
        path = %path.display(),
        roads = graph.road_count(),
        locations = graph.locations().len(),
        "network loaded"
    );
    Ok(graph)
}

/// Render every road and hazard of `graph` as fact lines.
pub fn render_network(graph: &Graph) -> String {
    let mut out = String::from("% Road network facts: road(Source, Destination, Km, Surface, Status)\n");
    for (from, to, road) in graph.roads() {
        let fact = Fact::Road {
            from: from.clone(),
            to: to.clone(),
            distance: road.distance,
            surface: road.surface,
            status: road.status,
        };
        out.push_str(&fact.to_string());
        out.push('\n');
    }
    for (from, to, road) in graph.roads() {
        for tag in &road.hazards {
            let fact = Fact::Hazard {
                from: from.clone(),
                to: to.clone(),
                tag: tag.clone(),
            };
            out.push_str(&fact.to_string());
            out.push('\n');
        }
    }
    out
}

/// Overwrite `path` with the full contents of `graph`.
pub fn write_network(path: &Path, graph: &Graph) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, render_network(graph))?;
    Ok(())
}

/// Append one fact line to `path`, creating the file if needed.
pub fn append_fact(path: &Path, fact: &Fact) -> Result<()> {
    let needs_newline = fs::read(path)
        .map(|bytes| bytes.last().is_some_and(|last| *last != b'\n'))
        .unwrap_or(false);
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    if needs_newline {
        writeln!(file)?;
    }
    writeln!(file, "{fact}")?;
    debug!(path = %path.display(), %fact, "fact appended");
    Ok(())
}

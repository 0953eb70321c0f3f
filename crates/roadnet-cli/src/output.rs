//! Output formatting for routes, network listings and mutation reports.
//!
//! Every renderer writes to a caller-supplied [`Write`] so the binary can
//! target stdout while tests capture a buffer.

use std::collections::BTreeSet;
use std::io::{self, Write};

use clap::ValueEnum;
use serde::Serialize;

use roadnet_lib::{Graph, Location, NetworkStats, Road, RoadStatus, RouteResult, Surface};

use crate::terminal::ColorPalette;

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// One road as listed by `info`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoadReport {
    pub from: Location,
    pub to: Location,
    pub distance: f64,
    pub surface: Surface,
    pub status: RoadStatus,
    pub hazards: Vec<String>,
}

impl RoadReport {
    fn new(from: &Location, to: &Location, road: &Road) -> Self {
        Self {
            from: from.clone(),
            to: to.clone(),
            distance: road.distance,
            surface: road.surface,
            status: road.status,
            hazards: road.hazards.iter().cloned().collect(),
        }
    }
}

/// Statistics plus every road, listed once in insertion order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkReport {
    pub path: Option<String>,
    pub stats: NetworkStats,
    pub roads: Vec<RoadReport>,
}

impl NetworkReport {
    pub fn from_graph(graph: &Graph, path: Option<String>) -> Self {
        Self {
            path,
            stats: graph.stats(),
            roads: graph
                .roads()
                .map(|(from, to, road)| RoadReport::new(from, to, road))
                .collect(),
        }
    }
}

/// Outcome of a successful mutation command.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MutationReport {
    pub action: &'static str,
    pub from: Location,
    pub to: Location,
    pub detail: String,
    pub persisted_to: Option<String>,
}

impl OutputFormat {
    pub fn render_route(
        self,
        out: &mut impl Write,
        result: &RouteResult,
        palette: &ColorPalette,
    ) -> io::Result<()> {
        match self {
            OutputFormat::Text => render_route_text(out, result, palette),
            OutputFormat::Json => write_json(out, result),
        }
    }

    pub fn render_locations(
        self,
        out: &mut impl Write,
        locations: &BTreeSet<Location>,
    ) -> io::Result<()> {
        match self {
            OutputFormat::Text => {
                writeln!(out, "Locations ({}):", locations.len())?;
                for location in locations {
                    writeln!(out, "- {location}")?;
                }
                Ok(())
            }
            OutputFormat::Json => write_json(out, locations),
        }
    }

    pub fn render_network(
        self,
        out: &mut impl Write,
        report: &NetworkReport,
        palette: &ColorPalette,
    ) -> io::Result<()> {
        match self {
            OutputFormat::Text => render_network_text(out, report, palette),
            OutputFormat::Json => write_json(out, report),
        }
    }

    pub fn render_mutation(self, out: &mut impl Write, report: &MutationReport) -> io::Result<()> {
        match self {
            OutputFormat::Text => {
                writeln!(out, "{} {} <-> {}: {}", report.action, report.from, report.to, report.detail)?;
                if let Some(path) = &report.persisted_to {
                    writeln!(out, "Saved to {path}")?;
                }
                Ok(())
            }
            OutputFormat::Json => write_json(out, report),
        }
    }

    pub fn render_path(self, out: &mut impl Write, path: &str) -> io::Result<()> {
        match self {
            OutputFormat::Text => writeln!(out, "Network file at {path}"),
            OutputFormat::Json => write_json(out, &serde_json::json!({ "path": path })),
        }
    }
}

fn write_json<T: Serialize + ?Sized>(out: &mut impl Write, value: &T) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)
}

/// Render a route in text format.
pub fn render_route_text(
    out: &mut impl Write,
    result: &RouteResult,
    palette: &ColorPalette,
) -> io::Result<()> {
    let p = palette;
    let start = result.start().map(Location::as_str).unwrap_or("<unknown>");
    let goal = result.goal().map(Location::as_str).unwrap_or("<unknown>");
    writeln!(
        out,
        "Route from {} to {} ({}; algorithm: {}):",
        start, goal, result.criterion_label, result.algorithm
    )?;
    for (index, location) in result.path.iter().enumerate() {
        writeln!(
            out,
            "  {:>2}. {}{}{}",
            index + 1,
            p.place,
            location,
            p.reset
        )?;
    }
    writeln!(out)?;
    writeln!(out, "Segments: {}", result.segments)?;
    writeln!(out, "Total distance: {:.1} km", result.distance)?;
    writeln!(
        out,
        "Estimated time: {:.0} min ({:.2} h)",
        result.time,
        result.hours()
    )?;
    if result.partial {
        writeln!(
            out,
            "{}Warning: some segments no longer have a road; totals are partial.{}",
            p.bad, p.reset
        )?;
    }
    Ok(())
}

fn render_network_text(
    out: &mut impl Write,
    report: &NetworkReport,
    palette: &ColorPalette,
) -> io::Result<()> {
    let p = palette;
    let stats = &report.stats;
    if let Some(path) = &report.path {
        writeln!(out, "Network: {path}")?;
    }
    writeln!(
        out,
        "{} locations, {} roads ({} open, {} closed; {} paved, {} unpaved), {} hazard tags",
        stats.locations,
        stats.roads,
        stats.open,
        stats.closed,
        stats.paved,
        stats.unpaved,
        stats.hazards
    )?;
    writeln!(out)?;
    for road in &report.roads {
        let surface_color = match road.surface {
            Surface::Paved => p.good,
            Surface::Unpaved => p.caution,
        };
        let status_color = match road.status {
            RoadStatus::Open => p.good,
            RoadStatus::Closed => p.bad,
        };
        write!(
            out,
            "{} <-> {} {}{} km{} {}{}{} {}{}{}",
            road.from,
            road.to,
            p.muted,
            road.distance,
            p.reset,
            surface_color,
            road.surface,
            p.reset,
            status_color,
            road.status,
            p.reset
        )?;
        if !road.hazards.is_empty() {
            write!(out, " {}[{}]{}", p.caution, road.hazards.join(", "), p.reset)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

//! Mutation commands: `add-road`, `set-status` and `add-hazard`.
//!
//! Each command applies one change through [`SharedNetwork`], which appends it
//! to the network file when the handle was opened from one.

use std::io;

use anyhow::{Context, Result};

use roadnet_lib::{normalize_token, Location, RoadStatus, SharedNetwork, Surface};

use crate::output::{MutationReport, OutputFormat};

/// Arguments for the add-road command.
#[derive(Debug, Clone)]
pub struct AddRoadArgs {
    pub from: String,
    pub to: String,
    /// Length in kilometres.
    pub distance: f64,
    pub surface: Surface,
    pub status: RoadStatus,
}

pub fn handle_add_road_command(
    network: &SharedNetwork,
    format: OutputFormat,
    args: &AddRoadArgs,
) -> Result<()> {
    network
        .add_road(&args.from, &args.to, args.distance, args.surface, args.status)
        .with_context(|| format!("failed to add road between {} and {}", args.from, args.to))?;
    let detail = format!("{} km, {}, {}", args.distance, args.surface, args.status);
    report(network, format, "Added road", &args.from, &args.to, detail)
}

pub fn handle_set_status_command(
    network: &SharedNetwork,
    format: OutputFormat,
    from: &str,
    to: &str,
    status: RoadStatus,
) -> Result<()> {
    network
        .set_road_status(from, to, status)
        .with_context(|| format!("failed to update road between {from} and {to}"))?;
    report(network, format, "Updated road", from, to, format!("now {status}"))
}

pub fn handle_add_hazard_command(
    network: &SharedNetwork,
    format: OutputFormat,
    from: &str,
    to: &str,
    tag: &str,
) -> Result<()> {
    let tag = normalize_token(tag);
    network
        .add_hazard(from, to, &tag)
        .with_context(|| format!("failed to tag road between {from} and {to}"))?;
    report(network, format, "Tagged road", from, to, format!("hazard {tag}"))
}

fn report(
    network: &SharedNetwork,
    format: OutputFormat,
    action: &'static str,
    from: &str,
    to: &str,
    detail: String,
) -> Result<()> {
    let report = MutationReport {
        action,
        from: Location::new(from),
        to: Location::new(to),
        detail,
        persisted_to: network
            .persistence_path()
            .map(|path| path.display().to_string()),
    };
    let mut stdout = io::stdout().lock();
    format.render_mutation(&mut stdout, &report)?;
    Ok(())
}

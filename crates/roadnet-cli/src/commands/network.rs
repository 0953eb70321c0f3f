//! Network file and listing commands: `path`, `locations`, `info` and
//! `compact`.

use std::io;
use std::path::Path;

use anyhow::{Context, Result};

use roadnet_lib::{write_network, SharedNetwork};

use crate::output::{NetworkReport, OutputFormat};
use crate::terminal::ColorPalette;

pub fn handle_path_command(path: &Path, format: OutputFormat) -> Result<()> {
    let mut stdout = io::stdout().lock();
    format.render_path(&mut stdout, &path.display().to_string())?;
    Ok(())
}

pub fn handle_locations_command(network: &SharedNetwork, format: OutputFormat) -> Result<()> {
    let locations = network.list_locations();
    let mut stdout = io::stdout().lock();
    format.render_locations(&mut stdout, &locations)?;
    Ok(())
}

/// Print network statistics followed by every road.
pub fn handle_info_command(network: &SharedNetwork, format: OutputFormat) -> Result<()> {
    let graph = network.snapshot();
    let path = network
        .persistence_path()
        .map(|path| path.display().to_string());
    let report = NetworkReport::from_graph(&graph, path);
    let mut stdout = io::stdout().lock();
    format.render_network(&mut stdout, &report, &ColorPalette::detect())?;
    Ok(())
}

/// Rewrite the network file with one line per road and hazard, dropping the
/// superseded facts that edits append.
pub fn handle_compact_command(
    network: &SharedNetwork,
    path: &Path,
    format: OutputFormat,
) -> Result<()> {
    let graph = network.snapshot();
    write_network(path, &graph)
        .with_context(|| format!("failed to rewrite network file {}", path.display()))?;
    let report = NetworkReport::from_graph(&graph, Some(path.display().to_string()));
    let mut stdout = io::stdout().lock();
    format.render_network(&mut stdout, &report, &ColorPalette::detect())?;
    Ok(())
}

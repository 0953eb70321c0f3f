use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tracing::info;

use crate::error::{Error, Result};
use crate::facts::parse_facts;
use crate::graph::Graph;

/// Environment variable that overrides the network file location.
pub const NETWORK_PATH_ENV: &str = "ROADNET_NETWORK_PATH";

/// Default filename for the network fact file.
const NETWORK_FILENAME: &str = "road_network.pl";

/// Network written when no fact file exists yet.
pub const DEFAULT_NETWORK: &str = "\
% Rural road network knowledge base
% Facts: road(Source, Destination, Distance_Km, Surface, Status)

road(morant_bay, port_morant, 12, paved, open).
road(port_morant, golden_grove, 8, unpaved, open).
road(golden_grove, bath, 15, paved, open).
road(bath, port_antonio, 25, paved, open).
road(morant_bay, yallahs, 10, unpaved, open).
road(yallahs, bath, 18, paved, open).
road(port_morant, port_antonio, 35, unpaved, closed).
road(golden_grove, manchioneal, 20, paved, open).
road(manchioneal, port_antonio, 12, paved, open).
road(morant_bay, eleven_mile, 6, paved, open).
road(eleven_mile, yallahs, 5, unpaved, open).
road(bath, stony_gut, 8, unpaved, open).
road(stony_gut, golden_grove, 10, paved, open).

% Road conditions: road_condition(Source, Destination, Hazard)
road_condition(port_morant, golden_grove, deep_potholes).
road_condition(morant_bay, yallahs, broken_cisterns).
road_condition(bath, stony_gut, deep_potholes).
";

/// Parse the built-in default network.
pub fn default_network() -> Result<Graph> {
    parse_facts(DEFAULT_NETWORK)
}

/// Resolve the default network location using platform-specific project directories.
pub fn default_network_path() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("org", "roadnet", "roadnet").ok_or(Error::ProjectDirsUnavailable)?;
    Ok(dirs.data_dir().join(NETWORK_FILENAME))
}

/// Resolve which network file to use.
///
/// 1. Explicit `target` argument when provided (a directory gets the default
///    filename appended).
/// 2. `ROADNET_NETWORK_PATH` environment variable.
/// 3. Platform-specific project data directory.
pub fn resolve_network_path(target: Option<&Path>) -> Result<PathBuf> {
    if let Some(explicit) = target {
        return Ok(canonical_network_path(explicit));
    }

    if let Some(env_path) = env::var_os(NETWORK_PATH_ENV) {
        return Ok(canonical_network_path(Path::new(&env_path)));
    }

    default_network_path()
}

/// Resolve the network file and create it from [`DEFAULT_NETWORK`] when it
/// does not exist yet.
pub fn ensure_network(target: Option<&Path>) -> Result<PathBuf> {
    let path = resolve_network_path(target)?;
    if path.exists() {
        return Ok(path);
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, DEFAULT_NETWORK)?;
    info!(path = %path.display(), "created default network file");
    Ok(path)
}

fn canonical_network_path(path: &Path) -> PathBuf {
    if path.is_dir() {
        return path.join(NETWORK_FILENAME);
    }
    path.to_path_buf()
}

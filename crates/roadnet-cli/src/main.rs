use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use roadnet_cli::commands::edit::{
    handle_add_hazard_command, handle_add_road_command, handle_set_status_command, AddRoadArgs,
};
use roadnet_cli::commands::network::{
    handle_compact_command, handle_info_command, handle_locations_command, handle_path_command,
};
use roadnet_cli::commands::route::{handle_route_command, RouteCommandArgs};
use roadnet_cli::output::OutputFormat;
use roadnet_lib::{ensure_network, RoadStatus, SharedNetwork, Surface};

#[derive(Parser, Debug)]
#[command(author, version, about = "Rural road network pathfinder")]
struct Cli {
    /// Override the network fact file (or a directory to hold it).
    #[arg(long, global = true)]
    network: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Ensure the network file exists and report its location.
    Path,
    /// List every known location.
    Locations,
    /// Show network statistics and every road.
    Info,
    /// Rewrite the network file without superseded facts.
    Compact,
    /// Find a route between two locations.
    Route {
        /// Starting location.
        #[arg(long = "from")]
        from: String,
        /// Destination location.
        #[arg(long = "to")]
        to: String,
        /// shortest, fastest, paved, fewest_hops (bfs), no_potholes,
        /// no_cisterns or avoid_<hazard>.
        #[arg(long, default_value = "shortest")]
        criteria: String,
    },
    /// Add a road, or overwrite the attributes of an existing one.
    AddRoad {
        #[arg(long = "from")]
        from: String,
        #[arg(long = "to")]
        to: String,
        /// Length in kilometres.
        #[arg(long)]
        distance: f64,
        /// paved or unpaved.
        #[arg(long, default_value = "paved")]
        surface: Surface,
        /// open or closed.
        #[arg(long, default_value = "open")]
        status: RoadStatus,
    },
    /// Open or close an existing road.
    SetStatus {
        #[arg(long = "from")]
        from: String,
        #[arg(long = "to")]
        to: String,
        /// open or closed.
        #[arg(long)]
        status: RoadStatus,
    },
    /// Tag an existing road with a hazard.
    AddHazard {
        #[arg(long = "from")]
        from: String,
        #[arg(long = "to")]
        to: String,
        /// Hazard tag, for example deep_potholes.
        #[arg(long)]
        tag: String,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let format = cli.format;

    let path = ensure_network(cli.network.as_deref())
        .context("failed to locate or create the road network file")?;
    let network = || open_network(&path);

    match cli.command {
        Command::Path => handle_path_command(&path, format),
        Command::Locations => handle_locations_command(&network()?, format),
        Command::Info => handle_info_command(&network()?, format),
        Command::Compact => handle_compact_command(&network()?, &path, format),
        Command::Route { from, to, criteria } => handle_route_command(
            &network()?,
            format,
            &RouteCommandArgs { from, to, criteria },
        ),
        Command::AddRoad {
            from,
            to,
            distance,
            surface,
            status,
        } => handle_add_road_command(
            &network()?,
            format,
            &AddRoadArgs {
                from,
                to,
                distance,
                surface,
                status,
            },
        ),
        Command::SetStatus { from, to, status } => {
            handle_set_status_command(&network()?, format, &from, &to, status)
        }
        Command::AddHazard { from, to, tag } => {
            handle_add_hazard_command(&network()?, format, &from, &to, &tag)
        }
    }
}

fn open_network(path: &Path) -> Result<SharedNetwork> {
    SharedNetwork::open(path)
        .with_context(|| format!("failed to load network from {}", path.display()))
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}

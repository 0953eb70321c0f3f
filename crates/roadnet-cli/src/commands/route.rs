//! Route command handler.

use std::io;

use anyhow::Result;

use roadnet_lib::{Criterion, Error as RouteError, RouteRequest, SharedNetwork};

use crate::output::OutputFormat;
use crate::terminal::ColorPalette;

/// Arguments for the route command.
#[derive(Debug, Clone)]
pub struct RouteCommandArgs {
    /// Starting location name.
    pub from: String,
    /// Destination location name.
    pub to: String,
    /// Criterion such as `shortest`, `fastest`, `paved`, `avoid_<tag>` or `bfs`.
    pub criteria: String,
}

impl RouteCommandArgs {
    /// Convert CLI args to a library RouteRequest.
    pub fn to_request(&self) -> Result<RouteRequest> {
        RouteRequest::parse(&self.from, &self.to, &self.criteria)
            .map_err(|err| handle_route_failure(None, err))
    }
}

/// Handle the route subcommand.
pub fn handle_route_command(
    network: &SharedNetwork,
    format: OutputFormat,
    args: &RouteCommandArgs,
) -> Result<()> {
    let request = args.to_request()?;
    let result = network
        .plan(&request)
        .map_err(|err| handle_route_failure(Some(&request.criterion), err))?;

    let mut stdout = io::stdout().lock();
    format.render_route(&mut stdout, &result, &ColorPalette::detect())?;
    Ok(())
}

fn handle_route_failure(criterion: Option<&Criterion>, err: RouteError) -> anyhow::Error {
    match err {
        RouteError::UnknownLocation { name, suggestions } => {
            anyhow::anyhow!(format_unknown_location_message(&name, &suggestions))
        }
        RouteError::NoPathFound { start, goal } => {
            anyhow::anyhow!(format_no_path_message(&start, &goal, criterion))
        }
        RouteError::MalformedQuery { criterion: raw } => anyhow::anyhow!(
            "Unrecognised criteria '{raw}'. Use shortest, fastest, paved, fewest_hops, \
             no_potholes, no_cisterns or avoid_<hazard>."
        ),
        other => anyhow::Error::new(other),
    }
}

fn format_unknown_location_message(name: &str, suggestions: &[String]) -> String {
    let mut message = format!("Unknown location '{}'.", name);
    if !suggestions.is_empty() {
        let formatted = match suggestions {
            [only] => format!("Did you mean '{only}'?"),
            _ => {
                let joined = suggestions
                    .iter()
                    .map(|s| format!("'{}'", s))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("Did you mean one of: {}?", joined)
            }
        };
        message.push(' ');
        message.push_str(&formatted);
    }
    message
}

fn format_no_path_message(start: &str, goal: &str, criterion: Option<&Criterion>) -> String {
    let mut message = format!("No path found between {} and {}.", start, goal);
    let tip = match criterion {
        Some(Criterion::Paved) => " Try allowing unpaved roads (for example, --criteria shortest).",
        Some(Criterion::AvoidHazard(_)) => {
            " Try a route that accepts the hazard (for example, --criteria shortest)."
        }
        _ => " Every connecting road may be closed; reopen one with set-status.",
    };
    message.push_str(tip);
    message
}

use thiserror::Error;

/// Convenient result alias for the road network library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a road is added with a non-positive (or non-finite) length.
    #[error("invalid road distance {distance}; distances must be positive")]
    InvalidDistance { distance: f64 },

    /// Raised when both endpoints of a road are the same location.
    #[error("road endpoints must differ (got {location} twice)")]
    SelfLoop { location: String },

    /// Raised when a location name or hazard tag cannot be written as a fact atom.
    #[error("invalid {kind} '{name}'; use ASCII letters, digits, spaces or underscores")]
    InvalidName { kind: &'static str, name: String },

    /// Raised when a status or hazard update names a pair with no road.
    #[error("no road between {from} and {to}")]
    RoadNotFound { from: String, to: String },

    /// Raised when a search endpoint is not part of the network.
    #[error("unknown location: {name}{}", format_suggestions(.suggestions))]
    UnknownLocation {
        name: String,
        suggestions: Vec<String>,
    },

    /// Raised when the search exhausted its frontier without reaching the goal.
    #[error("no path found between {start} and {goal}")]
    NoPathFound { start: String, goal: String },

    /// Raised when a caller-supplied criterion is not recognised.
    #[error("unrecognised route criterion: {criterion}")]
    MalformedQuery { criterion: String },

    /// Raised when a line of a network fact file cannot be applied.
    #[error("invalid fact on line {line}: {message}")]
    InvalidFact { line: usize, message: String },

    /// No suitable project directories could be resolved for this platform.
    #[error("failed to resolve project directories for the network file")]
    ProjectDirsUnavailable,

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

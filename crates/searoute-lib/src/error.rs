use thiserror::Error;

/// Convenient result alias for the sea route library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// The registry holds no waypoints, so no coordinate can be resolved to a graph node.
    #[error("no waypoints available to resolve a position")]
    NoWaypoints,

    /// Raised when a waypoint identifier could not be found in the registry.
    #[error("unknown waypoint id: {id}{}", format_suggestions(.suggestions))]
    UnknownWaypoint {
        id: String,
        suggestions: Vec<String>,
    },

    /// Raised when the search frontier is exhausted before reaching the goal.
    #[error("no route found between {start} and {goal}")]
    NoPathFound { start: String, goal: String },

    /// Raised when no land-avoiding passage exists within the detour budget.
    #[error("no safe passage found: {message}")]
    UnsafeRoute { message: String },

    /// Latitude or longitude is not finite or lies outside [-90, 90] / [-180, 180].
    #[error("invalid coordinate ({latitude}, {longitude})")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    /// Raised when the dataset defines the same waypoint id twice.
    #[error("duplicate waypoint id encountered: {id}")]
    DuplicateWaypoint { id: String },

    /// Raised when the dataset fails structural validation.
    #[error("invalid dataset: {message}")]
    InvalidDataset { message: String },

    /// Raised when an engine configuration value is unusable.
    #[error("invalid engine configuration: {message}")]
    InvalidConfig { message: String },

    /// The caller cancelled the search.
    #[error("route search cancelled")]
    SearchCancelled,

    /// The search deadline passed before a route was found.
    #[error("route search exceeded its deadline")]
    SearchTimedOut,

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for JSON dataset parsing errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
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

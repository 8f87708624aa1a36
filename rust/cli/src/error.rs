//! Error types for the CLI application.
//!
//! Engine, strategy and simulator failures arrive as
//! [`GameError`](holecard_engine::errors::GameError) and are sorted into
//! configuration or engine errors here; [`exit_code`](crate::exit_code) maps
//! the result to the process status.

use std::fmt;

use holecard_engine::errors::GameError;

use crate::exit_code;

#[derive(Debug)]
pub enum CliError {
    /// I/O error (stdout/stderr writes, stdin reads, config files)
    Io(std::io::Error),

    /// Invalid user input or command-line arguments
    InvalidInput(String),

    /// Configuration error
    Config(String),

    /// Engine-related error
    Engine(String),

    /// Run stopped before it finished (deadline or cancellation)
    Interrupted(String),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Interrupted(_) => exit_code::INTERRUPTED,
            _ => exit_code::ERROR,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Io(e) => write!(f, "I/O error: {}", e),
            CliError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Engine(msg) => write!(f, "Engine error: {}", msg),
            CliError::Interrupted(msg) => write!(f, "Interrupted: {}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(error: std::io::Error) -> Self {
        CliError::Io(error)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(error: serde_json::Error) -> Self {
        CliError::Io(std::io::Error::other(error))
    }
}

impl From<GameError> for CliError {
    fn from(error: GameError) -> Self {
        if error.is_config() {
            CliError::Config(error.to_string())
        } else {
            CliError::Engine(error.to_string())
        }
    }
}

impl From<holecard_engine::errors::ConfigError> for CliError {
    fn from(error: holecard_engine::errors::ConfigError) -> Self {
        CliError::Config(error.to_string())
    }
}

impl From<crate::config::ConfigError> for CliError {
    fn from(error: crate::config::ConfigError) -> Self {
        CliError::Config(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use holecard_engine::errors::{ConfigError, StateError};

    #[test]
    fn game_errors_are_sorted_by_kind() {
        let config: CliError = GameError::from(ConfigError::UnknownVariant("x".into())).into();
        assert!(matches!(config, CliError::Config(_)));
        let state: CliError = GameError::from(StateError::HandSettled).into();
        assert!(matches!(state, CliError::Engine(_)));
    }

    #[test]
    fn interrupted_maps_to_130() {
        assert_eq!(CliError::Interrupted("deadline".into()).exit_code(), 130);
        assert_eq!(CliError::InvalidInput("x".into()).exit_code(), 2);
    }
}

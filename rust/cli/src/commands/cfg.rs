//! Configuration command handler.
//!
//! Prints the resolved settings with their sources (default, file named by
//! `HOLECARD_CONFIG`, or a `HOLECARD_*` environment variable).
//!
//! # Example Output
//!
//! ```json
//! {
//!   "game": {
//!     "value": "ocp",
//!     "source": "default"
//!   },
//!   ...
//! }
//! ```

use crate::config;
use crate::error::CliError;
use crate::io_utils::write_json;
use crate::ui;
use std::io::Write;

/// Handle the cfg command.
///
/// # Errors
///
/// Returns `CliError::Config` if configuration loading fails.
/// Returns `CliError::Io` if writing to output stream fails.
pub fn handle_cfg_command(out: &mut dyn Write, err: &mut dyn Write) -> Result<(), CliError> {
    let resolved = match config::load_with_sources() {
        Ok(r) => r,
        Err(e) => {
            ui::write_error(err, &format!("Invalid configuration: {}", e))?;
            return Err(CliError::Config(format!("Invalid configuration: {}", e)));
        }
    };

    let config::ConfigResolved { config, sources } = resolved;
    let display = serde_json::json!({
        "game": {
            "value": config.game,
            "source": sources.game,
        },
        "trials": {
            "value": config.trials,
            "source": sources.trials,
        },
        "seed": {
            "value": config.seed,
            "source": sources.seed,
        },
        "threads": {
            "value": config.threads,
            "source": sources.threads,
        }
    });
    write_json(out, &display)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for var in [
            config::CONFIG_ENV,
            "HOLECARD_SEED",
            "HOLECARD_TRIALS",
            "HOLECARD_GAME",
            "HOLECARD_THREADS",
        ] {
            unsafe {
                std::env::remove_var(var);
            }
        }
    }

    #[test]
    #[serial]
    fn test_cfg_displays_defaults_with_sources() {
        clear_env();
        let mut out = Vec::new();
        let mut err = Vec::new();
        handle_cfg_command(&mut out, &mut err).unwrap();

        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["game"]["value"], "ocp");
        assert_eq!(json["game"]["source"], "default");
        assert_eq!(json["trials"]["value"], 100_000);
        assert!(json["seed"]["value"].is_null());
        assert!(err.is_empty(), "should not write to stderr on success");
    }

    #[test]
    #[serial]
    fn test_cfg_reports_env_source() {
        clear_env();
        unsafe {
            std::env::set_var("HOLECARD_GAME", "uth");
            std::env::set_var("HOLECARD_THREADS", "3");
        }
        let mut out = Vec::new();
        let result = handle_cfg_command(&mut out, &mut Vec::new());
        clear_env();
        result.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["game"]["value"], "uth");
        assert_eq!(json["game"]["source"], "env");
        assert_eq!(json["threads"]["value"], 3);
        assert_eq!(json["threads"]["source"], "env");
    }

    #[test]
    #[serial]
    fn test_cfg_handles_config_error() {
        clear_env();
        unsafe {
            std::env::set_var("HOLECARD_SEED", "not-a-number");
        }
        let mut err = Vec::new();
        let result = handle_cfg_command(&mut Vec::new(), &mut err);
        clear_env();
        assert!(matches!(result, Err(CliError::Config(_))));
        assert!(String::from_utf8(err).unwrap().contains("Invalid seed"));
    }
}

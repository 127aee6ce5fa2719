//! Value parsers for CLI arguments clap cannot check on its own

use std::path::PathBuf;

const MAX_ROLLBACK_STEPS: u32 = 100;

/// Accepts a path to an existing, readable regular file
pub fn validate_config_file_path(value: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(value);

    if !path.is_file() {
        return Err(format!("Configuration file not found: '{}'", value));
    }

    std::fs::File::open(&path)
        .map(|_| path)
        .map_err(|e| format!("Cannot read configuration file '{}': {}", value, e))
}

/// Accepts 1 to 100 rollback steps
pub fn validate_rollback_steps(value: &str) -> Result<u32, String> {
    let steps: u32 = value
        .parse()
        .map_err(|_| format!("Rollback steps must be a positive number, got: '{}'", value))?;

    match steps {
        0 => Err("Rollback steps must be greater than 0".to_string()),
        s if s > MAX_ROLLBACK_STEPS => Err(format!(
            "Rollback steps cannot exceed {}",
            MAX_ROLLBACK_STEPS
        )),
        s => Ok(s),
    }
}

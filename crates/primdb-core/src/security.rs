//! Input validation limits.
//!
//! Table names double as file names in the JSON store, so they are checked
//! before anything reaches the disk.

use crate::error::{Error, Result};

/// Maximum allowed command length (1 MB)
pub const MAX_COMMAND_LENGTH: usize = 1024 * 1024;

/// Maximum allowed table name length (255 bytes)
pub const MAX_TABLE_NAME_LENGTH: usize = 255;

/// Validates a command line before parsing
///
/// # Errors
///
/// Returns `Error::InvalidInput` if the command is blank or exceeds
/// `MAX_COMMAND_LENGTH`.
pub fn validate_command(command: &str) -> Result<()> {
    if command.trim().is_empty() {
        return Err(Error::InvalidInput("Command cannot be empty".to_string()));
    }

    if command.len() > MAX_COMMAND_LENGTH {
        return Err(Error::InvalidInput(format!(
            "Command length {} exceeds maximum allowed length {}",
            command.len(),
            MAX_COMMAND_LENGTH
        )));
    }

    Ok(())
}

/// Validates a table name
///
/// # Errors
///
/// Returns `Error::InvalidInput` if the name:
/// - is empty or exceeds `MAX_TABLE_NAME_LENGTH`
/// - is `.` or `..`
/// - contains a path separator or a control character
pub fn validate_table_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::InvalidInput("Table name cannot be empty".to_string()));
    }

    if name.len() > MAX_TABLE_NAME_LENGTH {
        return Err(Error::InvalidInput(format!(
            "Table name length {} exceeds maximum allowed length {}",
            name.len(),
            MAX_TABLE_NAME_LENGTH
        )));
    }

    if name == "." || name == ".." {
        return Err(Error::InvalidInput(format!("Invalid table name: {}", name)));
    }

    if name.chars().any(|c| c == '/' || c == '\\' || c.is_control()) {
        return Err(Error::InvalidInput(format!(
            "Table name contains invalid characters: {:?}",
            name
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_command() {
        assert!(validate_command("list_tables").is_ok());
        assert!(validate_command("   ").is_err());
        assert!(validate_command(&"x".repeat(MAX_COMMAND_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_validate_table_name() {
        assert!(validate_table_name("users").is_ok());
        assert!(validate_table_name("order_items.v2").is_ok());
        for bad in ["", ".", "..", "../etc", "a/b", "a\\b", "tab\tname"] {
            assert!(validate_table_name(bad).is_err(), "{:?} should be rejected", bad);
        }
        assert!(validate_table_name(&"t".repeat(MAX_TABLE_NAME_LENGTH + 1)).is_err());
    }
}

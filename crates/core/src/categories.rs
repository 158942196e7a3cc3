//! Category defaults and validators.

use crate::error::CoreError;

/// Categories created for every newly registered user.
pub const DEFAULT_CATEGORIES: &[&str] = &["Work", "Personal", "Shopping", "Health"];

/// Color assigned when a category is created without one.
pub const DEFAULT_COLOR: &str = "#007bff";

/// Maximum category name length in characters.
pub const MAX_NAME_LEN: usize = 50;

/// Validate a category name: non-blank and at most [`MAX_NAME_LEN`] characters.
pub fn validate_name(name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation(
            "Category name must not be empty".to_string(),
        ));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "Category name must be at most {MAX_NAME_LEN} characters"
        )));
    }
    Ok(())
}

/// Validate a `#rrggbb` hex color.
pub fn validate_color(color: &str) -> Result<(), CoreError> {
    let valid = color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|c| c.is_ascii_hexdigit());
    if valid {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid color '{color}'. Expected #rrggbb"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_color_is_valid() {
        assert!(validate_color(DEFAULT_COLOR).is_ok());
    }

    #[test]
    fn accepts_mixed_case_hex() {
        assert!(validate_color("#A1b2C3").is_ok());
    }

    #[test]
    fn rejects_malformed_colors() {
        assert!(validate_color("007bff").is_err());
        assert!(validate_color("#07f").is_err());
        assert!(validate_color("#00zz00").is_err());
        assert!(validate_color("#0000000").is_err());
    }

    #[test]
    fn name_bounds() {
        assert!(validate_name("Work").is_ok());
        assert!(validate_name(" ").is_err());
        assert!(validate_name(&"x".repeat(MAX_NAME_LEN + 1)).is_err());
    }

    #[test]
    fn four_default_categories() {
        assert_eq!(DEFAULT_CATEGORIES.len(), 4);
        for name in DEFAULT_CATEGORIES {
            assert!(validate_name(name).is_ok());
        }
    }
}

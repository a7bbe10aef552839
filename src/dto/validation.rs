//! Validation helpers for DTOs.

use validator::ValidationError;

use crate::color::Rgb;

/// Validates that a string parses as one of the supported color forms
/// (`rgb(r, g, b)`, `rgba(r, g, b, a)`, `#rrggbb`, `#rgb`).
///
/// # Examples
///
/// ```ignore
/// validate_color_string("rgb(254, 236, 0)") // Ok
/// validate_color_string("#feec00")          // Ok
/// validate_color_string("yellowish")        // Err
/// ```
pub fn validate_color_string(color: &str) -> Result<(), ValidationError> {
    if Rgb::parse(color).is_err() {
        let mut err = ValidationError::new("color_format");
        err.message = Some(format!("`{color}` is not a recognized color string").into());
        return Err(err);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_color_string_valid() {
        assert!(validate_color_string("rgb(254, 236, 0)").is_ok());
        assert!(validate_color_string("rgba(255, 255, 255, 0)").is_ok());
        assert!(validate_color_string("#feec00").is_ok());
        assert!(validate_color_string("#fff").is_ok());
    }

    #[test]
    fn test_validate_color_string_invalid() {
        assert!(validate_color_string("").is_err());
        assert!(validate_color_string("yellowish").is_err());
        assert!(validate_color_string("rgb(300, 0, 0)").is_err()); // out of range
        assert!(validate_color_string("#12345").is_err()); // wrong length
    }
}

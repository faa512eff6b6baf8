use crate::utils::error::{Result, SeisError};
use std::path::Path;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &Path) -> Result<()> {
    let display = path.to_string_lossy();

    if display.trim().is_empty() {
        return Err(SeisError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: display.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if display.contains('\0') {
        return Err(SeisError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: display.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_float(field_name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(SeisError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value must be a finite number greater than 0".to_string(),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SeisError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(SeisError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("output", Path::new("newweights.dat")).is_ok());
        assert!(validate_path("output", Path::new("")).is_err());
        assert!(validate_path("output", Path::new("bad\0name")).is_err());
    }

    #[test]
    fn test_validate_positive_float() {
        assert!(validate_positive_float("velocity_km_s", 2.8).is_ok());
        assert!(validate_positive_float("velocity_km_s", 0.0).is_err());
        assert!(validate_positive_float("velocity_km_s", -3.5).is_err());
        assert!(validate_positive_float("velocity_km_s", f64::NAN).is_err());
        assert!(validate_positive_float("velocity_km_s", f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("truncation.count", 8usize, 0, 4096).is_ok());
        assert!(validate_range("truncation.count", 5000usize, 0, 4096).is_err());
    }
}

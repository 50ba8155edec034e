// Parameter validation shared by every provider operation
//
// Operations check required parameters first, then parse numeric strings in a
// fixed order. The first failure wins.

use thiserror::Error;

/// Validation failures raised before any provider call is attempted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// At least one required parameter was empty.
    ///
    /// `required` is the operation's full required set (what the message lists);
    /// `missing` is the subset that was actually empty.
    #[error("Missing required query parameters: {}", describe(.required))]
    MissingParameters {
        required: Vec<&'static str>,
        missing: Vec<&'static str>,
    },

    #[error("Invalid longitude value")]
    InvalidLongitude,

    #[error("Invalid latitude value")]
    InvalidLatitude,

    #[error("Invalid zoom level value")]
    InvalidZoomLevel,

    #[error("Invalid min_x value")]
    InvalidMinX,

    #[error("Invalid min_y value")]
    InvalidMinY,

    #[error("Invalid max_x value")]
    InvalidMaxX,

    #[error("Invalid max_y value")]
    InvalidMaxY,

    #[error("Invalid image width value")]
    InvalidImageWidth,

    #[error("Invalid image height value")]
    InvalidImageHeight,

    #[error("Invalid tile z value")]
    InvalidTileZ,

    #[error("Invalid tile x value")]
    InvalidTileX,

    #[error("Invalid tile y value")]
    InvalidTileY,
}

impl ValidationError {
    /// Names of the parameters that were empty, if this is a missing-parameter error.
    pub fn missing(&self) -> &[&'static str] {
        match self {
            ValidationError::MissingParameters { missing, .. } => missing,
            _ => &[],
        }
    }
}

fn describe(names: &[&'static str]) -> String {
    names
        .iter()
        .map(|name| format!("'{}'", name))
        .collect::<Vec<_>>()
        .join(" and/or ")
}

/// Trait for operation parameters with required string fields.
pub trait Validate {
    /// Required parameters as `(name, value)` pairs, in reporting order.
    fn required_fields(&self) -> Vec<(&'static str, &str)>;

    fn validate(&self) -> Result<(), ValidationError> {
        check_required(&self.required_fields())
    }
}

/// Trait for parameter types that fill defaults before validation
pub trait Normalizable {
    /// Normalize the parameters by applying defaults and transformations
    fn normalize(&mut self) {
        // Default: no-op
    }
}

/// Fails with [`ValidationError::MissingParameters`] if any value is empty.
pub fn check_required(fields: &[(&'static str, &str)]) -> Result<(), ValidationError> {
    let missing: Vec<&'static str> = fields
        .iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| *name)
        .collect();

    if missing.is_empty() {
        return Ok(());
    }

    Err(ValidationError::MissingParameters {
        required: fields.iter().map(|(name, _)| *name).collect(),
        missing,
    })
}

/// Parses a finite floating point coordinate, mapping failure to `error`.
pub fn parse_coordinate(value: &str, error: ValidationError) -> Result<f64, ValidationError> {
    match value.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(error),
    }
}

/// Parses a non-negative integer, mapping failure to `error`.
pub fn parse_dimension(value: &str, error: ValidationError) -> Result<u32, ValidationError> {
    value.trim().parse::<u32>().map_err(|_| error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_required_reports_full_set_and_missing_subset() {
        let err = check_required(&[("origin", "12.9,77.6"), ("destination", "")]).unwrap_err();

        assert_eq!(
            err.to_string(),
            "Missing required query parameters: 'origin' and/or 'destination'"
        );
        assert_eq!(err.missing(), &["destination"]);
    }

    #[test]
    fn test_check_required_passes_when_all_present() {
        assert!(check_required(&[("input", "cafe")]).is_ok());
        assert!(check_required(&[]).is_ok());
    }

    #[test]
    fn test_parse_coordinate_rejects_non_finite() {
        assert_eq!(
            parse_coordinate("NaN", ValidationError::InvalidLatitude),
            Err(ValidationError::InvalidLatitude)
        );
        assert_eq!(
            parse_coordinate("inf", ValidationError::InvalidLatitude),
            Err(ValidationError::InvalidLatitude)
        );
        assert_eq!(
            parse_coordinate("12.5", ValidationError::InvalidLatitude),
            Ok(12.5)
        );
    }

    #[test]
    fn test_parse_dimension() {
        assert_eq!(
            parse_dimension("800", ValidationError::InvalidImageWidth),
            Ok(800)
        );
        assert_eq!(
            parse_dimension("-1", ValidationError::InvalidImageWidth),
            Err(ValidationError::InvalidImageWidth)
        );
        assert_eq!(
            parse_dimension("wide", ValidationError::InvalidImageWidth),
            Err(ValidationError::InvalidImageWidth)
        );
    }
}

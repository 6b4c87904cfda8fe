use crate::utils::error::{Result, SkinsError};
use std::collections::HashSet;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(SkinsError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(SkinsError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_file_extension(field_name: &str, file: &str, allowed_extensions: &[&str]) -> Result<()> {
    let extension = std::path::Path::new(file)
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or_else(|| SkinsError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: file.to_string(),
            reason: "File has no extension or invalid filename".to_string(),
        })?;

    if !allowed_extensions
        .iter()
        .any(|allowed| allowed.eq_ignore_ascii_case(extension))
    {
        return Err(SkinsError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: file.to_string(),
            reason: format!(
                "Unsupported file extension: {}. Allowed extensions: {}",
                extension,
                allowed_extensions.join(", ")
            ),
        });
    }

    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| SkinsError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SkinsError::InvalidConfigValueError {
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
        return Err(SkinsError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// A nine-hole difficulty ranking: nine entries, each 1..=18, no repeats.
pub fn validate_hole_difficulty(field_name: &str, ranks: &[u8]) -> Result<()> {
    if ranks.len() != crate::domain::model::HOLES {
        return Err(SkinsError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: format!("{:?}", ranks),
            reason: format!(
                "Expected {} hole rankings, found {}",
                crate::domain::model::HOLES,
                ranks.len()
            ),
        });
    }

    let mut seen = HashSet::new();
    for (i, &rank) in ranks.iter().enumerate() {
        validate_range(&format!("{}[{}]", field_name, i), rank, 1, 18)?;
        if !seen.insert(rank) {
            return Err(SkinsError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: format!("{:?}", ranks),
                reason: format!("Difficulty rank {} appears more than once", rank),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("input", "scores.csv").is_ok());
        assert!(validate_path("input", "").is_err());
        assert!(validate_path("input", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension("input", "round.csv", &["csv"]).is_ok());
        assert!(validate_file_extension("input", "ROUND.CSV", &["csv"]).is_ok());
        assert!(validate_file_extension("input", "round.xlsx", &["csv"]).is_err());
        assert!(validate_file_extension("input", "round", &["csv"]).is_err());
    }

    #[test]
    fn test_validate_required_field() {
        let present = Some(3);
        assert_eq!(*validate_required_field("x", &present).unwrap(), 3);
        let absent: Option<u8> = None;
        assert!(matches!(
            validate_required_field("scoring.invalid_scores", &absent),
            Err(SkinsError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_validate_hole_difficulty() {
        assert!(validate_hole_difficulty("course.hole_difficulty", &[7, 3, 9, 1, 5, 11, 15, 13, 17]).is_ok());
        assert!(validate_hole_difficulty("course.hole_difficulty", &[1, 2, 3]).is_err());
        assert!(validate_hole_difficulty("course.hole_difficulty", &[1, 2, 3, 4, 5, 6, 7, 8, 19]).is_err());
        assert!(validate_hole_difficulty("course.hole_difficulty", &[0, 2, 3, 4, 5, 6, 7, 8, 9]).is_err());

        let err = validate_hole_difficulty("course.hole_difficulty", &[1, 1, 3, 4, 5, 6, 7, 8, 9])
            .unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }
}

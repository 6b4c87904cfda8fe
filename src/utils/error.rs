use thiserror::Error;

#[derive(Error, Debug)]
pub enum SkinsError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Input format error: {message}")]
    InputFormatError { message: String },

    #[error("Invalid score for {player} on hole {hole}: '{value}'")]
    InvalidScoreError {
        player: String,
        hole: usize,
        value: String,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl SkinsError {
    pub fn input_format(message: impl Into<String>) -> Self {
        SkinsError::InputFormatError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            SkinsError::CsvError(_)
            | SkinsError::InputFormatError { .. }
            | SkinsError::InvalidScoreError { .. } => ErrorCategory::Input,
            SkinsError::ConfigError { .. }
            | SkinsError::InvalidConfigValueError { .. }
            | SkinsError::MissingConfigError { .. }
            | SkinsError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            SkinsError::IoError(_) | SkinsError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        // 無效成績可改用其他政策重跑，較其他輸入錯誤輕微
        if let SkinsError::InvalidScoreError { .. } = self {
            return ErrorSeverity::Medium;
        }
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            SkinsError::CsvError(_) => {
                "Check that the score sheet is a valid CSV file".to_string()
            }
            SkinsError::IoError(_) => {
                "Check that the file exists and the output directory is writable".to_string()
            }
            SkinsError::SerializationError(_) => {
                "Report generation failed; re-run with --verbose for details".to_string()
            }
            SkinsError::InputFormatError { .. } => {
                "Make sure the sheet has one row per player with a name, a handicap and nine hole scores"
                    .to_string()
            }
            SkinsError::InvalidScoreError { .. } => {
                "Fix the score cell, or pick the 'exclude' or 'lose-ties' policy for invalid scores"
                    .to_string()
            }
            SkinsError::ConfigError { .. }
            | SkinsError::ConfigValidationError { .. } => {
                "Check the course profile TOML file".to_string()
            }
            SkinsError::InvalidConfigValueError { field, .. } => {
                format!("Correct the value of '{}' in the course profile", field)
            }
            SkinsError::MissingConfigError { field } => {
                format!("Add '{}' to the course profile", field)
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Input => format!("The score sheet could not be scored: {}", self),
            ErrorCategory::Configuration => format!("The course profile is not usable: {}", self),
            ErrorCategory::System => format!("A system error occurred: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, SkinsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        let err = SkinsError::input_format("no player rows");
        assert_eq!(err.category(), ErrorCategory::Input);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.to_string().contains("no player rows"));

        let err = SkinsError::MissingConfigError {
            field: "scoring.invalid_scores".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert!(err.recovery_suggestion().contains("scoring.invalid_scores"));

        let err = SkinsError::IoError(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert_eq!(err.severity(), ErrorSeverity::Critical);
    }

    #[test]
    fn test_invalid_score_message() {
        let err = SkinsError::InvalidScoreError {
            player: "Alice".to_string(),
            hole: 3,
            value: "x".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid score for Alice on hole 3: 'x'");
        assert_eq!(err.category(), ErrorCategory::Input);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert!(err.severity() < SkinsError::input_format("empty").severity());
        assert!(err.user_friendly_message().starts_with("The score sheet"));
    }
}

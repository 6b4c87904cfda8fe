use crate::domain::model::{ColumnLayout, HoleDifficultyTable, InvalidScorePolicy, HOLES};
use crate::utils::error::{Result, SkinsError};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const OUTPUT_FORMATS: [&str; 2] = ["json", "csv"];

/// Course this crate falls back to when no profile file is given.
const BUILTIN_COURSE_NAME: &str = "Default Front Nine";
const BUILTIN_HOLE_DIFFICULTY: [u8; HOLES] = [7, 3, 9, 1, 5, 11, 15, 13, 17];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseProfile {
    pub course: CourseConfig,
    #[serde(default)]
    pub layout: ColumnLayout,
    #[serde(default)]
    pub scoring: ScoringConfig,
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseConfig {
    pub name: String,
    pub hole_difficulty: Vec<u8>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Required; there is no silent default for unparsable scores.
    pub invalid_scores: Option<InvalidScorePolicy>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub output_path: Option<String>,
    pub output_formats: Option<Vec<String>>,
}

impl CourseProfile {
    pub fn builtin() -> Self {
        Self {
            course: CourseConfig {
                name: BUILTIN_COURSE_NAME.to_string(),
                hole_difficulty: BUILTIN_HOLE_DIFFICULTY.to_vec(),
            },
            layout: ColumnLayout::default(),
            scoring: ScoringConfig {
                invalid_scores: Some(InvalidScorePolicy::Fail),
            },
            output: None,
        }
    }

    /// 從 TOML 檔案載入球場設定
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SkinsError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SkinsError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${COURSE_NAME})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| SkinsError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("course.name", &self.course.name)?;
        validation::validate_hole_difficulty("course.hole_difficulty", &self.course.hole_difficulty)?;
        validation::validate_required_field("scoring.invalid_scores", &self.scoring.invalid_scores)?;

        // 分數欄位不可與姓名或差點欄位重疊
        let scores = self.layout.score_columns();
        for (field, column) in [
            ("layout.name_column", self.layout.name_column),
            ("layout.handicap_column", self.layout.handicap_column),
        ] {
            if scores.contains(&column) {
                return Err(SkinsError::InvalidConfigValueError {
                    field: field.to_string(),
                    value: column.to_string(),
                    reason: format!(
                        "Overlaps the score columns {}..={}",
                        scores.start,
                        scores.end - 1
                    ),
                });
            }
        }

        if let Some(output) = &self.output {
            if let Some(path) = &output.output_path {
                validation::validate_path("output.output_path", path)?;
            }
            if let Some(formats) = &output.output_formats {
                validate_output_formats("output.output_formats", formats)?;
            }
        }

        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.course.name
    }

    pub fn hole_difficulty_table(&self) -> Result<HoleDifficultyTable> {
        HoleDifficultyTable::new(&self.course.hole_difficulty)
    }

    pub fn invalid_score_policy(&self) -> Result<InvalidScorePolicy> {
        validation::validate_required_field("scoring.invalid_scores", &self.scoring.invalid_scores)
            .copied()
    }

    pub fn output_path(&self) -> Option<&str> {
        self.output.as_ref()?.output_path.as_deref()
    }

    pub fn output_formats(&self) -> Option<&[String]> {
        self.output.as_ref()?.output_formats.as_deref()
    }
}

impl Validate for CourseProfile {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

pub fn validate_output_formats(field_name: &str, formats: &[String]) -> Result<()> {
    if formats.is_empty() {
        return Err(SkinsError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: String::new(),
            reason: "At least one output format is required".to_string(),
        });
    }
    for format in formats {
        if !OUTPUT_FORMATS.contains(&format.as_str()) {
            return Err(SkinsError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: format.clone(),
                reason: format!(
                    "Unsupported format. Valid formats: {}",
                    OUTPUT_FORMATS.join(", ")
                ),
            });
        }
    }
    Ok(())
}

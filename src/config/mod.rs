pub mod course_profile;
pub mod local;

#[cfg(feature = "cli")]
pub use cli_config::CliConfig;

#[cfg(feature = "cli")]
mod cli_config {
    use super::course_profile::{validate_output_formats, CourseProfile};
    use crate::domain::model::InvalidScorePolicy;
    use crate::domain::ports::ConfigProvider;
    use crate::utils::error::Result;
    use crate::utils::logger::LogFormat;
    use crate::utils::validation::{self, Validate};
    use clap::Parser;

    pub const DEFAULT_INPUT: &str = "data/sample_round.csv";
    pub const DEFAULT_OUTPUT_PATH: &str = "./output";

    #[derive(Debug, Clone, Parser)]
    #[command(name = "skins-etl")]
    #[command(about = "Score a nine-hole skins game from a CSV score sheet")]
    pub struct CliConfig {
        /// Score sheet to read
        #[arg(long, default_value = DEFAULT_INPUT)]
        pub input: String,

        /// Course profile TOML; the built-in course is used when omitted
        #[arg(long)]
        pub course: Option<String>,

        /// Override the course profile's policy for unparsable scores
        #[arg(long, value_enum)]
        pub invalid_scores: Option<InvalidScorePolicy>,

        #[arg(long)]
        pub output_path: Option<String>,

        #[arg(long, value_delimiter = ',')]
        pub output_formats: Vec<String>,

        #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
        pub log_format: LogFormat,

        /// Parse the inputs and report what would be scored, without writing anything
        #[arg(long)]
        pub dry_run: bool,

        #[arg(short, long, help = "Enable verbose output")]
        pub verbose: bool,
    }

    impl CliConfig {
        /// Fills output settings the command line left open from the profile, then from defaults.
        pub fn resolve_with(mut self, profile: &CourseProfile) -> Self {
            if self.output_path.is_none() {
                self.output_path = Some(
                    profile
                        .output_path()
                        .unwrap_or(DEFAULT_OUTPUT_PATH)
                        .to_string(),
                );
            }
            if self.output_formats.is_empty() {
                self.output_formats = match profile.output_formats() {
                    Some(formats) => formats.to_vec(),
                    None => vec!["json".to_string(), "csv".to_string()],
                };
            }
            self
        }

        /// Profile from `--course` (or the built-in one) with `--invalid-scores` applied.
        pub fn load_profile(&self) -> Result<CourseProfile> {
            let mut profile = match &self.course {
                Some(path) => CourseProfile::from_file(path)?,
                None => CourseProfile::builtin(),
            };
            if let Some(policy) = self.invalid_scores {
                profile.scoring.invalid_scores = Some(policy);
            }
            Ok(profile)
        }
    }

    impl ConfigProvider for CliConfig {
        fn input_path(&self) -> &str {
            &self.input
        }

        fn output_path(&self) -> &str {
            self.output_path.as_deref().unwrap_or(DEFAULT_OUTPUT_PATH)
        }

        fn output_formats(&self) -> &[String] {
            &self.output_formats
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            validation::validate_path("input", &self.input)?;
            validation::validate_file_extension("input", &self.input, &["csv"])?;
            if let Some(course) = &self.course {
                validation::validate_path("course", course)?;
            }
            validation::validate_path("output_path", self.output_path())?;
            validate_output_formats("output_formats", &self.output_formats)?;
            Ok(())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_defaults_resolve_from_builtin_profile() {
            let config = CliConfig::parse_from(["skins-etl"]).resolve_with(&CourseProfile::builtin());
            assert_eq!(config.input_path(), DEFAULT_INPUT);
            assert_eq!(config.output_path(), DEFAULT_OUTPUT_PATH);
            assert_eq!(config.output_formats(), &["json".to_string(), "csv".to_string()]);
            assert!(config.validate().is_ok());
        }

        #[test]
        fn test_command_line_wins_over_profile() {
            let mut profile = CourseProfile::builtin();
            profile.output = Some(super::super::course_profile::OutputConfig {
                output_path: Some("./from-profile".to_string()),
                output_formats: Some(vec!["csv".to_string()]),
            });

            let config = CliConfig::parse_from([
                "skins-etl",
                "--output-path",
                "./from-cli",
                "--output-formats",
                "json",
            ])
            .resolve_with(&profile);
            assert_eq!(config.output_path(), "./from-cli");
            assert_eq!(config.output_formats(), &["json".to_string()]);

            let config = CliConfig::parse_from(["skins-etl"]).resolve_with(&profile);
            assert_eq!(config.output_path(), "./from-profile");
            assert_eq!(config.output_formats(), &["csv".to_string()]);
        }

        #[test]
        fn test_policy_override() {
            let config = CliConfig::parse_from(["skins-etl", "--invalid-scores", "exclude"]);
            let profile = config.load_profile().unwrap();
            assert_eq!(profile.invalid_score_policy().unwrap(), InvalidScorePolicy::Exclude);
        }

        #[test]
        fn test_rejects_non_csv_input() {
            let config = CliConfig::parse_from(["skins-etl", "--input", "round.xlsx"])
                .resolve_with(&CourseProfile::builtin());
            assert!(config.validate().is_err());
        }
    }
}

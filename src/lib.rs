pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::config::{course_profile::CourseProfile, local::LocalStorage};
pub use crate::core::{
    pipeline::SkinsPipeline,
    runner::RoundRunner,
    scoring::{run_skins_analysis, ScoringEngine},
    strokes::strokes_received,
};
pub use crate::domain::model::{
    AnalysisResult, Cell, GrossScore, HoleDifficultyTable, HoleResult, InvalidScorePolicy,
    NetScore, NetValue, Player, Row, SkinsSummary, HOLES, NO_WINNER,
};
pub use crate::utils::error::{Result, SkinsError};

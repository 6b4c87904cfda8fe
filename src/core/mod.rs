pub mod extract;
pub mod pipeline;
pub mod runner;
pub mod scoring;
pub mod strokes;
pub mod summary;

pub use crate::domain::model::{Row, SkinsReport};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;

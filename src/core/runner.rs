use crate::core::extract::is_player_row;
use crate::core::Pipeline;
use crate::utils::error::Result;

pub struct RoundRunner<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> RoundRunner<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("📥 Reading score sheet...");
        let rows = self.pipeline.extract().await?;
        tracing::info!("Read {} rows", rows.len());

        tracing::info!("⛳ Scoring round...");
        let report = self.pipeline.transform(rows).await?;
        tracing::info!(
            "Scored {} holes, {} skin(s) awarded",
            report.analysis.hole_results.len(),
            report.analysis.summary.total_skins()
        );

        tracing::info!("📤 Writing reports...");
        let output_path = self.pipeline.load(report).await?;
        tracing::info!("Reports saved to: {}", output_path);

        Ok(output_path)
    }

    /// Extract only: the number of rows that would be scored as players.
    pub async fn preview(&self) -> Result<usize> {
        let rows = self.pipeline.extract().await?;
        let players = rows.iter().filter(|row| is_player_row(row)).count();
        tracing::info!("🔍 {} rows, {} player rows", rows.len(), players);
        Ok(players)
    }
}

use crate::core::scoring::ScoringEngine;
use crate::core::{ConfigProvider, Pipeline, Row, SkinsReport, Storage};
use crate::domain::model::{AnalysisResult, Cell, SkinsSummary};
use crate::utils::error::{Result, SkinsError};

pub const JSON_REPORT: &str = "skins.json";
pub const HOLES_TABLE: &str = "holes.csv";
pub const WINNERS_TABLE: &str = "winners.csv";

pub struct SkinsPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    engine: ScoringEngine,
    course: String,
}

impl<S: Storage, C: ConfigProvider> SkinsPipeline<S, C> {
    pub fn new(storage: S, config: C, engine: ScoringEngine, course: impl Into<String>) -> Self {
        Self {
            storage,
            config,
            engine,
            course: course.into(),
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for SkinsPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<Row>> {
        tracing::debug!("Reading score sheet: {}", self.config.input_path());
        let data = self.storage.read_file(self.config.input_path()).await?;
        read_table(&data)
    }

    async fn transform(&self, rows: Vec<Row>) -> Result<SkinsReport> {
        tracing::debug!(
            "Scoring {} rows on '{}' (invalid scores: {})",
            rows.len(),
            self.course,
            self.engine.policy()
        );
        let analysis = self.engine.analyze(&rows)?;

        for winner in analysis.summary.winners() {
            tracing::info!("🏌️ {} won {} skin(s)", winner.name, winner.skins);
        }

        Ok(SkinsReport {
            course: self.course.clone(),
            generated_at: chrono::Utc::now(),
            holes_csv: render_holes_table(&analysis)?,
            winners_csv: render_winners_table(&analysis.summary)?,
            analysis,
        })
    }

    async fn load(&self, report: SkinsReport) -> Result<String> {
        let output_path = self.config.output_path();

        for format in self.config.output_formats() {
            match format.as_str() {
                "json" => {
                    let json_data = serde_json::to_vec_pretty(&report)?;
                    self.storage
                        .write_file(&format!("{}/{}", output_path, JSON_REPORT), &json_data)
                        .await?;
                }
                "csv" => {
                    self.storage
                        .write_file(
                            &format!("{}/{}", output_path, HOLES_TABLE),
                            report.holes_csv.as_bytes(),
                        )
                        .await?;
                    self.storage
                        .write_file(
                            &format!("{}/{}", output_path, WINNERS_TABLE),
                            report.winners_csv.as_bytes(),
                        )
                        .await?;
                }
                other => tracing::warn!("⚠️ Skipping unknown output format '{}'", other),
            }
        }

        Ok(output_path.to_string())
    }
}

/// Parses a score sheet. No header handling and ragged rows allowed; the engine sorts rows out.
pub fn read_table(data: &[u8]) -> Result<Vec<Row>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(data);

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(Cell::from_raw).collect());
    }
    Ok(rows)
}

/// One line per hole: rank, each player's net, winner and skin value.
pub fn render_holes_table(analysis: &AnalysisResult) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    let mut header = vec!["hole".to_string(), "difficulty".to_string()];
    header.extend(analysis.players.iter().map(|p| p.name.clone()));
    header.extend(["winner".to_string(), "skin".to_string()]);
    writer.write_record(&header)?;

    for hole in &analysis.hole_results {
        let mut record = vec![hole.hole_number.to_string(), hole.hole_difficulty.to_string()];
        record.extend(hole.net_scores.iter().map(|s| s.net.to_string()));
        record.extend([hole.winner_name.clone(), hole.skin_value.to_string()]);
        writer.write_record(&record)?;
    }

    finish(writer)
}

/// Only players who won at least one skin.
pub fn render_winners_table(summary: &SkinsSummary) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["player", "skins"])?;
    for winner in summary.winners() {
        let skins = winner.skins.to_string();
        writer.write_record([winner.name.as_str(), skins.as_str()])?;
    }
    finish(writer)
}

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<String> {
    let bytes = writer
        .into_inner()
        .map_err(|e| SkinsError::IoError(e.into_error()))?;
    String::from_utf8(bytes)
        .map_err(|e| SkinsError::IoError(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{HoleDifficultyTable, InvalidScorePolicy, NO_WINNER};
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    const SHEET: &str = "\
Player,HDCP,1,2,3,4,5,6,7,8,9
PAR,,4,4,3,5,4,4,3,4,5
Ann,0,4,4,3,5,4,4,3,4,5
Ben,4,4,5,3,5,4,4,3,4,5
";

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn with_file(path: &str, data: &[u8]) -> Self {
            let mut files = HashMap::new();
            files.insert(path.to_string(), data.to_vec());
            Self {
                files: Arc::new(Mutex::new(files)),
            }
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            self.files.lock().await.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            self.get_file(path).await.ok_or_else(|| {
                SkinsError::IoError(std::io::Error::new(std::io::ErrorKind::NotFound, path.to_string()))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            self.files.lock().await.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct MockConfig {
        formats: Vec<String>,
    }

    impl ConfigProvider for MockConfig {
        fn input_path(&self) -> &str {
            "round.csv"
        }

        fn output_path(&self) -> &str {
            "out"
        }

        fn output_formats(&self) -> &[String] {
            &self.formats
        }
    }

    fn pipeline(storage: MockStorage, formats: &[&str]) -> SkinsPipeline<MockStorage, MockConfig> {
        let engine = ScoringEngine::new(
            HoleDifficultyTable::new(&[7, 3, 9, 1, 5, 11, 15, 13, 17]).unwrap(),
            InvalidScorePolicy::Fail,
        );
        let config = MockConfig {
            formats: formats.iter().map(|f| f.to_string()).collect(),
        };
        SkinsPipeline::new(storage, config, engine, "Test Course")
    }

    #[test]
    fn test_read_table_keeps_ragged_rows() {
        let rows = read_table(b"a,b,c\n,\nAnn,3\n").unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1], vec![Cell::Empty, Cell::Empty]);
        assert_eq!(rows[2], vec![Cell::Text("Ann".to_string()), Cell::Text("3".to_string())]);
        assert_eq!(rows[2][1].as_f64(), Some(3.0));
    }

    #[tokio::test]
    async fn test_extract_and_transform() {
        let storage = MockStorage::with_file("round.csv", SHEET.as_bytes());
        let pipeline = pipeline(storage, &["json"]);

        let rows = pipeline.extract().await.unwrap();
        assert_eq!(rows.len(), 4);

        let report = pipeline.transform(rows).await.unwrap();
        assert_eq!(report.course, "Test Course");
        // Ben's stroke on the rank-1 fourth hole is his only edge
        assert_eq!(report.analysis.hole_results[3].winner(), Some("Ben"));
        // Ann wins hole 2 outright on gross
        assert_eq!(report.analysis.hole_results[1].winner(), Some("Ann"));
        assert_eq!(report.analysis.summary.total_skins(), 2);

        assert!(report.holes_csv.starts_with("hole,difficulty,Ann,Ben,winner,skin\n"));
        assert!(report.holes_csv.contains(&format!("1,7,4,4,{},0", NO_WINNER)));
        assert!(report.holes_csv.contains("4,1,5,4,Ben,1"));
        assert_eq!(report.winners_csv, "player,skins\nAnn,1\nBen,1\n");
    }

    #[tokio::test]
    async fn test_load_writes_requested_formats() {
        let storage = MockStorage::with_file("round.csv", SHEET.as_bytes());
        let pipeline = pipeline(storage.clone(), &["json", "csv"]);

        let rows = pipeline.extract().await.unwrap();
        let report = pipeline.transform(rows).await.unwrap();
        let output = pipeline.load(report).await.unwrap();
        assert_eq!(output, "out");

        let json = storage.get_file("out/skins.json").await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&json).unwrap();
        assert_eq!(value["course"], "Test Course");
        assert_eq!(value["analysis"]["hole_results"].as_array().unwrap().len(), 9);
        assert!(value.get("holes_csv").is_none());

        assert!(storage.get_file("out/holes.csv").await.is_some());
        assert!(storage.get_file("out/winners.csv").await.is_some());
    }

    #[tokio::test]
    async fn test_transform_error_stops_before_load() {
        let storage = MockStorage::with_file("round.csv", b"Player,HDCP\nPAR,,4\n");
        let pipeline = pipeline(storage.clone(), &["json"]);

        let rows = pipeline.extract().await.unwrap();
        let err = pipeline.transform(rows).await.unwrap_err();
        assert!(matches!(err, SkinsError::InputFormatError { .. }));
        assert!(storage.get_file("out/skins.json").await.is_none());
    }
}

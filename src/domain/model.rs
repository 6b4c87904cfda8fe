use crate::utils::error::{Result, SkinsError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Holes in a round. Only front- or back-nine stretches are scored.
pub const HOLES: usize = 9;

/// Winner name recorded on a hole nobody won outright.
pub const NO_WINNER: &str = "No Winner";

/// One raw value of the input table, as handed over by whatever parsed the sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Number(f64),
    Text(String),
    Empty,
}

pub type Row = Vec<Cell>;

impl Cell {
    /// Classifies a raw string cell. Blank becomes `Empty`; anything else keeps its
    /// trimmed spelling ("007" stays "007") and is read as a number through `as_f64`.
    pub fn from_raw(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(trimmed.to_string())
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            Cell::Number(_) => false,
        }
    }

    pub fn to_text(&self) -> String {
        match self {
            Cell::Number(n) => n.to_string(),
            Cell::Text(s) => s.trim().to_string(),
            Cell::Empty => String::new(),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(*n),
            Cell::Text(s) => s.trim().parse::<f64>().ok(),
            Cell::Empty => None,
        }
    }
}

impl From<&str> for Cell {
    fn from(raw: &str) -> Self {
        Cell::from_raw(raw)
    }
}

impl From<f64> for Cell {
    fn from(n: f64) -> Self {
        Cell::Number(n)
    }
}

impl From<i32> for Cell {
    fn from(n: i32) -> Self {
        Cell::Number(f64::from(n))
    }
}

/// Difficulty rank (1 = hardest) of each hole in play order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct HoleDifficultyTable([u8; HOLES]);

impl HoleDifficultyTable {
    pub fn new(ranks: &[u8]) -> Result<Self> {
        crate::utils::validation::validate_hole_difficulty("hole_difficulty", ranks)?;
        let mut table = [0u8; HOLES];
        table.copy_from_slice(ranks);
        Ok(Self(table))
    }

    pub fn rank(&self, hole_index: usize) -> u8 {
        self.0[hole_index]
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }
}

impl TryFrom<Vec<u8>> for HoleDifficultyTable {
    type Error = SkinsError;

    fn try_from(ranks: Vec<u8>) -> Result<Self> {
        Self::new(&ranks)
    }
}

impl From<HoleDifficultyTable> for Vec<u8> {
    fn from(table: HoleDifficultyTable) -> Self {
        table.0.to_vec()
    }
}

/// Where the name, handicap and nine score columns sit in a player row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnLayout {
    pub name_column: usize,
    pub handicap_column: usize,
    pub first_score_column: usize,
}

impl ColumnLayout {
    pub fn score_columns(&self) -> std::ops::Range<usize> {
        self.first_score_column..self.first_score_column + HOLES
    }
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self {
            name_column: 0,
            handicap_column: 1,
            first_score_column: 2,
        }
    }
}

/// How a gross score that is not an integer takes part in a hole's comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum InvalidScorePolicy {
    /// The player sits out the hole.
    Exclude,
    /// The player stays in but ranks behind every numeric net score.
    LoseTies,
    /// The whole analysis is rejected.
    Fail,
}

impl fmt::Display for InvalidScorePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InvalidScorePolicy::Exclude => "exclude",
            InvalidScorePolicy::LoseTies => "lose-ties",
            InvalidScorePolicy::Fail => "fail",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrossScore {
    Strokes(i32),
    /// Raw cell text that did not parse as a whole number of strokes.
    Invalid(String),
}

impl GrossScore {
    pub fn strokes(&self) -> Option<i32> {
        match self {
            GrossScore::Strokes(n) => Some(*n),
            GrossScore::Invalid(_) => None,
        }
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, GrossScore::Invalid(_))
    }
}

impl fmt::Display for GrossScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrossScore::Strokes(n) => write!(f, "{}", n),
            GrossScore::Invalid(raw) => write!(f, "{}?", raw),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub full_handicap: f64,
    pub scores: [GrossScore; HOLES],
}

impl Player {
    pub fn half_handicap(&self) -> f64 {
        self.full_handicap / 2.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NetValue {
    Strokes(i32),
    Excluded,
    Sentinel,
}

impl NetValue {
    pub fn strokes(&self) -> Option<i32> {
        match self {
            NetValue::Strokes(n) => Some(*n),
            NetValue::Excluded | NetValue::Sentinel => None,
        }
    }
}

impl fmt::Display for NetValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetValue::Strokes(n) => write!(f, "{}", n),
            NetValue::Excluded => f.write_str("-"),
            NetValue::Sentinel => f.write_str("X"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetScore {
    pub player: String,
    pub gross: GrossScore,
    pub strokes_received: u8,
    pub net: NetValue,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoleResult {
    pub hole_number: usize,
    pub hole_difficulty: u8,
    pub winner_name: String,
    pub skin_value: u8,
    pub net_scores: Vec<NetScore>,
}

impl HoleResult {
    pub fn winner(&self) -> Option<&str> {
        if self.skin_value == 1 {
            Some(&self.winner_name)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSkins {
    pub name: String,
    pub skins: u32,
}

/// Skins per player, in input order. Players without a skin are kept.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SkinsSummary {
    pub totals: Vec<PlayerSkins>,
}

impl SkinsSummary {
    pub fn winners(&self) -> impl Iterator<Item = &PlayerSkins> {
        self.totals.iter().filter(|p| p.skins > 0)
    }

    pub fn total_skins(&self) -> u32 {
        self.totals.iter().map(|p| p.skins).sum()
    }

    pub fn skins_for(&self, name: &str) -> Option<u32> {
        self.totals.iter().find(|p| p.name == name).map(|p| p.skins)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub players: Vec<Player>,
    pub hole_results: Vec<HoleResult>,
    pub summary: SkinsSummary,
}

/// What the transform phase hands to the load phase: the analysis plus its rendered tables.
#[derive(Debug, Clone, Serialize)]
pub struct SkinsReport {
    pub course: String,
    pub generated_at: chrono::DateTime<chrono::Utc>,
    pub analysis: AnalysisResult,
    #[serde(skip)]
    pub holes_csv: String,
    #[serde(skip)]
    pub winners_csv: String,
}

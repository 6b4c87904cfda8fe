use crate::config::course_profile::CourseProfile;
use crate::core::extract::extract_players;
use crate::core::strokes::strokes_received;
use crate::core::summary::summarize;
use crate::domain::model::{
    AnalysisResult, ColumnLayout, GrossScore, HoleDifficultyTable, HoleResult, InvalidScorePolicy, NetScore,
    NetValue, Player, Row, SkinsSummary, HOLES, NO_WINNER,
};
use crate::utils::error::{Result, SkinsError};

/// Scores a nine-hole skins game for one course.
///
/// Holds only configuration; every call works on the inputs it is given and nothing else,
/// so one engine can score any number of rounds, from any number of threads.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    hole_difficulty: HoleDifficultyTable,
    layout: ColumnLayout,
    policy: InvalidScorePolicy,
}

impl ScoringEngine {
    pub fn new(hole_difficulty: HoleDifficultyTable, policy: InvalidScorePolicy) -> Self {
        Self {
            hole_difficulty,
            layout: ColumnLayout::default(),
            policy,
        }
    }

    pub fn from_profile(profile: &CourseProfile) -> Result<Self> {
        Ok(Self::new(profile.hole_difficulty_table()?, profile.invalid_score_policy()?)
            .with_layout(profile.layout))
    }

    pub fn with_layout(mut self, layout: ColumnLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn policy(&self) -> InvalidScorePolicy {
        self.policy
    }

    pub fn hole_difficulty(&self) -> &HoleDifficultyTable {
        &self.hole_difficulty
    }

    /// Rows in, full analysis out. Fails before any hole is scored if the table is unusable.
    pub fn analyze(&self, rows: &[Row]) -> Result<AnalysisResult> {
        let players = extract_players(rows, &self.layout)?;
        let (hole_results, summary) = self.score(&players)?;
        Ok(AnalysisResult {
            players,
            hole_results,
            summary,
        })
    }

    pub fn score(&self, players: &[Player]) -> Result<(Vec<HoleResult>, SkinsSummary)> {
        if players.is_empty() {
            return Err(SkinsError::input_format("cannot score a round with no players"));
        }
        if self.policy == InvalidScorePolicy::Fail {
            reject_invalid_scores(players)?;
        }

        let hole_results: Vec<HoleResult> = (0..HOLES)
            .map(|hole_index| self.score_hole(hole_index, players))
            .collect();
        let summary = summarize(players, &hole_results);

        tracing::debug!(
            "Scored {} holes for {} players, {} skins awarded",
            hole_results.len(),
            players.len(),
            summary.total_skins()
        );
        Ok((hole_results, summary))
    }

    fn score_hole(&self, hole_index: usize, players: &[Player]) -> HoleResult {
        let difficulty = self.hole_difficulty.rank(hole_index);

        let net_scores: Vec<NetScore> = players
            .iter()
            .map(|player| {
                let strokes = strokes_received(player.half_handicap(), difficulty);
                let gross = player.scores[hole_index].clone();
                let net = match gross.strokes() {
                    Some(g) => NetValue::Strokes(g - i32::from(strokes)),
                    None if self.policy == InvalidScorePolicy::Exclude => NetValue::Excluded,
                    None => NetValue::Sentinel,
                };
                NetScore {
                    player: player.name.clone(),
                    gross,
                    strokes_received: strokes,
                    net,
                }
            })
            .collect();

        let winner = sole_lowest(&net_scores).map(str::to_string);
        tracing::debug!(
            "Hole {} (rank {}): {}",
            hole_index + 1,
            difficulty,
            winner.as_deref().unwrap_or(NO_WINNER)
        );

        HoleResult {
            hole_number: hole_index + 1,
            hole_difficulty: difficulty,
            skin_value: u8::from(winner.is_some()),
            winner_name: winner.unwrap_or_else(|| NO_WINNER.to_string()),
            net_scores,
        }
    }
}

/// The player holding the lowest numeric net alone, if any.
/// Excluded and sentinel nets never hold the minimum.
fn sole_lowest(net_scores: &[NetScore]) -> Option<&str> {
    let lowest = net_scores.iter().filter_map(|s| s.net.strokes()).min()?;
    let mut at_lowest = net_scores
        .iter()
        .filter(|s| s.net.strokes() == Some(lowest));
    let first = at_lowest.next()?;
    match at_lowest.next() {
        Some(_) => None,
        None => Some(&first.player),
    }
}

fn reject_invalid_scores(players: &[Player]) -> Result<()> {
    for player in players {
        for (hole_index, score) in player.scores.iter().enumerate() {
            if let GrossScore::Invalid(raw) = score {
                return Err(SkinsError::InvalidScoreError {
                    player: player.name.clone(),
                    hole: hole_index + 1,
                    value: raw.clone(),
                });
            }
        }
    }
    Ok(())
}

/// Function-call entry point: raw rows plus a nine-entry difficulty ranking.
pub fn run_skins_analysis(
    rows: &[Row],
    hole_difficulty: &[u8],
    policy: InvalidScorePolicy,
) -> Result<AnalysisResult> {
    let table = HoleDifficultyTable::new(hole_difficulty)?;
    ScoringEngine::new(table, policy).analyze(rows)
}

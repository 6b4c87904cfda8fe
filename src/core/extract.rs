use crate::domain::model::{Cell, ColumnLayout, GrossScore, Player, Row, HOLES, NO_WINNER};
use crate::utils::error::{Result, SkinsError};
use std::collections::HashSet;

/// First-cell values of header rows.
pub const RESERVED_HEADER_TOKENS: [&str; 3] = ["Player", "HDCP", "PAR"];

/// Third-cell marker of the course metadata row.
pub const METADATA_MARKER: &str = "Pars";

pub fn is_player_row(row: &[Cell]) -> bool {
    let first = match row.first() {
        Some(cell) if !cell.is_empty() => cell.to_text(),
        _ => return false,
    };
    if RESERVED_HEADER_TOKENS.contains(&first.as_str()) {
        return false;
    }
    !row
        .get(2)
        .is_some_and(|cell| cell.to_text().contains(METADATA_MARKER))
}

/// Lenient: anything that is not a non-negative number counts as scratch.
pub fn parse_handicap(player: &str, cell: Option<&Cell>) -> f64 {
    match cell.and_then(Cell::as_f64) {
        Some(h) if h.is_finite() && h >= 0.0 => h,
        Some(h) => {
            tracing::warn!("⚠️ Handicap {} for {} is out of range, using 0", h, player);
            0.0
        }
        None => {
            tracing::debug!("No numeric handicap for {}, using 0", player);
            0.0
        }
    }
}

/// Strict: a gross score is a positive whole number, anything else is kept as `Invalid`.
pub fn parse_score(cell: &Cell) -> GrossScore {
    // 文字與數字儲存格走同一條判斷，"5.0" 與 5.0 視為相同
    let strokes = cell
        .as_f64()
        .filter(|n| n.fract() == 0.0 && *n >= 1.0 && *n <= f64::from(i32::MAX))
        .map(|n| n as i32);
    match strokes {
        Some(n) => GrossScore::Strokes(n),
        None => GrossScore::Invalid(cell.to_text()),
    }
}

/// Pulls the player rows out of a raw table, in table order.
pub fn extract_players(rows: &[Row], layout: &ColumnLayout) -> Result<Vec<Player>> {
    let required_width = layout.score_columns().end;
    let mut seen = HashSet::new();
    let mut players = Vec::new();

    for (row_index, row) in rows.iter().enumerate() {
        if !is_player_row(row) {
            continue;
        }

        let name = row
            .get(layout.name_column)
            .map(Cell::to_text)
            .unwrap_or_default();
        if name.is_empty() {
            return Err(SkinsError::input_format(format!(
                "row {} has no player name in column {}",
                row_index + 1,
                layout.name_column
            )));
        }
        if name == NO_WINNER {
            return Err(SkinsError::input_format(format!(
                "row {}: '{}' is reserved and cannot be used as a player name",
                row_index + 1,
                NO_WINNER
            )));
        }
        if row.len() < required_width {
            return Err(SkinsError::input_format(format!(
                "row {} ({}) has {} columns, expected at least {} for {} hole scores",
                row_index + 1,
                name,
                row.len(),
                required_width,
                HOLES
            )));
        }
        if !seen.insert(name.clone()) {
            return Err(SkinsError::input_format(format!(
                "player '{}' appears more than once (row {})",
                name,
                row_index + 1
            )));
        }

        let full_handicap = parse_handicap(&name, row.get(layout.handicap_column));
        let scores: [GrossScore; HOLES] =
            std::array::from_fn(|hole| parse_score(&row[layout.first_score_column + hole]));

        let invalid = scores.iter().filter(|s| s.is_invalid()).count();
        if invalid > 0 {
            tracing::warn!("⚠️ {} has {} unparsable hole score(s)", name, invalid);
        }

        players.push(Player {
            name,
            full_handicap,
            scores,
        });
    }

    if players.is_empty() {
        return Err(SkinsError::input_format(
            "no player rows found in the score table",
        ));
    }

    tracing::debug!("Extracted {} players from {} rows", players.len(), rows.len());
    Ok(players)
}

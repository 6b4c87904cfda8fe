use crate::domain::model::{HoleResult, Player, PlayerSkins, SkinsSummary};

/// Totals skins per player, keeping input order.
pub fn summarize(players: &[Player], hole_results: &[HoleResult]) -> SkinsSummary {
    let totals = players
        .iter()
        .map(|player| PlayerSkins {
            name: player.name.clone(),
            skins: hole_results
                .iter()
                .filter(|hole| hole.winner_name == player.name)
                .map(|hole| u32::from(hole.skin_value))
                .sum(),
        })
        .collect();

    SkinsSummary { totals }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{GrossScore, NO_WINNER};

    fn player(name: &str) -> Player {
        Player {
            name: name.to_string(),
            full_handicap: 0.0,
            scores: std::array::from_fn(|_| GrossScore::Strokes(4)),
        }
    }

    fn hole(number: usize, winner: Option<&str>) -> HoleResult {
        HoleResult {
            hole_number: number,
            hole_difficulty: number as u8,
            winner_name: winner.unwrap_or(NO_WINNER).to_string(),
            skin_value: u8::from(winner.is_some()),
            net_scores: Vec::new(),
        }
    }

    #[test]
    fn test_totals_keep_input_order() {
        let players = vec![player("Zed"), player("Amy"), player("Moe")];
        let holes = vec![
            hole(1, Some("Amy")),
            hole(2, None),
            hole(3, Some("Zed")),
            hole(4, Some("Amy")),
        ];

        let summary = summarize(&players, &holes);
        let names: Vec<_> = summary.totals.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Zed", "Amy", "Moe"]);
        assert_eq!(summary.skins_for("Amy"), Some(2));
        assert_eq!(summary.skins_for("Zed"), Some(1));
        assert_eq!(summary.skins_for("Moe"), Some(0));
        assert_eq!(summary.winners().count(), 2);
        assert_eq!(summary.total_skins(), 3);
    }
}

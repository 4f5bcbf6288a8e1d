use chrono::{DateTime, Utc};
use inkgrid_engine::GameSummary;
use serde::{Deserialize, Serialize};

pub const HIGH_SCORE_KEY: &str = "inkgrid_highscore_8x8";
pub const STATS_KEY: &str = "inkgrid_game_stats";
pub const THEME_KEY: &str = "inkgrid_color_theme";

/// Totals across every finished game.
///
/// Missing fields in stored records default to zero, so records written by
/// older builds still load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LifetimeStats {
    pub games_played: usize,
    pub total_score: usize,
    pub high_score: usize,
    pub total_lines_cleared: usize,
    pub longest_streak: usize,
    pub total_blocks_placed: usize,
    pub best_combo: usize,
    pub last_played: Option<DateTime<Utc>>,
}

impl LifetimeStats {
    /// Folds a finished game into the totals.
    pub fn record_game(&mut self, summary: &GameSummary, finished_at: DateTime<Utc>) {
        self.games_played += 1;
        self.total_score += summary.score;
        self.high_score = self.high_score.max(summary.score);
        self.total_lines_cleared += summary.lines_cleared;
        self.total_blocks_placed += summary.blocks_placed;
        self.longest_streak = self.longest_streak.max(summary.best_streak);
        self.best_combo = self.best_combo.max(summary.best_combo);
        self.last_played = Some(finished_at);
    }

    /// Mean score per game, rounded down. Zero before the first game.
    #[must_use]
    pub fn average_score(&self) -> usize {
        self.total_score.checked_div(self.games_played).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone as _;

    use super::*;

    fn summary(score: usize, best_combo: usize, best_streak: usize) -> GameSummary {
        GameSummary {
            score,
            lines_cleared: score / 100,
            blocks_placed: 20,
            best_combo,
            best_streak,
        }
    }

    #[test]
    fn test_record_game() {
        let mut stats = LifetimeStats::default();
        assert_eq!(stats.average_score(), 0);

        let t1 = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        stats.record_game(&summary(1500, 3, 1), t1);
        let t2 = Utc.with_ymd_and_hms(2026, 1, 3, 3, 4, 5).unwrap();
        stats.record_game(&summary(500, 1, 4), t2);

        assert_eq!(stats.games_played, 2);
        assert_eq!(stats.total_score, 2000);
        assert_eq!(stats.high_score, 1500);
        assert_eq!(stats.total_lines_cleared, 20);
        assert_eq!(stats.total_blocks_placed, 40);
        assert_eq!(stats.best_combo, 3);
        assert_eq!(stats.longest_streak, 4);
        assert_eq!(stats.last_played, Some(t2));
        assert_eq!(stats.average_score(), 1000);
    }

    #[test]
    fn test_partial_record_loads_with_defaults() {
        let stats: LifetimeStats =
            serde_json::from_str(r#"{"gamesPlayed":3,"bestCombo":2}"#).unwrap();
        assert_eq!(stats.games_played, 3);
        assert_eq!(stats.best_combo, 2);
        assert_eq!(stats.total_score, 0);
        assert_eq!(stats.last_played, None);
    }
}

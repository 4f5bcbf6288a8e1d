use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::records::LifetimeStats;

pub const ACHIEVEMENTS_KEY: &str = "inkgrid_achievements";

/// Threshold on one lifetime statistic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    GamesPlayed(usize),
    HighScore(usize),
    LinesCleared(usize),
    BestCombo(usize),
    LongestStreak(usize),
    BlocksPlaced(usize),
}

impl Requirement {
    #[must_use]
    pub fn is_met(self, stats: &LifetimeStats) -> bool {
        match self {
            Self::GamesPlayed(n) => stats.games_played >= n,
            Self::HighScore(n) => stats.high_score >= n,
            Self::LinesCleared(n) => stats.total_lines_cleared >= n,
            Self::BestCombo(n) => stats.best_combo >= n,
            Self::LongestStreak(n) => stats.longest_streak >= n,
            Self::BlocksPlaced(n) => stats.total_blocks_placed >= n,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Achievement {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub requirement: Requirement,
}

const fn achievement(
    id: &'static str,
    name: &'static str,
    description: &'static str,
    requirement: Requirement,
) -> Achievement {
    Achievement {
        id,
        name,
        description,
        requirement,
    }
}

pub const ACHIEVEMENTS: [Achievement; 12] = {
    use Requirement::{
        BestCombo, BlocksPlaced, GamesPlayed, HighScore, LinesCleared, LongestStreak,
    };
    [
        achievement(
            "first_scroll",
            "First Scroll",
            "Complete your first game",
            GamesPlayed(1),
        ),
        achievement(
            "ink_apprentice",
            "Ink Apprentice",
            "Score 1,000 points in a single game",
            HighScore(1000),
        ),
        achievement(
            "scribe_journeyman",
            "Scribe Journeyman",
            "Score 3,000 points in a single game",
            HighScore(3000),
        ),
        achievement(
            "master_calligrapher",
            "Master Calligrapher",
            "Score 5,000 points in a single game",
            HighScore(5000),
        ),
        achievement(
            "line_purger",
            "Line Purger",
            "Clear 50 total lines",
            LinesCleared(50),
        ),
        achievement(
            "ink_master",
            "Ink Master",
            "Clear 200 total lines",
            LinesCleared(200),
        ),
        achievement(
            "combo_initiate",
            "Combo Initiate",
            "Get a 2x combo",
            BestCombo(2),
        ),
        achievement(
            "combo_master",
            "Combo Master",
            "Get a 5x combo",
            BestCombo(5),
        ),
        achievement(
            "streak_keeper",
            "Streak Keeper",
            "Maintain a 3x streak",
            LongestStreak(3),
        ),
        achievement(
            "dedicated_archivist",
            "Dedicated Archivist",
            "Play 10 games",
            GamesPlayed(10),
        ),
        achievement(
            "block_placer",
            "Block Placer",
            "Place 100 blocks",
            BlocksPlaced(100),
        ),
        achievement(
            "prolific_scribe",
            "Prolific Scribe",
            "Place 500 blocks",
            BlocksPlaced(500),
        ),
    ]
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Unlock {
    pub unlocked: bool,
    pub unlocked_at: Option<DateTime<Utc>>,
}

/// Unlock state of every achievement, keyed by achievement id.
///
/// Unlocks are never revoked. Ids that are not in [`ACHIEVEMENTS`] are kept
/// as they were loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AchievementSet {
    unlocks: BTreeMap<String, Unlock>,
}

impl AchievementSet {
    #[must_use]
    pub fn is_unlocked(&self, id: &str) -> bool {
        self.unlocks.get(id).is_some_and(|u| u.unlocked)
    }

    #[must_use]
    pub fn unlocked_at(&self, id: &str) -> Option<DateTime<Utc>> {
        self.unlocks.get(id).and_then(|u| u.unlocked_at)
    }

    /// Number of unlocked achievements from [`ACHIEVEMENTS`].
    #[must_use]
    pub fn unlocked_count(&self) -> usize {
        ACHIEVEMENTS
            .iter()
            .filter(|a| self.is_unlocked(a.id))
            .count()
    }

    /// Unlocks every achievement whose requirement `stats` now meets.
    ///
    /// Returns the newly unlocked achievements.
    pub fn check(
        &mut self,
        stats: &LifetimeStats,
        now: DateTime<Utc>,
    ) -> Vec<&'static Achievement> {
        let mut newly = Vec::new();
        for achievement in &ACHIEVEMENTS {
            if self.is_unlocked(achievement.id) || !achievement.requirement.is_met(stats) {
                continue;
            }
            self.unlocks.insert(
                achievement.id.to_owned(),
                Unlock {
                    unlocked: true,
                    unlocked_at: Some(now),
                },
            );
            newly.push(achievement);
        }
        newly
    }
}

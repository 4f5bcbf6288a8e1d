use std::{
    io::{self, Write as _},
    path::Path,
};

use anyhow::Context;
use inkgrid_store::{ACHIEVEMENTS, FileStore, GameStore};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct StatsArg {
    /// Print the records as JSON
    #[clap(long)]
    json: bool,
}

pub(crate) fn run(arg: &StatsArg, data_dir: &Path) -> anyhow::Result<()> {
    let store = GameStore::new(FileStore::new(data_dir));
    let stats = store.lifetime_stats();
    let achievements = store.achievements();
    let high_score = store.high_score();

    let mut out = io::stdout().lock();
    if arg.json {
        let value = serde_json::json!({
            "highScore": high_score,
            "stats": stats,
            "achievements": achievements,
        });
        serde_json::to_writer_pretty(&mut out, &value).context("Failed to write JSON")?;
        writeln!(out)?;
        return Ok(());
    }

    writeln!(out, "High score:          {high_score}")?;
    writeln!(out, "Games played:        {}", stats.games_played)?;
    writeln!(out, "Average score:       {}", stats.average_score())?;
    writeln!(out, "Lines cleared:       {}", stats.total_lines_cleared)?;
    writeln!(out, "Blocks placed:       {}", stats.total_blocks_placed)?;
    writeln!(out, "Best combo:          {}", stats.best_combo)?;
    writeln!(out, "Longest streak:      {}", stats.longest_streak)?;
    match stats.last_played {
        Some(at) => {
            let at = at.format("%Y-%m-%d %H:%M UTC");
            writeln!(out, "Last played:         {at}")?;
        }
        None => writeln!(out, "Last played:         never")?,
    }
    writeln!(out)?;
    writeln!(
        out,
        "Achievements ({}/{}):",
        achievements.unlocked_count(),
        ACHIEVEMENTS.len()
    )?;
    for achievement in &ACHIEVEMENTS {
        let mark = if achievements.is_unlocked(achievement.id) {
            'x'
        } else {
            ' '
        };
        writeln!(
            out,
            "  [{mark}] {:<22} {}",
            achievement.name, achievement.description
        )?;
    }
    Ok(())
}

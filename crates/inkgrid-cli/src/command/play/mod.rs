use std::path::Path;

use anyhow::Context as _;
use inkgrid_engine::{GameConfig, GameSession, HookedSession, ShapeSeed, Theme};
use inkgrid_store::{FileStore, GameStore};
use rand::Rng as _;

use crate::{command::play::app::PlayApp, tui::Tui};

mod app;
mod screens;

/// A game session that persists itself through a [`GameStore`].
pub(crate) type Session<S> = HookedSession<GameStore<S>>;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Colour theme id (see `inkgrid themes`). Defaults to the saved preference
    #[clap(long)]
    theme: Option<String>,
    /// Seed for the shape generator as 32 hex digits. Random when omitted
    #[clap(long)]
    seed: Option<ShapeSeed>,
    /// Skip the home screen and start a new game
    #[clap(long)]
    new: bool,
}

pub(crate) fn run(arg: &PlayArg, data_dir: &Path) -> anyhow::Result<()> {
    let PlayArg { theme, seed, new } = arg;

    let mut store = GameStore::new(FileStore::new(data_dir));
    let theme = match theme {
        Some(id) => {
            let theme = Theme::find(id)
                .with_context(|| format!("Unknown theme: {id} (try `inkgrid themes`)"))?;
            store.save_theme(theme);
            theme
        }
        None => store.theme(),
    };
    let seed = seed.unwrap_or_else(|| rand::rng().random());
    log::info!("shape seed: {seed}");

    let config = GameConfig {
        theme,
        seed: Some(seed),
        ..GameConfig::default()
    };
    let mut session = GameSession::new(config);
    session.set_high_score(store.high_score());
    let session = HookedSession::new(session, store);

    let mut app = PlayApp::new(session, *new);
    Tui::new().run(&mut app)?;
    log::info!("exiting at score {}", app.session().score());
    Ok(())
}

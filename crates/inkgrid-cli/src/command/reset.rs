use std::path::Path;

use inkgrid_store::{FileStore, GameStore};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ResetArg {
    /// Also delete the high score, statistics, achievements and theme
    #[clap(long)]
    all: bool,
}

pub(crate) fn run(arg: &ResetArg, data_dir: &Path) {
    let mut store = GameStore::new(FileStore::new(data_dir));
    if arg.all {
        store.reset_all();
        println!("Removed every record in {}", data_dir.display());
    } else {
        store.clear_saved_game();
        println!("Removed the saved game");
    }
    log::info!("reset (all: {})", arg.all);
}

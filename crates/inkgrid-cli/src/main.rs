mod command;
mod logger;
mod tui;
mod ui;

fn main() -> anyhow::Result<()> {
    command::run()
}

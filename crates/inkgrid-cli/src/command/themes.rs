use inkgrid_engine::THEMES;

pub(crate) fn run() {
    for theme in &THEMES {
        let symbols = theme.symbols().iter().collect::<String>();
        println!("{:<10} {:<16} {symbols}", theme.id(), theme.name());
    }
}

use checkers_core::logic::board::Color;
use checkers_core::logic::game::Game;
use std::error::Error;
use std::io;
use tracing_subscriber::EnvFilter;

mod console;
mod settings;

use settings::MatchSettings;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let settings = match std::env::args().nth(1) {
        Some(path) => MatchSettings::load(&path)?,
        None => MatchSettings::default(),
    };
    tracing::info!(
        red = ?settings.red,
        white = ?settings.white,
        max_plies = settings.max_plies,
        "starting match"
    );

    let red = settings.red.build(Color::Red, &settings.engine);
    let white = settings.white.build(Color::White, &settings.engine);
    let mut game = Game::new(red, white);

    let stdin = io::stdin();
    let outcome = console::run(
        &mut game,
        settings.max_plies,
        &mut stdin.lock(),
        &mut io::stdout(),
    )?;
    tracing::info!(plies = game.state().plies, %outcome, "match finished");
    println!("{outcome}");
    Ok(())
}

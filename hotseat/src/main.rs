use std::io::{self, Write};

use clap::Parser;
use hotseat::{Cli, Game};
use log::info;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    if cli.plain {
        colored::control::set_override(false);
    }

    let mut game = Game::from_cli(&cli)?;

    // Print some metadata about the game
    let name = env!("CARGO_PKG_NAME");
    let version = env!("CARGO_PKG_VERSION");
    let authors = env!("CARGO_PKG_AUTHORS").replace(':', ", "); // Split multiple authors by comma-space
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{name} {version} by {authors}")?;
    writeln!(stdout, "Enter `help` for a list of commands.")?;

    let outcome = game.run(io::stdin().lock(), &mut stdout)?;
    info!("Game ended: {outcome}");

    Ok(())
}

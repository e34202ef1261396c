use std::path::PathBuf;

use clap::Parser;

/// Command-line options for a game of hotseat chess.
#[derive(Parser, Debug, Clone, Default, PartialEq, Eq)]
#[command(
    version,
    about = "Two players, one terminal, one chessboard.",
    long_about = None
)]
pub struct Cli {
    /// Draw the board as plain ASCII, without colors or piece glyphs
    #[arg(short, long)]
    pub plain: bool,

    /// Resume a game from a file written by the `save` command
    #[arg(short, long, value_name = "PATH")]
    pub resume: Option<PathBuf>,

    /// Keep earlier output on screen instead of clearing it before each turn
    #[arg(long)]
    pub no_clear: bool,
}

/// Listing of every command a player may enter, shown by `help`.
pub const HELP: &str = "\
commands:
    <from> to <to>        move a piece, e.g. `e2 to e4` (also `e2 e4` or `e2e4`)
    castle [to] <side>    castle `kingside` (`short`, `o-o`) or `queenside` (`long`, `o-o-o`)
    moves <square>        list the legal destinations of the piece on <square>
    show                  redraw the board
    save <path>           write the game so far to <path> and quit
    concede               resign the game
    help                  show this message
    exit                  leave without saving (also `quit`, `abort`)";

/// First line of every saved game. Lines starting with `#` are skipped on resume.
pub const SAVE_HEADER: &str = "# hotseat saved game: one move per line, White first";

/// ANSI escape sequence that clears the terminal and homes the cursor.
pub const CLEAR_SCREEN: &str = "\x1B[2J\x1B[1;1H";

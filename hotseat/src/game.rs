use std::{
    fmt, fs,
    io::{BufRead, Write},
    path::{Path, PathBuf},
    str::FromStr,
};

use anyhow::{bail, Context, Result};
use hotseat_rules::{Board, CastleSide, Color, Square};
use log::{error, info, warn};

use super::{render, Cli, CLEAR_SCREEN, HELP, SAVE_HEADER};

/// A command entered by the player to move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameCommand {
    /// Move the piece on `from` to `to`.
    Move { from: Square, to: Square },

    /// Castle toward the given side.
    Castle(CastleSide),

    /// List the legal destinations of the piece on a square.
    Moves(Square),

    /// Redraw the board.
    Show,

    /// Display the list of available commands.
    Help,

    /// Write the game so far to a file and stop playing.
    Save(PathBuf),

    /// Resign, handing the win to the opponent.
    Concede,

    /// Stop playing without saving.
    Exit,
}

impl GameCommand {
    /// Returns `true` if this command changes the board and passes the turn.
    pub const fn is_move(&self) -> bool {
        matches!(self, Self::Move { .. } | Self::Castle(_))
    }

    /// Parses the `moves` command
    fn parse_moves_command(rest: &str) -> Result<Self> {
        let mut args = rest.split_ascii_whitespace();

        let (Some(square), None) = (args.next(), args.next()) else {
            bail!("usage: moves <square>");
        };

        Ok(Self::Moves(square.parse()?))
    }

    /// Parses the `castle` command, in either the form `castle kingside` or `castle to kingside`.
    fn parse_castle_command(rest: &str) -> Result<Self> {
        let mut args = rest.split_ascii_whitespace();
        let side = match args.next() {
            Some(word) if word.eq_ignore_ascii_case("to") => args.next(),
            word => word,
        };

        let (Some(side), None) = (side, args.next()) else {
            bail!("usage: castle [to] <kingside|queenside>");
        };

        Ok(Self::Castle(side.parse()?))
    }

    /// Parses the `save` command
    fn parse_save_command(rest: &str) -> Result<Self> {
        if rest.is_empty() {
            bail!("usage: save <path>");
        }

        Ok(Self::Save(PathBuf::from(rest)))
    }

    /// Parses a move in any of the forms `e2 to e4`, `e2 e4`, or `e2e4`.
    fn parse_move_command(input: &str) -> Result<Self> {
        let args = input.split_ascii_whitespace().collect::<Vec<_>>();

        let (from, to) = match args.as_slice() {
            [from, "to", to] | [from, to] => (*from, *to),
            [both] if both.len() == 4 && both.is_ascii() => both.split_at(2),
            _ => bail!("Unknown command {input:?}. Enter a move like `e2 to e4`, or `help`"),
        };

        let from = from
            .parse()
            .with_context(|| format!("Invalid source square in {input:?}"))?;
        let to = to
            .parse()
            .with_context(|| format!("Invalid destination square in {input:?}"))?;

        Ok(Self::Move { from, to })
    }
}

impl FromStr for GameCommand {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        let (cmd, rest) = match input.split_once(char::is_whitespace) {
            Some((cmd, rest)) => (cmd, rest.trim()),
            None => (input, ""),
        };

        match cmd.to_ascii_lowercase().as_str() {
            "" => bail!("No command given. Enter `help` for a list of commands"),
            "help" => Ok(Self::Help),
            "show" => Ok(Self::Show),
            "moves" => Self::parse_moves_command(rest),
            "castle" => Self::parse_castle_command(rest),
            "save" => Self::parse_save_command(rest),
            "concede" => Ok(Self::Concede),
            "exit" | "quit" | "abort" => Ok(Self::Exit),
            _ => Self::parse_move_command(&input.to_ascii_lowercase()),
        }
    }
}

impl fmt::Display for GameCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Move { from, to } => write!(f, "{from} to {to}"),
            Self::Castle(side) => write!(f, "castle {side}"),
            Self::Moves(square) => write!(f, "moves {square}"),
            Self::Show => write!(f, "show"),
            Self::Help => write!(f, "help"),
            Self::Save(path) => write!(f, "save {}", path.display()),
            Self::Concede => write!(f, "concede"),
            Self::Exit => write!(f, "exit"),
        }
    }
}

/// How a call to [`Game::run`] came to an end.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The loser was in check with no legal moves.
    Checkmate { winner: Color },

    /// The player to move had no legal moves, but was not in check.
    NoLegalMoves { player: Color },

    /// A player resigned.
    Conceded { winner: Color },

    /// The game was written to a file, to be resumed later.
    Saved(PathBuf),

    /// The players left, or input ran out.
    Abandoned,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Checkmate { winner } => write!(f, "{winner} wins by checkmate"),
            Self::NoLegalMoves { player } => write!(f, "{player} has no legal moves"),
            Self::Conceded { winner } => write!(f, "{winner} wins by concession"),
            Self::Saved(path) => write!(f, "saved to {}", path.display()),
            Self::Abandoned => write!(f, "abandoned"),
        }
    }
}

/// What to do after handling a single command.
enum Flow {
    /// Prompt the same player again.
    Prompt,

    /// Draw the board, then prompt.
    Redraw,

    /// Stop playing.
    Finish(Outcome),
}

/// A game between two players taking turns at the same terminal.
///
/// The game tracks whose turn it is and every move played so far, so that it may be saved and resumed.
#[derive(Clone, Debug, Default)]
pub struct Game {
    /// Current state of the pieces.
    board: Board,

    /// The player to move. White moves first.
    player: Color,

    /// Every accepted move and castle, in the order played.
    transcript: Vec<GameCommand>,

    /// Draw the board as plain ASCII.
    plain: bool,

    /// Clear the screen before drawing the board.
    clear: bool,
}

impl Game {
    /// Creates a new [`Game`] at the standard starting setup, with White to move.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new [`Game`] configured by the command-line options, resuming a saved game if one was given.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let mut game = Self::new().plain(cli.plain).clear(!cli.no_clear);

        if let Some(path) = &cli.resume {
            game.resume(path)?;
        }

        Ok(game)
    }

    /// Sets whether the board is drawn as plain ASCII.
    pub fn plain(mut self, plain: bool) -> Self {
        self.plain = plain;
        self
    }

    /// Sets whether the screen is cleared before the board is drawn.
    pub fn clear(mut self, clear: bool) -> Self {
        self.clear = clear;
        self
    }

    /// Fetches the current state of the board.
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Fetches the player whose turn it is.
    pub const fn player(&self) -> Color {
        self.player
    }

    /// Fetches every move played so far, in order.
    pub fn transcript(&self) -> &[GameCommand] {
        &self.transcript
    }

    /// Parses a line of player input into a [`GameCommand`].
    ///
    /// Commands are case-insensitive and tolerate extra whitespace.
    ///
    /// # Example
    /// ```
    /// # use hotseat::{Game, GameCommand};
    /// # use hotseat_rules::Square;
    /// let cmd = Game::parse_command("  E2   to e4 ").unwrap();
    /// assert_eq!(cmd, GameCommand::Move { from: Square::E2, to: Square::E4 });
    /// ```
    pub fn parse_command(input: &str) -> Result<GameCommand> {
        input.parse()
    }

    /// Plays a move or castle for the player to move, then passes the turn.
    ///
    /// If the command is rejected, neither the board nor the turn changes.
    pub fn play(&mut self, command: GameCommand) -> Result<()> {
        let player = self.player;

        match command {
            GameCommand::Move { from, to } => {
                if let Some(captured) = self.board.validate_and_move(from, to, player)? {
                    info!("{player} captured {} {} on {to}", captured.color(), captured.kind());
                }
            }
            GameCommand::Castle(side) => self.board.castle(player, side)?,
            _ => bail!("`{command}` is not a move"),
        }

        info!("{player} played {command}");
        self.transcript.push(command);
        self.player = player.opponent();

        Ok(())
    }

    /// Replays a saved transcript on top of the current game.
    ///
    /// Blank lines and lines beginning with `#` are ignored. Stops at the first line that is not a legal move.
    pub fn replay(&mut self, transcript: &str) -> Result<()> {
        for (i, line) in transcript.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let command = Self::parse_command(line)
                .with_context(|| format!("Failed to parse line {}: {line:?}", i + 1))?;

            if !command.is_move() {
                bail!("Line {} is not a move: {line:?}", i + 1);
            }

            self.play(command)
                .with_context(|| format!("Illegal move on line {}: {line:?}", i + 1))?;
        }

        Ok(())
    }

    /// Resumes a game saved to `path` by the `save` command.
    pub fn resume(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let transcript = fs::read_to_string(path)
            .with_context(|| format!("Failed to read saved game from {}", path.display()))?;

        self.replay(&transcript)
            .with_context(|| format!("Failed to resume saved game from {}", path.display()))?;

        info!(
            "Resumed {} moves from {}, {} to move",
            self.transcript.len(),
            path.display(),
            self.player
        );
        Ok(())
    }

    /// Writes every move played so far to `path`, in a form [`Game::resume`] accepts.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        let mut contents = String::from(SAVE_HEADER);
        contents.push('\n');
        for command in &self.transcript {
            contents += &format!("{command}\n");
        }

        fs::write(path, contents)
            .with_context(|| format!("Failed to save game to {}", path.display()))
    }

    /// Main entrypoint of the game.
    ///
    /// Reads one command per line from `input` and writes the board, prompts, and replies to `output`,
    /// until the game is decided, saved, or abandoned.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, output: &mut W) -> Result<Outcome> {
        let mut buffer = String::with_capacity(64);
        let mut redraw = true;

        loop {
            if self.board.is_checkmate(self.player) {
                self.draw(output)?;
                return self.finish(output);
            }

            if redraw {
                self.draw(output)?;
                if self.board.in_check(self.player) {
                    writeln!(output, "CHECK!")?;
                }
            }

            write!(output, "{}'s move: ", self.player)?;
            output.flush()?;

            // Clear the buffer, read input, and trim the trailing newline
            buffer.clear();
            let bytes = input
                .read_line(&mut buffer)
                .context("Failed to read a command")?;

            // For ctrl + d
            if 0 == bytes {
                warn!("Input closed before the game was decided");
                writeln!(output)?;
                return Ok(Outcome::Abandoned);
            }

            // Ignore empty lines
            if buffer.trim().is_empty() {
                redraw = false;
                continue;
            }

            let command = match Self::parse_command(&buffer) {
                Ok(command) => command,
                Err(err) => {
                    writeln!(output, "{err}")?;
                    redraw = false;
                    continue;
                }
            };

            match self.execute(command, output)? {
                Flow::Prompt => redraw = false,
                Flow::Redraw => redraw = true,
                Flow::Finish(outcome) => return Ok(outcome),
            }
        }
    }

    /// Carries out a single command from the player to move.
    fn execute<W: Write>(&mut self, command: GameCommand, output: &mut W) -> Result<Flow> {
        match command {
            GameCommand::Move { .. } | GameCommand::Castle(_) => match self.play(command) {
                Ok(()) => Ok(Flow::Redraw),
                Err(err) => {
                    writeln!(output, "{err}")?;
                    Ok(Flow::Prompt)
                }
            },
            GameCommand::Moves(square) => {
                self.moves(square, output)?;
                Ok(Flow::Prompt)
            }
            GameCommand::Show => Ok(Flow::Redraw),
            GameCommand::Help => {
                writeln!(output, "{HELP}")?;
                Ok(Flow::Prompt)
            }
            GameCommand::Save(path) => match self.save(&path) {
                Ok(()) => {
                    writeln!(output, "Game saved to {}", path.display())?;
                    info!("Saved {} moves to {}", self.transcript.len(), path.display());
                    Ok(Flow::Finish(Outcome::Saved(path)))
                }
                Err(err) => {
                    error!("{err:#}");
                    writeln!(output, "{err:#}")?;
                    Ok(Flow::Prompt)
                }
            },
            GameCommand::Concede => {
                let winner = self.player.opponent();
                writeln!(output, "{} concedes. {winner} wins!", self.player)?;
                Ok(Flow::Finish(Outcome::Conceded { winner }))
            }
            GameCommand::Exit => Ok(Flow::Finish(Outcome::Abandoned)),
        }
    }

    /// Executes the `moves` command, listing every legal destination of the piece on `square`.
    fn moves<W: Write>(&self, square: Square, output: &mut W) -> Result<()> {
        let Some(piece) = self.board.occupant_at(square) else {
            writeln!(output, "No piece at {square}")?;
            return Ok(());
        };

        let moves = self.board.legal_moves_from(square);
        if moves.is_empty() {
            writeln!(output, "The {} {} on {square} has no legal moves", piece.color(), piece.kind())?;
            return Ok(());
        }

        let moves = moves
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(output, "{square}: {moves}")?;

        Ok(())
    }

    /// Announces the end of a game in which the player to move has no legal moves.
    fn finish<W: Write>(&self, output: &mut W) -> Result<Outcome> {
        let outcome = if self.board.in_check(self.player) {
            let winner = self.player.opponent();
            writeln!(output, "CHECKMATE! {winner} wins!")?;
            Outcome::Checkmate { winner }
        } else {
            writeln!(output, "No legal moves for {}. Game over.", self.player)?;
            Outcome::NoLegalMoves {
                player: self.player,
            }
        };

        info!("Game over: {outcome}");
        Ok(outcome)
    }

    /// Draws the board, clearing the screen first if configured to.
    fn draw<W: Write>(&self, output: &mut W) -> Result<()> {
        if self.clear && !self.plain {
            write!(output, "{CLEAR_SCREEN}")?;
        }

        writeln!(output, "{}", render(&self.board, self.plain))?;
        Ok(())
    }
}

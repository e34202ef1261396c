//! A game of chess for two players sharing one terminal.
//!
//! The rules themselves live in [`hotseat_rules`]; this crate reads commands such as `e2 to e4`,
//! alternates turns, draws the board, and saves or resumes games.

/// Command-line options and fixed text.
pub mod config;
/// Terminal rendering of the board.
pub mod display;
/// The turn loop and its commands.
pub mod game;

pub use config::*;
pub use display::*;
pub use game::*;

/// Re-exports all the things you'll need.
pub mod prelude {
    pub use crate::config::*;
    pub use crate::display::*;
    pub use crate::game::*;
    pub use hotseat_rules::prelude::*;
}

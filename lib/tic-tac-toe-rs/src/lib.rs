//! A Tic-Tac-Toe engine.
//!
//! Tiles are indexed 0 to 8, row-major, starting at the top left.

mod board;
pub mod strategy;
mod team;

pub use self::{
    board::{
        Board,
        EmptyTilesIter,
        GameStatus,
        MoveError,
        ParseBoardError,
        WinType,
        WinnerInfo,
    },
    strategy::{
        best_move,
        greedy_move,
        minimax,
        random_move,
        winning_move,
        Difficulty,
        ParseDifficultyError,
    },
    team::{
        InvalidCharError,
        InvalidStrError,
        Team,
    },
};

/// The # of tic-tac-toe tiles
pub const NUM_TILES: u8 = 9;

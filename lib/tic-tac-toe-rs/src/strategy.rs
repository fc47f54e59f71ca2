use crate::{
    Board,
    Team,
};
use rand::{
    seq::IteratorRandom,
    Rng,
};

/// The score of a win on the first simulated ply.
///
/// Every ply deeper costs a point, so faster wins and slower losses score better.
const WIN_SCORE: i8 = 10;

/// Failed to parse a [`Difficulty`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not a difficulty, expected 'easy', 'medium' or 'hard'")]
pub struct ParseDifficultyError(pub String);

/// How hard the computer plays
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Difficulty {
    /// Picks a random empty tile
    #[default]
    Easy,

    /// Takes a win if one is available, otherwise picks a random empty tile.
    ///
    /// This never blocks the opponent.
    Medium,

    /// Plays perfectly using minimax
    Hard,
}

impl Difficulty {
    /// Get the name of this difficulty
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }

    /// Choose a move for `team` with the policy of this difficulty.
    ///
    /// Returns `None` if the board has no empty tiles.
    pub fn choose_move<R>(self, board: Board, team: Team, rng: &mut R) -> Option<u8>
    where
        R: Rng + ?Sized,
    {
        match self {
            Self::Easy => random_move(board, rng),
            Self::Medium => greedy_move(board, team, rng),
            Self::Hard => best_move(board, team),
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [Self::Easy, Self::Medium, Self::Hard]
            .into_iter()
            .find(|difficulty| difficulty.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseDifficultyError(s.to_string()))
    }
}

/// Pick a uniformly random empty tile.
pub fn random_move<R>(board: Board, rng: &mut R) -> Option<u8>
where
    R: Rng + ?Sized,
{
    board.iter_empty().choose(rng)
}

/// Get the lowest empty tile that wins the game for `team` right away.
pub fn winning_move(board: Board, team: Team) -> Option<u8> {
    board
        .iter_empty()
        .find(|index| board.set(*index, Some(team)).has_won(team))
}

/// Take an immediate win if there is one, otherwise play randomly.
///
/// Threats from the opponent are ignored.
pub fn greedy_move<R>(board: Board, team: Team, rng: &mut R) -> Option<u8>
where
    R: Rng + ?Sized,
{
    winning_move(board, team).or_else(|| random_move(board, rng))
}

/// Score a board for `computer` by searching the whole game tree.
///
/// `depth` is the number of plies already simulated.
/// If `maximizing` is true, it is the computer's turn to move.
pub fn minimax(board: Board, depth: i8, maximizing: bool, computer: Team) -> i8 {
    let opponent = computer.inverse();

    if board.has_won(computer) {
        return WIN_SCORE - depth;
    }

    if board.has_won(opponent) {
        return depth - WIN_SCORE;
    }

    if board.is_full() {
        return 0;
    }

    let team = if maximizing { computer } else { opponent };
    let scores = board
        .iter_empty()
        .map(|index| minimax(board.set(index, Some(team)), depth + 1, !maximizing, computer));

    let score = if maximizing {
        scores.max()
    } else {
        scores.min()
    };

    score.unwrap_or(0)
}

/// Get the optimal move for `computer`.
///
/// Ties go to the lowest index.
pub fn best_move(board: Board, computer: Team) -> Option<u8> {
    let mut best: Option<(u8, i8)> = None;

    for index in board.iter_empty() {
        let score = minimax(board.set(index, Some(computer)), 0, false, computer);
        if best.map_or(true, |(_, best_score)| score > best_score) {
            best = Some((index, score));
        }
    }

    best.map(|(index, _)| index)
}

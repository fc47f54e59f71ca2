use crate::{
    Team,
    NUM_TILES,
};

// Bit `i` of a team's state is tile `i`,
// so the top row is stored in the lowest 3 bits.
//
// Allow unusual_byte_groupings as we group by 3 to visualize the board
// Horizontal Wins
#[allow(clippy::unusual_byte_groupings)]
const HORIZONTAL_WIN_1: u16 = 0b000_000_111;
#[allow(clippy::unusual_byte_groupings)]
const HORIZONTAL_WIN_2: u16 = 0b000_111_000;
#[allow(clippy::unusual_byte_groupings)]
const HORIZONTAL_WIN_3: u16 = 0b111_000_000;

// Vertical Wins
#[allow(clippy::unusual_byte_groupings)]
const VERTICAL_WIN_1: u16 = 0b001_001_001;
#[allow(clippy::unusual_byte_groupings)]
const VERTICAL_WIN_2: u16 = 0b010_010_010;
#[allow(clippy::unusual_byte_groupings)]
const VERTICAL_WIN_3: u16 = 0b100_100_100;

// Diagonal win
#[allow(clippy::unusual_byte_groupings)]
const DIAGONAL_WIN: u16 = 0b100_010_001;

// Anti-Diagonal win
#[allow(clippy::unusual_byte_groupings)]
const ANTI_DIAGONAL_WIN: u16 = 0b001_010_100;

/// All tiles set
const FULL_STATE: u16 = (1 << NUM_TILES) - 1;

/// The winning lines, in the order they are checked.
///
/// Rows top to bottom, then columns left to right, then the two diagonals.
const WIN_LINES: [(u16, [u8; 3], WinType); 8] = [
    (HORIZONTAL_WIN_1, [0, 1, 2], WinType::Horizontal),
    (HORIZONTAL_WIN_2, [3, 4, 5], WinType::Horizontal),
    (HORIZONTAL_WIN_3, [6, 7, 8], WinType::Horizontal),
    (VERTICAL_WIN_1, [0, 3, 6], WinType::Vertical),
    (VERTICAL_WIN_2, [1, 4, 7], WinType::Vertical),
    (VERTICAL_WIN_3, [2, 5, 8], WinType::Vertical),
    (DIAGONAL_WIN, [0, 4, 8], WinType::Diagonal),
    (ANTI_DIAGONAL_WIN, [2, 4, 6], WinType::AntiDiagonal),
];

/// The win type
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum WinType {
    Horizontal,
    Vertical,
    Diagonal,
    AntiDiagonal,
}

/// Winner Info
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct WinnerInfo {
    /// The winning team
    pub team: Team,

    /// The tile_indexes that are part of the win.
    ///
    /// Sorted from least to greatest.
    pub tile_indexes: [u8; 3],

    /// The win type
    pub win_type: WinType,
}

impl WinnerInfo {
    /// Check if a tile is part of the winning line.
    pub fn contains(&self, index: u8) -> bool {
        self.tile_indexes.contains(&index)
    }
}

/// The status of a game, derived from a [`Board`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum GameStatus {
    /// Moves may still be made
    InProgress,

    /// A team completed a line
    Won(WinnerInfo),

    /// The board filled up without a winner
    Draw,
}

impl GameStatus {
    /// Returns true if no more moves may be made.
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::InProgress)
    }

    /// Get the winner info, if there is a winner.
    pub fn winner_info(self) -> Option<WinnerInfo> {
        match self {
            Self::Won(info) => Some(info),
            Self::InProgress | Self::Draw => None,
        }
    }

    /// Get the winning team, if there is one.
    pub fn winner(self) -> Option<Team> {
        self.winner_info().map(|info| info.team)
    }
}

/// Failed to place a tile.
#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    /// The index is not on the board
    #[error("tile index {0} is out of range")]
    OutOfRange(u8),

    /// The tile already has a mark
    #[error("tile {0} is already occupied")]
    Occupied(u8),
}

/// Failed to parse a [`Board`] from a [`str`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseBoardError {
    /// There must be exactly one char per tile.
    #[error("a board needs {} tiles, got {0}", NUM_TILES)]
    InvalidLength(usize),

    /// The char is not a team or an empty marker.
    #[error("'{0}' is not a valid tile")]
    InvalidChar(char),
}

/// A Tic Tac Toe board
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    // the bitboard
    // 9 tiles, so it cannot fit in a u8 but can fit in a u16
    x_state: u16,
    o_state: u16,
}

impl Board {
    /// Make a new, empty [`Board`].
    pub fn new() -> Self {
        Board {
            x_state: 0,
            o_state: 0,
        }
    }

    fn state(self, team: Team) -> u16 {
        match team {
            Team::X => self.x_state,
            Team::O => self.o_state,
        }
    }

    fn occupied(self) -> u16 {
        self.x_state | self.o_state
    }

    /// Returns true if no tile is empty.
    ///
    /// This does not check for wins.
    pub fn is_full(self) -> bool {
        self.occupied() == FULL_STATE
    }

    /// Check if the given team won.
    ///
    /// This is designed to be fast.
    pub fn has_won(self, team: Team) -> bool {
        let state = self.state(team);

        WIN_LINES
            .iter()
            .any(|(mask, _, _)| (state & mask) == *mask)
    }

    /// Get the first completed line for the given team.
    ///
    /// Lines are checked in a fixed order, so the result is deterministic
    /// even on boards where a team completed several lines.
    pub fn check_win(self, team: Team) -> Option<WinnerInfo> {
        let state = self.state(team);

        WIN_LINES
            .iter()
            .find(|(mask, _, _)| (state & mask) == *mask)
            .map(|(_, tile_indexes, win_type)| WinnerInfo {
                team,
                tile_indexes: *tile_indexes,
                win_type: *win_type,
            })
    }

    /// Get the status of the game after `last_team` moved.
    ///
    /// A win takes precedence over a full board.
    pub fn evaluate_status(self, last_team: Team) -> GameStatus {
        if let Some(info) = self.check_win(last_team) {
            GameStatus::Won(info)
        } else if self.is_full() {
            GameStatus::Draw
        } else {
            GameStatus::InProgress
        }
    }

    /// Set the tile at the index.
    ///
    /// This does not check whether the tile was already set.
    ///
    /// # Panics
    /// Panics if the index >= 9.
    #[must_use]
    pub fn set(mut self, index: u8, team: Option<Team>) -> Self {
        assert!(index < NUM_TILES);
        match team {
            Some(Team::X) => {
                self.x_state |= 1 << index;
                self.o_state &= !(1 << index);
            }
            Some(Team::O) => {
                self.x_state &= !(1 << index);
                self.o_state |= 1 << index;
            }
            None => {
                self.x_state &= !(1 << index);
                self.o_state &= !(1 << index);
            }
        }
        self
    }

    /// Place a mark for a team on an empty tile.
    ///
    /// # Errors
    /// Returns an error if the index is not on the board or the tile is not empty.
    /// The board is not modified on failure.
    pub fn place(self, index: u8, team: Team) -> Result<Self, MoveError> {
        if index >= NUM_TILES {
            return Err(MoveError::OutOfRange(index));
        }

        if self.get(index).is_some() {
            return Err(MoveError::Occupied(index));
        }

        Ok(self.set(index, Some(team)))
    }

    /// Get the tile at the index.
    ///
    /// # Panics
    /// Panics if the index >= 9.
    pub fn get(self, index: u8) -> Option<Team> {
        assert!(index < NUM_TILES);
        if self.x_state & (1 << index) != 0 {
            Some(Team::X)
        } else if self.o_state & (1 << index) != 0 {
            Some(Team::O)
        } else {
            None
        }
    }

    /// Get an iterator over the tiles.
    ///
    /// The iterator starts at 0 at the top left and ends at 8 at the bottom right.
    ///
    /// # Returns
    /// Returns a tuple pair, where the first element is the index and the second is the tile value.
    pub fn iter(self) -> impl Iterator<Item = (u8, Option<Team>)> {
        (0..NUM_TILES).map(move |index| (index, self.get(index)))
    }

    /// Get an iterator over the indexes of empty tiles, in ascending order.
    pub fn iter_empty(self) -> EmptyTilesIter {
        EmptyTilesIter::new(self)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (_, tile) in self.iter() {
            let c = tile.map_or('_', Team::as_char);
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

impl std::str::FromStr for Board {
    type Err = ParseBoardError;

    /// Parse a board from 9 chars, top left to bottom right.
    ///
    /// `X` and `O` are marks, `_`, `.` and `-` are empty tiles.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let len = s.chars().count();
        if len != usize::from(NUM_TILES) {
            return Err(ParseBoardError::InvalidLength(len));
        }

        let mut board = Self::new();
        for (index, c) in (0..NUM_TILES).zip(s.chars()) {
            let tile = match c {
                '_' | '.' | '-' => None,
                c => Some(Team::from_char(c).map_err(|e| ParseBoardError::InvalidChar(e.0))?),
            };
            board = board.set(index, tile);
        }

        Ok(board)
    }
}

/// An iterator over the empty tiles of a [`Board`].
#[derive(Debug, Clone)]
pub struct EmptyTilesIter {
    occupied: u16,
    index: u8,
}

impl EmptyTilesIter {
    fn new(board: Board) -> Self {
        Self {
            occupied: board.occupied(),
            index: 0,
        }
    }
}

impl Iterator for EmptyTilesIter {
    type Item = u8;

    fn next(&mut self) -> Option<Self::Item> {
        while self.index < NUM_TILES {
            let index = self.index;
            self.index += 1;

            if self.occupied & (1 << index) == 0 {
                return Some(index);
            }
        }

        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining_mask = FULL_STATE & !((1 << self.index) - 1);
        let remaining = (!self.occupied & remaining_mask).count_ones() as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for EmptyTilesIter {}

impl std::iter::FusedIterator for EmptyTilesIter {}

#[cfg(test)]
mod test {
    use super::*;

    fn parse_board(s: &str) -> Board {
        s.parse().expect("invalid board")
    }

    /// Visit every board reachable through legal play, stopping at finished games.
    fn for_each_legal_board(board: Board, turn: Team, f: &mut impl FnMut(Board, Team)) {
        for index in board.iter_empty() {
            let child = board.set(index, Some(turn));
            f(child, turn);

            if !child.evaluate_status(turn).is_terminal() {
                for_each_legal_board(child, turn.inverse(), f);
            }
        }
    }

    #[test]
    fn new_board_is_empty() {
        let board = Board::new();
        assert!(board.iter().all(|(_, tile)| tile.is_none()));
        assert_eq!(board.iter_empty().count(), 9);
        assert!(!board.is_full());
        assert_eq!(board.evaluate_status(Team::X), GameStatus::InProgress);
    }

    #[test]
    fn place() {
        let board = Board::new().place(4, Team::X).expect("failed to place");
        assert_eq!(board.get(4), Some(Team::X));

        assert_eq!(board.place(4, Team::O), Err(MoveError::Occupied(4)));
        assert_eq!(board.place(9, Team::O), Err(MoveError::OutOfRange(9)));
        assert_eq!(board.get(4), Some(Team::X));
    }

    #[test]
    fn place_on_occupied_tile_leaves_board_unchanged() {
        let before = parse_board("XO_______");
        for index in [0, 1] {
            for team in [Team::X, Team::O] {
                assert!(before.place(index, team).is_err());
            }
        }
        assert_eq!(before, parse_board("XO_______"));
    }

    #[test]
    fn check_win_every_line() {
        for (_, line, win_type) in WIN_LINES {
            for team in [Team::X, Team::O] {
                let board = line
                    .iter()
                    .fold(Board::new(), |board, index| board.set(*index, Some(team)));
                let info = board.check_win(team).expect("missing win");

                assert_eq!(info.tile_indexes, line);
                assert_eq!(info.win_type, win_type);
                assert_eq!(info.team, team);
                assert!(board.check_win(team.inverse()).is_none());
            }
        }
    }

    #[test]
    fn check_win_picks_first_line() {
        // X holds both the top row and the left column
        let board = parse_board("XXXX__X__");
        let info = board.check_win(Team::X).expect("missing win");
        assert_eq!(info.tile_indexes, [0, 1, 2]);
        assert_eq!(info.win_type, WinType::Horizontal);
        assert!(info.contains(1));
        assert!(!info.contains(3));
    }

    #[test]
    fn check_win_matches_uniform_lines() {
        // Every subset of tiles for one team
        for state in 0..=FULL_STATE {
            let board = (0..NUM_TILES)
                .filter(|index| state & (1 << index) != 0)
                .fold(Board::new(), |board, index| board.set(index, Some(Team::O)));

            let expected = WIN_LINES
                .iter()
                .any(|(_, line, _)| line.iter().all(|index| board.get(*index) == Some(Team::O)));
            assert_eq!(board.check_win(Team::O).is_some(), expected, "{board}");
            assert_eq!(board.has_won(Team::O), expected, "{board}");
        }
    }

    #[test]
    fn win_takes_precedence_over_full_board() {
        let board = parse_board("XOXOXOOXX");
        assert!(board.is_full());
        assert_eq!(board.evaluate_status(Team::X).winner(), Some(Team::X));

        let board = parse_board("XOXXOOOXX");
        assert!(board.is_full());
        assert_eq!(board.evaluate_status(Team::X), GameStatus::Draw);
        assert_eq!(board.evaluate_status(Team::O), GameStatus::Draw);
    }

    #[test]
    fn partially_filled_board() {
        let board = parse_board("XOXOXOX__");
        assert!(!board.is_full());
        assert_eq!(board.iter_empty().collect::<Vec<_>>(), vec![7, 8]);
        assert_eq!(board.evaluate_status(Team::O), GameStatus::InProgress);

        // X holds the anti-diagonal
        let info = board.check_win(Team::X).expect("missing win");
        assert_eq!(info.tile_indexes, [2, 4, 6]);
        assert_eq!(info.win_type, WinType::AntiDiagonal);
    }

    #[test]
    fn legal_play_never_has_two_winners() {
        let mut visited = 0;
        for_each_legal_board(Board::new(), Team::X, &mut |board, mover| {
            visited += 1;
            assert!(
                !(board.has_won(Team::X) && board.has_won(Team::O)),
                "both teams won on {board}"
            );

            let status = board.evaluate_status(mover);
            if board.has_won(mover) {
                assert_ne!(status, GameStatus::Draw, "{board}");
            }
        });
        assert!(visited > 0);
    }

    #[test]
    fn empty_tiles_iter() {
        let board = parse_board("X_O_X_O__");
        let mut iter = board.iter_empty();
        assert_eq!(iter.len(), 5);
        assert_eq!(iter.next(), Some(1));
        assert_eq!(iter.len(), 4);
        assert_eq!(iter.collect::<Vec<_>>(), vec![3, 5, 7, 8]);

        assert_eq!(parse_board("XOXOXOOXX").iter_empty().next(), None);
    }

    #[test]
    fn display_round_trip() {
        let text = "XO_.-_OX_";
        let board = parse_board(text);
        assert_eq!(board.to_string(), "XO____OX_");
        assert_eq!(
            "XO_".parse::<Board>(),
            Err(ParseBoardError::InvalidLength(3))
        );
        assert_eq!(
            "XO_______?".parse::<Board>(),
            Err(ParseBoardError::InvalidLength(10))
        );
        assert_eq!(
            "XO______?".parse::<Board>(),
            Err(ParseBoardError::InvalidChar('?'))
        );
    }
}

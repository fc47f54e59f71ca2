use tic_tac_toe::{
    GameStatus,
    Team,
};

/// Game results for a session
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct ScoreBoard {
    /// Games won by X
    pub x_wins: u32,

    /// Games won by O
    pub o_wins: u32,

    /// Games that ended without a winner
    pub draws: u32,
}

impl ScoreBoard {
    /// Count a finished game.
    ///
    /// Does nothing for a game that is still in progress.
    pub fn record(&mut self, status: GameStatus) {
        let counter = match status.winner() {
            Some(Team::X) => &mut self.x_wins,
            Some(Team::O) => &mut self.o_wins,
            None if status.is_terminal() => &mut self.draws,
            None => return,
        };
        *counter = counter.saturating_add(1);
    }

    /// Zero all counters
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

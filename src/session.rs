mod score_board;

pub use self::score_board::ScoreBoard;
use rand::Rng;
use tic_tac_toe::{
    Board,
    Difficulty,
    GameStatus,
    MoveError,
    Team,
    WinnerInfo,
};
use tracing::{
    debug,
    info,
};

/// The team the computer plays.
///
/// Humans always move first against the computer.
pub const COMPUTER_TEAM: Team = Team::O;

/// Who is playing
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Two humans share the board
    PlayerVsPlayer,

    /// A human plays X against the computer
    PlayerVsComputer(Difficulty),
}

impl Mode {
    /// Get the difficulty of the computer, if there is one.
    pub fn difficulty(self) -> Option<Difficulty> {
        match self {
            Self::PlayerVsPlayer => None,
            Self::PlayerVsComputer(difficulty) => Some(difficulty),
        }
    }

    /// Check if the given team is played by the computer
    pub fn is_computer(self, team: Team) -> bool {
        matches!(self, Self::PlayerVsComputer(_)) && team == COMPUTER_TEAM
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PlayerVsPlayer => write!(f, "player vs player"),
            Self::PlayerVsComputer(difficulty) => {
                write!(f, "player vs computer ({difficulty})")
            }
        }
    }
}

/// What happens next in a game
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Turn {
    /// Waiting on a human to move for the team
    Human(Team),

    /// The computer should move for the team
    Computer(Team),

    /// The game is finished
    Over(GameStatus),
}

/// Error that may occur while trying to make a move.
///
/// None of these change the session.
#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TryMoveError {
    /// The tile cannot be used
    #[error("invalid move")]
    InvalidMove(#[from] MoveError),

    /// There is no game in progress
    #[error("no game is in progress")]
    GameNotActive,

    /// The player trying to move does not have the turn
    #[error("it is not your turn")]
    InvalidTurn,

    /// The computer could not find a tile
    #[error("no moves are left")]
    NoMove,
}

/// A series of games with a shared scoreboard.
#[derive(Debug)]
pub struct Session<R> {
    board: Board,
    turn: Team,

    /// `None` until the first game starts
    status: Option<GameStatus>,
    mode: Mode,
    scores: ScoreBoard,

    rng: R,
}

impl<R> Session<R>
where
    R: Rng,
{
    /// Make a new [`Session`].
    ///
    /// No game is started.
    /// `rng` is used by the computer's random moves.
    pub fn new(mode: Mode, rng: R) -> Self {
        Self {
            board: Board::new(),
            turn: Team::X,
            status: None,
            mode,
            scores: ScoreBoard::default(),
            rng,
        }
    }

    /// Get the board
    pub fn board(&self) -> Board {
        self.board
    }

    /// Get the team whose turn it is
    pub fn turn(&self) -> Team {
        self.turn
    }

    /// Get the status of the current game, or `None` if no game was started.
    pub fn status(&self) -> Option<GameStatus> {
        self.status
    }

    /// Returns true if moves are accepted.
    pub fn is_active(&self) -> bool {
        self.status == Some(GameStatus::InProgress)
    }

    /// Get the mode
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Get the scores
    pub fn scores(&self) -> ScoreBoard {
        self.scores
    }

    /// Get the winning line, if the game was won.
    pub fn winner_info(&self) -> Option<WinnerInfo> {
        self.status.and_then(GameStatus::winner_info)
    }

    /// Get what happens next, or `None` if no game was started.
    pub fn current_turn(&self) -> Option<Turn> {
        self.status.map(|status| self.turn_for(status))
    }

    fn turn_for(&self, status: GameStatus) -> Turn {
        match status {
            GameStatus::InProgress if self.mode.is_computer(self.turn) => Turn::Computer(self.turn),
            GameStatus::InProgress => Turn::Human(self.turn),
            status => Turn::Over(status),
        }
    }

    /// Start a new game with a new mode.
    ///
    /// The board is cleared and X moves first.
    pub fn start_new_game(&mut self, mode: Mode) -> Turn {
        self.board = Board::new();
        self.turn = Team::X;
        self.status = Some(GameStatus::InProgress);
        self.mode = mode;

        info!(%mode, "started new game");

        self.turn_for(GameStatus::InProgress)
    }

    /// Start a new game with the current mode.
    pub fn new_game(&mut self) -> Turn {
        self.start_new_game(self.mode)
    }

    /// Zero the scores and start a new game.
    pub fn reset_scores(&mut self) -> Turn {
        self.scores.reset();
        self.new_game()
    }

    /// Try to make a move for a human.
    pub fn submit_human_move(&mut self, index: u8) -> Result<Turn, TryMoveError> {
        if !self.is_active() {
            return Err(TryMoveError::GameNotActive);
        }

        if self.mode.is_computer(self.turn) {
            return Err(TryMoveError::InvalidTurn);
        }

        self.commit(index)
    }

    /// Let the computer make its move.
    pub fn computer_move(&mut self) -> Result<Turn, TryMoveError> {
        if !self.is_active() {
            return Err(TryMoveError::GameNotActive);
        }

        let difficulty = match self.mode {
            Mode::PlayerVsComputer(difficulty) if self.turn == COMPUTER_TEAM => difficulty,
            _ => return Err(TryMoveError::InvalidTurn),
        };

        let index = difficulty
            .choose_move(self.board, self.turn, &mut self.rng)
            .ok_or(TryMoveError::NoMove)?;
        debug!(index, %difficulty, "computer chose a move");

        self.commit(index)
    }

    /// Place a tile for the current team and advance the game.
    fn commit(&mut self, index: u8) -> Result<Turn, TryMoveError> {
        let team = self.turn;
        self.board = self.board.place(index, team)?;

        let status = self.board.evaluate_status(team);
        self.status = Some(status);

        if status.is_terminal() {
            self.scores.record(status);
            info!(board = %self.board, winner = ?status.winner(), "game over");
        } else {
            self.turn = team.inverse();
        }

        Ok(self.turn_for(status))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::{
        rngs::StdRng,
        SeedableRng,
    };

    fn session(mode: Mode) -> Session<StdRng> {
        let mut session = Session::new(mode, StdRng::seed_from_u64(0));
        session.new_game();
        session
    }

    fn play(session: &mut Session<StdRng>, moves: &[u8]) -> Turn {
        let mut turn = session.current_turn().expect("no game");
        for index in moves {
            turn = session.submit_human_move(*index).expect("invalid move");
        }
        turn
    }

    #[test]
    fn idle_until_started() {
        let mut session = Session::new(Mode::PlayerVsPlayer, StdRng::seed_from_u64(0));
        assert_eq!(session.status(), None);
        assert_eq!(session.current_turn(), None);
        assert_eq!(
            session.submit_human_move(0),
            Err(TryMoveError::GameNotActive)
        );

        assert_eq!(session.new_game(), Turn::Human(Team::X));
        assert!(session.is_active());
    }

    #[test]
    fn player_vs_player_alternates() {
        let mut session = session(Mode::PlayerVsPlayer);
        assert_eq!(session.submit_human_move(4), Ok(Turn::Human(Team::O)));
        assert_eq!(session.submit_human_move(0), Ok(Turn::Human(Team::X)));
        assert_eq!(session.board().get(4), Some(Team::X));
        assert_eq!(session.board().get(0), Some(Team::O));
        assert_eq!(session.computer_move(), Err(TryMoveError::InvalidTurn));
    }

    #[test]
    fn invalid_moves_change_nothing() {
        let mut session = session(Mode::PlayerVsPlayer);
        play(&mut session, &[4]);
        let board = session.board();

        assert_eq!(
            session.submit_human_move(4),
            Err(TryMoveError::InvalidMove(MoveError::Occupied(4)))
        );
        assert_eq!(
            session.submit_human_move(9),
            Err(TryMoveError::InvalidMove(MoveError::OutOfRange(9)))
        );
        assert_eq!(session.board(), board);
        assert_eq!(session.turn(), Team::O);
    }

    #[test]
    fn win_is_scored_once() {
        let mut session = session(Mode::PlayerVsPlayer);
        let turn = play(&mut session, &[0, 3, 1, 4, 2]);

        let status = session.status().expect("no game");
        assert_eq!(turn, Turn::Over(status));
        assert_eq!(status.winner(), Some(Team::X));
        assert_eq!(
            session.winner_info().map(|info| info.tile_indexes),
            Some([0, 1, 2])
        );
        assert_eq!(session.scores().x_wins, 1);

        assert_eq!(
            session.submit_human_move(8),
            Err(TryMoveError::GameNotActive)
        );
        assert_eq!(session.scores().x_wins, 1);
        assert_eq!(session.board().get(8), None);
    }

    #[test]
    fn draw_is_scored() {
        let mut session = session(Mode::PlayerVsPlayer);
        let turn = play(&mut session, &[0, 1, 2, 4, 3, 5, 7, 6, 8]);
        assert_eq!(turn, Turn::Over(GameStatus::Draw));
        assert_eq!(session.winner_info(), None);
        assert_eq!(
            session.scores(),
            ScoreBoard {
                x_wins: 0,
                o_wins: 0,
                draws: 1,
            }
        );
    }

    #[test]
    fn scores_persist_across_games() {
        let mut session = session(Mode::PlayerVsPlayer);
        play(&mut session, &[0, 3, 1, 4, 2]);
        assert_eq!(session.new_game(), Turn::Human(Team::X));
        play(&mut session, &[0, 3, 1, 4, 8, 5]);

        assert_eq!(session.scores().x_wins, 1);
        assert_eq!(session.scores().o_wins, 1);
        assert_eq!(session.mode(), Mode::PlayerVsPlayer);
    }

    #[test]
    fn reset_scores_starts_new_game() {
        let mut session = session(Mode::PlayerVsPlayer);
        play(&mut session, &[0, 3, 1, 4, 2]);

        assert_eq!(session.reset_scores(), Turn::Human(Team::X));
        assert_eq!(session.scores(), ScoreBoard::default());
        assert_eq!(session.status(), Some(GameStatus::InProgress));
        assert_eq!(session.turn(), Team::X);
        assert_eq!(session.board(), Board::new());
    }

    #[test]
    fn computer_answers_corner() {
        let mut session = session(Mode::PlayerVsComputer(Difficulty::Hard));
        assert_eq!(
            session.submit_human_move(0),
            Ok(Turn::Computer(COMPUTER_TEAM))
        );

        // Humans can't move for the computer
        assert_eq!(
            session.submit_human_move(1),
            Err(TryMoveError::InvalidTurn)
        );

        assert_eq!(session.computer_move(), Ok(Turn::Human(Team::X)));
        assert_eq!(session.board().get(4), Some(COMPUTER_TEAM));
        assert_eq!(session.computer_move(), Err(TryMoveError::InvalidTurn));
    }

    #[test]
    fn stale_computer_move_is_rejected() {
        let mut session = session(Mode::PlayerVsComputer(Difficulty::Easy));
        play(&mut session, &[0]);
        session.new_game();

        assert_eq!(session.computer_move(), Err(TryMoveError::InvalidTurn));
        assert_eq!(session.board(), Board::new());
    }

    #[test]
    fn mode_change_starts_new_game() {
        let mut session = session(Mode::PlayerVsPlayer);
        play(&mut session, &[0, 1]);

        let mode = Mode::PlayerVsComputer(Difficulty::Medium);
        assert_eq!(session.start_new_game(mode), Turn::Human(Team::X));
        assert_eq!(session.mode(), mode);
        assert_eq!(session.board(), Board::new());
    }

    #[test]
    fn hard_computer_never_loses_to_random_play() {
        let mut human_rng = StdRng::seed_from_u64(42);
        let mut session = session(Mode::PlayerVsComputer(Difficulty::Hard));

        for _ in 0..50 {
            let mut turn = session.new_game();
            loop {
                turn = match turn {
                    Turn::Human(_) => {
                        let index = tic_tac_toe::random_move(session.board(), &mut human_rng)
                            .expect("missing move");
                        session.submit_human_move(index).expect("invalid move")
                    }
                    Turn::Computer(_) => session.computer_move().expect("invalid move"),
                    Turn::Over(_) => break,
                };
            }
        }

        let scores = session.scores();
        assert_eq!(scores.x_wins, 0);
        assert_eq!(scores.o_wins + scores.draws, 50);
    }
}

use tic_tac_toe::{
    Difficulty,
    NUM_TILES,
};

/// Failed to parse a [`Command`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseCommandError {
    /// Nothing was entered
    #[error("no command given")]
    Empty,

    /// The command does not exist
    #[error("unknown command \"{0}\"")]
    Unknown(String),

    /// A tile number is not on the board
    #[error("tile {0} is not on the board, pick 0 to 8")]
    InvalidTile(String),

    /// A difficulty could not be parsed
    #[error(transparent)]
    InvalidDifficulty(#[from] tic_tac_toe::ParseDifficultyError),

    /// The command needs an argument
    #[error("missing {0}")]
    MissingArgument(&'static str),

    /// The command got arguments it does not take
    #[error("unexpected argument \"{0}\"")]
    UnexpectedArgument(String),
}

/// A line of user input
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Command {
    /// Place a mark on a tile
    Place(u8),

    /// Start a new game in the current mode
    NewGame,

    /// Zero the scores and start a new game
    ResetScores,

    /// Play against another human
    PlayerVsPlayer,

    /// Play against the computer, optionally at a new difficulty
    PlayerVsComputer(Option<Difficulty>),

    /// Print the board again
    Board,

    /// Print the scores
    Scores,

    /// Print the commands
    Help,

    /// Exit
    Quit,
}

impl std::str::FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let name = parts.next().ok_or(ParseCommandError::Empty)?;
        let arg = parts.next();

        if let Some(extra) = parts.next() {
            return Err(ParseCommandError::UnexpectedArgument(extra.to_string()));
        }

        let command = match name.to_ascii_lowercase().as_str() {
            "cpu" | "computer" => {
                let difficulty = arg.map(str::parse).transpose()?;
                return Ok(Self::PlayerVsComputer(difficulty));
            }
            "difficulty" | "level" => {
                let arg = arg.ok_or(ParseCommandError::MissingArgument("difficulty"))?;
                return Ok(Self::PlayerVsComputer(Some(arg.parse()?)));
            }
            "easy" | "medium" | "hard" => Self::PlayerVsComputer(Some(name.parse()?)),
            "new" | "n" => Self::NewGame,
            "reset" => Self::ResetScores,
            "pvp" => Self::PlayerVsPlayer,
            "board" | "b" => Self::Board,
            "scores" | "score" | "s" => Self::Scores,
            "help" | "h" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            name if name.starts_with(|c: char| c.is_ascii_digit()) => {
                let index = name
                    .parse::<u8>()
                    .ok()
                    .filter(|index| *index < NUM_TILES)
                    .ok_or_else(|| ParseCommandError::InvalidTile(name.to_string()))?;
                Self::Place(index)
            }
            name => return Err(ParseCommandError::Unknown(name.to_string())),
        };

        match arg {
            Some(arg) => Err(ParseCommandError::UnexpectedArgument(arg.to_string())),
            None => Ok(command),
        }
    }
}

mod command;

pub use self::command::{
    Command,
    ParseCommandError,
};
use crate::{
    session::{
        Mode,
        Session,
        Turn,
    },
    view::{
        status_text,
        View,
    },
};
use anyhow::Context;
use rand::Rng;
use std::time::Duration;
use tic_tac_toe::Difficulty;
use tokio::{
    io::{
        AsyncBufRead,
        AsyncBufReadExt,
        BufReader,
    },
    time::Instant,
};
use tracing::{
    debug,
    info,
};

const HELP: &str = "\
Commands:
  0-8                 place a mark on a tile
  new                 start a new game
  reset               reset the scores and start a new game
  pvp                 play against another player
  cpu [difficulty]    play against the computer
  easy, medium, hard  play against the computer at a difficulty
  board               show the board
  scores              show the scores
  help                show this message
  quit                exit";

/// The result of handling an event
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Step {
    /// Nothing changed
    Ignored,

    /// The game changed and this happens next
    Advanced(Turn),

    /// Stop the host
    Quit,
}

/// Runs a [`Session`] against a [`View`] and a stream of text commands.
#[derive(Debug)]
pub struct Host<R, V> {
    session: Session<R>,
    view: V,

    /// The difficulty picked when switching to the computer without naming one
    difficulty: Difficulty,
    computer_delay: Duration,
}

impl<R, V> Host<R, V>
where
    R: Rng,
    V: View,
{
    /// Make a new [`Host`].
    ///
    /// Computer moves are played `computer_delay` after they are due.
    pub fn new(session: Session<R>, view: V, computer_delay: Duration) -> Self {
        let difficulty = session.mode().difficulty().unwrap_or_default();
        Self {
            session,
            view,
            difficulty,
            computer_delay,
        }
    }

    /// Get the session
    pub fn session(&self) -> &Session<R> {
        &self.session
    }

    /// Get the view
    pub fn view(&self) -> &V {
        &self.view
    }

    /// Show the board, status and scores.
    pub fn refresh(&mut self) -> anyhow::Result<()> {
        self.view
            .render_board(self.session.board(), self.session.winner_info())?;
        self.view
            .show_status(&status_text(self.session.current_turn()))?;
        self.view.show_scores(self.session.scores())?;
        Ok(())
    }

    /// Handle a line of user input.
    ///
    /// Tiles that are not on the board are ignored like any other invalid move.
    pub fn handle_line(&mut self, line: &str) -> anyhow::Result<Step> {
        if line.trim().is_empty() {
            return Ok(Step::Ignored);
        }

        match line.parse::<Command>() {
            Ok(command) => self.handle_command(command),
            Err(ParseCommandError::InvalidTile(tile)) => {
                debug!("ignoring move at {tile}: not on the board");
                Ok(Step::Ignored)
            }
            Err(error) => {
                self.view
                    .show_message(&format!("{error}, type `help` for a list of commands"))?;
                Ok(Step::Ignored)
            }
        }
    }

    /// Handle a command.
    ///
    /// Moves that are not allowed are ignored without telling the user.
    pub fn handle_command(&mut self, command: Command) -> anyhow::Result<Step> {
        let turn = match command {
            Command::Place(index) => match self.session.submit_human_move(index) {
                Ok(turn) => turn,
                Err(error) => {
                    debug!("ignoring move at {index}: {error}");
                    return Ok(Step::Ignored);
                }
            },
            Command::NewGame => self.session.new_game(),
            Command::ResetScores => self.session.reset_scores(),
            Command::PlayerVsPlayer => self.session.start_new_game(Mode::PlayerVsPlayer),
            Command::PlayerVsComputer(difficulty) => {
                if let Some(difficulty) = difficulty {
                    self.difficulty = difficulty;
                }
                self.session
                    .start_new_game(Mode::PlayerVsComputer(self.difficulty))
            }
            Command::Board => {
                self.refresh()?;
                return Ok(Step::Ignored);
            }
            Command::Scores => {
                self.view.show_scores(self.session.scores())?;
                return Ok(Step::Ignored);
            }
            Command::Help => {
                self.view.show_message(HELP)?;
                return Ok(Step::Ignored);
            }
            Command::Quit => return Ok(Step::Quit),
        };

        self.refresh()?;
        Ok(Step::Advanced(turn))
    }

    /// Play the computer's move.
    ///
    /// This is ignored if it is no longer the computer's turn.
    pub fn play_computer_move(&mut self) -> anyhow::Result<Step> {
        match self.session.computer_move() {
            Ok(turn) => {
                self.refresh()?;
                Ok(Step::Advanced(turn))
            }
            Err(error) => {
                debug!("skipping computer move: {error}");
                Ok(Step::Ignored)
            }
        }
    }

    /// Run on stdin until it closes, the user quits, or ctrl-c is pressed.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        self.run_with_input(BufReader::new(tokio::io::stdin()))
            .await
    }

    /// Run on the given input until it closes, the user quits, or ctrl-c is pressed.
    ///
    /// A computer move that is due when the input closes is still played.
    pub async fn run_with_input<I>(&mut self, input: I) -> anyhow::Result<()>
    where
        I: AsyncBufRead + Unpin,
    {
        let mut lines = input.lines();
        let mut input_closed = false;

        let computer_timer = tokio::time::sleep(self.computer_delay);
        tokio::pin!(computer_timer);
        let mut computer_pending = false;

        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        self.view.show_message(HELP)?;
        self.refresh()?;
        let mut step = self
            .session
            .current_turn()
            .map_or(Step::Ignored, Step::Advanced);

        loop {
            match step {
                Step::Advanced(Turn::Computer(_)) => {
                    computer_timer
                        .as_mut()
                        .reset(Instant::now() + self.computer_delay);
                    computer_pending = true;
                }
                Step::Advanced(_) => {
                    // A new game or a finished one cancels a pending computer move
                    computer_pending = false;
                }
                Step::Ignored => {}
                Step::Quit => break,
            }

            if input_closed && !computer_pending {
                break;
            }

            step = tokio::select! {
                result = &mut ctrl_c => {
                    result.context("failed to listen for ctrl-c")?;
                    info!("got ctrl-c");
                    Step::Quit
                }
                () = &mut computer_timer, if computer_pending => {
                    computer_pending = false;
                    self.play_computer_move()?
                }
                line = lines.next_line(), if !input_closed => {
                    match line.context("failed to read input")? {
                        Some(line) => self.handle_line(&line)?,
                        None => {
                            info!("input closed");
                            input_closed = true;
                            Step::Ignored
                        }
                    }
                }
            };
        }

        Ok(())
    }
}

use crate::{
    session::{
        ScoreBoard,
        Turn,
    },
    util::AsciiTable,
};
use anyhow::Context;
use std::io::Write;
use tic_tac_toe::{
    Board,
    WinnerInfo,
};

const ROW_SEPARATOR: &str = "---+---+---";

/// The hooks a frontend provides to display a session.
pub trait View {
    /// Show the board, emphasizing the winning line if there is one.
    fn render_board(
        &mut self,
        board: Board,
        winner_info: Option<WinnerInfo>,
    ) -> anyhow::Result<()>;

    /// Show whose turn it is or how the game ended.
    fn show_status(&mut self, status: &str) -> anyhow::Result<()>;

    /// Show the scores.
    fn show_scores(&mut self, scores: ScoreBoard) -> anyhow::Result<()>;

    /// Show some text to the user.
    fn show_message(&mut self, message: &str) -> anyhow::Result<()>;
}

/// Get the status line for a turn.
///
/// `None` means no game was started.
pub fn status_text(turn: Option<Turn>) -> String {
    match turn {
        None => "Type `new` to start a game".to_string(),
        Some(Turn::Human(team) | Turn::Computer(team)) => format!("Player {team}'s turn"),
        Some(Turn::Over(status)) => match status.winner() {
            Some(team) => format!("Player {team} wins!"),
            None => "Draw!".to_string(),
        },
    }
}

/// A [`View`] that writes plain text.
#[derive(Debug)]
pub struct TerminalView<W> {
    writer: W,
}

impl<W> TerminalView<W>
where
    W: Write,
{
    /// Make a new [`TerminalView`].
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W> View for TerminalView<W>
where
    W: Write,
{
    fn render_board(
        &mut self,
        board: Board,
        winner_info: Option<WinnerInfo>,
    ) -> anyhow::Result<()> {
        let tiles: Vec<String> = board
            .iter()
            .map(|(index, tile)| match tile {
                Some(team) if winner_info.map_or(false, |info| info.contains(index)) => {
                    format!("[{team}]")
                }
                Some(team) => format!(" {team} "),
                None => format!(" {index} "),
            })
            .collect();

        writeln!(self.writer)?;
        for (i, row) in tiles.chunks(3).enumerate() {
            if i != 0 {
                writeln!(self.writer, "{ROW_SEPARATOR}")?;
            }
            writeln!(self.writer, "{}", row.join("|"))?;
        }
        writeln!(self.writer)?;

        self.writer.flush().context("failed to flush board")
    }

    fn show_status(&mut self, status: &str) -> anyhow::Result<()> {
        writeln!(self.writer, "{status}")?;
        self.writer.flush().context("failed to flush status")
    }

    fn show_scores(&mut self, scores: ScoreBoard) -> anyhow::Result<()> {
        let mut x_wins_buffer = itoa::Buffer::new();
        let mut o_wins_buffer = itoa::Buffer::new();
        let mut draws_buffer = itoa::Buffer::new();

        let mut table = AsciiTable::new(3, 2);
        table.set_padding(2);

        table.set_cell(0, 0, "X Wins");
        table.set_cell(1, 0, "O Wins");
        table.set_cell(2, 0, "Draws");

        table.set_cell(0, 1, x_wins_buffer.format(scores.x_wins));
        table.set_cell(1, 1, o_wins_buffer.format(scores.o_wins));
        table.set_cell(2, 1, draws_buffer.format(scores.draws));

        write!(self.writer, "{table}")?;
        self.writer.flush().context("failed to flush scores")
    }

    fn show_message(&mut self, message: &str) -> anyhow::Result<()> {
        writeln!(self.writer, "{message}")?;
        self.writer.flush().context("failed to flush message")
    }
}

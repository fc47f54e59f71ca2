use camino::Utf8PathBuf;

/// CLI Options
#[derive(Debug, argh::FromArgs)]
#[argh(description = "Tic-tac-toe in the terminal, against a friend or the computer")]
pub struct CliOptions {
    #[argh(option, description = "the path to the config")]
    pub config: Option<Utf8PathBuf>,
}

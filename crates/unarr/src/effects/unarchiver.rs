use unarr_platform::{Command, ToolPaths};

use crate::core::{ArgumentVector, OutputGrammar};

/// Runs `unar` and `lsar` and interprets what they print.
///
/// Holds no per-operation state: every `extract` or `list` call owns its own
/// child process and interpreter, so calls may run concurrently.
///
/// # Examples
///
/// ```no_run
/// use unarr::{ExtractOptions, Unarchiver};
/// use unarr_platform::ToolPaths;
///
/// # async fn run() -> unarr::Result<()> {
/// let unarchiver = Unarchiver::new(ToolPaths::detect());
/// let report = unarchiver
///     .extract("attr.7z", ExtractOptions::default().target_dir("tmp"))
///     .await?;
/// println!("{} -> {}", report.archive_type, report.directory);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Unarchiver {
    pub(super) tools: ToolPaths,
    pub(super) grammar: OutputGrammar,
}

impl Unarchiver {
    pub fn new(tools: ToolPaths) -> Self {
        Self {
            tools,
            grammar: OutputGrammar::default(),
        }
    }

    /// Use a different `unar` output grammar.
    pub fn with_grammar(mut self, grammar: OutputGrammar) -> Self {
        self.grammar = grammar;
        self
    }

    pub fn tools(&self) -> &ToolPaths {
        &self.tools
    }

    pub(super) fn command(argv: &ArgumentVector) -> Command {
        Command::new(argv.program()).args(argv.args())
    }
}

impl Default for Unarchiver {
    fn default() -> Self {
        Self::new(ToolPaths::default())
    }
}

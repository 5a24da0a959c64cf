use std::path::PathBuf;

use anyhow::Result;

#[derive(Clone, Debug, Default)]
pub struct TuiRunOptions {
    /// Profile directory override (defaults to `$VOLTIX_HOME` or
    /// `$HOME/.voltix`).
    pub profile_dir: Option<PathBuf>,
}

pub fn run() -> Result<()> {
    crate::tui_shell::run(TuiRunOptions::default())
}

pub fn run_with_options(opts: TuiRunOptions) -> Result<()> {
    crate::tui_shell::run(opts)
}

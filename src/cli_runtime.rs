use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use voltix::model::DEFAULT_SERVER_URL;
use voltix::remote::AuthClient;
use voltix::store::SessionStore;

use crate::Commands;

#[derive(Parser)]
#[command(name = "voltix")]
#[command(about = "Voltix trading signal dashboard", long_about = None)]
pub(crate) struct Cli {
    /// Profile directory (defaults to $VOLTIX_HOME or ~/.voltix)
    #[arg(long = "profile-dir", value_name = "PATH", global = true)]
    profile_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

pub(crate) fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        None => {
            voltix::tui::run_with_options(voltix::tui::TuiRunOptions {
                profile_dir: cli.profile_dir,
            })?;
        }
        Some(command) => crate::cli_exec::handle_command(cli.profile_dir, command)?,
    }

    Ok(())
}

pub(crate) fn open_store(profile_dir: Option<PathBuf>) -> Result<SessionStore> {
    match profile_dir {
        Some(dir) => SessionStore::open_at(&dir),
        None => SessionStore::open_default(),
    }
}

pub(crate) fn client_for(store: &SessionStore) -> Result<AuthClient> {
    let base_url = store
        .read_config()
        .context("read profile config")?
        .server
        .map(|s| s.base_url)
        .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());
    AuthClient::new(&base_url)
}

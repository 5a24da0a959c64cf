use std::path::PathBuf;

use anyhow::Result;

use crate::Commands;

mod session_cmds;

pub(super) fn handle_command(profile_dir: Option<PathBuf>, command: Commands) -> Result<()> {
    let store = crate::cli_runtime::open_store(profile_dir)?;
    match command {
        Commands::Server { command } => session_cmds::handle_server_command(&store, command),
        Commands::Login {
            email,
            password,
            account_type,
        } => session_cmds::handle_login_command(&store, &email, &password, account_type.as_deref()),
        Commands::Register { email, password } => {
            session_cmds::handle_register_command(&store, &email, &password)
        }
        Commands::Identity { assertion } => {
            session_cmds::handle_identity_command(&store, &assertion)
        }
        Commands::Whoami { json } => session_cmds::handle_whoami_command(&store, json),
        Commands::Logout => session_cmds::handle_logout_command(&store),
    }
}

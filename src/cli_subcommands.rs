use clap::Subcommand;

#[derive(Subcommand)]
pub(crate) enum ServerCommands {
    /// Show the configured auth server
    Show {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },
    /// Set the auth server base URL
    Set {
        #[arg(long)]
        url: String,
    },
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Show or set the auth server
    Server {
        #[command(subcommand)]
        command: ServerCommands,
    },

    /// Sign in with email and password
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// Account type: metatrader, binance, ctrader or gmail
        #[arg(long, value_name = "TYPE")]
        account_type: Option<String>,
    },

    /// Create an account (starts a 7-day trial)
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Sign in by exchanging a provider identity assertion
    Identity {
        #[arg(long)]
        assertion: String,
    },

    /// Show the signed-in identity, subscription and capabilities
    Whoami {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Sign out and clear the stored credential
    Logout,
}

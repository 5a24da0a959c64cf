use anyhow::{Context, Result};

use voltix::gate::{Badge, Capabilities};
use voltix::model::{AccountType, DEFAULT_SERVER_URL, Role, ServerConfig};
use voltix::remote::AuthApi;
use voltix::session::Session;
use voltix::store::SessionStore;

use crate::cli_runtime::client_for;
use crate::cli_subcommands::ServerCommands;

pub(super) fn handle_server_command(store: &SessionStore, command: ServerCommands) -> Result<()> {
    match command {
        ServerCommands::Show { json } => {
            let cfg = store.read_config()?;
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&cfg.server).context("serialize server json")?
                );
            } else if let Some(server) = cfg.server {
                println!("url: {}", server.base_url);
            } else {
                println!("No server configured (default {DEFAULT_SERVER_URL})");
            }
        }
        ServerCommands::Set { url } => {
            let mut cfg = store.read_config()?;
            cfg.server = Some(ServerConfig { base_url: url });
            store.write_config(&cfg)?;
            println!("Server updated");
        }
    }
    Ok(())
}

pub(super) fn handle_login_command(
    store: &SessionStore,
    email: &str,
    password: &str,
    account_type: Option<&str>,
) -> Result<()> {
    let account_type = match account_type {
        Some(s) => s.parse::<AccountType>()?,
        None => AccountType::Metatrader,
    };
    let client = client_for(store)?;
    let credential = client.login(email, password)?;
    finish_sign_in(store, &client, credential, account_type)
}

pub(super) fn handle_register_command(
    store: &SessionStore,
    email: &str,
    password: &str,
) -> Result<()> {
    let client = client_for(store)?;
    let credential = client.register(email, password)?;
    println!("Account created (7-day trial)");
    finish_sign_in(store, &client, credential, AccountType::Metatrader)
}

pub(super) fn handle_identity_command(store: &SessionStore, assertion: &str) -> Result<()> {
    let client = client_for(store)?;
    let credential = client.exchange_identity(assertion)?;
    finish_sign_in(store, &client, credential, AccountType::Gmail)
}

fn finish_sign_in(
    store: &SessionStore,
    client: &dyn AuthApi,
    credential: String,
    account_type: AccountType,
) -> Result<()> {
    let mut session = Session::open(store.clone())?;
    let ticket = session.login(credential)?;
    let outcome = client.me(ticket.credential());
    let failure = outcome.as_ref().err().map(|e| e.message().to_string());
    session.apply_resolution(&ticket, outcome)?;

    if !session.is_authenticated() {
        anyhow::bail!(
            "sign-in failed: {}",
            failure.unwrap_or_else(|| "identity resolution failed".to_string())
        );
    }
    session.set_account_type(account_type)?;

    if let Some(user) = session.user() {
        println!("Signed in as {} ({})", user.email, account_type.label());
    }
    Ok(())
}

pub(super) fn handle_whoami_command(store: &SessionStore, json: bool) -> Result<()> {
    let mut session = Session::open(store.clone())?;
    if session.credential().is_none() {
        println!("Not signed in");
        return Ok(());
    }
    let client = client_for(store)?;
    session.resolve_with(&client)?;

    let (Some(user), Some(subscription)) = (session.user(), session.subscription()) else {
        println!("Not signed in (stored credential was rejected)");
        return Ok(());
    };
    let account_type = session.account_type().unwrap_or(AccountType::Metatrader);
    let caps = Capabilities::derive(subscription, account_type);
    let badge = Badge::classify(subscription);

    if json {
        let out = serde_json::json!({
            "user": user,
            "subscription": subscription,
            "account_type": account_type,
            "badge": badge.label(),
            "capabilities": {
                "can_trade": caps.can_trade,
                "wallet_panel": caps.wallet_panel,
                "trade_panel": caps.trade_panel,
                "signals_panel": caps.signals_panel,
                "news_panel": caps.news_panel,
            },
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&out).context("serialize whoami json")?
        );
    } else {
        println!("email: {}", user.email);
        if user.role == Role::Admin {
            println!("role: admin");
        }
        println!("account: {}", account_type.label());
        println!(
            "plan: {} ({}, {} days left)",
            subscription.plan.label(),
            badge.label(),
            subscription.days_remaining
        );
        println!("trading: {}", if caps.can_trade { "yes" } else { "no" });
    }
    Ok(())
}

pub(super) fn handle_logout_command(store: &SessionStore) -> Result<()> {
    let mut session = Session::open(store.clone())?;
    session.logout()?;
    println!("Signed out");
    Ok(())
}

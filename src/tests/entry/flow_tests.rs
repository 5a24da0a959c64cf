use super::*;

fn flow_at_login_form() -> EntryFlow {
    let mut flow = EntryFlow::new();
    flow.choose_login();
    flow
}

#[test]
fn starts_on_selection_with_default_account_type() {
    let flow = EntryFlow::new();
    assert_eq!(flow.state(), EntryState::SelectingMode);
    assert_eq!(flow.account_type(), AccountType::Metatrader);
    assert!(!flow.in_flight());
}

#[test]
fn account_type_cycles_both_ways() {
    let mut flow = EntryFlow::new();
    flow.cycle_account_type(true);
    assert_eq!(flow.account_type(), AccountType::Binance);
    flow.cycle_account_type(false);
    flow.cycle_account_type(false);
    assert_eq!(flow.account_type(), AccountType::Gmail);
}

#[test]
fn account_type_frozen_after_leaving_selection() {
    let mut flow = flow_at_login_form();
    flow.cycle_account_type(true);
    assert_eq!(flow.account_type(), AccountType::Metatrader);
}

#[test]
fn submit_rejects_invalid_email_inline() {
    let mut flow = flow_at_login_form();
    flow.set_email("not-an-email".to_string());
    flow.set_password("secret".to_string());
    assert!(flow.submit().is_none());
    assert_eq!(flow.error(), Some("enter a valid email address"));
    assert_eq!(flow.state(), EntryState::CredentialEntry(EntryMode::Login));
    assert!(!flow.in_flight());
}

#[test]
fn register_rejects_short_password_inline() {
    let mut flow = EntryFlow::new();
    flow.choose_register();
    flow.set_email("a@example.com".to_string());
    flow.set_password("ab".to_string());
    assert!(flow.submit().is_none());
    assert!(
        flow.error().expect("error").contains("at least"),
        "{:?}",
        flow.error()
    );
    assert_eq!(
        flow.state(),
        EntryState::CredentialEntry(EntryMode::Register)
    );
}

#[test]
fn login_accepts_short_password() {
    // Only registration enforces the minimum length; existing accounts may
    // predate it.
    let mut flow = flow_at_login_form();
    flow.set_email("a@example.com".to_string());
    flow.set_password("ab".to_string());
    let req = flow.submit().expect("request");
    assert_eq!(
        req,
        EntryRequest::Login {
            email: "a@example.com".to_string(),
            password: "ab".to_string(),
        }
    );
    assert!(flow.in_flight());
}

#[test]
fn duplicate_submit_blocked_while_in_flight() {
    let mut flow = flow_at_login_form();
    flow.set_email("a@example.com".to_string());
    flow.set_password("secret".to_string());
    assert!(flow.submit().is_some());
    assert!(flow.submit().is_none());
}

#[test]
fn toggle_keeps_email_and_clears_password_and_error() {
    let mut flow = flow_at_login_form();
    flow.set_email("a@example.com".to_string());
    flow.set_password("".to_string());
    assert!(flow.submit().is_none());
    assert!(flow.error().is_some());

    flow.toggle_mode();
    assert_eq!(
        flow.state(),
        EntryState::CredentialEntry(EntryMode::Register)
    );
    assert_eq!(flow.email(), "a@example.com");
    assert_eq!(flow.password(), "");
    assert!(flow.error().is_none());
}

#[test]
fn toggle_blocked_while_in_flight() {
    let mut flow = flow_at_login_form();
    flow.set_email("a@example.com".to_string());
    flow.set_password("secret".to_string());
    assert!(flow.submit().is_some());
    flow.toggle_mode();
    assert_eq!(flow.state(), EntryState::CredentialEntry(EntryMode::Login));
}

#[test]
fn back_discards_entered_credentials() {
    let mut flow = flow_at_login_form();
    flow.set_email("a@example.com".to_string());
    flow.set_password("secret".to_string());
    flow.back();
    assert_eq!(flow.state(), EntryState::SelectingMode);
    assert_eq!(flow.email(), "");
    assert_eq!(flow.password(), "");
}

#[test]
fn failed_login_stays_on_form_with_message() {
    let mut flow = flow_at_login_form();
    flow.set_email("a@example.com".to_string());
    flow.set_password("wrong".to_string());
    assert!(flow.submit().is_some());

    flow.complete(Err(AuthError::InvalidCredentials(
        "wrong email or password".to_string(),
    )));
    assert_eq!(flow.state(), EntryState::CredentialEntry(EntryMode::Login));
    assert_eq!(flow.error(), Some("wrong email or password"));
    assert!(!flow.in_flight());
    assert!(flow.take_credential().is_none());
}

#[test]
fn successful_login_is_terminal() {
    let mut flow = flow_at_login_form();
    flow.set_email("a@example.com".to_string());
    flow.set_password("secret".to_string());
    assert!(flow.submit().is_some());

    flow.complete(Ok("tok-a".to_string()));
    assert_eq!(flow.state(), EntryState::Authenticated);
    assert!(flow.error().is_none());
    assert_eq!(flow.take_credential().as_deref(), Some("tok-a"));
}

#[test]
fn exchange_forces_gmail_account_type() {
    let mut flow = EntryFlow::new();
    flow.cycle_account_type(true);
    let req = flow
        .begin_exchange("google|a@example.com".to_string())
        .expect("request");
    assert_eq!(
        req,
        EntryRequest::Exchange {
            assertion: "google|a@example.com".to_string(),
        }
    );
    assert_eq!(flow.account_type(), AccountType::Gmail);
    assert_eq!(flow.state(), EntryState::ExchangePending);
}

#[test]
fn exchange_only_starts_from_selection() {
    let mut flow = flow_at_login_form();
    assert!(flow.begin_exchange("google|a@example.com".to_string()).is_none());
}

#[test]
fn failed_exchange_returns_to_selection_with_message() {
    let mut flow = EntryFlow::new();
    assert!(flow.begin_exchange("garbage".to_string()).is_some());

    flow.complete(Err(AuthError::IdentityExchangeFailed(
        "malformed identity assertion".to_string(),
    )));
    assert_eq!(flow.state(), EntryState::SelectingMode);
    assert_eq!(flow.error(), Some("malformed identity assertion"));
    assert!(!flow.in_flight());
}

#[test]
fn successful_exchange_is_terminal() {
    let mut flow = EntryFlow::new();
    assert!(flow.begin_exchange("google|a@example.com".to_string()).is_some());
    flow.complete(Ok("tok-g".to_string()));
    assert_eq!(flow.state(), EntryState::Authenticated);
    assert_eq!(flow.take_credential().as_deref(), Some("tok-g"));
}

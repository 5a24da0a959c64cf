use std::collections::HashMap;

use tempfile::TempDir;

use super::*;
use crate::model::{Role, SubscriptionPlan, SubscriptionStatus};

struct FakeApi {
    profiles: HashMap<String, UserProfile>,
}

impl FakeApi {
    fn new() -> Self {
        Self {
            profiles: HashMap::new(),
        }
    }

    fn grant(&mut self, credential: &str, email: &str) {
        self.profiles
            .insert(credential.to_string(), profile(email));
    }
}

impl AuthApi for FakeApi {
    fn login(&self, _email: &str, _password: &str) -> std::result::Result<String, AuthError> {
        Err(AuthError::InvalidCredentials("no such account".to_string()))
    }

    fn register(&self, _email: &str, _password: &str) -> std::result::Result<String, AuthError> {
        Err(AuthError::Network("not implemented".to_string()))
    }

    fn exchange_identity(&self, _assertion: &str) -> std::result::Result<String, AuthError> {
        Err(AuthError::Network("not implemented".to_string()))
    }

    fn me(&self, credential: &str) -> std::result::Result<UserProfile, AuthError> {
        self.profiles
            .get(credential)
            .cloned()
            .ok_or(AuthError::Unauthorized)
    }
}

fn profile(email: &str) -> UserProfile {
    UserProfile {
        id: format!("id-{email}"),
        email: email.to_string(),
        role: Role::User,
        subscription: Subscription {
            plan: SubscriptionPlan::Trial,
            status: SubscriptionStatus::Active,
            days_remaining: 7,
            end_date: "2026-09-01".to_string(),
        },
    }
}

fn open_session(dir: &TempDir) -> Session {
    let store = SessionStore::open_at(dir.path()).expect("open store");
    Session::open(store).expect("open session")
}

#[test]
fn login_then_resolve_authenticates() {
    let dir = TempDir::new().expect("tempdir");
    let mut session = open_session(&dir);
    assert!(!session.is_authenticated());
    assert!(!session.loading());

    let ticket = session.login("tok-a".to_string()).expect("login");
    assert!(session.loading());
    assert!(!session.is_authenticated());

    let status = session
        .apply_resolution(&ticket, Ok(profile("a@example.com")))
        .expect("apply");
    assert_eq!(status, ResolveStatus::Applied);
    assert!(session.is_authenticated());
    assert!(!session.loading());
    assert_eq!(session.user().expect("user").email, "a@example.com");
    assert!(session.subscription().is_some());
}

#[test]
fn user_and_subscription_installed_together() {
    let dir = TempDir::new().expect("tempdir");
    let mut session = open_session(&dir);

    assert_eq!(session.user().is_some(), session.subscription().is_some());
    let ticket = session.login("tok-a".to_string()).expect("login");
    assert_eq!(session.user().is_some(), session.subscription().is_some());
    session
        .apply_resolution(&ticket, Ok(profile("a@example.com")))
        .expect("apply");
    assert_eq!(session.user().is_some(), session.subscription().is_some());
    session.logout().expect("logout");
    assert_eq!(session.user().is_some(), session.subscription().is_some());
}

#[test]
fn stale_resolution_is_discarded() {
    let dir = TempDir::new().expect("tempdir");
    let mut session = open_session(&dir);

    let ticket_a = session.login("tok-a".to_string()).expect("login a");
    let ticket_b = session.login("tok-b".to_string()).expect("login b");

    // The first login's result arrives after it was superseded.
    let status = session
        .apply_resolution(&ticket_a, Ok(profile("a@example.com")))
        .expect("apply stale");
    assert_eq!(status, ResolveStatus::Stale);
    assert!(session.loading());
    assert_eq!(session.credential(), Some("tok-b"));
    assert!(session.user().is_none());

    let status = session
        .apply_resolution(&ticket_b, Ok(profile("b@example.com")))
        .expect("apply current");
    assert_eq!(status, ResolveStatus::Applied);
    assert_eq!(session.user().expect("user").email, "b@example.com");
}

#[test]
fn resolution_failure_clears_session_and_store() {
    let dir = TempDir::new().expect("tempdir");
    let mut session = open_session(&dir);

    let ticket = session.login("tok-bad".to_string()).expect("login");
    let status = session
        .apply_resolution(&ticket, Err(AuthError::Unauthorized))
        .expect("apply");
    assert_eq!(status, ResolveStatus::Applied);
    assert!(!session.is_authenticated());
    assert!(!session.loading());
    assert!(session.credential().is_none());

    let store = SessionStore::open_at(dir.path()).expect("reopen store");
    assert!(store.get_credential().expect("get credential").is_none());
}

#[test]
fn network_failure_also_clears_session() {
    let dir = TempDir::new().expect("tempdir");
    let mut session = open_session(&dir);

    let ticket = session.login("tok-a".to_string()).expect("login");
    session
        .apply_resolution(&ticket, Err(AuthError::Network("connection refused".to_string())))
        .expect("apply");
    assert!(!session.is_authenticated());
    assert!(session.credential().is_none());
}

#[test]
fn logout_is_idempotent() {
    let dir = TempDir::new().expect("tempdir");
    let mut session = open_session(&dir);

    let ticket = session.login("tok-a".to_string()).expect("login");
    session
        .apply_resolution(&ticket, Ok(profile("a@example.com")))
        .expect("apply");

    session.logout().expect("first logout");
    session.logout().expect("second logout");
    assert!(!session.is_authenticated());
    assert!(session.credential().is_none());
    assert!(session.account_type().is_none());
}

#[test]
fn logout_supersedes_inflight_resolution() {
    let dir = TempDir::new().expect("tempdir");
    let mut session = open_session(&dir);

    let ticket = session.login("tok-a".to_string()).expect("login");
    session.logout().expect("logout");

    let status = session
        .apply_resolution(&ticket, Ok(profile("a@example.com")))
        .expect("apply");
    assert_eq!(status, ResolveStatus::Stale);
    assert!(!session.is_authenticated());
}

#[test]
fn reopen_restores_credential_then_resolves() {
    let dir = TempDir::new().expect("tempdir");
    let mut api = FakeApi::new();
    api.grant("tok-a", "a@example.com");

    {
        let mut session = open_session(&dir);
        let ticket = session.login("tok-a".to_string()).expect("login");
        session
            .apply_resolution(&ticket, Ok(profile("a@example.com")))
            .expect("apply");
        session
            .set_account_type(AccountType::Binance)
            .expect("set account type");
    }

    let mut session = open_session(&dir);
    assert!(session.loading());
    assert_eq!(session.credential(), Some("tok-a"));
    assert_eq!(session.account_type(), Some(AccountType::Binance));
    assert!(!session.is_authenticated());

    session.resolve_with(&api).expect("resolve");
    assert!(session.is_authenticated());
    assert_eq!(session.user().expect("user").email, "a@example.com");
}

#[test]
fn reopen_with_rejected_credential_ends_unauthenticated() {
    let dir = TempDir::new().expect("tempdir");

    {
        let mut session = open_session(&dir);
        session.login("tok-gone".to_string()).expect("login");
    }

    let api = FakeApi::new();
    let mut session = open_session(&dir);
    session.resolve_with(&api).expect("resolve");
    assert!(!session.is_authenticated());
    assert!(!session.loading());

    let store = SessionStore::open_at(dir.path()).expect("reopen store");
    assert!(store.get_credential().expect("get credential").is_none());
}

#[test]
fn login_with_resolves_synchronously() {
    let dir = TempDir::new().expect("tempdir");
    let mut api = FakeApi::new();
    api.grant("tok-a", "a@example.com");

    let mut session = open_session(&dir);
    session
        .login_with(&api, "tok-a".to_string())
        .expect("login with");
    assert!(session.is_authenticated());
    assert!(!session.loading());
}

use std::sync::mpsc::{self, Receiver, Sender};

use crate::entry::{EntryFlow, EntryState};
use crate::model::DEFAULT_SERVER_URL;
use crate::remote::AuthClient;
use crate::session::Session;
use crate::store::SessionStore;

use super::input::Input;
use super::net::{self, NetEvent};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum FormField {
    Email,
    Password,
}

pub(super) struct App {
    pub(super) session: Option<Session>,
    pub(super) session_err: Option<String>,
    pub(super) client: Option<AuthClient>,

    pub(super) entry: Option<EntryFlow>,
    pub(super) focus: FormField,
    pub(super) email_input: Input,
    pub(super) password_input: Input,

    // Stand-in for the external provider widget: an inline prompt for the
    // identity assertion.
    pub(super) assertion_input: Option<Input>,

    pub(super) status: Option<String>,

    pub(super) net_tx: Sender<NetEvent>,
    pub(super) net_rx: Receiver<NetEvent>,

    pub(super) quit: bool,
}

impl App {
    pub(super) fn load(opts: &crate::tui::TuiRunOptions) -> Self {
        let (net_tx, net_rx) = mpsc::channel();
        let mut app = Self {
            session: None,
            session_err: None,
            client: None,
            entry: None,
            focus: FormField::Email,
            email_input: Input::default(),
            password_input: Input::default(),
            assertion_input: None,
            status: None,
            net_tx,
            net_rx,
            quit: false,
        };

        let store = match &opts.profile_dir {
            Some(dir) => SessionStore::open_at(dir),
            None => SessionStore::open_default(),
        };
        let store = match store {
            Ok(s) => s,
            Err(err) => {
                app.session_err = Some(format!("open profile: {:#}", err));
                return app;
            }
        };

        let base_url = store
            .read_config()
            .ok()
            .and_then(|c| c.server)
            .map(|s| s.base_url)
            .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());
        match AuthClient::new(&base_url) {
            Ok(client) => app.client = Some(client),
            Err(err) => app.session_err = Some(format!("build client: {:#}", err)),
        }

        match Session::open(store) {
            Ok(session) => app.session = Some(session),
            Err(err) => {
                app.session_err = Some(format!("open session: {:#}", err));
                return app;
            }
        }

        if app.session.as_ref().is_some_and(Session::loading) {
            // A persisted credential restores by resolving immediately.
            app.kick_resolution();
        } else {
            app.entry = Some(EntryFlow::new());
        }
        app
    }

    pub(super) fn push_status(&mut self, msg: impl Into<String>) {
        self.status = Some(msg.into());
    }

    /// Starts identity resolution for the current credential on a worker
    /// thread.
    pub(super) fn kick_resolution(&mut self) {
        let Some(client) = self.client.clone() else {
            self.push_status("no auth server configured");
            return;
        };
        if let Some(session) = self.session.as_mut()
            && let Some(ticket) = session.begin_resolution()
        {
            net::spawn_resolution(self.net_tx.clone(), client, ticket);
        }
    }

    /// Drains completed network calls and folds them into the entry flow or
    /// the session.
    pub(super) fn pump_net_events(&mut self) {
        while let Ok(event) = self.net_rx.try_recv() {
            match event {
                NetEvent::Entry(outcome) => self.on_entry_outcome(outcome),
                NetEvent::Resolution(ticket, outcome) => {
                    let failure = outcome.as_ref().err().map(|e| e.message().to_string());
                    let Some(session) = self.session.as_mut() else {
                        continue;
                    };
                    match session.apply_resolution(&ticket, outcome) {
                        Ok(crate::session::ResolveStatus::Stale) => {}
                        Ok(crate::session::ResolveStatus::Applied) => {
                            if let Some(msg) = failure {
                                self.push_status(format!("signed out: {msg}"));
                                self.entry = Some(EntryFlow::new());
                            }
                        }
                        Err(err) => self.push_status(format!("session: {:#}", err)),
                    }
                }
            }
        }
    }

    fn on_entry_outcome(&mut self, outcome: Result<String, crate::remote::AuthError>) {
        let Some(flow) = self.entry.as_mut() else {
            return;
        };
        flow.complete(outcome);
        if flow.state() != EntryState::Authenticated {
            return;
        }

        let account_type = flow.account_type();
        let Some(credential) = flow.take_credential() else {
            return;
        };
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let ticket = match session.login(credential) {
            Ok(t) => t,
            Err(err) => {
                self.push_status(format!("login: {:#}", err));
                return;
            }
        };
        if let Err(err) = session.set_account_type(account_type) {
            self.push_status(format!("account type: {:#}", err));
        }
        self.entry = None;
        self.email_input.clear();
        self.password_input.clear();
        self.assertion_input = None;

        let Some(client) = self.client.clone() else {
            self.push_status("no auth server configured");
            return;
        };
        net::spawn_resolution(self.net_tx.clone(), client, ticket);
    }

    pub(super) fn submit_entry_form(&mut self) {
        let Some(flow) = self.entry.as_mut() else {
            return;
        };
        flow.set_email(self.email_input.buf.clone());
        flow.set_password(self.password_input.buf.clone());
        let Some(req) = flow.submit() else {
            return;
        };
        let Some(client) = self.client.clone() else {
            flow.complete(Err(crate::remote::AuthError::Network(
                "no auth server configured".to_string(),
            )));
            return;
        };
        net::spawn_entry_request(self.net_tx.clone(), client, req);
    }

    pub(super) fn submit_assertion(&mut self) {
        let Some(input) = self.assertion_input.take() else {
            return;
        };
        let assertion = input.buf.trim().to_string();
        if assertion.is_empty() {
            self.push_status("identity exchange cancelled (empty assertion)");
            return;
        }
        let Some(flow) = self.entry.as_mut() else {
            return;
        };
        let Some(req) = flow.begin_exchange(assertion) else {
            return;
        };
        let Some(client) = self.client.clone() else {
            flow.complete(Err(crate::remote::AuthError::Network(
                "no auth server configured".to_string(),
            )));
            return;
        };
        net::spawn_entry_request(self.net_tx.clone(), client, req);
    }

    pub(super) fn logout(&mut self) {
        if let Some(session) = self.session.as_mut() {
            match session.logout() {
                Ok(()) => {
                    self.push_status("signed out");
                    self.entry = Some(EntryFlow::new());
                    self.email_input.clear();
                    self.password_input.clear();
                }
                Err(err) => self.push_status(format!("logout: {:#}", err)),
            }
        }
    }
}

use crate::model::AccountType;
use crate::remote::AuthError;

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryMode {
    Login,
    Register,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryState {
    SelectingMode,
    CredentialEntry(EntryMode),
    ExchangePending,
    Authenticated,
}

/// Network call requested by the flow. The driver performs it off the UI
/// thread and feeds the result back through [`EntryFlow::complete`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EntryRequest {
    Login { email: String, password: String },
    Register { email: String, password: String },
    Exchange { assertion: String },
}

/// State machine for the pre-authentication screens: account-type and mode
/// selection, the credential form, and the provider-identity exchange. All
/// three paths converge on `Authenticated` with a bearer credential that is
/// then handed to the session.
///
/// No I/O happens here; `submit`/`begin_exchange` describe the call to make
/// and `complete` folds its outcome back in.
pub struct EntryFlow {
    state: EntryState,
    account_type: AccountType,
    email: String,
    password: String,
    error: Option<String>,
    in_flight: bool,
    credential: Option<String>,
}

impl Default for EntryFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl EntryFlow {
    pub fn new() -> Self {
        Self {
            state: EntryState::SelectingMode,
            account_type: AccountType::Metatrader,
            email: String::new(),
            password: String::new(),
            error: None,
            in_flight: false,
            credential: None,
        }
    }

    pub fn state(&self) -> EntryState {
        self.state
    }

    pub fn account_type(&self) -> AccountType {
        self.account_type
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn set_email(&mut self, email: String) {
        self.email = email;
    }

    pub fn set_password(&mut self, password: String) {
        self.password = password;
    }

    /// Cycles through the account types on the selection screen.
    pub fn cycle_account_type(&mut self, forward: bool) {
        if self.state != EntryState::SelectingMode {
            return;
        }
        let n = AccountType::ALL.len();
        let i = AccountType::ALL
            .iter()
            .position(|t| *t == self.account_type)
            .unwrap_or(0);
        let next = if forward { (i + 1) % n } else { (i + n - 1) % n };
        self.account_type = AccountType::ALL[next];
    }

    pub fn choose_login(&mut self) {
        if self.state == EntryState::SelectingMode {
            self.state = EntryState::CredentialEntry(EntryMode::Login);
            self.error = None;
        }
    }

    pub fn choose_register(&mut self) {
        if self.state == EntryState::SelectingMode {
            self.state = EntryState::CredentialEntry(EntryMode::Register);
            self.error = None;
        }
    }

    /// Login/register toggle inside the credential form. Keeps the entered
    /// email, clears the password and any error.
    pub fn toggle_mode(&mut self) {
        if self.in_flight {
            return;
        }
        if let EntryState::CredentialEntry(mode) = self.state {
            let flipped = match mode {
                EntryMode::Login => EntryMode::Register,
                EntryMode::Register => EntryMode::Login,
            };
            self.state = EntryState::CredentialEntry(flipped);
            self.password.clear();
            self.error = None;
        }
    }

    /// Back to the selection screen, discarding entered credentials and any
    /// error. No side effects.
    pub fn back(&mut self) {
        if self.in_flight {
            return;
        }
        if matches!(self.state, EntryState::CredentialEntry(_)) {
            self.state = EntryState::SelectingMode;
            self.email.clear();
            self.password.clear();
            self.error = None;
        }
    }

    /// Starts the provider-identity path with the assertion produced by the
    /// external provider handshake. Provider identities are email accounts,
    /// so the account type is fixed to gmail.
    pub fn begin_exchange(&mut self, assertion: String) -> Option<EntryRequest> {
        if self.state != EntryState::SelectingMode || self.in_flight {
            return None;
        }
        self.account_type = AccountType::Gmail;
        self.state = EntryState::ExchangePending;
        self.in_flight = true;
        self.error = None;
        Some(EntryRequest::Exchange { assertion })
    }

    /// Validates and submits the credential form. Returns `None` when the
    /// form is not submittable (wrong state, a request already in flight,
    /// or local validation failed with an inline error).
    pub fn submit(&mut self) -> Option<EntryRequest> {
        let EntryState::CredentialEntry(mode) = self.state else {
            return None;
        };
        if self.in_flight {
            return None;
        }

        let email = self.email.trim().to_string();
        if email.is_empty() || !email.contains('@') {
            self.error = Some("enter a valid email address".to_string());
            return None;
        }
        if self.password.is_empty() {
            self.error = Some("enter a password".to_string());
            return None;
        }
        if mode == EntryMode::Register && self.password.chars().count() < MIN_PASSWORD_LEN {
            self.error = Some(format!(
                "password must be at least {MIN_PASSWORD_LEN} characters"
            ));
            return None;
        }

        self.in_flight = true;
        self.error = None;
        let password = self.password.clone();
        Some(match mode {
            EntryMode::Login => EntryRequest::Login { email, password },
            EntryMode::Register => EntryRequest::Register { email, password },
        })
    }

    /// Folds the outcome of the in-flight request back into the flow.
    /// Success is terminal; a recoverable failure keeps the credential form
    /// in place with an inline message; an exchange failure falls back to
    /// the selection screen.
    pub fn complete(&mut self, outcome: Result<String, AuthError>) {
        if !self.in_flight {
            return;
        }
        self.in_flight = false;
        match outcome {
            Ok(credential) => {
                self.credential = Some(credential);
                self.state = EntryState::Authenticated;
                self.error = None;
            }
            Err(err) => {
                if self.state == EntryState::ExchangePending {
                    self.state = EntryState::SelectingMode;
                }
                self.error = Some(err.message().to_string());
            }
        }
    }

    /// The credential produced by a completed flow. Present only in the
    /// `Authenticated` state.
    pub fn take_credential(&mut self) -> Option<String> {
        self.credential.take()
    }
}

#[cfg(test)]
#[path = "tests/entry/flow_tests.rs"]
mod tests;

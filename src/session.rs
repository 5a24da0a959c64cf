use anyhow::{Context, Result};

use crate::model::{AccountType, Subscription, User, UserProfile};
use crate::remote::{AuthApi, AuthError};
use crate::store::SessionStore;

/// Staleness guard for an in-flight identity resolution. Carries the
/// credential to resolve and the session epoch it was issued under; results
/// for a superseded epoch are discarded on arrival.
#[derive(Clone, Debug)]
pub struct ResolutionTicket {
    epoch: u64,
    credential: String,
}

impl ResolutionTicket {
    pub fn credential(&self) -> &str {
        &self.credential
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResolveStatus {
    Applied,
    Stale,
}

/// The single owned session aggregate: current credential, its durable
/// persistence, and the identity/entitlement attached to it.
///
/// Observable invariant: either credential, user and subscription are all
/// set, or none are. The only exception is the `loading` window while a
/// resolution is in flight. Identity-resolution failure of any kind clears
/// the whole session; an unresolvable credential is never shown as
/// authenticated.
pub struct Session {
    store: SessionStore,
    credential: Option<String>,
    user: Option<User>,
    subscription: Option<Subscription>,
    account_type: Option<AccountType>,
    loading: bool,
    epoch: u64,
}

impl Session {
    /// Opens the session over the store. A persisted credential puts the
    /// session into the loading state until a resolution completes.
    pub fn open(store: SessionStore) -> Result<Self> {
        let credential = store.get_credential()?;
        let account_type = store.get_account_type()?;
        let loading = credential.is_some();
        Ok(Self {
            store,
            credential,
            user: None,
            subscription: None,
            account_type,
            loading,
            epoch: 0,
        })
    }

    pub fn credential(&self) -> Option<&str> {
        self.credential.as_deref()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn subscription(&self) -> Option<&Subscription> {
        self.subscription.as_ref()
    }

    pub fn account_type(&self) -> Option<AccountType> {
        self.account_type
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn is_authenticated(&self) -> bool {
        self.credential.is_some() && self.user.is_some()
    }

    pub fn set_account_type(&mut self, account_type: AccountType) -> Result<()> {
        self.store
            .set_account_type(account_type)
            .context("persist account type")?;
        self.account_type = Some(account_type);
        Ok(())
    }

    /// Installs a new credential. The durable write completes before this
    /// returns, so a restart immediately afterwards still observes the
    /// credential. Supersedes any in-flight resolution (epoch bump) and
    /// returns the ticket for the resolution the caller must now run.
    pub fn login(&mut self, credential: String) -> Result<ResolutionTicket> {
        self.store
            .set_credential(&credential)
            .context("persist session credential")?;
        self.credential = Some(credential.clone());
        self.user = None;
        self.subscription = None;
        self.loading = true;
        self.epoch += 1;
        Ok(ResolutionTicket {
            epoch: self.epoch,
            credential,
        })
    }

    /// Starts a resolution for the current credential, if any.
    pub fn begin_resolution(&mut self) -> Option<ResolutionTicket> {
        match &self.credential {
            Some(credential) => {
                self.loading = true;
                Some(ResolutionTicket {
                    epoch: self.epoch,
                    credential: credential.clone(),
                })
            }
            None => {
                self.loading = false;
                None
            }
        }
    }

    /// Applies the outcome of an identity fetch. Last write wins: a ticket
    /// from a superseded epoch is ignored entirely. Success installs user
    /// and subscription together; any failure clears the session, including
    /// the persisted credential.
    pub fn apply_resolution(
        &mut self,
        ticket: &ResolutionTicket,
        outcome: Result<UserProfile, AuthError>,
    ) -> Result<ResolveStatus> {
        if ticket.epoch != self.epoch {
            return Ok(ResolveStatus::Stale);
        }
        match outcome {
            Ok(profile) => {
                let (user, subscription) = profile.split();
                self.user = Some(user);
                self.subscription = Some(subscription);
                self.loading = false;
            }
            Err(_) => {
                self.logout()?;
            }
        }
        Ok(ResolveStatus::Applied)
    }

    /// Clears the session: durable credential removed, identity dropped,
    /// any in-flight resolution superseded. Idempotent.
    pub fn logout(&mut self) -> Result<()> {
        self.store
            .clear_credential()
            .context("clear session credential")?;
        self.credential = None;
        self.user = None;
        self.subscription = None;
        self.account_type = None;
        self.loading = false;
        self.epoch += 1;
        Ok(())
    }

    /// Synchronous resolution for blocking callers (CLI). Resolution
    /// failure folds into the unauthenticated state rather than erroring.
    pub fn resolve_with(&mut self, api: &dyn AuthApi) -> Result<()> {
        if let Some(ticket) = self.begin_resolution() {
            let outcome = api.me(ticket.credential());
            self.apply_resolution(&ticket, outcome)?;
        }
        Ok(())
    }

    /// Synchronous login-and-resolve for blocking callers.
    pub fn login_with(&mut self, api: &dyn AuthApi, credential: String) -> Result<()> {
        let ticket = self.login(credential)?;
        let outcome = api.me(ticket.credential());
        self.apply_resolution(&ticket, outcome)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/session/lifecycle_tests.rs"]
mod tests;

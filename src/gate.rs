//! Pure derivation from entitlement to UI capabilities. No I/O, no network.

use crate::model::{AccountType, Subscription};

/// Days-remaining threshold at or below which an active subscription is
/// shown as expiring.
pub const EXPIRING_SOON_DAYS: u32 = 2;

/// Which panels and actions the current session may use.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Capabilities {
    pub can_trade: bool,
    pub wallet_panel: bool,
    pub trade_panel: bool,
    pub signals_panel: bool,
    pub news_panel: bool,
}

impl Capabilities {
    /// Entitlement comes from the subscription (authoritative); the account
    /// type layers an account binding on top: gmail accounts have no broker
    /// link and stay view-only regardless of entitlement. Signals and news
    /// are visible to every authenticated session.
    pub fn derive(subscription: &Subscription, account_type: AccountType) -> Self {
        let can_trade = subscription.is_active() && account_type.supports_trading();
        Self {
            can_trade,
            wallet_panel: can_trade,
            trade_panel: can_trade,
            signals_panel: true,
            news_panel: true,
        }
    }
}

/// Three-way subscription badge classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Badge {
    Ok,
    Expiring,
    Expired,
}

impl Badge {
    pub fn classify(subscription: &Subscription) -> Self {
        if !subscription.is_active() {
            return Badge::Expired;
        }
        if subscription.days_remaining <= EXPIRING_SOON_DAYS {
            return Badge::Expiring;
        }
        Badge::Ok
    }

    pub fn label(self) -> &'static str {
        match self {
            Badge::Ok => "ok",
            Badge::Expiring => "expiring",
            Badge::Expired => "expired",
        }
    }
}

#[cfg(test)]
#[path = "tests/gate/capability_tests.rs"]
mod tests;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionPlan {
    Trial,
    Premium,
    Enterprise,
}

impl SubscriptionPlan {
    pub fn label(self) -> &'static str {
        match self {
            SubscriptionPlan::Trial => "trial",
            SubscriptionPlan::Premium => "premium",
            SubscriptionPlan::Enterprise => "enterprise",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    Active,
    Expired,
    Canceled,
}

/// Authenticated identity as returned by `GET /me`. Never constructed by the
/// UI; owned by the session and read-only to consumers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub role: Role,
}

/// Entitlement attached to a user. `status` and `days_remaining` come from
/// the identity endpoint and are authoritative; clients must not recompute
/// them, only apply display thresholds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    pub plan: SubscriptionPlan,
    pub status: SubscriptionStatus,
    pub days_remaining: u32,
    pub end_date: String,
}

impl Subscription {
    pub fn is_active(&self) -> bool {
        self.status == SubscriptionStatus::Active
    }
}

/// Wire shape of `GET /me`: user and subscription delivered together so the
/// session can install both atomically.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub role: Role,
    pub subscription: Subscription,
}

impl UserProfile {
    pub fn split(self) -> (User, Subscription) {
        (
            User {
                id: self.id,
                email: self.email,
                role: self.role,
            },
            self.subscription,
        )
    }
}

/// Trading account binding chosen once at entry; immutable for the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    Metatrader,
    Binance,
    Ctrader,
    Gmail,
}

impl AccountType {
    pub const ALL: [AccountType; 4] = [
        AccountType::Metatrader,
        AccountType::Binance,
        AccountType::Ctrader,
        AccountType::Gmail,
    ];

    /// Gmail accounts carry no broker link and are view-only.
    pub fn supports_trading(self) -> bool {
        !matches!(self, AccountType::Gmail)
    }

    pub fn label(self) -> &'static str {
        match self {
            AccountType::Metatrader => "MetaTrader",
            AccountType::Binance => "Binance",
            AccountType::Ctrader => "cTrader",
            AccountType::Gmail => "Gmail",
        }
    }
}

impl std::str::FromStr for AccountType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "metatrader" => Ok(AccountType::Metatrader),
            "binance" => Ok(AccountType::Binance),
            "ctrader" => Ok(AccountType::Ctrader),
            "gmail" => Ok(AccountType::Gmail),
            other => Err(anyhow::anyhow!(
                "unknown account type {:?} (expected metatrader, binance, ctrader or gmail)",
                other
            )),
        }
    }
}

mod identity;
mod profile;

pub use self::identity::{
    AccountType, Role, Subscription, SubscriptionPlan, SubscriptionStatus, User, UserProfile,
};
pub use self::profile::{DEFAULT_SERVER_URL, ProfileConfig, ServerConfig, SessionState};

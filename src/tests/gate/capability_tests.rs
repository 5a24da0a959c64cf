use super::*;

use crate::model::{SubscriptionPlan, SubscriptionStatus};

fn subscription(status: SubscriptionStatus, days_remaining: u32) -> Subscription {
    Subscription {
        plan: SubscriptionPlan::Premium,
        status,
        days_remaining,
        end_date: "2026-09-01".to_string(),
    }
}

#[test]
fn active_trading_account_gets_all_panels() {
    let sub = subscription(SubscriptionStatus::Active, 14);
    let caps = Capabilities::derive(&sub, AccountType::Metatrader);
    assert!(caps.can_trade);
    assert!(caps.wallet_panel);
    assert!(caps.trade_panel);
    assert!(caps.signals_panel);
    assert!(caps.news_panel);
}

#[test]
fn gmail_account_is_view_only_even_when_active() {
    let sub = subscription(SubscriptionStatus::Active, 14);
    let caps = Capabilities::derive(&sub, AccountType::Gmail);
    assert!(!caps.can_trade);
    assert!(!caps.wallet_panel);
    assert!(!caps.trade_panel);
    assert!(caps.signals_panel);
    assert!(caps.news_panel);
}

#[test]
fn expired_subscription_blocks_trading_everywhere() {
    let sub = subscription(SubscriptionStatus::Expired, 0);
    for ty in AccountType::ALL {
        let caps = Capabilities::derive(&sub, ty);
        assert!(!caps.can_trade, "{}", ty.label());
        assert!(caps.signals_panel);
        assert!(caps.news_panel);
    }
}

#[test]
fn canceled_subscription_blocks_trading() {
    let sub = subscription(SubscriptionStatus::Canceled, 10);
    let caps = Capabilities::derive(&sub, AccountType::Binance);
    assert!(!caps.can_trade);
}

#[test]
fn badge_ok_above_expiring_threshold() {
    let sub = subscription(SubscriptionStatus::Active, EXPIRING_SOON_DAYS + 1);
    assert_eq!(Badge::classify(&sub), Badge::Ok);
}

#[test]
fn badge_expiring_at_threshold_and_below() {
    assert_eq!(
        Badge::classify(&subscription(SubscriptionStatus::Active, EXPIRING_SOON_DAYS)),
        Badge::Expiring
    );
    assert_eq!(
        Badge::classify(&subscription(SubscriptionStatus::Active, 1)),
        Badge::Expiring
    );
}

#[test]
fn badge_expired_for_inactive_status_regardless_of_days() {
    assert_eq!(
        Badge::classify(&subscription(SubscriptionStatus::Expired, 0)),
        Badge::Expired
    );
    // Status is authoritative; days are not re-derived client-side.
    assert_eq!(
        Badge::classify(&subscription(SubscriptionStatus::Canceled, 30)),
        Badge::Expired
    );
}

#[test]
fn expiring_subscription_still_trades() {
    let sub = subscription(SubscriptionStatus::Active, 1);
    let caps = Capabilities::derive(&sub, AccountType::Ctrader);
    assert_eq!(Badge::classify(&sub), Badge::Expiring);
    assert!(caps.can_trade);
}

#[test]
fn badge_labels() {
    assert_eq!(Badge::Ok.label(), "ok");
    assert_eq!(Badge::Expiring.label(), "expiring");
    assert_eq!(Badge::Expired.label(), "expired");
}

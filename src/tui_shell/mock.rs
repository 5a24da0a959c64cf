//! Static placeholder content for the presentational panels. None of this is
//! real market data; the panels exist to show what the capability gate
//! exposes.

pub(super) struct Signal {
    pub(super) pair: &'static str,
    pub(super) side: &'static str,
    pub(super) confidence: u8,
}

pub(super) struct Position {
    pub(super) symbol: &'static str,
    pub(super) side: &'static str,
    pub(super) size: &'static str,
    pub(super) pnl: &'static str,
}

pub(super) const WALLET_BALANCE: &str = "12,450.00 USDT";

pub(super) fn signals() -> Vec<Signal> {
    vec![
        Signal {
            pair: "EUR/USD",
            side: "BUY",
            confidence: 87,
        },
        Signal {
            pair: "BTC/USDT",
            side: "SELL",
            confidence: 74,
        },
        Signal {
            pair: "XAU/USD",
            side: "BUY",
            confidence: 69,
        },
        Signal {
            pair: "GBP/JPY",
            side: "SELL",
            confidence: 62,
        },
    ]
}

pub(super) fn positions() -> Vec<Position> {
    vec![
        Position {
            symbol: "EUR/USD",
            side: "long",
            size: "0.50",
            pnl: "+124.30",
        },
        Position {
            symbol: "BTC/USDT",
            side: "short",
            size: "0.10",
            pnl: "-18.75",
        },
    ]
}

pub(super) fn news() -> Vec<&'static str> {
    vec![
        "Fed leaves rates unchanged, signals one more cut this year",
        "EUR rallies after stronger-than-expected PMI prints",
        "Bitcoin ETF inflows hit a three-week high",
        "Gold steadies as dollar retreats from session highs",
    ]
}

//! Teacher earnings arithmetic.
//!
//! The platform takes a flat 10% fee on completed payments, applied at
//! read time when the earnings report is assembled. Nothing derived here
//! is ever persisted.

/// Platform fee on completed payments, in percent.
pub const PLATFORM_FEE_PERCENT: i64 = 10;

/// Earnings split for a gross amount in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct EarningsSplit {
    pub gross_cents: i64,
    pub fee_cents: i64,
    pub net_cents: i64,
}

/// Split a gross amount into platform fee and teacher net.
///
/// Integer arithmetic, fee truncated toward zero; the teacher keeps the
/// remainder cent.
pub fn split_earnings(gross_cents: i64) -> EarningsSplit {
    let fee_cents = gross_cents * PLATFORM_FEE_PERCENT / 100;
    EarningsSplit {
        gross_cents,
        fee_cents,
        net_cents: gross_cents - fee_cents,
    }
}

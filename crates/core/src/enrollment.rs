//! Enrollment outcome and payment derivations.
//!
//! There is no real payment gateway: the payment record's initial status is
//! derived purely from the chosen method. Bank transfers start `pending`
//! (the platform waits for the transfer to arrive); every other method is
//! treated as settled immediately. The enrollment itself is granted either
//! way -- a bank-transfer student gets access before the money clears,
//! which the platform accepts deliberately.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreError;

/// Payment method asserted by the client at enrollment time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Free,
    CreditCard,
    BankTransfer,
}

impl PaymentMethod {
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "free" => Ok(Self::Free),
            "credit_card" => Ok(Self::CreditCard),
            "bank_transfer" => Ok(Self::BankTransfer),
            other => Err(CoreError::Validation(format!(
                "Unknown payment method '{other}'. Must be one of: free, credit_card, bank_transfer"
            ))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::CreditCard => "credit_card",
            Self::BankTransfer => "bank_transfer",
        }
    }
}

/// Settlement state of a payment record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
    Refunded,
}

impl PaymentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Refunded => "refunded",
        }
    }
}

/// The status a freshly created payment starts in, by method.
pub fn initial_payment_status(method: PaymentMethod) -> PaymentStatus {
    match method {
        PaymentMethod::BankTransfer => PaymentStatus::Pending,
        _ => PaymentStatus::Completed,
    }
}

/// Enrollment result tag returned to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnrollmentOutcome {
    /// Immediate access.
    Active,
    /// Enrolled, but the bank transfer has not settled yet.
    PendingPayment,
}

impl EnrollmentOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::PendingPayment => "pending_payment",
        }
    }
}

/// Outcome tag for an enrollment paid with the given method.
///
/// Free courses never create a payment record, so they are always `Active`
/// regardless of any method the client sends.
pub fn enrollment_outcome(price_cents: i64, method: PaymentMethod) -> EnrollmentOutcome {
    if price_cents > 0 && method == PaymentMethod::BankTransfer {
        EnrollmentOutcome::PendingPayment
    } else {
        EnrollmentOutcome::Active
    }
}

/// A priced enrollment must assert a non-free payment method.
pub fn validate_paid_method(method: PaymentMethod) -> Result<(), CoreError> {
    match method {
        PaymentMethod::Free => Err(CoreError::Validation(
            "A priced course requires a payment method".into(),
        )),
        _ => Ok(()),
    }
}

/// Generate a unique payment transaction id.
pub fn generate_transaction_id() -> String {
    format!("TXN-{}", Uuid::new_v4())
}

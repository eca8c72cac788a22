//! Payment entity model and DTOs.

use campus_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Payment row. Immutable once created -- there is no refund or update
/// path; `status` is fixed at creation from the payment method.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Payment {
    pub id: DbId,
    pub user_id: DbId,
    /// Nulled if the course is later deleted (the log entry survives).
    pub course_id: Option<DbId>,
    pub amount_cents: i64,
    pub method: String,
    pub status: String,
    /// Opaque method-specific payload asserted by the client.
    pub details: serde_json::Value,
    pub transaction_id: String,
    pub created_at: Timestamp,
}

/// DTO for creating a payment inside the enrollment transaction.
#[derive(Debug)]
pub struct NewPayment {
    pub user_id: DbId,
    pub course_id: DbId,
    pub amount_cents: i64,
    pub method: String,
    pub status: String,
    pub details: serde_json::Value,
    pub transaction_id: String,
}

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Ledger transaction model. `related_id` is a loose reference whose
/// meaning depends on `transaction_type` (order id for purchases, product
/// id for inventory changes).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Transaction {
    pub id: i64,
    pub transaction_type: String,
    pub date: String,
    pub amount: Option<f64>,
    pub related_id: Option<i64>,
    pub description: Option<String>,
    pub created_by: i64,
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewTransaction {
    pub transaction_type: String,
    pub date: String,
    pub amount: Option<f64>,
    pub related_id: Option<i64>,
    pub description: Option<String>,
    pub created_by: i64,
}

/// Partial update for a transaction; only supplied fields are written.
/// The transactions table carries no `updated_at` column, so nothing is
/// stamped.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransactionChanges {
    pub transaction_type: Option<String>,
    pub date: Option<String>,
    pub amount: Option<f64>,
    pub related_id: Option<i64>,
    pub description: Option<String>,
}

impl TransactionChanges {
    pub fn is_empty(&self) -> bool {
        self.transaction_type.is_none()
            && self.date.is_none()
            && self.amount.is_none()
            && self.related_id.is_none()
            && self.description.is_none()
    }
}

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Database inventory model, one row per stocked product
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Inventory {
    pub id: i64,
    pub product_id: i64,
    pub quantity: i64,
    pub location: Option<String>,
    pub last_updated: Option<String>,
}

/// Inventory update request; writes the row and appends a ledger entry
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInventoryRequest {
    pub product_id: i64,
    pub quantity: i64,
    pub location: Option<String>,
    pub user_id: i64,
}

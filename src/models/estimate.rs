use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Estimate workflow status as stored in the `status` column
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum EstimateStatus {
    Pending,
    Packed,
}

impl EstimateStatus {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "packed" => Some(Self::Packed),
            _ => None,
        }
    }
}

/// Database estimate model. `total_amount` is stored as supplied by the
/// caller and never recomputed from the line items.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Estimate {
    pub id: i64,
    pub estimate_no: String,
    pub date: String,
    pub order_no: Option<String>,
    pub customer_name: String,
    pub assigned_agent: String,
    pub status: EstimateStatus,
    pub total_amount: f64,
    pub created_by: i64,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Estimate line item joined with product display fields
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EstimateProductDetail {
    pub id: i64,
    pub estimate_id: i64,
    pub product_id: i64,
    pub quantity: i64,
    pub rate: f64,
    pub amount: f64,
    #[serde(rename = "productCode")]
    pub product_code: String,
    pub name: String,
    pub size: Option<String>,
    pub category: Option<String>,
}

/// Estimate with its line items attached
#[derive(Debug, Clone, Serialize)]
pub struct EstimateWithProducts {
    #[serde(flatten)]
    pub estimate: Estimate,
    pub products: Vec<EstimateProductDetail>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewEstimateProduct {
    pub product_id: i64,
    pub quantity: i64,
    pub rate: f64,
    pub amount: f64,
}

/// Payload for creating or replacing an estimate. `status` arrives as a
/// plain string so the request layer can reject unknown values with a 400.
#[derive(Debug, Clone, Deserialize)]
pub struct EstimatePayload {
    pub estimate_no: String,
    pub date: String,
    pub order_no: Option<String>,
    pub customer_name: String,
    pub assigned_agent: String,
    pub status: Option<String>,
    pub total_amount: f64,
    pub created_by: Option<i64>,
    #[serde(default)]
    pub products: Vec<NewEstimateProduct>,
}

/// Validated form of `EstimatePayload` handed to the store
#[derive(Debug, Clone)]
pub struct NewEstimate {
    pub estimate_no: String,
    pub date: String,
    pub order_no: String,
    pub customer_name: String,
    pub assigned_agent: String,
    pub status: EstimateStatus,
    pub total_amount: f64,
    pub created_by: i64,
    pub products: Vec<NewEstimateProduct>,
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: String,
}

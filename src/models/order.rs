use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Database order model
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Order {
    pub id: i64,
    pub order_number: String,
    pub date: String,
    pub vendor_id: i64,
    pub total: f64,
    pub status: String,
    pub payment_status: Option<String>,
    pub payment_method: Option<String>,
    pub created_by: i64,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Order item joined with product display fields; `total` is
/// caller-computed
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OrderItemDetail {
    pub id: i64,
    pub order_id: i64,
    pub product_id: i64,
    pub quantity: i64,
    pub price: f64,
    pub total: f64,
    pub product_name: String,
    pub product_code: String,
}

/// Order joined with vendor fields and its item rows
#[derive(Debug, Clone, Serialize)]
pub struct DetailedOrder {
    #[serde(flatten)]
    pub order: Order,
    pub vendor_name: Option<String>,
    pub vendor_contact: Option<String>,
    pub items: Vec<OrderItemDetail>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewOrderItem {
    pub product_id: i64,
    pub quantity: i64,
    pub price: f64,
    pub total: f64,
}

/// Payload for the composite create-order operation
#[derive(Debug, Clone, Deserialize)]
pub struct NewOrder {
    pub order_number: String,
    pub date: String,
    pub vendor_id: i64,
    pub total: f64,
    pub status: String,
    pub payment_status: Option<String>,
    pub payment_method: Option<String>,
    pub created_by: i64,
    #[serde(default)]
    pub items: Vec<NewOrderItem>,
}

/// Partial update for an order; only supplied fields are written
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderChanges {
    pub order_number: Option<String>,
    pub date: Option<String>,
    pub vendor_id: Option<i64>,
    pub total: Option<f64>,
    pub status: Option<String>,
    pub payment_status: Option<String>,
    pub payment_method: Option<String>,
}

impl OrderChanges {
    pub fn is_empty(&self) -> bool {
        self.order_number.is_none()
            && self.date.is_none()
            && self.vendor_id.is_none()
            && self.total.is_none()
            && self.status.is_none()
            && self.payment_status.is_none()
            && self.payment_method.is_none()
    }
}

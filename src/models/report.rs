use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Optional filters for the sales report, as query parameters
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesReportFilters {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub vendor_id: Option<i64>,
    pub status: Option<String>,
}

/// One sales report row: orders grouped by calendar date
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SalesReportRow {
    pub date: String,
    pub count: i64,
    pub total: f64,
}

/// Per-category inventory summary row
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InventoryCategorySummary {
    pub category: Option<String>,
    pub count: i64,
    pub value: f64,
}

/// Product detail row inside an inventory report category
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InventoryReportItem {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub size: Option<String>,
    pub category: Option<String>,
    pub price: f64,
    pub quantity: i64,
    pub location: Option<String>,
}

/// Inventory report category with its detailed items
#[derive(Debug, Clone, Serialize)]
pub struct InventoryReportCategory {
    #[serde(flatten)]
    pub summary: InventoryCategorySummary,
    pub items: Vec<InventoryReportItem>,
}

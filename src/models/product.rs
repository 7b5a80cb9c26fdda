use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Database product model
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub size: Option<String>,
    pub category: Option<String>,
    pub price: f64,
    pub cost: Option<f64>,
    pub description: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Product joined with its inventory row, where one exists
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProductWithInventory {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub size: Option<String>,
    pub category: Option<String>,
    pub price: f64,
    pub cost: Option<f64>,
    pub description: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub quantity: Option<i64>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewProduct {
    pub code: String,
    pub name: String,
    pub size: Option<String>,
    pub category: Option<String>,
    pub price: f64,
    pub cost: Option<f64>,
    pub description: Option<String>,
}

/// Partial update for a product; only supplied fields are written
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductChanges {
    pub code: Option<String>,
    pub name: Option<String>,
    pub size: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
    pub cost: Option<f64>,
    pub description: Option<String>,
}

impl ProductChanges {
    pub fn is_empty(&self) -> bool {
        self.code.is_none()
            && self.name.is_none()
            && self.size.is_none()
            && self.category.is_none()
            && self.price.is_none()
            && self.cost.is_none()
            && self.description.is_none()
    }
}

use chrono::Utc;

use crate::{
    db::DbPool,
    error::{AppError, Result},
    models::inventory::Inventory,
};

/// Inventory store for database operations
#[derive(Clone)]
pub struct InventoryStore {
    pool: DbPool,
}

impl InventoryStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get the inventory row for a product, if one exists
    pub async fn get_inventory_by_product(&self, product_id: i64) -> Result<Option<Inventory>> {
        let inventory =
            sqlx::query_as::<_, Inventory>("SELECT * FROM inventory WHERE product_id = ?")
                .bind(product_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(AppError::Database)?;

        Ok(inventory)
    }

    /// Write a product's quantity and location, creating the inventory row
    /// if the product has none, and append a ledger entry describing the
    /// quantity change. Both writes happen in one transaction.
    pub async fn update_inventory(
        &self,
        product_id: i64,
        quantity: i64,
        location: Option<&str>,
        user_id: i64,
    ) -> Result<Inventory> {
        let now = Utc::now().format("%Y-%m-%d %H:%M:%S").to_string();
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let existing =
            sqlx::query_as::<_, Inventory>("SELECT * FROM inventory WHERE product_id = ?")
                .bind(product_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(AppError::Database)?;

        let old_quantity = existing.as_ref().map(|inv| inv.quantity).unwrap_or(0);

        let inventory_id = match existing {
            Some(inventory) => {
                sqlx::query(
                    r#"
                    UPDATE inventory
                    SET quantity = ?, location = ?, last_updated = ?
                    WHERE id = ?
                    "#,
                )
                .bind(quantity)
                .bind(location)
                .bind(&now)
                .bind(inventory.id)
                .execute(&mut *tx)
                .await
                .map_err(AppError::Database)?;

                inventory.id
            }
            None => sqlx::query(
                r#"
                INSERT INTO inventory (product_id, quantity, location, last_updated)
                VALUES (?, ?, ?, ?)
                "#,
            )
            .bind(product_id)
            .bind(quantity)
            .bind(location)
            .bind(&now)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?
            .last_insert_rowid(),
        };

        sqlx::query(
            r#"
            INSERT INTO transactions (transaction_type, date, amount, related_id, description, created_by)
            VALUES ('inventory', ?, 0, ?, ?, ?)
            "#,
        )
        .bind(&now)
        .bind(product_id)
        .bind(format!(
            "Product quantity updated from {old_quantity} to {quantity}"
        ))
        .bind(user_id)
        .execute(&mut *tx)
        .await
        .map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;

        let updated = sqlx::query_as::<_, Inventory>("SELECT * FROM inventory WHERE id = ?")
            .bind(inventory_id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(updated)
    }
}

use chrono::Utc;
use sqlx::QueryBuilder;

use crate::{
    db::DbPool,
    error::{AppError, Result},
    models::order::{DetailedOrder, NewOrder, Order, OrderChanges, OrderItemDetail},
};

/// Order store for database operations
#[derive(Clone)]
pub struct OrderStore {
    pool: DbPool,
}

impl OrderStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a list of all orders
    pub async fn get_all_orders(&self) -> Result<Vec<Order>> {
        let orders = sqlx::query_as::<_, Order>("SELECT * FROM orders")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(orders)
    }

    /// Get an order by ID
    pub async fn get_order_by_id(&self, id: i64) -> Result<Option<Order>> {
        let order = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(order)
    }

    /// Get orders created today
    pub async fn get_today_orders(&self) -> Result<Vec<Order>> {
        let orders = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE date(date) = date('now')")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(orders)
    }

    /// Get orders with the given status
    pub async fn get_orders_by_status(&self, status: &str) -> Result<Vec<Order>> {
        let orders = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE status = ?")
            .bind(status)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(orders)
    }

    /// Get all orders with vendor fields and item rows attached
    pub async fn get_detailed_orders(&self) -> Result<Vec<DetailedOrder>> {
        let orders = self.get_all_orders().await?;

        let mut detailed = Vec::with_capacity(orders.len());
        for order in orders {
            let vendor: Option<(String, Option<String>)> =
                sqlx::query_as("SELECT name, contact_person FROM vendors WHERE id = ?")
                    .bind(order.vendor_id)
                    .fetch_optional(&self.pool)
                    .await
                    .map_err(AppError::Database)?;

            let items = sqlx::query_as::<_, OrderItemDetail>(
                r#"
                SELECT oi.id, oi.order_id, oi.product_id, oi.quantity, oi.price, oi.total,
                       p.name AS product_name, p.code AS product_code
                FROM order_items oi
                JOIN products p ON oi.product_id = p.id
                WHERE oi.order_id = ?
                "#,
            )
            .bind(order.id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)?;

            let (vendor_name, vendor_contact) = match vendor {
                Some((name, contact)) => (Some(name), contact),
                None => (None, None),
            };

            detailed.push(DetailedOrder {
                order,
                vendor_name,
                vendor_contact,
                items,
            });
        }

        Ok(detailed)
    }

    /// Create an order together with its item rows and a purchase ledger
    /// entry, atomically. Any failure rolls the whole write back.
    pub async fn create_order(&self, order: NewOrder) -> Result<Order> {
        let now = Utc::now().format("%Y-%m-%d %H:%M:%S").to_string();
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let order_id = sqlx::query(
            r#"
            INSERT INTO orders (
                order_number, date, vendor_id, total, status,
                payment_status, payment_method, created_by, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&order.order_number)
        .bind(&order.date)
        .bind(order.vendor_id)
        .bind(order.total)
        .bind(&order.status)
        .bind(&order.payment_status)
        .bind(&order.payment_method)
        .bind(order.created_by)
        .bind(&now)
        .execute(&mut *tx)
        .await
        .map_err(AppError::Database)?
        .last_insert_rowid();

        for item in &order.items {
            sqlx::query(
                r#"
                INSERT INTO order_items (order_id, product_id, quantity, price, total)
                VALUES (?, ?, ?, ?, ?)
                "#,
            )
            .bind(order_id)
            .bind(item.product_id)
            .bind(item.quantity)
            .bind(item.price)
            .bind(item.total)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;
        }

        sqlx::query(
            r#"
            INSERT INTO transactions (transaction_type, date, amount, related_id, description, created_by)
            VALUES ('purchase', ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&now)
        .bind(order.total)
        .bind(order_id)
        .bind(format!("Purchase from Vendor ID: {}", order.vendor_id))
        .bind(order.created_by)
        .execute(&mut *tx)
        .await
        .map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;

        let created = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = ?")
            .bind(order_id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(created)
    }

    /// Update the supplied fields of an order, stamping `updated_at`.
    /// Returns the refreshed row, or None if no row changed.
    pub async fn update_order(&self, id: i64, changes: OrderChanges) -> Result<Option<Order>> {
        if changes.is_empty() {
            return self.get_order_by_id(id).await;
        }

        let mut builder = QueryBuilder::new("UPDATE orders SET ");
        let mut fields = builder.separated(", ");
        if let Some(order_number) = &changes.order_number {
            fields
                .push("order_number = ")
                .push_bind_unseparated(order_number);
        }
        if let Some(date) = &changes.date {
            fields.push("date = ").push_bind_unseparated(date);
        }
        if let Some(vendor_id) = changes.vendor_id {
            fields.push("vendor_id = ").push_bind_unseparated(vendor_id);
        }
        if let Some(total) = changes.total {
            fields.push("total = ").push_bind_unseparated(total);
        }
        if let Some(status) = &changes.status {
            fields.push("status = ").push_bind_unseparated(status);
        }
        if let Some(payment_status) = &changes.payment_status {
            fields
                .push("payment_status = ")
                .push_bind_unseparated(payment_status);
        }
        if let Some(payment_method) = &changes.payment_method {
            fields
                .push("payment_method = ")
                .push_bind_unseparated(payment_method);
        }
        fields.push("updated_at = datetime('now')");
        builder.push(" WHERE id = ").push_bind(id);

        let result = builder
            .build()
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_order_by_id(id).await
    }

    /// Delete an order by ID, returning whether a row was removed.
    /// Item rows go with it (cascade); ledger entries are kept.
    pub async fn delete_order(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM orders WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(result.rows_affected() > 0)
    }
}

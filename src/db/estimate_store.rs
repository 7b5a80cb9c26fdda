use chrono::Utc;

use crate::{
    db::DbPool,
    error::{AppError, Result},
    models::estimate::{
        Estimate, EstimateProductDetail, EstimateStatus, EstimateWithProducts, NewEstimate,
    },
};

const ESTIMATE_PRODUCTS_SQL: &str = r#"
    SELECT
        ep.id, ep.estimate_id, ep.product_id, ep.quantity, ep.rate, ep.amount,
        p.code AS product_code, p.name, p.size, p.category
    FROM estimate_products ep
    JOIN products p ON ep.product_id = p.id
    WHERE ep.estimate_id = ?
"#;

/// Estimate store for database operations
#[derive(Clone)]
pub struct EstimateStore {
    pool: DbPool,
}

impl EstimateStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get all estimates, newest first, each with its line items. A failed
    /// line-item fetch degrades that estimate's product list to empty
    /// instead of failing the whole read.
    pub async fn get_estimates(&self) -> Result<Vec<EstimateWithProducts>> {
        let estimates = sqlx::query_as::<_, Estimate>("SELECT * FROM estimates ORDER BY date DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)?;

        let mut with_products = Vec::with_capacity(estimates.len());
        for estimate in estimates {
            let products = self.get_estimate_products(estimate.id).await;
            with_products.push(EstimateWithProducts { estimate, products });
        }

        Ok(with_products)
    }

    /// Get estimates with the given status, newest first, with line items
    pub async fn get_estimates_by_status(
        &self,
        status: EstimateStatus,
    ) -> Result<Vec<EstimateWithProducts>> {
        let estimates =
            sqlx::query_as::<_, Estimate>("SELECT * FROM estimates WHERE status = ? ORDER BY date DESC")
                .bind(status)
                .fetch_all(&self.pool)
                .await
                .map_err(AppError::Database)?;

        let mut with_products = Vec::with_capacity(estimates.len());
        for estimate in estimates {
            let products = self.get_estimate_products(estimate.id).await;
            with_products.push(EstimateWithProducts { estimate, products });
        }

        Ok(with_products)
    }

    /// Get an estimate by ID with its line items
    pub async fn get_estimate_by_id(&self, id: i64) -> Result<Option<EstimateWithProducts>> {
        let estimate = sqlx::query_as::<_, Estimate>("SELECT * FROM estimates WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?;

        let Some(estimate) = estimate else {
            return Ok(None);
        };

        let products = self.get_estimate_products(estimate.id).await;
        Ok(Some(EstimateWithProducts { estimate, products }))
    }

    async fn get_estimate_products(&self, estimate_id: i64) -> Vec<EstimateProductDetail> {
        match sqlx::query_as::<_, EstimateProductDetail>(ESTIMATE_PRODUCTS_SQL)
            .bind(estimate_id)
            .fetch_all(&self.pool)
            .await
        {
            Ok(products) => products,
            Err(err) => {
                tracing::warn!(estimate_id, %err, "Failed to fetch estimate products");
                Vec::new()
            }
        }
    }

    /// Insert an estimate together with its line items, atomically, and
    /// return the stored estimate with the items attached
    pub async fn add_estimate(&self, estimate: NewEstimate) -> Result<EstimateWithProducts> {
        let now = Utc::now().format("%Y-%m-%d %H:%M:%S").to_string();
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let estimate_id = sqlx::query(
            r#"
            INSERT INTO estimates (
                estimate_no, date, order_no, customer_name, assigned_agent,
                status, total_amount, created_by, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&estimate.estimate_no)
        .bind(&estimate.date)
        .bind(&estimate.order_no)
        .bind(&estimate.customer_name)
        .bind(&estimate.assigned_agent)
        .bind(estimate.status)
        .bind(estimate.total_amount)
        .bind(estimate.created_by)
        .bind(&now)
        .execute(&mut *tx)
        .await
        .map_err(AppError::Database)?
        .last_insert_rowid();

        for product in &estimate.products {
            sqlx::query(
                r#"
                INSERT INTO estimate_products (estimate_id, product_id, quantity, rate, amount)
                VALUES (?, ?, ?, ?, ?)
                "#,
            )
            .bind(estimate_id)
            .bind(product.product_id)
            .bind(product.quantity)
            .bind(product.rate)
            .bind(product.amount)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;
        }

        tx.commit().await.map_err(AppError::Database)?;

        self.get_estimate_by_id(estimate_id)
            .await?
            .ok_or(AppError::NotFound("Estimate"))
    }

    /// Replace an estimate's fields and its full line-item set, atomically.
    /// The line items are deleted and re-inserted rather than diffed.
    /// Returns None without writing when the estimate does not exist.
    pub async fn update_estimate(
        &self,
        id: i64,
        estimate: NewEstimate,
    ) -> Result<Option<EstimateWithProducts>> {
        let now = Utc::now().format("%Y-%m-%d %H:%M:%S").to_string();
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let updated = sqlx::query(
            r#"
            UPDATE estimates SET
                estimate_no = ?,
                date = ?,
                order_no = ?,
                customer_name = ?,
                assigned_agent = ?,
                status = ?,
                total_amount = ?,
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&estimate.estimate_no)
        .bind(&estimate.date)
        .bind(&estimate.order_no)
        .bind(&estimate.customer_name)
        .bind(&estimate.assigned_agent)
        .bind(estimate.status)
        .bind(estimate.total_amount)
        .bind(&now)
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(AppError::Database)?
        .rows_affected();

        if updated == 0 {
            return Ok(None);
        }

        sqlx::query("DELETE FROM estimate_products WHERE estimate_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        for product in &estimate.products {
            sqlx::query(
                r#"
                INSERT INTO estimate_products (estimate_id, product_id, quantity, rate, amount)
                VALUES (?, ?, ?, ?, ?)
                "#,
            )
            .bind(id)
            .bind(product.product_id)
            .bind(product.quantity)
            .bind(product.rate)
            .bind(product.amount)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;
        }

        tx.commit().await.map_err(AppError::Database)?;

        self.get_estimate_by_id(id).await
    }

    /// Set an estimate's status, stamping `updated_at`. Returns false when
    /// the estimate does not exist.
    pub async fn update_estimate_status(&self, id: i64, status: EstimateStatus) -> Result<bool> {
        let result =
            sqlx::query("UPDATE estimates SET status = ?, updated_at = datetime('now') WHERE id = ?")
                .bind(status)
                .bind(id)
                .execute(&self.pool)
                .await
                .map_err(AppError::Database)?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete an estimate by ID, returning whether a row was removed.
    /// Line items go with it (cascade).
    pub async fn delete_estimate(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM estimates WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(result.rows_affected() > 0)
    }
}

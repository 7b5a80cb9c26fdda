use sqlx::QueryBuilder;

use crate::{
    db::DbPool,
    error::{AppError, Result},
    models::report::{
        InventoryCategorySummary, InventoryReportCategory, InventoryReportItem, SalesReportFilters,
        SalesReportRow,
    },
};

/// Read-only report queries over orders and inventory
#[derive(Clone)]
pub struct ReportStore {
    pool: DbPool,
}

impl ReportStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Orders grouped by calendar date, with count and total per day,
    /// narrowed by the optional filters
    pub async fn get_sales_report(&self, filters: &SalesReportFilters) -> Result<Vec<SalesReportRow>> {
        let mut builder = QueryBuilder::new(
            "SELECT date(date) AS date, COUNT(*) AS count, SUM(total) AS total FROM orders WHERE 1=1",
        );

        if let Some(start_date) = &filters.start_date {
            builder.push(" AND date(date) >= date(");
            builder.push_bind(start_date);
            builder.push(")");
        }
        if let Some(end_date) = &filters.end_date {
            builder.push(" AND date(date) <= date(");
            builder.push_bind(end_date);
            builder.push(")");
        }
        if let Some(vendor_id) = filters.vendor_id {
            builder.push(" AND vendor_id = ");
            builder.push_bind(vendor_id);
        }
        if let Some(status) = &filters.status {
            builder.push(" AND status = ");
            builder.push_bind(status);
        }

        builder.push(" GROUP BY date(date)");

        let rows = builder
            .build_query_as::<SalesReportRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(rows)
    }

    /// Stocked products grouped by category, each category carrying its
    /// item count, total stock value and detailed item rows
    pub async fn get_inventory_report(&self) -> Result<Vec<InventoryReportCategory>> {
        let summaries = sqlx::query_as::<_, InventoryCategorySummary>(
            r#"
            SELECT p.category, COUNT(*) AS count, SUM(p.price * i.quantity) AS value
            FROM products p
            JOIN inventory i ON p.id = i.product_id
            GROUP BY p.category
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;

        let mut report = Vec::with_capacity(summaries.len());
        for summary in summaries {
            let items = sqlx::query_as::<_, InventoryReportItem>(
                r#"
                SELECT p.id, p.code, p.name, p.size, p.category, p.price,
                       i.quantity, i.location
                FROM products p
                JOIN inventory i ON p.id = i.product_id
                WHERE p.category IS ?
                "#,
            )
            .bind(&summary.category)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)?;

            report.push(InventoryReportCategory { summary, items });
        }

        Ok(report)
    }
}

use sqlx::QueryBuilder;

use crate::{
    db::DbPool,
    error::{AppError, Result},
    models::product::{NewProduct, Product, ProductChanges, ProductWithInventory},
};

/// Product store for database operations
#[derive(Clone)]
pub struct ProductStore {
    pool: DbPool,
}

impl ProductStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get all products with their current inventory, where one exists
    pub async fn get_products_with_inventory(&self) -> Result<Vec<ProductWithInventory>> {
        let products = sqlx::query_as::<_, ProductWithInventory>(
            r#"
            SELECT
                p.id, p.code, p.name, p.size, p.category, p.price, p.cost, p.description,
                p.created_at, p.updated_at, i.quantity, i.location
            FROM products p
            LEFT JOIN inventory i ON p.id = i.product_id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(products)
    }

    /// Get a product by ID
    pub async fn get_product_by_id(&self, id: i64) -> Result<Option<Product>> {
        let product = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(product)
    }

    /// Create a new product and return the stored row
    pub async fn create_product(&self, product: NewProduct) -> Result<Product> {
        let id = sqlx::query(
            r#"
            INSERT INTO products (code, name, size, category, price, cost, description)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&product.code)
        .bind(&product.name)
        .bind(&product.size)
        .bind(&product.category)
        .bind(product.price)
        .bind(product.cost)
        .bind(&product.description)
        .execute(&self.pool)
        .await
        .map_err(AppError::Database)?
        .last_insert_rowid();

        let created = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(created)
    }

    /// Update the supplied fields of a product, stamping `updated_at`.
    /// Returns the refreshed row, or None if no row changed.
    pub async fn update_product(
        &self,
        id: i64,
        changes: ProductChanges,
    ) -> Result<Option<Product>> {
        if changes.is_empty() {
            return self.get_product_by_id(id).await;
        }

        let mut builder = QueryBuilder::new("UPDATE products SET ");
        let mut fields = builder.separated(", ");
        if let Some(code) = &changes.code {
            fields.push("code = ").push_bind_unseparated(code);
        }
        if let Some(name) = &changes.name {
            fields.push("name = ").push_bind_unseparated(name);
        }
        if let Some(size) = &changes.size {
            fields.push("size = ").push_bind_unseparated(size);
        }
        if let Some(category) = &changes.category {
            fields.push("category = ").push_bind_unseparated(category);
        }
        if let Some(price) = changes.price {
            fields.push("price = ").push_bind_unseparated(price);
        }
        if let Some(cost) = changes.cost {
            fields.push("cost = ").push_bind_unseparated(cost);
        }
        if let Some(description) = &changes.description {
            fields
                .push("description = ")
                .push_bind_unseparated(description);
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

        self.get_product_by_id(id).await
    }

    /// Delete a product by ID, returning whether a row was removed.
    /// Any inventory row for the product goes with it (cascade).
    pub async fn delete_product(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(result.rows_affected() > 0)
    }
}

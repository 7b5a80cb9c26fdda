use sqlx::QueryBuilder;

use crate::{
    db::DbPool,
    error::{AppError, Result},
    models::transaction::{NewTransaction, Transaction, TransactionChanges},
};

/// Transaction ledger store for database operations
#[derive(Clone)]
pub struct TransactionStore {
    pool: DbPool,
}

impl TransactionStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a list of all ledger transactions
    pub async fn get_all_transactions(&self) -> Result<Vec<Transaction>> {
        let transactions = sqlx::query_as::<_, Transaction>("SELECT * FROM transactions")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(transactions)
    }

    /// Get a transaction by ID
    pub async fn get_transaction_by_id(&self, id: i64) -> Result<Option<Transaction>> {
        let transaction = sqlx::query_as::<_, Transaction>("SELECT * FROM transactions WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(transaction)
    }

    /// Create a new ledger transaction and return the stored row
    pub async fn create_transaction(&self, transaction: NewTransaction) -> Result<Transaction> {
        let id = sqlx::query(
            r#"
            INSERT INTO transactions (transaction_type, date, amount, related_id, description, created_by)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&transaction.transaction_type)
        .bind(&transaction.date)
        .bind(transaction.amount)
        .bind(transaction.related_id)
        .bind(&transaction.description)
        .bind(transaction.created_by)
        .execute(&self.pool)
        .await
        .map_err(AppError::Database)?
        .last_insert_rowid();

        let created = sqlx::query_as::<_, Transaction>("SELECT * FROM transactions WHERE id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(created)
    }

    /// Update the supplied fields of a transaction. The transactions table
    /// has no `updated_at` column, so none is stamped. Returns the
    /// refreshed row, or None if no row changed.
    pub async fn update_transaction(
        &self,
        id: i64,
        changes: TransactionChanges,
    ) -> Result<Option<Transaction>> {
        if changes.is_empty() {
            return self.get_transaction_by_id(id).await;
        }

        let mut builder = QueryBuilder::new("UPDATE transactions SET ");
        let mut fields = builder.separated(", ");
        if let Some(transaction_type) = &changes.transaction_type {
            fields
                .push("transaction_type = ")
                .push_bind_unseparated(transaction_type);
        }
        if let Some(date) = &changes.date {
            fields.push("date = ").push_bind_unseparated(date);
        }
        if let Some(amount) = changes.amount {
            fields.push("amount = ").push_bind_unseparated(amount);
        }
        if let Some(related_id) = changes.related_id {
            fields.push("related_id = ").push_bind_unseparated(related_id);
        }
        if let Some(description) = &changes.description {
            fields
                .push("description = ")
                .push_bind_unseparated(description);
        }
        builder.push(" WHERE id = ").push_bind(id);

        let result = builder
            .build()
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_transaction_by_id(id).await
    }

    /// Delete a transaction by ID, returning whether a row was removed
    pub async fn delete_transaction(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM transactions WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(result.rows_affected() > 0)
    }
}

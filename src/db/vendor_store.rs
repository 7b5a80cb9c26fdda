use sqlx::QueryBuilder;

use crate::{
    db::DbPool,
    error::{AppError, Result},
    models::vendor::{NewVendor, Vendor, VendorChanges},
};

/// Vendor store for database operations
#[derive(Clone)]
pub struct VendorStore {
    pool: DbPool,
}

impl VendorStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a list of all vendors
    pub async fn get_all_vendors(&self) -> Result<Vec<Vendor>> {
        let vendors = sqlx::query_as::<_, Vendor>("SELECT * FROM vendors")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(vendors)
    }

    /// Get a vendor by ID
    pub async fn get_vendor_by_id(&self, id: i64) -> Result<Option<Vendor>> {
        let vendor = sqlx::query_as::<_, Vendor>("SELECT * FROM vendors WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(vendor)
    }

    /// Create a new vendor and return the stored row
    pub async fn create_vendor(&self, vendor: NewVendor) -> Result<Vendor> {
        let id = sqlx::query(
            r#"
            INSERT INTO vendors (name, contact_person, email, phone, address, notes)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&vendor.name)
        .bind(&vendor.contact_person)
        .bind(&vendor.email)
        .bind(&vendor.phone)
        .bind(&vendor.address)
        .bind(&vendor.notes)
        .execute(&self.pool)
        .await
        .map_err(AppError::Database)?
        .last_insert_rowid();

        let created = sqlx::query_as::<_, Vendor>("SELECT * FROM vendors WHERE id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(created)
    }

    /// Update the supplied fields of a vendor, stamping `updated_at`.
    /// Returns the refreshed row, or None if no row changed.
    pub async fn update_vendor(&self, id: i64, changes: VendorChanges) -> Result<Option<Vendor>> {
        if changes.is_empty() {
            return self.get_vendor_by_id(id).await;
        }

        let mut builder = QueryBuilder::new("UPDATE vendors SET ");
        let mut fields = builder.separated(", ");
        if let Some(name) = &changes.name {
            fields.push("name = ").push_bind_unseparated(name);
        }
        if let Some(contact_person) = &changes.contact_person {
            fields
                .push("contact_person = ")
                .push_bind_unseparated(contact_person);
        }
        if let Some(email) = &changes.email {
            fields.push("email = ").push_bind_unseparated(email);
        }
        if let Some(phone) = &changes.phone {
            fields.push("phone = ").push_bind_unseparated(phone);
        }
        if let Some(address) = &changes.address {
            fields.push("address = ").push_bind_unseparated(address);
        }
        if let Some(notes) = &changes.notes {
            fields.push("notes = ").push_bind_unseparated(notes);
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

        self.get_vendor_by_id(id).await
    }

    /// Delete a vendor by ID, returning whether a row was removed
    pub async fn delete_vendor(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM vendors WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(result.rows_affected() > 0)
    }
}

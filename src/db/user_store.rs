use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use sqlx::QueryBuilder;

use crate::{
    db::DbPool,
    error::{AppError, Result},
    models::user::{NewUser, User, UserChanges},
};

/// Hash a plaintext password with a fresh salt
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {e}")))?;

    Ok(hash.to_string())
}

/// User store for database operations
#[derive(Clone)]
pub struct UserStore {
    pool: DbPool,
}

impl UserStore {
    /// Create a new UserStore with the provided database pool
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a list of all users
    pub async fn get_all_users(&self) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>("SELECT * FROM users")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(users)
    }

    /// Get a user by ID
    pub async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(user)
    }

    /// Create a new user, hashing the supplied password
    pub async fn create_user(&self, user: NewUser) -> Result<User> {
        let password_hash = hash_password(&user.password)?;

        let id = sqlx::query(
            r#"
            INSERT INTO users (username, password_hash, name, email, role)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&user.username)
        .bind(&password_hash)
        .bind(&user.name)
        .bind(&user.email)
        .bind(user.role)
        .execute(&self.pool)
        .await
        .map_err(AppError::Database)?
        .last_insert_rowid();

        let created = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(created)
    }

    /// Update the supplied fields of a user, stamping `updated_at`.
    /// Returns the refreshed row, or None if no row changed.
    pub async fn update_user(&self, id: i64, changes: UserChanges) -> Result<Option<User>> {
        if changes.is_empty() {
            return self.get_user_by_id(id).await;
        }

        let password_hash = match &changes.password {
            Some(password) => Some(hash_password(password)?),
            None => None,
        };

        let mut builder = QueryBuilder::new("UPDATE users SET ");
        let mut fields = builder.separated(", ");
        if let Some(username) = &changes.username {
            fields.push("username = ").push_bind_unseparated(username);
        }
        if let Some(hash) = &password_hash {
            fields.push("password_hash = ").push_bind_unseparated(hash);
        }
        if let Some(name) = &changes.name {
            fields.push("name = ").push_bind_unseparated(name);
        }
        if let Some(email) = &changes.email {
            fields.push("email = ").push_bind_unseparated(email);
        }
        if let Some(role) = changes.role {
            fields.push("role = ").push_bind_unseparated(role);
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

        self.get_user_by_id(id).await
    }

    /// Delete a user by ID, returning whether a row was removed
    pub async fn delete_user(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(result.rows_affected() > 0)
    }

    /// Verify a username/password pair against the stored hash.
    /// Returns the user on success, None for unknown users or bad passwords.
    pub async fn verify_credentials(&self, username: &str, password: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?;

        let Some(user) = user else {
            return Ok(None);
        };

        let parsed = PasswordHash::new(&user.password_hash)
            .map_err(|e| AppError::Internal(format!("Stored password hash is invalid: {e}")))?;

        if Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
        {
            Ok(Some(user))
        } else {
            Ok(None)
        }
    }
}

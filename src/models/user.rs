use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// User role as stored in the `role` column
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Employee,
}

/// Database user model. The password is stored as an argon2 hash, never
/// in plaintext.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Role,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// JSON representation of a user for API responses (no hash)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDto {
    pub id: i64,
    pub username: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Role,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            name: user.name,
            email: user.email,
            role: user.role,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Role,
}

/// Partial update for a user; only supplied fields are written
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserChanges {
    pub username: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
}

impl UserChanges {
    pub fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.password.is_none()
            && self.name.is_none()
            && self.email.is_none()
            && self.role.is_none()
    }
}

/// Login request from a client
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response to a client
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl LoginResponse {
    pub fn success(user: UserDto) -> Self {
        Self {
            success: true,
            user: Some(user),
            message: None,
        }
    }

    pub fn failure() -> Self {
        Self {
            success: false,
            user: None,
            message: Some("Invalid username or password".to_string()),
        }
    }
}

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Database vendor model
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vendor {
    pub id: i64,
    pub name: String,
    pub contact_person: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewVendor {
    pub name: String,
    pub contact_person: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
}

/// Partial update for a vendor; only supplied fields are written
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VendorChanges {
    pub name: Option<String>,
    pub contact_person: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
}

impl VendorChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.contact_person.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.address.is_none()
            && self.notes.is_none()
    }
}

//! User domain types.

use chrono::{DateTime, Utc};

use lookbook_core::{UserId, Username};

/// A registered user.
///
/// The password hash never leaves the repository layer; this type is what
/// the rest of the application sees.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Case-folded username.
    pub username: Username,
    /// When the user registered.
    pub created_at: DateTime<Utc>,
}

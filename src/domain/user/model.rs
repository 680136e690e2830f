use chrono::NaiveDateTime;

/// A user to be created, after request validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub username: String,
    pub password: String,
}

/// Result of a successful create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedUser {
    pub user_id: i64,
    pub username: String,
    pub created_on: NaiveDateTime,
}

/// Public view of a user returned by lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub user_id: i64,
    pub name: String,
    pub username: String,
}

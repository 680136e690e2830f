//! User DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{CreatedUser, NewUser, UserProfile};
use crate::shared::DomainError;

/// Wire format of `created_on`.
pub const CREATED_ON_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// `validator` takes literal messages only; keep the attributes below in
// step with these.
pub const NAME_REQUIRED_MESSAGE: &str = "Name is required";
pub const USERNAME_REQUIRED_MESSAGE: &str = "Username is required";
pub const PASSWORD_REQUIRED_MESSAGE: &str = "Password is required";

/// Create user request
///
/// Fields are optional on the wire so that a missing or `null` field is a
/// validation failure (422) rather than a parse failure (400).
#[derive(Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    /// Name of the user
    #[validate(required(message = "Name is required"))]
    #[schema(example = "Sample User")]
    pub name: Option<String>,
    /// Username of the user
    #[validate(required(message = "Username is required"))]
    #[schema(example = "user1")]
    pub username: Option<String>,
    /// Password of the user
    #[validate(required(message = "Password is required"))]
    #[schema(example = "pass123")]
    pub password: Option<String>,
}

impl std::fmt::Debug for CreateUserRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreateUserRequest")
            .field("name", &self.name)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .finish()
    }
}

impl TryFrom<CreateUserRequest> for NewUser {
    type Error = DomainError;

    fn try_from(req: CreateUserRequest) -> Result<Self, Self::Error> {
        let missing = |msg: &str| DomainError::Validation(msg.to_string());
        Ok(NewUser {
            name: req.name.ok_or_else(|| missing(NAME_REQUIRED_MESSAGE))?,
            username: req.username.ok_or_else(|| missing(USERNAME_REQUIRED_MESSAGE))?,
            password: req.password.ok_or_else(|| missing(PASSWORD_REQUIRED_MESSAGE))?,
        })
    }
}

/// Create user response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateUserResponse {
    #[schema(example = 1)]
    pub user_id: i64,
    pub username: String,
    /// Creation time, `yyyy-MM-dd HH:mm:ss`
    #[schema(example = "2017-10-10 09:30:15")]
    pub created_on: String,
}

impl From<CreatedUser> for CreateUserResponse {
    fn from(u: CreatedUser) -> Self {
        Self {
            user_id: u.user_id,
            username: u.username,
            created_on: u.created_on.format(CREATED_ON_FORMAT).to_string(),
        }
    }
}

/// Find user response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FindUserResponse {
    pub user_id: i64,
    pub name: String,
    pub username: String,
}

impl From<UserProfile> for FindUserResponse {
    fn from(p: UserProfile) -> Self {
        Self {
            user_id: p.user_id,
            name: p.name,
            username: p.username,
        }
    }
}

//! User service — stateless create / find operations
//!
//! No store backs this service: creates always report id 1 and lookups
//! answer with fixed demonstration values for any id up to the
//! not-found threshold.

use chrono::{Local, NaiveDateTime};
use tracing::{debug, info};

use crate::domain::{CreatedUser, NewUser, UserOperations, UserProfile};
use crate::shared::{DomainError, DomainResult};

/// Id reported for every created user.
pub const CREATED_USER_ID: i64 = 1;

/// Ids above this value are reported as not found.
pub const MAX_KNOWN_USER_ID: i64 = 100;

pub const DEMO_NAME: &str = "Chathuranga Tennakoon";
pub const DEMO_USERNAME: &str = "chathuranga";

/// Returned when the requested id is above [`MAX_KNOWN_USER_ID`].
pub const NOT_FOUND_MESSAGE: &str = "Valid user id is required";

pub struct UserService {
    clock: fn() -> NaiveDateTime,
}

impl UserService {
    pub fn new() -> Self {
        Self {
            clock: || Local::now().naive_local(),
        }
    }

    /// Use a fixed clock instead of local wall-clock time.
    pub fn with_clock(clock: fn() -> NaiveDateTime) -> Self {
        Self { clock }
    }
}

impl Default for UserService {
    fn default() -> Self {
        Self::new()
    }
}

impl UserOperations for UserService {
    fn create(&self, user: NewUser) -> DomainResult<CreatedUser> {
        let created_on = (self.clock)();
        info!(username = %user.username, "Creating user");

        Ok(CreatedUser {
            user_id: CREATED_USER_ID,
            username: user.username,
            created_on,
        })
    }

    fn find_by_id(&self, id: i64) -> DomainResult<UserProfile> {
        if id > MAX_KNOWN_USER_ID {
            debug!(id, "User not found");
            return Err(DomainError::NotFound(NOT_FOUND_MESSAGE.to_string()));
        }

        Ok(UserProfile {
            user_id: id,
            name: DEMO_NAME.to_string(),
            username: DEMO_USERNAME.to_string(),
        })
    }
}

use super::{CreatedUser, NewUser, UserProfile};
use crate::shared::DomainResult;

/// User use-cases consumed by the HTTP layer.
///
/// Implementations are synchronous: neither operation performs I/O.
pub trait UserOperations: Send + Sync {
    fn create(&self, user: NewUser) -> DomainResult<CreatedUser>;

    /// Look up a user by a positive id. Callers reject ids `<= 0` first.
    fn find_by_id(&self, id: i64) -> DomainResult<UserProfile>;
}

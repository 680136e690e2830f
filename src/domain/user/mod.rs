//! User aggregate
//!
//! Value types flowing through the create / find operations and the
//! `UserOperations` port implemented by the application layer.

pub mod model;
pub mod operations;

pub use model::{CreatedUser, NewUser, UserProfile};
pub use operations::UserOperations;

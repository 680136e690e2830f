//! Domain layer — user value types and the operations port

pub mod user;

pub use user::*;

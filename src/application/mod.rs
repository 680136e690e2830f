//! Application layer — user use-cases

pub mod identity;

pub use identity::UserService;

//! Shared HTTP extractors

pub mod validated_json;

pub use validated_json::ValidatedJson;

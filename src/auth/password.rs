//! Password hashing utilities

use bcrypt::{hash, verify};

/// Hash a password using bcrypt at the given cost (4..=31)
pub fn hash_password(password: &str, cost: u32) -> Result<String, bcrypt::BcryptError> {
    hash(password, cost)
}

/// Verify a password against a hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool, bcrypt::BcryptError> {
    verify(password, hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hashed = hash_password("pass123", 4).unwrap();

        assert!(verify_password("pass123", &hashed).unwrap());
        assert!(!verify_password("pass124", &hashed).unwrap());
    }

    #[test]
    fn rejects_out_of_range_cost() {
        assert!(hash_password("pass123", 3).is_err());
    }
}

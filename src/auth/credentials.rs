//! In-memory credential store, roles and the authenticated principal

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use super::password::{hash_password, verify_password};
use super::BasicCredentials;
use crate::config::AccountConfig;

/// Authentication / authorization failures raised by the HTTP gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Full authentication is required to access this resource")]
    MissingCredentials,

    #[error("Invalid basic authentication token")]
    MalformedCredentials,

    #[error("Bad credentials")]
    InvalidCredentials,

    #[error("Access is denied")]
    InsufficientRole,
}

/// Role granted to an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[serde(alias = "ROLE_ADMIN", alias = "ADMIN")]
    Admin,
    #[serde(alias = "ROLE_USER", alias = "USER")]
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity attached to a request once the Basic check succeeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub username: String,
    pub roles: Vec<Role>,
}

impl Principal {
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }
}

struct StoredAccount {
    password_hash: String,
    roles: Vec<Role>,
}

/// Password verified against when the username is unknown, so both
/// rejection paths cost one bcrypt verify.
const UNKNOWN_ACCOUNT_PASSWORD: &str = "unknown-account-password";

/// Username → (bcrypt hash, roles). Plain-text passwords are dropped
/// after construction.
pub struct CredentialStore {
    accounts: HashMap<String, StoredAccount>,
    unknown_account_hash: String,
}

impl CredentialStore {
    /// Hash every configured password at `cost`.
    pub fn from_accounts(
        accounts: &[AccountConfig],
        cost: u32,
    ) -> Result<Self, bcrypt::BcryptError> {
        let mut stored = HashMap::with_capacity(accounts.len());
        for account in accounts {
            let password_hash = hash_password(&account.password, cost)?;
            stored.insert(
                account.username.clone(),
                StoredAccount {
                    password_hash,
                    roles: account.roles.clone(),
                },
            );
        }
        let unknown_account_hash = hash_password(UNKNOWN_ACCOUNT_PASSWORD, cost)?;
        Ok(Self {
            accounts: stored,
            unknown_account_hash,
        })
    }

    /// Check a username / password pair. Runs bcrypt, so call it off the
    /// async executor.
    pub fn authenticate(&self, credentials: &BasicCredentials) -> Result<Principal, AuthError> {
        let Some(account) = self.accounts.get(&credentials.username) else {
            let _ = verify_password(&credentials.password, &self.unknown_account_hash);
            debug!(username = %credentials.username, "Unknown account");
            return Err(AuthError::InvalidCredentials);
        };

        let valid = verify_password(&credentials.password, &account.password_hash).unwrap_or(false);
        if !valid {
            debug!(username = %credentials.username, "Password mismatch");
            return Err(AuthError::InvalidCredentials);
        }

        Ok(Principal {
            username: credentials.username.clone(),
            roles: account.roles.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> CredentialStore {
        let accounts = vec![
            AccountConfig {
                username: "chathuranga".into(),
                password: "123".into(),
                roles: vec![Role::Admin, Role::User],
            },
            AccountConfig {
                username: "user".into(),
                password: "password".into(),
                roles: vec![Role::User],
            },
        ];
        CredentialStore::from_accounts(&accounts, 4).unwrap()
    }

    fn creds(username: &str, password: &str) -> BasicCredentials {
        BasicCredentials {
            username: username.into(),
            password: password.into(),
        }
    }

    #[test]
    fn known_pair_yields_principal_with_roles() {
        let principal = store().authenticate(&creds("chathuranga", "123")).unwrap();
        assert_eq!(principal.username, "chathuranga");
        assert!(principal.has_role(Role::Admin));
        assert!(principal.has_role(Role::User));
    }

    #[test]
    fn user_account_is_not_admin() {
        let principal = store().authenticate(&creds("user", "password")).unwrap();
        assert!(!principal.has_role(Role::Admin));
    }

    #[test]
    fn wrong_password_or_unknown_user_is_rejected() {
        let store = store();
        assert_eq!(
            store.authenticate(&creds("chathuranga", "1234")),
            Err(AuthError::InvalidCredentials)
        );
        assert_eq!(
            store.authenticate(&creds("chathuranga123", "123")),
            Err(AuthError::InvalidCredentials)
        );
    }

    #[test]
    fn unknown_user_costs_as_much_as_wrong_password() {
        use std::time::Instant;

        let accounts = vec![AccountConfig {
            username: "chathuranga".into(),
            password: "123".into(),
            roles: vec![Role::Admin],
        }];
        let store = CredentialStore::from_accounts(&accounts, 10).unwrap();

        let started = Instant::now();
        let unknown = store.authenticate(&creds("nobody", "wrong"));
        let unknown_elapsed = started.elapsed();

        let started = Instant::now();
        let known = store.authenticate(&creds("chathuranga", "wrong"));
        let known_elapsed = started.elapsed();

        assert_eq!(unknown, Err(AuthError::InvalidCredentials));
        assert_eq!(known, Err(AuthError::InvalidCredentials));
        assert!(
            unknown_elapsed * 4 >= known_elapsed,
            "unknown={unknown_elapsed:?} known={known_elapsed:?}"
        );
    }

    #[test]
    fn role_accepts_prefixed_spelling() {
        let roles: Vec<Role> = serde_json::from_str(r#"["ROLE_ADMIN", "user"]"#).unwrap();
        assert_eq!(roles, vec![Role::Admin, Role::User]);
    }
}

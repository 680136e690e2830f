//! `Authorization: Basic` header decoding

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use super::AuthError;

const BASIC_SCHEME: &str = "basic";

/// Username / password pair taken from a Basic header.
#[derive(Clone, PartialEq, Eq)]
pub struct BasicCredentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for BasicCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicCredentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Decode `Basic <base64(username:password)>`.
///
/// The scheme name is case-insensitive. The password is everything after
/// the first `:` and may itself contain colons.
pub fn decode_basic_header(value: &str) -> Result<BasicCredentials, AuthError> {
    let (scheme, token) = value
        .trim()
        .split_once(' ')
        .ok_or(AuthError::MalformedCredentials)?;

    if !scheme.eq_ignore_ascii_case(BASIC_SCHEME) {
        return Err(AuthError::MalformedCredentials);
    }

    let decoded = STANDARD
        .decode(token.trim())
        .map_err(|_| AuthError::MalformedCredentials)?;
    let decoded = String::from_utf8(decoded).map_err(|_| AuthError::MalformedCredentials)?;

    let (username, password) = decoded
        .split_once(':')
        .ok_or(AuthError::MalformedCredentials)?;

    Ok(BasicCredentials {
        username: username.to_string(),
        password: password.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(raw: &str) -> String {
        format!("Basic {}", STANDARD.encode(raw))
    }

    #[test]
    fn decodes_username_and_password() {
        let creds = decode_basic_header(&header("chathuranga:123")).unwrap();
        assert_eq!(creds.username, "chathuranga");
        assert_eq!(creds.password, "123");
    }

    #[test]
    fn scheme_is_case_insensitive() {
        let value = format!("bAsIc {}", STANDARD.encode("a:b"));
        assert!(decode_basic_header(&value).is_ok());
    }

    #[test]
    fn password_may_contain_colons() {
        let creds = decode_basic_header(&header("admin:p:a:ss")).unwrap();
        assert_eq!(creds.password, "p:a:ss");
    }

    #[test]
    fn rejects_other_schemes_and_garbage() {
        let no_colon = header("no-colon-here");
        for value in [
            "Bearer abc.def",
            "Basic",
            "Basic !!!not-base64!!!",
            no_colon.as_str(),
        ] {
            assert_eq!(
                decode_basic_header(value),
                Err(AuthError::MalformedCredentials),
                "{value}"
            );
        }
    }

    #[test]
    fn debug_hides_password() {
        let creds = decode_basic_header(&header("u:secret")).unwrap();
        assert!(!format!("{creds:?}").contains("secret"));
    }
}

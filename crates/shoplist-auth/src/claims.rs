//! JWT claim structure for access tokens.

use serde::{Deserialize, Serialize};
use shoplist_core::AppError;

/// Claims carried by every access token.
///
/// - `sub`: user id as a decimal string (the client id for
///   client-credentials tokens)
/// - `aud`: OAuth2 client id, present only on tokens minted by the OAuth2
///   token endpoint
/// - `scope`: granted OAuth2 scope, if any
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
    pub iat: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

impl Claims {
    /// Returns the numeric user id from the subject claim.
    pub fn user_id(&self) -> Result<i32, AppError> {
        self.sub
            .parse()
            .map_err(|_| AppError::unauthorized("Invalid user ID in token"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(sub: &str) -> Claims {
        Claims {
            sub: sub.to_string(),
            exp: 1234567890,
            iat: 1234567800,
            aud: None,
            scope: None,
        }
    }

    #[test]
    fn test_user_id_parses_numeric_subject() {
        assert_eq!(claims("42").user_id().unwrap(), 42);
    }

    #[test]
    fn test_user_id_rejects_client_subject() {
        let err = claims("client-abc").user_id().unwrap_err();
        assert_eq!(err.status.as_u16(), 401);
    }

    #[test]
    fn test_claims_serialize_skips_empty_optionals() {
        let serialized = serde_json::to_string(&claims("7")).unwrap();
        assert!(serialized.contains(r#""sub":"7""#));
        assert!(!serialized.contains("aud"));
        assert!(!serialized.contains("scope"));
    }

    #[test]
    fn test_claims_deserialize_without_optionals() {
        let json = r#"{"sub":"9","exp":9999999999,"iat":9999999900}"#;
        let claims: Claims = serde_json::from_str(json).unwrap();
        assert_eq!(claims.sub, "9");
        assert!(claims.aud.is_none());
    }
}

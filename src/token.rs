use std::time::{Duration, SystemTime, UNIX_EPOCH};

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::{
    error::AdminError,
    types::{ClaimMap, TokenClaims},
};

const EXPIRY_CLAIM: &str = "exp";

/// Issues and verifies signed, time-bounded tokens.
pub trait TokenSigner: Send + Sync + 'static {
    /// Sign `claims` with `secret`. The token stops verifying once `ttl` has elapsed.
    fn sign(&self, secret: &str, ttl: Duration, claims: &ClaimMap) -> Result<String, AdminError>;

    /// Verify `token` against `secret` and return the claims it carries.
    fn parse(&self, secret: &str, token: &str) -> Result<TokenClaims, AdminError>;
}

/// HS256 JSON web tokens.
#[derive(Debug, Clone, Copy, Default)]
pub struct JwtSigner;

impl TokenSigner for JwtSigner {
    fn sign(&self, secret: &str, ttl: Duration, claims: &ClaimMap) -> Result<String, AdminError> {
        let exp = (SystemTime::now() + ttl)
            .duration_since(UNIX_EPOCH)
            .map(|since_epoch| since_epoch.as_secs())
            .unwrap_or_default();

        let mut payload = claims.clone();
        payload.insert(EXPIRY_CLAIM.to_owned(), exp.into());

        let token = encode(
            &Header::new(Algorithm::HS256),
            &payload,
            &EncodingKey::from_secret(secret.as_bytes()),
        )?;

        Ok(token)
    }

    fn parse(&self, secret: &str, token: &str) -> Result<TokenClaims, AdminError> {
        let token = decode::<ClaimMap>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )?;

        let mut claims = token.claims;
        let expires_at = claims
            .remove(EXPIRY_CLAIM)
            .and_then(|exp| exp.as_u64())
            .unwrap_or_default();

        Ok(TokenClaims { expires_at, claims })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::types::EMP_ID_CLAIM;

    fn emp_claims(id: i64) -> ClaimMap {
        let mut claims = ClaimMap::new();
        claims.insert(EMP_ID_CLAIM.to_owned(), id.into());
        claims
    }

    #[test]
    fn signed_token_parses_back_to_the_same_claims() {
        let token = JwtSigner
            .sign("itcast", Duration::from_secs(7200), &emp_claims(42))
            .unwrap();

        let parsed = JwtSigner.parse("itcast", &token).unwrap();

        assert_eq!(parsed.claims.len(), 1);
        assert_eq!(parsed.claims[EMP_ID_CLAIM], json!(42));
    }

    #[test]
    fn expiry_follows_the_ttl() {
        let before = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_secs();
        let token = JwtSigner
            .sign("itcast", Duration::from_secs(3600), &emp_claims(1))
            .unwrap();

        let parsed = JwtSigner.parse("itcast", &token).unwrap();

        assert!(parsed.expires_at >= before + 3600);
        assert!(parsed.expires_at <= before + 3601);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = JwtSigner
            .sign("itcast", Duration::from_secs(3600), &emp_claims(1))
            .unwrap();

        assert!(matches!(
            JwtSigner.parse("not the secret", &token),
            Err(AdminError::TokenError { .. })
        ));
    }

    #[test]
    fn expired_token_is_rejected() {
        let now = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_secs();
        let mut payload = emp_claims(1);
        // beyond the validator's default leeway
        payload.insert(EXPIRY_CLAIM.to_owned(), (now - 300).into());

        let token = encode(
            &Header::new(Algorithm::HS256),
            &payload,
            &EncodingKey::from_secret(b"itcast"),
        )
        .unwrap();

        assert!(matches!(
            JwtSigner.parse("itcast", &token),
            Err(AdminError::TokenError { .. })
        ));
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(JwtSigner.parse("itcast", "fake token").is_err());
    }
}

use axum::{
    extract::{FromRequestParts, OptionalFromRequestParts},
    http::{HeaderMap, header::AUTHORIZATION, request::Parts},
};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::AppState;
use crate::config::{AppConfig, DEFAULT_TOKEN_TTL_HOURS};
use crate::errors::ApiError;

pub const ADMIN_ROLE: &str = "admin";

/// Claims carried by an admin token. The role is the only authorization
/// context; there is no user identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminClaims {
    pub role: String,
    pub iat: i64,
    pub exp: i64,
}

impl AdminClaims {
    /// Expiry saturates at the latest representable instant.
    pub fn new(expires_in: Duration) -> Self {
        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(expires_in)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        Self {
            role: ADMIN_ROLE.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        }
    }
}

/// Single shared-secret sign-on: one configured identifier/password pair and
/// one HMAC secret. Any setting left unconfigured makes the gate fail closed
/// with a server misconfiguration error.
#[derive(Clone)]
pub struct AdminAuth {
    username: Option<String>,
    password: Option<String>,
    secret: Option<String>,
    token_ttl: Duration,
}

impl AdminAuth {
    pub fn new(
        username: Option<String>,
        password: Option<String>,
        secret: Option<String>,
        token_ttl: Duration,
    ) -> Self {
        Self {
            username,
            password,
            secret,
            token_ttl,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        let token_ttl = Duration::try_hours(config.token_ttl_hours)
            .filter(|ttl| *ttl > Duration::zero())
            .unwrap_or_else(|| {
                warn!(
                    hours = config.token_ttl_hours,
                    "Unusable token lifetime, falling back to default"
                );
                Duration::hours(DEFAULT_TOKEN_TTL_HOURS)
            });

        Self::new(
            config.admin_username.clone(),
            config.admin_password.clone(),
            config.jwt_secret.clone(),
            token_ttl,
        )
    }

    fn secret(&self) -> Result<&str, ApiError> {
        self.secret
            .as_deref()
            .ok_or(ApiError::ServerMisconfigured("jwt_secret"))
    }

    /// Exchanges credentials for a signed admin token.
    pub fn login(&self, identifier: &str, password: &str) -> Result<String, ApiError> {
        let expected_username = self
            .username
            .as_deref()
            .ok_or(ApiError::ServerMisconfigured("admin_username"))?;
        let expected_password = self
            .password
            .as_deref()
            .ok_or(ApiError::ServerMisconfigured("admin_password"))?;
        self.secret()?;

        if identifier != expected_username || password != expected_password {
            return Err(ApiError::InvalidCredentials);
        }

        self.sign(&AdminClaims::new(self.token_ttl))
    }

    pub fn sign(&self, claims: &AdminClaims) -> Result<String, ApiError> {
        let key = EncodingKey::from_secret(self.secret()?.as_bytes());
        encode(&Header::default(), claims, &key).map_err(|err| {
            error!(error = %err, "Failed to sign admin token");
            ApiError::InternalError
        })
    }

    pub fn verify(&self, token: &str) -> Result<AdminClaims, ApiError> {
        let key = DecodingKey::from_secret(self.secret()?.as_bytes());
        let data = decode::<AdminClaims>(token, &key, &Validation::default()).map_err(|err| {
            debug!(error = %err, "Rejected bearer token");
            ApiError::InvalidToken
        })?;

        if data.claims.role != ADMIN_ROLE {
            debug!(role = %data.claims.role, "Token does not carry the admin role");
            return Err(ApiError::InvalidToken);
        }

        Ok(data.claims)
    }
}

/// Reads the credential from an `Authorization: <scheme> <credential>` header.
///
/// No header, or a header with nothing after the scheme, is `Ok(None)`. A
/// credential under any scheme other than `Bearer` (matched case-insensitively)
/// is present but unusable, so it is rejected as an invalid token.
pub fn bearer_token(headers: &HeaderMap) -> Result<Option<&str>, ApiError> {
    let Some(value) = headers.get(AUTHORIZATION) else {
        return Ok(None);
    };
    let value = value.to_str().map_err(|_| ApiError::InvalidToken)?;

    let Some((scheme, credential)) = value.trim().split_once(' ') else {
        return Ok(None);
    };
    let credential = credential.trim();
    if credential.is_empty() {
        return Ok(None);
    }

    if !scheme.eq_ignore_ascii_case("bearer") {
        debug!(scheme, "Unsupported authorization scheme");
        return Err(ApiError::InvalidToken);
    }

    Ok(Some(credential))
}

/// Proof that the request carries a valid admin token. Handlers taking this
/// extractor are rejected before their body is read.
#[derive(Debug, Clone)]
pub struct AdminSession {
    pub claims: AdminClaims,
}

impl<S: AppState> FromRequestParts<S> for AdminSession {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)?.ok_or(ApiError::MissingToken)?;
        let claims = state.auth().verify(token)?;
        Ok(AdminSession { claims })
    }
}

/// Anonymous callers get `None`; a token that is present but invalid is
/// still rejected.
impl<S: AppState> OptionalFromRequestParts<S> for AdminSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        match bearer_token(&parts.headers)? {
            Some(token) => {
                let claims = state.auth().verify(token)?;
                Ok(Some(AdminSession { claims }))
            }
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn gate() -> AdminAuth {
        AdminAuth::new(
            Some("admin@showroom.test".to_string()),
            Some("hunter2".to_string()),
            Some("test-secret".to_string()),
            Duration::hours(24),
        )
    }

    #[test]
    fn test_login_issues_verifiable_token() {
        let auth = gate();
        let token = auth.login("admin@showroom.test", "hunter2").unwrap();
        assert!(!token.is_empty());

        let claims = auth.verify(&token).unwrap();
        assert_eq!(claims.role, ADMIN_ROLE);
        assert_eq!(claims.exp - claims.iat, 24 * 3600);
    }

    #[test]
    fn test_login_rejects_wrong_password() {
        assert!(matches!(
            gate().login("admin@showroom.test", "hunter3"),
            Err(ApiError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_login_rejects_wrong_identifier() {
        assert!(matches!(
            gate().login("someone@else.test", "hunter2"),
            Err(ApiError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_login_without_secret_is_misconfigured() {
        let auth = AdminAuth::new(
            Some("admin".to_string()),
            Some("pw".to_string()),
            None,
            Duration::hours(24),
        );
        assert!(matches!(
            auth.login("admin", "pw"),
            Err(ApiError::ServerMisconfigured("jwt_secret"))
        ));
    }

    #[test]
    fn test_login_without_credentials_is_misconfigured() {
        let auth = AdminAuth::new(None, None, Some("secret".to_string()), Duration::hours(24));
        assert!(matches!(
            auth.login("", ""),
            Err(ApiError::ServerMisconfigured("admin_username"))
        ));
    }

    #[test]
    fn test_verify_rejects_expired_token() {
        let auth = gate();
        let token = auth.sign(&AdminClaims::new(Duration::hours(-2))).unwrap();
        assert!(matches!(auth.verify(&token), Err(ApiError::InvalidToken)));
    }

    #[test]
    fn test_verify_rejects_token_signed_with_other_secret() {
        let other = AdminAuth::new(None, None, Some("other-secret".to_string()), Duration::hours(1));
        let token = other.sign(&AdminClaims::new(Duration::hours(1))).unwrap();
        assert!(matches!(gate().verify(&token), Err(ApiError::InvalidToken)));
    }

    #[test]
    fn test_verify_rejects_non_admin_role() {
        let auth = gate();
        let mut claims = AdminClaims::new(Duration::hours(1));
        claims.role = "editor".to_string();
        let token = auth.sign(&claims).unwrap();
        assert!(matches!(auth.verify(&token), Err(ApiError::InvalidToken)));
    }

    #[test]
    fn test_verify_rejects_garbage() {
        assert!(matches!(gate().verify("not.a.jwt"), Err(ApiError::InvalidToken)));
    }

    #[test]
    fn test_bearer_token_parsing() {
        let mut headers = HeaderMap::new();
        assert!(matches!(bearer_token(&headers), Ok(None)));

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc.def.ghi"));
        assert!(matches!(bearer_token(&headers), Ok(Some("abc.def.ghi"))));

        headers.insert(AUTHORIZATION, HeaderValue::from_static("bearer abc.def.ghi"));
        assert!(matches!(bearer_token(&headers), Ok(Some("abc.def.ghi"))));

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert!(matches!(bearer_token(&headers), Ok(None)));

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer"));
        assert!(matches!(bearer_token(&headers), Ok(None)));
    }

    #[test]
    fn test_bearer_token_rejects_other_schemes() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic dXNlcjpwdw=="));
        assert!(matches!(bearer_token(&headers), Err(ApiError::InvalidToken)));
    }

    #[test]
    fn test_from_config_falls_back_on_unusable_ttl() {
        for hours in [i64::MAX, -1] {
            let config = AppConfig {
                database_url: ":memory:".to_string(),
                bind_address: "127.0.0.1:0".to_string(),
                allowed_origins: vec![],
                jwt_secret: Some("secret".to_string()),
                admin_username: Some("admin".to_string()),
                admin_password: Some("pw".to_string()),
                token_ttl_hours: hours,
                request_timeout_secs: 15,
            };
            let auth = AdminAuth::from_config(&config);
            let claims = auth.verify(&auth.login("admin", "pw").unwrap()).unwrap();
            assert_eq!(claims.exp - claims.iat, DEFAULT_TOKEN_TTL_HOURS * 3600);
        }
    }

    #[test]
    fn test_claims_expiry_saturates_instead_of_overflowing() {
        let claims = AdminClaims::new(Duration::MAX);
        assert_eq!(claims.exp, DateTime::<Utc>::MAX_UTC.timestamp());
        assert!(claims.exp > claims.iat);
    }
}

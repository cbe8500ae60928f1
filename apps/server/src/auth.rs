//! Authentication / Authorization primitives.
//!
//! The server acts as an OAuth2/OIDC *resource server*: an external IdP
//! (e.g. Keycloak) performs interactive login and token issuance, while this
//! server validates bearer access tokens on incoming requests and exposes
//! the caller as a [`Principal`] request extension.
//!
//! With `auth.enabled = false` (local development), requests pass through
//! and the principal subject is taken from the `x-user-id` header.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use jsonwebtoken::jwk::{AlgorithmParameters, Jwk, JwkSet};
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, TokenData, Validation};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::{
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::sync::RwLock;

use crate::{state::AppState, Config};

/// The authenticated caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Principal {
    /// IdP subject (user id); the identity collaborator maps this to a
    /// practitioner record.
    pub subject: String,
    pub username: Option<String>,
    pub scopes: Vec<String>,
}

#[derive(Debug, Clone)]
pub enum AuthError {
    MissingToken,
    InvalidToken(String),
    Misconfigured(String),
    Upstream(String),
}

impl AuthError {
    fn status(&self) -> StatusCode {
        match self {
            Self::MissingToken | Self::InvalidToken(_) => StatusCode::UNAUTHORIZED,
            Self::Misconfigured(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Upstream(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    fn diagnostics(&self) -> String {
        match self {
            Self::MissingToken => "Missing bearer token".to_string(),
            Self::InvalidToken(msg) => format!("Invalid bearer token: {msg}"),
            Self::Misconfigured(msg) => format!("Authentication misconfigured: {msg}"),
            Self::Upstream(msg) => format!("Authentication upstream error: {msg}"),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = axum::Json(json!({ "message": self.diagnostics() }));
        let mut response = (status, body).into_response();
        if matches!(self, Self::MissingToken | Self::InvalidToken(_)) {
            response.headers_mut().insert(
                header::WWW_AUTHENTICATE,
                header::HeaderValue::from_static("Bearer"),
            );
        }
        response
    }
}

#[derive(Debug, Default)]
struct JwksCache {
    jwks: Option<JwkSet>,
    fetched_at: Option<Instant>,
}

#[derive(Clone)]
pub struct AuthManager {
    config: Arc<Config>,
    http: reqwest::Client,
    jwks_cache: Arc<RwLock<JwksCache>>,
}

impl AuthManager {
    pub fn new(config: Arc<Config>) -> Result<Self, AuthError> {
        let timeout = Duration::from_secs(config.auth.http_timeout_seconds);
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AuthError::Misconfigured(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            config,
            http,
            jwks_cache: Arc::new(RwLock::new(JwksCache::default())),
        })
    }

    pub fn enabled(&self) -> bool {
        self.config.auth.enabled
    }

    /// Authenticate a request from its headers. `Ok(None)` means auth is
    /// disabled and no principal could be derived.
    pub async fn authenticate_headers(
        &self,
        headers: &HeaderMap,
    ) -> Result<Option<Principal>, AuthError> {
        if !self.enabled() {
            return Ok(headers
                .get("x-user-id")
                .and_then(|v| v.to_str().ok())
                .map(|subject| Principal {
                    subject: subject.to_string(),
                    username: None,
                    scopes: Vec::new(),
                }));
        }

        let Some(authz) = headers.get(header::AUTHORIZATION) else {
            return Err(AuthError::MissingToken);
        };

        let authz = authz.to_str().map_err(|_| {
            AuthError::InvalidToken("Authorization header is not valid UTF-8".to_string())
        })?;

        let token = authz
            .strip_prefix("Bearer ")
            .or_else(|| authz.strip_prefix("bearer "))
            .ok_or_else(|| {
                AuthError::InvalidToken("Authorization header must be 'Bearer <token>'".to_string())
            })?;

        let issuer = self
            .config
            .auth
            .issuer_url
            .clone()
            .ok_or_else(|| AuthError::Misconfigured("auth.issuer_url is not set".to_string()))?;
        let audience = self
            .config
            .auth
            .audience
            .clone()
            .ok_or_else(|| AuthError::Misconfigured("auth.audience is not set".to_string()))?;

        let token_data = self
            .decode_and_validate_jwt(token, &issuer, &audience)
            .await?;
        Ok(Some(principal_from_claims(&token_data.claims)))
    }

    async fn decode_and_validate_jwt(
        &self,
        token: &str,
        issuer: &str,
        audience: &str,
    ) -> Result<TokenData<serde_json::Value>, AuthError> {
        let header = decode_header(token)
            .map_err(|e| AuthError::InvalidToken(format!("Failed to decode JWT header: {e}")))?;

        let kid = header
            .kid
            .clone()
            .ok_or_else(|| AuthError::InvalidToken("JWT header missing 'kid'".to_string()))?;

        // RS256 only; this matches common IdP defaults (Keycloak, etc.) and
        // avoids algorithm confusion.
        if header.alg != Algorithm::RS256 {
            return Err(AuthError::InvalidToken(format!(
                "Unsupported JWT alg '{:?}' (only RS256 is supported)",
                header.alg
            )));
        }

        let jwks = self.get_jwks().await?;
        let jwk = jwks
            .find(&kid)
            .ok_or_else(|| AuthError::InvalidToken(format!("No matching JWK for kid '{kid}'")))?;
        let decoding_key = decoding_key_from_jwk(jwk)?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_issuer(&[issuer]);
        validation.set_audience(&[audience]);
        validation.leeway = 60;

        decode::<serde_json::Value>(token, &decoding_key, &validation)
            .map_err(|e| AuthError::InvalidToken(format!("JWT validation failed: {e}")))
    }

    async fn get_jwks(&self) -> Result<JwkSet, AuthError> {
        let ttl = Duration::from_secs(self.config.auth.jwks_cache_ttl_seconds);

        {
            let cache = self.jwks_cache.read().await;
            if let (Some(jwks), Some(fetched_at)) = (&cache.jwks, cache.fetched_at) {
                if fetched_at.elapsed() <= ttl {
                    return Ok(jwks.clone());
                }
            }
        }

        let issuer = self
            .config
            .auth
            .issuer_url
            .clone()
            .ok_or_else(|| AuthError::Misconfigured("auth.issuer_url is not set".to_string()))?;
        let url = format!(
            "{}/protocol/openid-connect/certs",
            issuer.trim_end_matches('/')
        );

        let res = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| AuthError::Upstream(format!("JWKS fetch failed: {e}")))?;
        if !res.status().is_success() {
            return Err(AuthError::Upstream(format!(
                "JWKS endpoint returned HTTP {}",
                res.status()
            )));
        }

        let jwks: JwkSet = res
            .json()
            .await
            .map_err(|e| AuthError::Upstream(format!("JWKS JSON parse failed: {e}")))?;

        let mut cache = self.jwks_cache.write().await;
        cache.jwks = Some(jwks.clone());
        cache.fetched_at = Some(Instant::now());

        Ok(jwks)
    }
}

fn decoding_key_from_jwk(jwk: &Jwk) -> Result<DecodingKey, AuthError> {
    match &jwk.algorithm {
        AlgorithmParameters::RSA(rsa) => DecodingKey::from_rsa_components(&rsa.n, &rsa.e)
            .map_err(|e| AuthError::InvalidToken(format!("Invalid RSA JWK: {e}"))),
        other => Err(AuthError::InvalidToken(format!(
            "Unsupported JWK type {other:?}"
        ))),
    }
}

fn principal_from_claims(claims: &serde_json::Value) -> Principal {
    let subject = claims
        .get("sub")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();
    let username = claims
        .get("preferred_username")
        .and_then(|v| v.as_str())
        .map(|s| s.to_string());
    let scopes = claims
        .get("scope")
        .and_then(|v| v.as_str())
        .map(|s| s.split_whitespace().map(String::from).collect())
        .unwrap_or_default();

    Principal {
        subject,
        username,
        scopes,
    }
}

/// Middleware guarding the `/rest` routes.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    match state.auth.authenticate_headers(req.headers()).await {
        Ok(Some(principal)) => {
            req.extensions_mut().insert(principal);
        }
        Ok(None) => {}
        Err(e) => return e.into_response(),
    }
    next.run(req).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn principal_extracts_subject_username_and_scopes() {
        let claims = json!({
            "sub": "user-1",
            "preferred_username": "jdoe",
            "scope": "openid profile"
        });
        let principal = principal_from_claims(&claims);
        assert_eq!(principal.subject, "user-1");
        assert_eq!(principal.username.as_deref(), Some("jdoe"));
        assert_eq!(principal.scopes, vec!["openid", "profile"]);
    }

    #[test]
    fn missing_claims_yield_an_empty_principal() {
        let principal = principal_from_claims(&json!({}));
        assert!(principal.subject.is_empty());
        assert!(principal.username.is_none());
        assert!(principal.scopes.is_empty());
    }
}

use axum::http::HeaderMap;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::utils::error::AppError;

pub const SESSION_COOKIE: &str = "auth_token";

/// Session lifetime, one hour.
const SESSION_TTL_SECS: i64 = 3600;

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

pub fn create_session_token(
    user_id: Uuid,
    email: &str,
    secret: &str,
) -> Result<String, AppError> {
    let now = Utc::now();
    let claims = SessionClaims {
        sub: user_id.to_string(),
        email: email.to_string(),
        iat: now.timestamp(),
        exp: (now + Duration::seconds(SESSION_TTL_SECS)).timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::InternalServerError(format!("Failed to encode session token: {}", e)))
}

pub fn verify_session_token(token: &str, secret: &str) -> Result<SessionClaims, AppError> {
    decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::AuthError("Invalid or expired session".to_string()))
}

/// Session user id from validated claims.
pub fn claims_user_id(claims: &SessionClaims) -> Result<Uuid, AppError> {
    Uuid::parse_str(&claims.sub)
        .map_err(|_| AppError::AuthError("Invalid or expired session".to_string()))
}

/// Build the Set-Cookie value carrying the session token. HTTP-only and
/// strictly same-site; the Secure attribute is gated on production.
pub fn session_cookie(token: &str, secure: bool) -> String {
    let mut cookie = format!(
        "{}={}; HttpOnly; SameSite=Strict; Max-Age={}; Path=/",
        SESSION_COOKIE, token, SESSION_TTL_SECS
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Set-Cookie value that expires the session cookie immediately.
pub fn expired_session_cookie() -> String {
    format!("{}=; HttpOnly; SameSite=Strict; Max-Age=0; Path=/", SESSION_COOKIE)
}

/// Extract the session token from the request's Cookie header.
pub fn session_token_from_headers(headers: &HeaderMap) -> Option<String> {
    let cookie_header = headers.get("Cookie")?.to_str().ok()?;
    for cookie in cookie_header.split(';') {
        let cookie = cookie.trim();
        if let Some(value) = cookie.strip_prefix(SESSION_COOKIE) {
            if let Some(value) = value.strip_prefix('=') {
                if !value.is_empty() {
                    return Some(value.to_string());
                }
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn test_token_roundtrip() {
        let user_id = Uuid::new_v4();
        let token = create_session_token(user_id, "fan@example.com", SECRET).unwrap();
        let claims = verify_session_token(&token, SECRET).unwrap();

        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.email, "fan@example.com");
        assert_eq!(claims_user_id(&claims).unwrap(), user_id);
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = create_session_token(Uuid::new_v4(), "fan@example.com", SECRET).unwrap();
        assert!(verify_session_token(&token, "other-secret").is_err());
    }

    #[test]
    fn test_tampered_token_is_rejected() {
        let token = create_session_token(Uuid::new_v4(), "fan@example.com", SECRET).unwrap();
        let tampered = format!("{}x", token);
        assert!(verify_session_token(&tampered, SECRET).is_err());
    }

    #[test]
    fn test_extract_session_token_from_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "Cookie",
            "other=value; auth_token=cookie-token; more=stuff".parse().unwrap(),
        );

        assert_eq!(
            session_token_from_headers(&headers),
            Some("cookie-token".to_string())
        );
    }

    #[test]
    fn test_missing_or_empty_cookie_yields_none() {
        let headers = HeaderMap::new();
        assert_eq!(session_token_from_headers(&headers), None);

        let mut headers = HeaderMap::new();
        headers.insert("Cookie", "auth_token=".parse().unwrap());
        assert_eq!(session_token_from_headers(&headers), None);
    }

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = session_cookie("abc", false);
        assert!(cookie.starts_with("auth_token=abc;"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Strict"));
        assert!(cookie.contains("Max-Age=3600"));
        assert!(!cookie.contains("Secure"));

        let secure = session_cookie("abc", true);
        assert!(secure.ends_with("; Secure"));
    }
}

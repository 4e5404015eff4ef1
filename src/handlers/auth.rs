use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, HeaderMap, HeaderValue};
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::models::user::{LoginRequest, PublicUser, User};
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::password::verify_password;
use crate::utils::response::{empty_success, success};
use crate::utils::token::{
    claims_user_id, create_session_token, expired_session_cookie, session_cookie,
    session_token_from_headers, verify_session_token,
};

fn set_cookie(response: &mut Response, cookie: &str) -> Result<(), AppError> {
    let value = HeaderValue::from_str(cookie)
        .map_err(|e| AppError::InternalServerError(format!("Invalid cookie value: {}", e)))?;
    response.headers_mut().insert(header::SET_COOKIE, value);
    Ok(())
}

/// POST /api/auth/login — verifies credentials and opens a one-hour
/// session carried in an HTTP-only cookie. Every failure mode answers with
/// the same generic 401.
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Response, AppError> {
    let email = payload
        .email
        .as_deref()
        .filter(|e| !e.is_empty())
        .ok_or_else(|| {
            AppError::ValidationError("Email and password are required".to_string())
        })?;
    let password = payload
        .password
        .as_deref()
        .filter(|p| !p.is_empty())
        .ok_or_else(|| {
            AppError::ValidationError("Email and password are required".to_string())
        })?;

    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(&state.pool)
        .await?
        .ok_or_else(|| AppError::AuthError("Invalid email or password".to_string()))?;

    if !verify_password(password, &user.password_hash) {
        return Err(AppError::AuthError("Invalid email or password".to_string()));
    }

    let token = create_session_token(user.id, &user.email, &state.config.session_secret)?;
    let cookie = session_cookie(&token, state.config.is_production);

    tracing::info!(user_id = %user.id, "User logged in");

    let mut response = success(PublicUser::from(user), "Logged in successfully").into_response();
    set_cookie(&mut response, &cookie)?;
    Ok(response)
}

/// POST /api/auth/logout — expires the session cookie.
pub async fn logout() -> Result<Response, AppError> {
    let mut response = empty_success("Logged out successfully").into_response();
    set_cookie(&mut response, &expired_session_cookie())?;
    Ok(response)
}

/// GET /api/auth/me — validates the session cookie and returns its user.
/// Backs client-side session rehydration on page load.
pub async fn me(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let token = session_token_from_headers(&headers)
        .ok_or_else(|| AppError::AuthError("Not authenticated".to_string()))?;

    let claims = verify_session_token(&token, &state.config.session_secret)?;
    let user_id = claims_user_id(&claims)?;

    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(&state.pool)
        .await?
        .ok_or_else(|| AppError::AuthError("Invalid or expired session".to_string()))?;

    Ok(success(PublicUser::from(user), "Session is valid").into_response())
}

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use uuid::Uuid;

use crate::models::user::{
    EmailProbe, ProfileUpdateRequest, PublicUser, SignupRequest, UpdateUserRequest, User,
    UserListQuery,
};
use crate::models::IdPayload;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::password::{hash_password, verify_password};
use crate::utils::response::{created, empty_success, success};
use crate::utils::validate::{require_field, require_valid_email};

async fn find_user(pool: &sqlx::PgPool, id: Uuid) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

async fn find_user_by_email(pool: &sqlx::PgPool, email: &str) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

/// GET /api/users — full public listing, or an email existence probe when
/// `?email=` is present (used by the signup form).
pub async fn list_users(
    State(state): State<Arc<AppState>>,
    Query(params): Query<UserListQuery>,
) -> Result<Response, AppError> {
    if let Some(email) = params.email.as_deref() {
        let probe = match find_user_by_email(&state.pool, email).await? {
            Some(user) => EmailProbe {
                exists: true,
                user: Some(user.into()),
            },
            None => EmailProbe {
                exists: false,
                user: None,
            },
        };
        return Ok(success(probe, "Email lookup completed").into_response());
    }

    let users = sqlx::query_as::<_, PublicUser>(
        "SELECT id, email, username, created_at, updated_at FROM users ORDER BY created_at",
    )
    .fetch_all(&state.pool)
    .await?;

    Ok(success(users, "Users retrieved successfully").into_response())
}

/// POST /api/users — signup.
pub async fn signup(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SignupRequest>,
) -> Result<Response, AppError> {
    let email = require_field(
        payload.email.as_deref(),
        "Email, password and username are required",
    )?;
    let password = require_field(
        payload.password.as_deref(),
        "Email, password and username are required",
    )?;
    let username = require_field(
        payload.username.as_deref(),
        "Email, password and username are required",
    )?;

    require_valid_email(email)?;

    if find_user_by_email(&state.pool, email).await?.is_some() {
        return Err(AppError::Conflict(
            "This email address is already in use".to_string(),
        ));
    }

    let password_hash = hash_password(password)?;

    let user = sqlx::query_as::<_, User>(
        "INSERT INTO users (email, password_hash, username) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(email)
    .bind(&password_hash)
    .bind(username)
    .fetch_one(&state.pool)
    .await?;

    tracing::info!(user_id = %user.id, "New user registered");

    Ok(created(PublicUser::from(user), "User registered successfully").into_response())
}

/// PUT /api/users — update by body id. The password field is not accepted
/// here; password changes go through the profile route.
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<Response, AppError> {
    let id = payload
        .id
        .ok_or_else(|| AppError::ValidationError("A user id is required".to_string()))?;

    let existing = find_user(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    if let Some(email) = payload.email.as_deref() {
        if email != existing.email && find_user_by_email(&state.pool, email).await?.is_some() {
            return Err(AppError::Conflict(
                "This email address is already in use".to_string(),
            ));
        }
    }

    let user = sqlx::query_as::<_, User>(
        "UPDATE users SET email = $1, username = $2, updated_at = now() WHERE id = $3 RETURNING *",
    )
    .bind(payload.email.unwrap_or(existing.email))
    .bind(payload.username.unwrap_or(existing.username))
    .bind(id)
    .fetch_one(&state.pool)
    .await?;

    Ok(success(PublicUser::from(user), "User updated successfully").into_response())
}

/// DELETE /api/users — delete by body id.
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<IdPayload>,
) -> Result<Response, AppError> {
    let id = payload
        .id
        .ok_or_else(|| AppError::ValidationError("A user id is required".to_string()))?;

    if find_user(&state.pool, id).await?.is_none() {
        return Err(AppError::NotFound("User not found".to_string()));
    }

    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(&state.pool)
        .await?;

    Ok(empty_success("User deleted successfully").into_response())
}

/// GET /api/users/{id}
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let user = find_user(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(success(PublicUser::from(user), "User retrieved successfully").into_response())
}

/// PUT /api/users/{id} — profile edit. A password change must present the
/// current password; a mismatch leaves the record untouched.
pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ProfileUpdateRequest>,
) -> Result<Response, AppError> {
    let existing = find_user(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let mut password_hash = existing.password_hash.clone();
    if let (Some(current), Some(new)) = (
        payload.current_password.as_deref(),
        payload.new_password.as_deref(),
    ) {
        if !verify_password(current, &existing.password_hash) {
            return Err(AppError::ValidationError(
                "The current password does not match".to_string(),
            ));
        }
        password_hash = hash_password(new)?;
    }

    let user = sqlx::query_as::<_, User>(
        "UPDATE users SET username = $1, password_hash = $2, updated_at = now() \
         WHERE id = $3 RETURNING *",
    )
    .bind(payload.username.unwrap_or(existing.username))
    .bind(&password_hash)
    .bind(id)
    .fetch_one(&state.pool)
    .await?;

    Ok(success(PublicUser::from(user), "Profile updated successfully").into_response())
}

/// DELETE /api/users/{id}
pub async fn delete_profile(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    if find_user(&state.pool, id).await?.is_none() {
        return Err(AppError::NotFound("User not found".to_string()));
    }

    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(&state.pool)
        .await?;

    Ok(empty_success("User deleted successfully").into_response())
}

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use sqlx::types::Json as SqlJson;
use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;

use crate::models::concert::{
    Concert, ConcertListQuery, CreateConcertRequest, UpdateConcertRequest,
};
use crate::models::IdPayload;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::response::{created, empty_success, success};
use crate::utils::validate::require_field;

pub(crate) async fn find_concert(
    pool: &sqlx::PgPool,
    id: Uuid,
) -> Result<Option<Concert>, AppError> {
    let concert = sqlx::query_as::<_, Concert>("SELECT * FROM concerts WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(concert)
}

/// GET /api/concerts — single lookup via `?id=`, otherwise a filtered
/// listing ordered by date. Free-text search is a case-insensitive
/// substring match over title, artist and venue.
pub async fn list_concerts(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ConcertListQuery>,
) -> Result<Response, AppError> {
    if let Some(id) = params.id {
        let concert = find_concert(&state.pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Concert not found".to_string()))?;
        return Ok(success(concert, "Concert retrieved successfully").into_response());
    }

    let mut qb: QueryBuilder<Postgres> = QueryBuilder::new("SELECT * FROM concerts WHERE 1=1");

    if let Some(category) = &params.category {
        qb.push(" AND category = ");
        qb.push_bind(category);
    }
    if let Some(status) = &params.status {
        qb.push(" AND status = ");
        qb.push_bind(status);
    }
    if let Some(query) = &params.query {
        let pattern = format!("%{}%", query);
        qb.push(" AND (title ILIKE ");
        qb.push_bind(pattern.clone());
        qb.push(" OR artist ILIKE ");
        qb.push_bind(pattern.clone());
        qb.push(" OR venue ILIKE ");
        qb.push_bind(pattern);
        qb.push(")");
    }

    qb.push(" ORDER BY date ASC");

    let concerts = qb
        .build_query_as::<Concert>()
        .fetch_all(&state.pool)
        .await?;

    Ok(success(concerts, "Concerts retrieved successfully").into_response())
}

/// POST /api/concerts
pub async fn create_concert(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateConcertRequest>,
) -> Result<Response, AppError> {
    let missing = "Title, artist, date and venue are required";
    let title = require_field(payload.title.as_deref(), missing)?;
    let artist = require_field(payload.artist.as_deref(), missing)?;
    let date = require_field(payload.date.as_deref(), missing)?;
    let venue = require_field(payload.venue.as_deref(), missing)?;

    let concert = sqlx::query_as::<_, Concert>(
        "INSERT INTO concerts \
         (title, artist, date, time, venue, address, poster_image, description, category, \
          price, seat_map, status) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) RETURNING *",
    )
    .bind(title)
    .bind(artist)
    .bind(date)
    .bind(payload.time.unwrap_or_default())
    .bind(venue)
    .bind(payload.address.unwrap_or_default())
    .bind(payload.poster_image.unwrap_or_default())
    .bind(payload.description.unwrap_or_default())
    .bind(payload.category.unwrap_or_default())
    .bind(SqlJson(payload.price.unwrap_or_default()))
    .bind(payload.seat_map)
    .bind(payload.status.unwrap_or_else(|| "upcoming".to_string()))
    .fetch_one(&state.pool)
    .await?;

    Ok(created(concert, "Concert created successfully").into_response())
}

/// PUT /api/concerts — partial update by body id; an absent price keeps
/// the stored map.
pub async fn update_concert(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<UpdateConcertRequest>,
) -> Result<Response, AppError> {
    let id = payload
        .id
        .ok_or_else(|| AppError::ValidationError("A concert id is required".to_string()))?;

    let existing = find_concert(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Concert not found".to_string()))?;

    let concert = sqlx::query_as::<_, Concert>(
        "UPDATE concerts SET \
         title = $1, artist = $2, date = $3, time = $4, venue = $5, address = $6, \
         poster_image = $7, description = $8, category = $9, price = $10, seat_map = $11, \
         status = $12, updated_at = now() \
         WHERE id = $13 RETURNING *",
    )
    .bind(payload.title.unwrap_or(existing.title))
    .bind(payload.artist.unwrap_or(existing.artist))
    .bind(payload.date.unwrap_or(existing.date))
    .bind(payload.time.unwrap_or(existing.time))
    .bind(payload.venue.unwrap_or(existing.venue))
    .bind(payload.address.unwrap_or(existing.address))
    .bind(payload.poster_image.unwrap_or(existing.poster_image))
    .bind(payload.description.unwrap_or(existing.description))
    .bind(payload.category.unwrap_or(existing.category))
    .bind(payload.price.map(SqlJson).unwrap_or(existing.price))
    .bind(payload.seat_map.or(existing.seat_map))
    .bind(payload.status.unwrap_or(existing.status))
    .bind(id)
    .fetch_one(&state.pool)
    .await?;

    Ok(success(concert, "Concert updated successfully").into_response())
}

/// DELETE /api/concerts — by body id.
pub async fn delete_concert(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<IdPayload>,
) -> Result<Response, AppError> {
    let id = payload
        .id
        .ok_or_else(|| AppError::ValidationError("A concert id is required".to_string()))?;

    if find_concert(&state.pool, id).await?.is_none() {
        return Err(AppError::NotFound("Concert not found".to_string()));
    }

    sqlx::query("DELETE FROM concerts WHERE id = $1")
        .bind(id)
        .execute(&state.pool)
        .await?;

    Ok(empty_success("Concert deleted successfully").into_response())
}

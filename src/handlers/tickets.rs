use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;

use crate::handlers::concerts::find_concert;
use crate::models::concert::Concert;
use crate::models::ticket::{
    CreateTicketRequest, DeleteTicketRequest, Ticket, TicketListQuery, TicketWithConcert,
    UpdateTicketRequest,
};
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::response::{created, empty_success, success};
use crate::utils::validate::require_field;

async fn find_ticket(pool: &sqlx::PgPool, id: Uuid) -> Result<Option<Ticket>, AppError> {
    let ticket = sqlx::query_as::<_, Ticket>("SELECT * FROM tickets WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(ticket)
}

/// GET /api/tickets — single lookup via `?id=` (with its concert
/// embedded), otherwise a filtered listing, newest first. Free-text search
/// is a case-insensitive substring match over title and description; a
/// query matching nothing yields an empty list.
pub async fn list_tickets(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TicketListQuery>,
) -> Result<Response, AppError> {
    if let Some(id) = params.id {
        let ticket = find_ticket(&state.pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Ticket not found".to_string()))?;
        let concert = find_concert(&state.pool, ticket.concert_id).await?;
        let item = TicketWithConcert { ticket, concert };
        return Ok(success(item, "Ticket retrieved successfully").into_response());
    }

    let mut qb: QueryBuilder<Postgres> = QueryBuilder::new("SELECT * FROM tickets WHERE 1=1");

    if let Some(concert_id) = params.concert_id {
        qb.push(" AND concert_id = ");
        qb.push_bind(concert_id);
    }
    if let Some(seller_id) = params.seller_id {
        qb.push(" AND seller_id = ");
        qb.push_bind(seller_id);
    }
    if let Some(status) = &params.status {
        qb.push(" AND status = ");
        qb.push_bind(status);
    }
    if let Some(grade) = &params.grade {
        qb.push(" AND grade = ");
        qb.push_bind(grade);
    }
    if let Some(query) = &params.query {
        let pattern = format!("%{}%", query);
        qb.push(" AND (title ILIKE ");
        qb.push_bind(pattern.clone());
        qb.push(" OR description ILIKE ");
        qb.push_bind(pattern);
        qb.push(")");
    }

    qb.push(" ORDER BY created_at DESC");

    let tickets = qb.build_query_as::<Ticket>().fetch_all(&state.pool).await?;

    // Attach each listing's concert in one round trip.
    let concert_ids: Vec<Uuid> = tickets.iter().map(|t| t.concert_id).collect();
    let concerts = sqlx::query_as::<_, Concert>("SELECT * FROM concerts WHERE id = ANY($1)")
        .bind(&concert_ids)
        .fetch_all(&state.pool)
        .await?;
    let concerts_by_id: HashMap<Uuid, Concert> =
        concerts.into_iter().map(|c| (c.id, c)).collect();

    let items: Vec<TicketWithConcert> = tickets
        .into_iter()
        .map(|ticket| TicketWithConcert {
            concert: concerts_by_id.get(&ticket.concert_id).cloned(),
            ticket,
        })
        .collect();

    Ok(success(items, "Tickets retrieved successfully").into_response())
}

/// POST /api/tickets — create a listing. The referenced concert must
/// exist; the resale price defaults the original price, and new listings
/// start out available.
pub async fn create_ticket(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateTicketRequest>,
) -> Result<Response, AppError> {
    let missing = "Concert, seller, title, price, quantity and grade are required";
    let concert_id = payload
        .concert_id
        .ok_or_else(|| AppError::ValidationError(missing.to_string()))?;
    let seller_id = payload
        .seller_id
        .ok_or_else(|| AppError::ValidationError(missing.to_string()))?;
    let title = require_field(payload.title.as_deref(), missing)?;
    let price = payload
        .price
        .ok_or_else(|| AppError::ValidationError(missing.to_string()))?;
    let quantity = payload
        .quantity
        .ok_or_else(|| AppError::ValidationError(missing.to_string()))?;
    let grade = require_field(payload.grade.as_deref(), missing)?;

    if find_concert(&state.pool, concert_id).await?.is_none() {
        return Err(AppError::NotFound("Concert not found".to_string()));
    }

    let ticket = sqlx::query_as::<_, Ticket>(
        "INSERT INTO tickets \
         (concert_id, seller_id, title, price, original_price, quantity, grade, section, \
          seat_row, seat_number, is_consecutive_seats, description, status) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) RETURNING *",
    )
    .bind(concert_id)
    .bind(seller_id)
    .bind(title)
    .bind(price)
    .bind(payload.original_price.unwrap_or(price))
    .bind(quantity)
    .bind(grade)
    .bind(payload.section)
    .bind(payload.seat_row)
    .bind(payload.seat_number)
    .bind(payload.is_consecutive_seats.unwrap_or(false))
    .bind(payload.description)
    .bind(payload.status.unwrap_or_else(|| "available".to_string()))
    .fetch_one(&state.pool)
    .await?;

    tracing::info!(ticket_id = %ticket.id, seller_id = %seller_id, "Ticket listed");

    Ok(created(ticket, "Ticket created successfully").into_response())
}

/// PUT /api/tickets — partial update by body id. A seller id in the body
/// that does not match the stored owner is rejected and nothing changes.
pub async fn update_ticket(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<UpdateTicketRequest>,
) -> Result<Response, AppError> {
    let id = payload
        .id
        .ok_or_else(|| AppError::ValidationError("A ticket id is required".to_string()))?;

    let existing = find_ticket(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Ticket not found".to_string()))?;

    if let Some(seller_id) = payload.seller_id {
        if seller_id != existing.seller_id {
            return Err(AppError::Forbidden(
                "Only the seller can modify this ticket".to_string(),
            ));
        }
    }

    let ticket = sqlx::query_as::<_, Ticket>(
        "UPDATE tickets SET \
         title = $1, price = $2, original_price = $3, quantity = $4, grade = $5, \
         section = $6, seat_row = $7, seat_number = $8, is_consecutive_seats = $9, \
         description = $10, status = $11, updated_at = now() \
         WHERE id = $12 RETURNING *",
    )
    .bind(payload.title.unwrap_or(existing.title))
    .bind(payload.price.unwrap_or(existing.price))
    .bind(payload.original_price.unwrap_or(existing.original_price))
    .bind(payload.quantity.unwrap_or(existing.quantity))
    .bind(payload.grade.unwrap_or(existing.grade))
    .bind(payload.section.or(existing.section))
    .bind(payload.seat_row.or(existing.seat_row))
    .bind(payload.seat_number.or(existing.seat_number))
    .bind(
        payload
            .is_consecutive_seats
            .unwrap_or(existing.is_consecutive_seats),
    )
    .bind(payload.description.or(existing.description))
    .bind(payload.status.unwrap_or(existing.status))
    .bind(id)
    .fetch_one(&state.pool)
    .await?;

    Ok(success(ticket, "Ticket updated successfully").into_response())
}

/// DELETE /api/tickets — by body id, with the same ownership rule as
/// updates.
pub async fn delete_ticket(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<DeleteTicketRequest>,
) -> Result<Response, AppError> {
    let id = payload
        .id
        .ok_or_else(|| AppError::ValidationError("A ticket id is required".to_string()))?;

    let existing = find_ticket(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Ticket not found".to_string()))?;

    if let Some(seller_id) = payload.seller_id {
        if seller_id != existing.seller_id {
            return Err(AppError::Forbidden(
                "Only the seller can delete this ticket".to_string(),
            ));
        }
    }

    sqlx::query("DELETE FROM tickets WHERE id = $1")
        .bind(id)
        .execute(&state.pool)
        .await?;

    Ok(empty_success("Ticket deleted successfully").into_response())
}

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use uuid::Uuid;

use crate::models::order::{CreateOrderRequest, Order, OrderListQuery, UpdateOrderRequest};
use crate::models::ticket::Ticket;
use crate::models::IdPayload;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::response::{created, empty_success, success};

async fn find_order(pool: &sqlx::PgPool, id: Uuid) -> Result<Option<Order>, AppError> {
    let order = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(order)
}

/// GET /api/orders — all orders, or one user's via `?user_id=`.
pub async fn list_orders(
    State(state): State<Arc<AppState>>,
    Query(params): Query<OrderListQuery>,
) -> Result<Response, AppError> {
    let orders = match params.user_id {
        Some(user_id) => {
            sqlx::query_as::<_, Order>(
                "SELECT * FROM orders WHERE user_id = $1 ORDER BY created_at DESC",
            )
            .bind(user_id)
            .fetch_all(&state.pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, Order>("SELECT * FROM orders ORDER BY created_at DESC")
                .fetch_all(&state.pool)
                .await?
        }
    };

    Ok(success(orders, "Orders retrieved successfully").into_response())
}

/// POST /api/orders — record a purchase. The total defaults to the
/// listing price times quantity, and the listing itself is marked sold.
pub async fn create_order(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateOrderRequest>,
) -> Result<Response, AppError> {
    let missing = "User, ticket and quantity are required";
    let user_id = payload
        .user_id
        .ok_or_else(|| AppError::ValidationError(missing.to_string()))?;
    let ticket_id = payload
        .ticket_id
        .ok_or_else(|| AppError::ValidationError(missing.to_string()))?;
    let quantity = payload
        .quantity
        .ok_or_else(|| AppError::ValidationError(missing.to_string()))?;

    let ticket = sqlx::query_as::<_, Ticket>("SELECT * FROM tickets WHERE id = $1")
        .bind(ticket_id)
        .fetch_optional(&state.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Ticket not found".to_string()))?;

    let total_price = payload
        .total_price
        .unwrap_or(ticket.price * quantity as i64);

    let order = sqlx::query_as::<_, Order>(
        "INSERT INTO orders (user_id, ticket_id, quantity, total_price, status) \
         VALUES ($1, $2, $3, $4, $5) RETURNING *",
    )
    .bind(user_id)
    .bind(ticket_id)
    .bind(quantity)
    .bind(total_price)
    .bind(payload.status.unwrap_or_else(|| "pending".to_string()))
    .fetch_one(&state.pool)
    .await?;

    // A purchased listing leaves the marketplace.
    sqlx::query("UPDATE tickets SET status = 'sold', updated_at = now() WHERE id = $1")
        .bind(ticket_id)
        .execute(&state.pool)
        .await?;

    tracing::info!(order_id = %order.id, ticket_id = %ticket_id, "Order placed");

    Ok(created(order, "Order created successfully").into_response())
}

/// PUT /api/orders — partial update by body id.
pub async fn update_order(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<UpdateOrderRequest>,
) -> Result<Response, AppError> {
    let id = payload
        .id
        .ok_or_else(|| AppError::ValidationError("An order id is required".to_string()))?;

    let existing = find_order(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Order not found".to_string()))?;

    let order = sqlx::query_as::<_, Order>(
        "UPDATE orders SET quantity = $1, total_price = $2, status = $3, updated_at = now() \
         WHERE id = $4 RETURNING *",
    )
    .bind(payload.quantity.unwrap_or(existing.quantity))
    .bind(payload.total_price.unwrap_or(existing.total_price))
    .bind(payload.status.unwrap_or(existing.status))
    .bind(id)
    .fetch_one(&state.pool)
    .await?;

    Ok(success(order, "Order updated successfully").into_response())
}

/// DELETE /api/orders — by body id.
pub async fn delete_order(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<IdPayload>,
) -> Result<Response, AppError> {
    let id = payload
        .id
        .ok_or_else(|| AppError::ValidationError("An order id is required".to_string()))?;

    if find_order(&state.pool, id).await?.is_none() {
        return Err(AppError::NotFound("Order not found".to_string()));
    }

    sqlx::query("DELETE FROM orders WHERE id = $1")
        .bind(id)
        .execute(&state.pool)
        .await?;

    Ok(empty_success("Order deleted successfully").into_response())
}

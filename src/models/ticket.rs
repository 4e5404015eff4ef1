use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::concert::Concert;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Ticket {
    pub id: Uuid,
    pub concert_id: Uuid,
    pub seller_id: Uuid,
    pub title: String,
    pub price: i64,
    pub original_price: i64,
    pub quantity: i32,
    pub grade: String,
    pub section: Option<String>,
    pub seat_row: Option<String>,
    pub seat_number: Option<String>,
    pub is_consecutive_seats: bool,
    pub description: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A listing with its concert embedded, as the detail and list endpoints
/// return it.
#[derive(Debug, Serialize)]
pub struct TicketWithConcert {
    #[serde(flatten)]
    pub ticket: Ticket,
    pub concert: Option<Concert>,
}

#[derive(Debug, Deserialize)]
pub struct TicketListQuery {
    pub id: Option<Uuid>,
    pub concert_id: Option<Uuid>,
    pub seller_id: Option<Uuid>,
    pub status: Option<String>,
    pub grade: Option<String>,
    pub query: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateTicketRequest {
    pub concert_id: Option<Uuid>,
    pub seller_id: Option<Uuid>,
    pub title: Option<String>,
    pub price: Option<i64>,
    pub original_price: Option<i64>,
    pub quantity: Option<i32>,
    pub grade: Option<String>,
    pub section: Option<String>,
    pub seat_row: Option<String>,
    pub seat_number: Option<String>,
    pub is_consecutive_seats: Option<bool>,
    pub description: Option<String>,
    pub status: Option<String>,
}

/// Partial update; `seller_id`, when present, must match the stored owner.
#[derive(Debug, Deserialize)]
pub struct UpdateTicketRequest {
    pub id: Option<Uuid>,
    pub seller_id: Option<Uuid>,
    pub title: Option<String>,
    pub price: Option<i64>,
    pub original_price: Option<i64>,
    pub quantity: Option<i32>,
    pub grade: Option<String>,
    pub section: Option<String>,
    pub seat_row: Option<String>,
    pub seat_number: Option<String>,
    pub is_consecutive_seats: Option<bool>,
    pub description: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteTicketRequest {
    pub id: Option<Uuid>,
    pub seller_id: Option<Uuid>,
}

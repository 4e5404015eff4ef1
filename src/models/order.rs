use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Order {
    pub id: Uuid,
    pub user_id: Uuid,
    pub ticket_id: Uuid,
    pub quantity: i32,
    pub total_price: i64,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct OrderListQuery {
    pub user_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub user_id: Option<Uuid>,
    pub ticket_id: Option<Uuid>,
    pub quantity: Option<i32>,
    pub total_price: Option<i64>,
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateOrderRequest {
    pub id: Option<Uuid>,
    pub quantity: Option<i32>,
    pub total_price: Option<i64>,
    pub status: Option<String>,
}

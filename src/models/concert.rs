use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// Per-grade pricing for a concert. Stored as a typed JSONB column so the
/// map read back is structurally identical to the one written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceMap {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vip: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub s: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub a: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub b: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Concert {
    pub id: Uuid,
    pub title: String,
    pub artist: String,
    pub date: String,
    pub time: String,
    pub venue: String,
    pub address: String,
    pub poster_image: String,
    pub description: String,
    pub category: String,
    pub price: Json<PriceMap>,
    pub seat_map: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct ConcertListQuery {
    pub id: Option<Uuid>,
    pub category: Option<String>,
    pub status: Option<String>,
    pub query: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateConcertRequest {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub venue: Option<String>,
    pub address: Option<String>,
    pub poster_image: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub price: Option<PriceMap>,
    pub seat_map: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateConcertRequest {
    pub id: Option<Uuid>,
    pub title: Option<String>,
    pub artist: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub venue: Option<String>,
    pub address: Option<String>,
    pub poster_image: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub price: Option<PriceMap>,
    pub seat_map: Option<String>,
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_map_roundtrip_is_identical() {
        let map = PriceMap {
            vip: Some(100000),
            r: Some(80000),
            ..Default::default()
        };

        let encoded = serde_json::to_string(&map).unwrap();
        let decoded: PriceMap = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, map);
    }

    #[test]
    fn test_absent_grades_are_omitted_from_json() {
        let map = PriceMap {
            vip: Some(165000),
            ..Default::default()
        };

        let value = serde_json::to_value(&map).unwrap();
        assert_eq!(value, serde_json::json!({ "vip": 165000 }));
    }

    #[test]
    fn test_price_map_accepts_numeric_json() {
        let decoded: PriceMap =
            serde_json::from_str(r#"{"vip":150000,"r":120000,"s":90000}"#).unwrap();
        assert_eq!(decoded.vip, Some(150000));
        assert_eq!(decoded.r, Some(120000));
        assert_eq!(decoded.s, Some(90000));
        assert_eq!(decoded.a, None);
    }
}

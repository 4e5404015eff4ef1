pub mod concert;
pub mod order;
pub mod popular;
pub mod ticket;
pub mod user;

use serde::Deserialize;
use uuid::Uuid;

/// Body payload for the collection-level update/delete routes that carry
/// the target id in the JSON body.
#[derive(Debug, Deserialize)]
pub struct IdPayload {
    pub id: Option<Uuid>,
}

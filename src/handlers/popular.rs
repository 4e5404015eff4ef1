use std::sync::Arc;

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use rand::Rng;

use crate::models::popular::bump_and_rank;
use crate::state::AppState;
use crate::utils::response::success;

/// GET /api/popular-tickets — every read bumps each entry's traffic by a
/// random amount, then returns the board re-sorted with fresh ranks. The
/// counter stands in for a real traffic signal.
pub async fn list_popular_tickets(State(state): State<Arc<AppState>>) -> Response {
    let mut board = state.popular.write().await;

    let bumps: Vec<u64> = {
        let mut rng = rand::thread_rng();
        (0..board.len()).map(|_| rng.gen_range(0..100)).collect()
    };
    bump_and_rank(&mut board, &bumps);

    success(board.clone(), "Popular tickets retrieved successfully").into_response()
}

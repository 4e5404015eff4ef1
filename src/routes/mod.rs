use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::config::{create_cors_layer, create_security_headers_layer};
use crate::handlers::{auth, concerts, feedback, health_check, orders, popular, tickets, users};
use crate::state::AppState;

pub fn create_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/me", get(auth::me))
        .route(
            "/api/users",
            get(users::list_users)
                .post(users::signup)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route(
            "/api/users/:id",
            get(users::get_user)
                .put(users::update_profile)
                .delete(users::delete_profile),
        )
        .route(
            "/api/concerts",
            get(concerts::list_concerts)
                .post(concerts::create_concert)
                .put(concerts::update_concert)
                .delete(concerts::delete_concert),
        )
        .route(
            "/api/tickets",
            get(tickets::list_tickets)
                .post(tickets::create_ticket)
                .put(tickets::update_ticket)
                .delete(tickets::delete_ticket),
        )
        .route(
            "/api/orders",
            get(orders::list_orders)
                .post(orders::create_order)
                .put(orders::update_order)
                .delete(orders::delete_order),
        )
        .route("/api/popular-tickets", get(popular::list_popular_tickets))
        .route("/api/feedback", post(feedback::submit_feedback))
        .layer(TraceLayer::new_for_http())
        .layer(create_security_headers_layer())
        .layer(create_cors_layer())
        .with_state(state)
}

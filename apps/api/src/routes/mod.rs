pub mod health;
pub mod ui;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::session::handlers;
use crate::state::AppState;
use crate::tools::handlers::handle_list_tools;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(ui::index_handler))
        .route("/health", get(health::health_handler))
        .route("/api/v1/tools", get(handle_list_tools))
        // Chat sessions
        .route("/api/v1/sessions", post(handlers::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(handlers::handle_get_session).delete(handlers::handle_destroy_session),
        )
        .route(
            "/api/v1/sessions/:id/settings",
            patch(handlers::handle_update_settings),
        )
        .route(
            "/api/v1/sessions/:id/messages",
            post(handlers::handle_send_message),
        )
        .route("/api/v1/sessions/:id/clear", post(handlers::handle_clear))
        .with_state(state)
}

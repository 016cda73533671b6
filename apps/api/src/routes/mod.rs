pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::interview::handlers as interview;
use crate::practice;
use crate::retention;
use crate::session::handlers as session;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // HR interview management
        .route(
            "/api/v1/interviews",
            post(interview::handle_create_interview).get(interview::handle_list_interviews),
        )
        .route(
            "/api/v1/interviews/export",
            get(interview::handle_export_interviews),
        )
        .route(
            "/api/v1/interviews/analytics",
            get(interview::handle_analytics),
        )
        .route(
            "/api/v1/interviews/:id",
            get(interview::handle_get_interview)
                .put(interview::handle_update_interview)
                .delete(interview::handle_delete_interview),
        )
        .route(
            "/api/v1/slots/:id/evaluate",
            post(interview::handle_evaluate_slot),
        )
        // Candidate session flow
        .route("/api/v1/sessions", post(session::handle_start_session))
        .route(
            "/api/v1/sessions/:id/next",
            post(session::handle_next_question),
        )
        .route(
            "/api/v1/sessions/:id/answers",
            post(session::handle_submit_answer),
        )
        // Practice mode
        .route(
            "/api/v1/practice/questions",
            post(practice::handle_practice_questions),
        )
        // Data retention
        .route("/api/v1/retention/sweep", post(retention::handle_sweep))
        .with_state(state)
}

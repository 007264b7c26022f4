use crate::handlers;
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, put},
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/version", get(handlers::version))
        .route(
            "/activities",
            get(handlers::list_activities).post(handlers::create_activity),
        )
        .route("/activities/:id", delete(handlers::delete_activity))
        .route("/prizes", get(handlers::list_prizes).post(handlers::create_prize))
        .route(
            "/prizes/:id",
            put(handlers::update_prize).delete(handlers::delete_prize),
        )
        .with_state(state)
}

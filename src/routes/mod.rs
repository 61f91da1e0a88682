//! API route handlers.

pub mod auth;
pub mod posts;
pub mod teams;

use crate::auth::middleware::AppState;
use axum::{
    routing::{get, post, put},
    Router,
};

/// Build the API router with all endpoints.
pub fn api_router() -> Router<AppState> {
    Router::new()
        // Auth endpoints
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        // Team lookup endpoints
        .route("/equipos", get(teams::list_teams))
        .route("/equipos/{team_id}/jugadores", get(teams::list_players))
        // Post endpoints
        .route("/posts", get(posts::list_posts).post(posts::create_post))
        .route(
            "/posts/{id}",
            put(posts::update_post).delete(posts::delete_post),
        )
}

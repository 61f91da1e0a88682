//! Team lookup endpoints. Read-only pass-throughs to the database.

use crate::auth::middleware::AppState;
use crate::error::AppError;
use crate::storage;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};

/// GET /equipos — List all teams
pub async fn list_teams(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let teams = storage::team::list_teams(&state.db).await?;
    Ok(Json(teams))
}

/// GET /equipos/{team_id}/jugadores — List a team's players with positions
pub async fn list_players(
    State(state): State<AppState>,
    Path(team_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let players = storage::team::list_players(&state.db, team_id).await?;
    Ok(Json(players))
}

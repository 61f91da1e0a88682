//! Team and player queries.

use crate::models::{Player, Team};
use sqlx::PgPool;

/// List all teams.
pub async fn list_teams(pool: &PgPool) -> Result<Vec<Team>, sqlx::Error> {
    sqlx::query_as::<_, Team>("SELECT id, name FROM equipos ORDER BY id")
        .fetch_all(pool)
        .await
}

/// List a team's players with their position names.
pub async fn list_players(pool: &PgPool, team_id: i32) -> Result<Vec<Player>, sqlx::Error> {
    sqlx::query_as::<_, Player>(
        "SELECT jugadores.name, posiciones.name AS posicion \
         FROM jugadores \
         INNER JOIN posiciones ON jugadores.id_posiciones = posiciones.id \
         WHERE jugadores.id_equipos = $1",
    )
    .bind(team_id)
    .fetch_all(pool)
    .await
}

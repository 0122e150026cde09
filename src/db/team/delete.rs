use uuid::Uuid;

use crate::{
    db::player::PlayerStore,
    errors::AppError,
    models::redis::RedisKey,
    roster::ensure_team_unused,
    state::RedisClient,
};

/// Deletes a team unless players still reference it.
pub async fn delete_team<S: PlayerStore>(
    team_id: Uuid,
    players: &S,
    redis: RedisClient,
) -> Result<(), AppError> {
    ensure_team_unused(players, team_id).await?;

    let mut conn = redis.get().await?;
    let (removed,): (i64,) = redis::pipe()
        .atomic()
        .del(RedisKey::team(team_id))
        .srem(RedisKey::teams_all(), team_id.to_string())
        .ignore()
        .query_async(&mut *conn)
        .await
        .map_err(AppError::RedisCommandError)?;

    if removed == 0 {
        return Err(AppError::NotFound("Team not found to delete".into()));
    }

    tracing::info!("Deleted team {}", team_id);
    Ok(())
}

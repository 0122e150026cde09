use uuid::Uuid;

use crate::{
    db::team::get::get_team_by_id,
    errors::AppError,
    models::{Team, redis::RedisKey},
    state::RedisClient,
};

pub async fn create_team(team_name: String, redis: RedisClient) -> Result<Team, AppError> {
    let team = Team::new(&team_name)?;
    let json = serde_json::to_string(&team).map_err(|e| AppError::Serialization(e.to_string()))?;

    let mut conn = redis.get().await?;
    let _: () = redis::pipe()
        .atomic()
        .cmd("SET")
        .arg(RedisKey::team(team.id))
        .arg(json)
        .ignore()
        .cmd("SADD")
        .arg(RedisKey::teams_all())
        .arg(team.id.to_string())
        .ignore()
        .query_async(&mut *conn)
        .await
        .map_err(AppError::RedisCommandError)?;

    Ok(team)
}

pub async fn rename_team(
    team_id: Uuid,
    team_name: String,
    redis: RedisClient,
) -> Result<Team, AppError> {
    let mut team = get_team_by_id(team_id, redis.clone()).await?;
    team.rename(&team_name)?;

    save_existing_team(&team, redis).await?;
    Ok(team)
}

/// Overwrites a stored team. Returns `NotFound` instead of recreating a team
/// that was deleted after it was loaded.
pub async fn save_existing_team(team: &Team, redis: RedisClient) -> Result<(), AppError> {
    let json = serde_json::to_string(team).map_err(|e| AppError::Serialization(e.to_string()))?;

    let mut conn = redis.get().await?;
    let written: Option<String> = redis::cmd("SET")
        .arg(RedisKey::team(team.id))
        .arg(json)
        .arg("XX")
        .query_async(&mut *conn)
        .await
        .map_err(AppError::RedisCommandError)?;

    match written {
        Some(_) => Ok(()),
        None => Err(AppError::NotFound("Team not found".into())),
    }
}

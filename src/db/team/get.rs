use redis::AsyncCommands;
use uuid::Uuid;

use crate::{
    errors::AppError,
    models::{Team, redis::RedisKey},
    state::RedisClient,
};

pub async fn get_team_by_id(team_id: Uuid, redis: RedisClient) -> Result<Team, AppError> {
    let mut conn = redis.get().await?;

    let json: Option<String> = conn
        .get(RedisKey::team(team_id))
        .await
        .map_err(AppError::RedisCommandError)?;

    let json = json.ok_or_else(|| AppError::NotFound("Team not found".into()))?;

    serde_json::from_str(&json).map_err(|e| AppError::Deserialization(e.to_string()))
}

pub async fn get_all_teams(redis: RedisClient) -> Result<Vec<Team>, AppError> {
    let mut conn = redis.get().await?;

    let ids: Vec<String> = conn
        .smembers(RedisKey::teams_all())
        .await
        .map_err(AppError::RedisCommandError)?;

    let keys: Vec<String> = ids
        .iter()
        .filter_map(|id| id.parse::<Uuid>().ok())
        .map(RedisKey::team)
        .collect();

    if keys.is_empty() {
        return Ok(Vec::new());
    }

    let docs: Vec<Option<String>> = redis::cmd("MGET")
        .arg(&keys)
        .query_async(&mut *conn)
        .await
        .map_err(AppError::RedisCommandError)?;

    let mut teams = Vec::with_capacity(docs.len());
    for json in docs.into_iter().flatten() {
        let team: Team =
            serde_json::from_str(&json).map_err(|e| AppError::Deserialization(e.to_string()))?;
        teams.push(team);
    }
    teams.sort_by_key(|t| t.created_at);

    Ok(teams)
}

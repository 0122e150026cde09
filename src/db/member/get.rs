use std::collections::HashMap;

use redis::AsyncCommands;
use uuid::Uuid;

use crate::{
    errors::AppError,
    models::{Member, redis::RedisKey},
    state::RedisClient,
};

pub async fn get_member_by_id(member_id: Uuid, redis: RedisClient) -> Result<Member, AppError> {
    let mut conn = redis.get().await?;

    let json: Option<String> = conn
        .get(RedisKey::member(member_id))
        .await
        .map_err(AppError::RedisCommandError)?;

    let json = json.ok_or_else(|| AppError::NotFound("Member not found".into()))?;

    serde_json::from_str(&json).map_err(|e| AppError::Deserialization(e.to_string()))
}

pub async fn get_all_members(redis: RedisClient) -> Result<Vec<Member>, AppError> {
    let mut conn = redis.get().await?;

    let ids: Vec<String> = conn
        .smembers(RedisKey::members_all())
        .await
        .map_err(AppError::RedisCommandError)?;

    let keys: Vec<String> = ids
        .iter()
        .filter_map(|id| id.parse::<Uuid>().ok())
        .map(RedisKey::member)
        .collect();

    if keys.is_empty() {
        return Ok(Vec::new());
    }

    let docs: Vec<Option<String>> = redis::cmd("MGET")
        .arg(&keys)
        .query_async(&mut *conn)
        .await
        .map_err(AppError::RedisCommandError)?;

    let mut members = Vec::with_capacity(docs.len());
    for json in docs.into_iter().flatten() {
        match serde_json::from_str::<Member>(&json) {
            Ok(member) => members.push(member),
            Err(e) => tracing::warn!("Skipping unreadable member record: {}", e),
        }
    }

    Ok(members)
}

/// Resolves usernames for comment authors. Unknown ids are left out of the map.
pub async fn get_usernames(
    member_ids: &[Uuid],
    redis: RedisClient,
) -> Result<HashMap<Uuid, String>, AppError> {
    if member_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let mut conn = redis.get().await?;
    let keys: Vec<String> = member_ids.iter().copied().map(RedisKey::member).collect();

    let docs: Vec<Option<String>> = redis::cmd("MGET")
        .arg(&keys)
        .query_async(&mut *conn)
        .await
        .map_err(AppError::RedisCommandError)?;

    let usernames = member_ids
        .iter()
        .zip(docs)
        .filter_map(|(id, json)| {
            let member = serde_json::from_str::<Member>(&json?).ok()?;
            Some((*id, member.username))
        })
        .collect();

    Ok(usernames)
}

use chrono::{Datelike, Utc};
use redis::AsyncCommands;
use uuid::Uuid;

use crate::{
    db::member::get::get_member_by_id,
    errors::AppError,
    models::{Member, redis::RedisKey},
    state::RedisClient,
};

pub const MIN_YOB: i32 = 1900;

pub fn validate_yob(yob: i32) -> Result<i32, AppError> {
    let current_year = Utc::now().year();
    if !(MIN_YOB..=current_year).contains(&yob) {
        return Err(AppError::BadRequest("Invalid year of birth.".into()));
    }
    Ok(yob)
}

pub async fn update_profile(
    member_id: Uuid,
    name: String,
    yob: i32,
    redis: RedisClient,
) -> Result<Member, AppError> {
    let trimmed = name.trim();
    if trimmed.is_empty() || trimmed.len() > 50 {
        return Err(AppError::BadRequest("Invalid name".into()));
    }
    let yob = validate_yob(yob)?;

    let mut member = get_member_by_id(member_id, redis.clone()).await?;
    member.name = trimmed.to_string();
    member.yob = yob;
    member.updated_at = Utc::now();

    let json =
        serde_json::to_string(&member).map_err(|e| AppError::Serialization(e.to_string()))?;

    let mut conn = redis.get().await?;
    let _: () = conn
        .set(RedisKey::member(member_id), json)
        .await
        .map_err(AppError::RedisCommandError)?;

    Ok(member)
}

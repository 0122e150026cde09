use axum::{Json, extract::State};
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};

use crate::{
    auth::{AdminMember, AuthMember},
    db::member::{get_all_members, update_profile},
    errors::AppError,
    extract::JsonBody,
    models::{Member, member::Profile},
    state::AppState,
};

#[derive(Serialize)]
pub struct AccountListResponse {
    pub message: &'static str,
    pub data: Vec<Member>,
}

/// Non-admin accounts, newest first.
pub async fn list_accounts_handler(
    AdminMember(_admin): AdminMember,
    State(state): State<AppState>,
) -> Result<Json<AccountListResponse>, AppError> {
    let mut members: Vec<Member> = get_all_members(state.redis.clone())
        .await
        .map_err(|e| {
            tracing::error!("Unable to load member list: {}", e);
            e
        })?
        .into_iter()
        .filter(|m| !m.is_admin)
        .collect();
    members.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    Ok(Json(AccountListResponse {
        message: "Successfully retrieved member list",
        data: members,
    }))
}

pub async fn get_profile_handler(AuthMember(member): AuthMember) -> Json<Profile> {
    Json(Profile::from(member))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfilePayload {
    pub name: String,
    #[serde(alias = "YOB")]
    pub yob: i32,
}

#[derive(Serialize)]
pub struct ProfileMessage {
    pub message: &'static str,
    pub user: Member,
}

pub async fn update_profile_handler(
    AuthMember(member): AuthMember,
    State(state): State<AppState>,
    WithRejection(Json(payload), _): JsonBody<UpdateProfilePayload>,
) -> Result<Json<ProfileMessage>, AppError> {
    let updated = update_profile(member.id, payload.name, payload.yob, state.redis.clone())
        .await
        .map_err(|e| {
            tracing::error!("Profile update of {} failed: {}", member.id, e);
            e
        })?;

    tracing::info!("Member {} updated their profile", member.id);
    Ok(Json(ProfileMessage {
        message: "Profile update successful",
        user: updated,
    }))
}

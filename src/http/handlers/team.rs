use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    auth::AdminMember,
    db::team::{create_team, delete_team, get_all_teams, rename_team},
    errors::AppError,
    extract::{JsonBody, PathParams},
    http::handlers::admin_player::MessageResponse,
    models::Team,
    state::AppState,
};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamPayload {
    pub team_name: String,
}

#[derive(Serialize)]
pub struct TeamListResponse {
    pub teams: Vec<Team>,
}

#[derive(Serialize)]
pub struct TeamMessage {
    pub message: &'static str,
    pub team: Team,
}

pub async fn get_all_teams_handler(
    AdminMember(_admin): AdminMember,
    State(state): State<AppState>,
) -> Result<Json<TeamListResponse>, AppError> {
    let teams = get_all_teams(state.redis.clone()).await.map_err(|e| {
        tracing::error!("Error loading team list: {}", e);
        e
    })?;

    Ok(Json(TeamListResponse { teams }))
}

pub async fn create_team_handler(
    AdminMember(_admin): AdminMember,
    State(state): State<AppState>,
    WithRejection(Json(payload), _): JsonBody<TeamPayload>,
) -> Result<(StatusCode, Json<TeamMessage>), AppError> {
    let team = create_team(payload.team_name, state.redis.clone())
        .await
        .map_err(|e| {
            tracing::error!("Error creating team: {}", e);
            e
        })?;

    tracing::info!("Created team {} ({})", team.team_name, team.id);
    Ok((
        StatusCode::CREATED,
        Json(TeamMessage {
            message: "Team created successfully",
            team,
        }),
    ))
}

pub async fn update_team_handler(
    WithRejection(Path(team_id), _): PathParams<Uuid>,
    AdminMember(_admin): AdminMember,
    State(state): State<AppState>,
    WithRejection(Json(payload), _): JsonBody<TeamPayload>,
) -> Result<Json<TeamMessage>, AppError> {
    let team = rename_team(team_id, payload.team_name, state.redis.clone())
        .await
        .map_err(|e| {
            tracing::error!("Error updating team {}: {}", team_id, e);
            e
        })?;

    Ok(Json(TeamMessage {
        message: "Update successful",
        team,
    }))
}

pub async fn delete_team_handler(
    WithRejection(Path(team_id), _): PathParams<Uuid>,
    AdminMember(_admin): AdminMember,
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, AppError> {
    delete_team(team_id, &state.players, state.redis.clone())
        .await
        .map_err(|e| {
            tracing::error!("Team deletion failed: {}", e);
            e
        })?;

    Ok(Json(MessageResponse {
        message: "Team deleted successfully",
    }))
}

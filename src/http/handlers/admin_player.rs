use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use axum_extra::extract::WithRejection;
use serde::Serialize;
use uuid::Uuid;

use crate::{
    auth::AdminMember,
    db::team::get_team_by_id,
    errors::AppError,
    extract::{JsonBody, PathParams},
    http::populate::{populate_player, populate_players},
    models::{PlayerFields, view::PlayerView},
    roster::{self, PlayerFilter},
    state::AppState,
};

#[derive(Serialize)]
pub struct PlayerListResponse {
    pub players: Vec<PlayerView>,
}

#[derive(Serialize)]
pub struct AdminPlayerMessage {
    pub message: &'static str,
    pub player: PlayerView,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

pub async fn admin_list_players_handler(
    AdminMember(_admin): AdminMember,
    State(state): State<AppState>,
) -> Result<Json<PlayerListResponse>, AppError> {
    let players = roster::list_players(&state.players, &PlayerFilter::default()).await?;
    let (players, _) = populate_players(&state, &players).await?;

    Ok(Json(PlayerListResponse { players }))
}

pub async fn create_player_handler(
    AdminMember(admin): AdminMember,
    State(state): State<AppState>,
    WithRejection(Json(fields), _): JsonBody<PlayerFields>,
) -> Result<(StatusCode, Json<AdminPlayerMessage>), AppError> {
    get_team_by_id(fields.team, state.redis.clone()).await?;

    let player = roster::create_player(&state.players, fields)
        .await
        .map_err(|e| {
            tracing::error!("Player creation failed: {}", e);
            e
        })?;

    tracing::info!("Admin {} created player {}", admin.id, player.id);
    let player = populate_player(&state, &player).await?;
    Ok((
        StatusCode::CREATED,
        Json(AdminPlayerMessage {
            message: "Player created successfully",
            player,
        }),
    ))
}

pub async fn update_player_handler(
    WithRejection(Path(player_id), _): PathParams<Uuid>,
    AdminMember(admin): AdminMember,
    State(state): State<AppState>,
    WithRejection(Json(fields), _): JsonBody<PlayerFields>,
) -> Result<Json<AdminPlayerMessage>, AppError> {
    get_team_by_id(fields.team, state.redis.clone()).await?;

    let player = roster::update_player(&state.players, player_id, fields)
        .await
        .map_err(|e| {
            tracing::error!("Update of player {} failed: {}", player_id, e);
            e
        })?;

    tracing::info!("Admin {} updated player {}", admin.id, player_id);
    let player = populate_player(&state, &player).await?;
    Ok(Json(AdminPlayerMessage {
        message: "Update successful",
        player,
    }))
}

pub async fn delete_player_handler(
    WithRejection(Path(player_id), _): PathParams<Uuid>,
    AdminMember(admin): AdminMember,
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, AppError> {
    roster::remove_player(&state.players, player_id)
        .await
        .map_err(|e| {
            tracing::error!("Deletion of player {} failed: {}", player_id, e);
            e
        })?;

    tracing::info!("Admin {} deleted player {}", admin.id, player_id);
    Ok(Json(MessageResponse {
        message: "Player deleted successfully",
    }))
}

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use axum_extra::extract::WithRejection;
use serde::Serialize;
use uuid::Uuid;

use crate::{
    auth::AuthMember,
    errors::AppError,
    extract::{JsonBody, PathParams},
    http::populate::populate_player,
    ledger,
    models::{CommentInput, CommentPayload, view::PlayerView},
    state::AppState,
};

#[derive(Serialize)]
pub struct PlayerMessage {
    pub message: &'static str,
    pub player: PlayerView,
}

pub async fn add_comment_handler(
    WithRejection(Path(player_id), _): PathParams<Uuid>,
    AuthMember(member): AuthMember,
    State(state): State<AppState>,
    WithRejection(Json(payload), _): JsonBody<CommentPayload>,
) -> Result<(StatusCode, Json<PlayerMessage>), AppError> {
    let input = CommentInput::new(payload.rating, payload.content)?;

    let player = ledger::add_comment(&state.players, player_id, member.id, input)
        .await
        .map_err(|e| {
            tracing::error!("Error submitting rating on player {}: {}", player_id, e);
            e
        })?;

    let player = populate_player(&state, &player).await?;
    Ok((
        StatusCode::CREATED,
        Json(PlayerMessage {
            message: "Rating successful",
            player,
        }),
    ))
}

pub async fn edit_comment_handler(
    WithRejection(Path((player_id, comment_id)), _): PathParams<(Uuid, Uuid)>,
    AuthMember(member): AuthMember,
    State(state): State<AppState>,
    WithRejection(Json(payload), _): JsonBody<CommentPayload>,
) -> Result<Json<PlayerMessage>, AppError> {
    let input = CommentInput::new(payload.rating, payload.content)?;

    let player = ledger::edit_comment(&state.players, player_id, comment_id, member.id, input)
        .await
        .map_err(|e| {
            tracing::error!("Error updating comment {}: {}", comment_id, e);
            e
        })?;

    let player = populate_player(&state, &player).await?;
    Ok(Json(PlayerMessage {
        message: "Comment updated successfully",
        player,
    }))
}

pub async fn delete_comment_handler(
    WithRejection(Path((player_id, comment_id)), _): PathParams<(Uuid, Uuid)>,
    AuthMember(member): AuthMember,
    State(state): State<AppState>,
) -> Result<Json<PlayerMessage>, AppError> {
    let player = ledger::delete_comment(&state.players, player_id, comment_id, member.id)
        .await
        .map_err(|e| {
            tracing::error!("Error deleting comment {}: {}", comment_id, e);
            e
        })?;

    let player = populate_player(&state, &player).await?;
    Ok(Json(PlayerMessage {
        message: "Comment deleted successfully",
        player,
    }))
}

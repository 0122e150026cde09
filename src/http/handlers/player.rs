use axum::{
    Json,
    extract::{Path, Query, State},
};
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    auth::OptionalMember,
    errors::AppError,
    extract::{PathParams, QueryParams},
    http::populate::{populate_comments, populate_player, populate_players},
    ledger::{self, paginate},
    models::{Team, view::CommentView, view::PlayerView},
    roster::{PlayerFilter, list_players},
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct PlayerIndexQuery {
    pub search: Option<String>,
    pub team: Option<String>,
}

#[derive(Serialize)]
pub struct PlayerIndexResponse {
    pub players: Vec<PlayerView>,
    pub teams: Vec<Team>,
}

pub async fn list_players_handler(
    State(state): State<AppState>,
    WithRejection(Query(query), _): QueryParams<PlayerIndexQuery>,
) -> Result<Json<PlayerIndexResponse>, AppError> {
    // An empty `team` parameter means "all teams".
    let team = match query.team.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => Some(
            Uuid::parse_str(raw).map_err(|_| AppError::BadRequest("Invalid team id".into()))?,
        ),
    };
    let filter = PlayerFilter {
        search: query.search,
        team,
    };

    let players = list_players(&state.players, &filter).await.map_err(|e| {
        tracing::error!("Error loading player list: {}", e);
        e
    })?;
    let (players, teams) = populate_players(&state, &players).await?;

    tracing::info!("Listed {} players", players.len());
    Ok(Json(PlayerIndexResponse { players, teams }))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerDetailResponse {
    pub player: PlayerView,
    pub user_can_comment: bool,
}

pub async fn player_detail_handler(
    WithRejection(Path(player_id), _): PathParams<Uuid>,
    OptionalMember(viewer): OptionalMember,
    State(state): State<AppState>,
) -> Result<Json<PlayerDetailResponse>, AppError> {
    let detail = ledger::detail(&state.players, player_id, viewer.map(|m| m.id))
        .await
        .map_err(|e| {
            tracing::error!("Error loading player {}: {}", player_id, e);
            e
        })?;

    let player = populate_player(&state, &detail.player).await?;

    Ok(Json(PlayerDetailResponse {
        player,
        user_can_comment: detail.user_can_comment,
    }))
}

#[derive(Debug, Deserialize)]
pub struct CommentPageQuery {
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentPageResponse {
    pub own_comment: Option<CommentView>,
    pub comments: Vec<CommentView>,
    pub page: usize,
    pub total_pages: usize,
}

pub async fn comment_page_handler(
    WithRejection(Path(player_id), _): PathParams<Uuid>,
    WithRejection(Query(query), _): QueryParams<CommentPageQuery>,
    OptionalMember(viewer): OptionalMember,
    State(state): State<AppState>,
) -> Result<Json<CommentPageResponse>, AppError> {
    let viewer = viewer.map(|m| m.id);
    let player = ledger::detail(&state.players, player_id, viewer)
        .await
        .map_err(|e| {
            tracing::error!("Error loading comments of player {}: {}", player_id, e);
            e
        })?
        .player;

    let limit = query
        .limit
        .unwrap_or(state.config.comments_per_page)
        .clamp(1, 100);

    // Clamp the requested page into range before slicing.
    let total_pages = paginate(&player.comments, viewer, limit, 1).total_pages;
    let page = query.page.unwrap_or(1).clamp(1, total_pages);
    let view = paginate(&player.comments, viewer, limit, page);

    let own_comment = match view.own_comment {
        Some(own) => populate_comments(&state, &[own]).await?.pop(),
        None => None,
    };
    let comments = populate_comments(&state, &view.others).await?;

    Ok(Json(CommentPageResponse {
        own_comment,
        comments,
        page,
        total_pages: view.total_pages,
    }))
}

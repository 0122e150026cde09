use std::collections::HashMap;
use uuid::Uuid;

use crate::{
    db::{
        member::get_usernames,
        team::{get_all_teams, get_team_by_id},
    },
    errors::AppError,
    models::{Comment, Player, Team, view::CommentView, view::PlayerView},
    state::AppState,
};

/// Resolves the team and every comment author of a single player.
pub async fn populate_player(state: &AppState, player: &Player) -> Result<PlayerView, AppError> {
    let team = match get_team_by_id(player.team, state.redis.clone()).await {
        Ok(team) => Some(team),
        Err(AppError::NotFound(_)) => {
            tracing::warn!("Player {} references missing team {}", player.id, player.team);
            None
        }
        Err(e) => return Err(e),
    };

    let authors: Vec<Uuid> = player.comments.iter().map(|c| c.author).collect();
    let usernames = get_usernames(&authors, state.redis.clone()).await?;

    Ok(PlayerView::populate(player, team.as_ref(), &usernames))
}

/// Same as [`populate_player`] for many players, loading teams and authors once.
pub async fn populate_players(
    state: &AppState,
    players: &[Player],
) -> Result<(Vec<PlayerView>, Vec<Team>), AppError> {
    let teams = get_all_teams(state.redis.clone()).await?;
    let by_id: HashMap<Uuid, &Team> = teams.iter().map(|t| (t.id, t)).collect();

    let mut authors: Vec<Uuid> = players
        .iter()
        .flat_map(|p| p.comments.iter().map(|c| c.author))
        .collect();
    authors.sort();
    authors.dedup();
    let usernames = get_usernames(&authors, state.redis.clone()).await?;

    let views = players
        .iter()
        .map(|p| PlayerView::populate(p, by_id.get(&p.team).copied(), &usernames))
        .collect();

    Ok((views, teams))
}

pub async fn populate_comments(
    state: &AppState,
    comments: &[&Comment],
) -> Result<Vec<CommentView>, AppError> {
    let authors: Vec<Uuid> = comments.iter().map(|c| c.author).collect();
    let usernames = get_usernames(&authors, state.redis.clone()).await?;

    Ok(comments
        .iter()
        .map(|c| CommentView::populate(c, &usernames))
        .collect())
}

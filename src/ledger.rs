//! Rules for the comments a player carries: one per member, editable and
//! removable only by their author.

use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use crate::{
    db::player::PlayerStore,
    errors::AppError,
    models::{Comment, CommentInput, Player},
};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerDetail {
    pub player: Player,
    pub user_can_comment: bool,
}

/// Loads a player for display. `viewer` is `None` for anonymous requests.
pub async fn detail<S: PlayerStore>(
    store: &S,
    player_id: Uuid,
    viewer: Option<Uuid>,
) -> Result<PlayerDetail, AppError> {
    let player = store.get(player_id).await?;
    let user_can_comment = player.can_comment(viewer);

    Ok(PlayerDetail {
        player,
        user_can_comment,
    })
}

pub async fn add_comment<S: PlayerStore>(
    store: &S,
    player_id: Uuid,
    member_id: Uuid,
    input: CommentInput,
) -> Result<Player, AppError> {
    let player = store
        .modify(player_id, |player| {
            player.push_comment(member_id, input.clone(), Utc::now())?;
            Ok(())
        })
        .await?;

    tracing::info!("Member {} rated player {}", member_id, player_id);
    Ok(player)
}

pub async fn edit_comment<S: PlayerStore>(
    store: &S,
    player_id: Uuid,
    comment_id: Uuid,
    member_id: Uuid,
    input: CommentInput,
) -> Result<Player, AppError> {
    let player = store
        .modify(player_id, |player| {
            player.edit_comment(comment_id, member_id, input.clone(), Utc::now())?;
            Ok(())
        })
        .await?;

    tracing::info!("Member {} edited comment {} on player {}", member_id, comment_id, player_id);
    Ok(player)
}

pub async fn delete_comment<S: PlayerStore>(
    store: &S,
    player_id: Uuid,
    comment_id: Uuid,
    member_id: Uuid,
) -> Result<Player, AppError> {
    let player = store
        .modify(player_id, |player| {
            player.remove_comment(comment_id, member_id)?;
            Ok(())
        })
        .await?;

    tracing::info!("Member {} deleted comment {} on player {}", member_id, comment_id, player_id);
    Ok(player)
}

#[derive(Debug, Clone, PartialEq)]
pub struct CommentPage<'a> {
    pub own_comment: Option<&'a Comment>,
    pub others: Vec<&'a Comment>,
    pub total_pages: usize,
}

/// Number of other members' comments shown per page.
///
/// One slot is held back for the viewer's own comment, unless that would
/// leave no room at all.
pub fn effective_capacity(page_size: usize, has_own_comment: bool) -> usize {
    let page_size = page_size.max(1);
    let reserved = usize::from(has_own_comment);

    match page_size - reserved {
        0 => page_size,
        capacity => capacity,
    }
}

/// Splits out the viewer's own comment and returns page `page` (1-based) of the rest.
///
/// Pages past the end come back empty; page 0 is read as page 1.
pub fn paginate(
    comments: &[Comment],
    viewer: Option<Uuid>,
    page_size: usize,
    page: usize,
) -> CommentPage<'_> {
    let own_comment = viewer.and_then(|id| comments.iter().find(|c| c.author == id));
    let others: Vec<&Comment> = comments
        .iter()
        .filter(|c| Some(c.author) != viewer)
        .collect();

    let capacity = effective_capacity(page_size, own_comment.is_some());
    let total_pages = others.len().div_ceil(capacity).max(1);

    let start = page.saturating_sub(1).saturating_mul(capacity);
    let page_of_others = others.into_iter().skip(start).take(capacity).collect();

    CommentPage {
        own_comment,
        others: page_of_others,
        total_pages,
    }
}

//! Player catalog queries and the administrator's player maintenance.

use uuid::Uuid;

use crate::{
    db::player::PlayerStore,
    errors::AppError,
    models::{Player, PlayerFields},
};

#[derive(Debug, Default, Clone)]
pub struct PlayerFilter {
    pub search: Option<String>,
    pub team: Option<Uuid>,
}

impl PlayerFilter {
    pub fn matches(&self, player: &Player) -> bool {
        let name_ok = match self.search.as_deref().map(str::trim) {
            Some(search) if !search.is_empty() => player
                .player_name
                .to_lowercase()
                .contains(&search.to_lowercase()),
            _ => true,
        };
        let team_ok = self.team.is_none_or(|team| player.team == team);

        name_ok && team_ok
    }
}

pub async fn list_players<S: PlayerStore>(
    store: &S,
    filter: &PlayerFilter,
) -> Result<Vec<Player>, AppError> {
    Ok(store
        .list()
        .await?
        .into_iter()
        .filter(|p| filter.matches(p))
        .collect())
}

/// Fails if `fields` names a captain for a team that already has another one.
async fn ensure_single_captain<S: PlayerStore>(
    store: &S,
    fields: &PlayerFields,
    exclude: Option<Uuid>,
    message: &str,
) -> Result<(), AppError> {
    if !fields.is_captain {
        return Ok(());
    }

    let clash = store
        .list()
        .await?
        .iter()
        .any(|p| p.team == fields.team && p.is_captain && Some(p.id) != exclude);

    if clash {
        return Err(AppError::Conflict(message.into()));
    }
    Ok(())
}

/// Creates a player. The caller has already checked that `fields.team` exists.
pub async fn create_player<S: PlayerStore>(
    store: &S,
    fields: PlayerFields,
) -> Result<Player, AppError> {
    fields.validate()?;
    ensure_single_captain(store, &fields, None, "This team already has a captain").await?;

    let player = Player::new(fields);
    store.insert(&player).await?;

    tracing::info!("Created player {} ({})", player.player_name, player.id);
    Ok(player)
}

/// Rewrites a player's catalog fields, keeping its comments.
pub async fn update_player<S: PlayerStore>(
    store: &S,
    player_id: Uuid,
    fields: PlayerFields,
) -> Result<Player, AppError> {
    fields.validate()?;
    ensure_single_captain(
        store,
        &fields,
        Some(player_id),
        "This team already has another captain",
    )
    .await?;

    let player = store
        .modify(player_id, |player| {
            player.apply_fields(fields.clone());
            Ok(())
        })
        .await?;

    tracing::info!("Updated player {}", player_id);
    Ok(player)
}

/// Fails while any player still belongs to `team_id`.
pub async fn ensure_team_unused<S: PlayerStore>(store: &S, team_id: Uuid) -> Result<(), AppError> {
    let player_count = store.list().await?.iter().filter(|p| p.team == team_id).count();

    if player_count > 0 {
        return Err(AppError::Conflict(format!(
            "Cannot delete team because there are still {player_count} players in this team."
        )));
    }
    Ok(())
}

/// Deletes a player that nobody has rated yet.
pub async fn remove_player<S: PlayerStore>(store: &S, player_id: Uuid) -> Result<Player, AppError> {
    let player = store
        .remove(player_id, |player| {
            if player.comments.is_empty() {
                Ok(())
            } else {
                Err(AppError::Conflict(
                    "Cannot delete player because there are ratings or comments".into(),
                ))
            }
        })
        .await?;

    tracing::info!("Deleted player {}", player_id);
    Ok(player)
}

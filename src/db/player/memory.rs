use async_trait::async_trait;
use std::{collections::HashMap, sync::Arc};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::{db::player::PlayerStore, errors::AppError, models::Player};

/// Process-local store; every operation holds one lock, so writes never race.
#[derive(Debug, Default, Clone)]
pub struct MemoryPlayerStore {
    players: Arc<Mutex<HashMap<Uuid, Player>>>,
}

impl MemoryPlayerStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn not_found(player_id: Uuid) -> AppError {
    AppError::NotFound(format!("Player {player_id} not found"))
}

#[async_trait]
impl PlayerStore for MemoryPlayerStore {
    async fn get(&self, player_id: Uuid) -> Result<Player, AppError> {
        self.players
            .lock()
            .await
            .get(&player_id)
            .cloned()
            .ok_or_else(|| not_found(player_id))
    }

    async fn list(&self) -> Result<Vec<Player>, AppError> {
        let mut players: Vec<Player> = self.players.lock().await.values().cloned().collect();
        players.sort_by_key(|p| p.created_at);
        Ok(players)
    }

    async fn insert(&self, player: &Player) -> Result<(), AppError> {
        self.players.lock().await.insert(player.id, player.clone());
        Ok(())
    }

    async fn modify<F>(&self, player_id: Uuid, mut apply: F) -> Result<Player, AppError>
    where
        F: FnMut(&mut Player) -> Result<(), AppError> + Send,
    {
        let mut players = self.players.lock().await;
        let stored = players.get_mut(&player_id).ok_or_else(|| not_found(player_id))?;

        // Work on a copy so a failed check leaves the stored player untouched.
        let mut player = stored.clone();
        apply(&mut player)?;
        *stored = player.clone();

        Ok(player)
    }

    async fn remove<F>(&self, player_id: Uuid, guard: F) -> Result<Player, AppError>
    where
        F: Fn(&Player) -> Result<(), AppError> + Send + Sync,
    {
        let mut players = self.players.lock().await;
        let player = players.get(&player_id).ok_or_else(|| not_found(player_id))?;
        guard(player)?;

        players.remove(&player_id).ok_or_else(|| not_found(player_id))
    }
}

pub mod memory;
pub mod redis_store;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{errors::AppError, models::Player};

pub use memory::MemoryPlayerStore;
pub use redis_store::RedisPlayerStore;

/// Document store holding one player aggregate, comments included, per id.
#[async_trait]
pub trait PlayerStore: Send + Sync {
    /// Returns a player by id, or `NotFound`.
    async fn get(&self, player_id: Uuid) -> Result<Player, AppError>;

    /// Returns every player, oldest first.
    async fn list(&self) -> Result<Vec<Player>, AppError>;

    async fn insert(&self, player: &Player) -> Result<(), AppError>;

    /// Atomically loads a player, applies `apply` and saves the result.
    ///
    /// Nothing is written when `apply` fails. A concurrent write to the same
    /// player between load and save causes `apply` to run again on fresh data.
    async fn modify<F>(&self, player_id: Uuid, apply: F) -> Result<Player, AppError>
    where
        F: FnMut(&mut Player) -> Result<(), AppError> + Send;

    /// Deletes a player if `guard` accepts its current state.
    async fn remove<F>(&self, player_id: Uuid, guard: F) -> Result<Player, AppError>
    where
        F: Fn(&Player) -> Result<(), AppError> + Send + Sync;
}

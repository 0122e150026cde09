use async_trait::async_trait;
use redis::AsyncCommands;
use uuid::Uuid;

use crate::{
    db::player::PlayerStore,
    errors::AppError,
    models::{Player, redis::RedisKey},
    state::RedisClient,
};

type Connection = redis::aio::MultiplexedConnection;

/// Players stored as JSON strings under `player:{id}`, indexed by the `players:all` set.
///
/// Read-modify-write runs under `WATCH`, so a save only lands if nobody else
/// wrote the player since it was loaded.
#[derive(Clone)]
pub struct RedisPlayerStore {
    redis: RedisClient,
    write_attempts: u32,
}

impl RedisPlayerStore {
    pub fn new(redis: RedisClient, write_attempts: u32) -> Self {
        Self {
            redis,
            write_attempts: write_attempts.max(1),
        }
    }
}

fn not_found(player_id: Uuid) -> AppError {
    AppError::NotFound(format!("Player {player_id} not found"))
}

fn decode(json: &str) -> Result<Player, AppError> {
    serde_json::from_str(json).map_err(|e| AppError::Deserialization(e.to_string()))
}

fn encode(player: &Player) -> Result<String, AppError> {
    serde_json::to_string(player).map_err(|e| AppError::Serialization(e.to_string()))
}

async fn unwatch(conn: &mut Connection) {
    let result: Result<(), _> = redis::cmd("UNWATCH").query_async(conn).await;
    if let Err(e) = result {
        tracing::warn!("Failed to release WATCH: {}", e);
    }
}

/// Watches `key` and loads the player under it. The watch is released on any error.
async fn watch_and_load(
    conn: &mut Connection,
    key: &str,
    player_id: Uuid,
) -> Result<Player, AppError> {
    let _: () = redis::cmd("WATCH")
        .arg(key)
        .query_async(&mut *conn)
        .await
        .map_err(AppError::RedisCommandError)?;

    let loaded: Result<Option<String>, _> = conn.get(key).await;
    let result = match loaded {
        Ok(Some(json)) => decode(&json),
        Ok(None) => Err(not_found(player_id)),
        Err(e) => Err(AppError::RedisCommandError(e)),
    };

    if result.is_err() {
        unwatch(conn).await;
    }
    result
}

#[async_trait]
impl PlayerStore for RedisPlayerStore {
    async fn get(&self, player_id: Uuid) -> Result<Player, AppError> {
        let mut conn = self.redis.get().await?;

        let json: Option<String> = conn
            .get(RedisKey::player(player_id))
            .await
            .map_err(AppError::RedisCommandError)?;

        match json {
            Some(json) => decode(&json),
            None => Err(not_found(player_id)),
        }
    }

    async fn list(&self) -> Result<Vec<Player>, AppError> {
        let mut conn = self.redis.get().await?;

        let ids: Vec<String> = conn
            .smembers(RedisKey::players_all())
            .await
            .map_err(AppError::RedisCommandError)?;

        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let keys: Vec<String> = ids
            .iter()
            .filter_map(|id| id.parse::<Uuid>().ok())
            .map(RedisKey::player)
            .collect();

        let docs: Vec<Option<String>> = redis::cmd("MGET")
            .arg(&keys)
            .query_async(&mut *conn)
            .await
            .map_err(AppError::RedisCommandError)?;

        let mut players = Vec::with_capacity(docs.len());
        for json in docs.into_iter().flatten() {
            players.push(decode(&json)?);
        }
        players.sort_by_key(|p| p.created_at);

        Ok(players)
    }

    async fn insert(&self, player: &Player) -> Result<(), AppError> {
        let mut conn = self.redis.get().await?;
        let json = encode(player)?;

        let _: () = redis::pipe()
            .atomic()
            .cmd("SET")
            .arg(RedisKey::player(player.id))
            .arg(json)
            .ignore()
            .cmd("SADD")
            .arg(RedisKey::players_all())
            .arg(player.id.to_string())
            .ignore()
            .query_async(&mut *conn)
            .await
            .map_err(AppError::RedisCommandError)?;

        tracing::debug!("Stored player {}", player.id);
        Ok(())
    }

    async fn modify<F>(&self, player_id: Uuid, mut apply: F) -> Result<Player, AppError>
    where
        F: FnMut(&mut Player) -> Result<(), AppError> + Send,
    {
        let mut conn = self.redis.get().await?;
        let key = RedisKey::player(player_id);

        for attempt in 1..=self.write_attempts {
            let mut player = watch_and_load(&mut conn, &key, player_id).await?;

            if let Err(e) = apply(&mut player) {
                unwatch(&mut conn).await;
                return Err(e);
            }

            let json = match encode(&player) {
                Ok(json) => json,
                Err(e) => {
                    unwatch(&mut conn).await;
                    return Err(e);
                }
            };

            // EXEC replies nil when the watched key changed after WATCH.
            let committed: Option<()> = redis::pipe()
                .atomic()
                .cmd("SET")
                .arg(&key)
                .arg(json)
                .ignore()
                .query_async(&mut *conn)
                .await
                .map_err(AppError::RedisCommandError)?;

            if committed.is_some() {
                return Ok(player);
            }

            tracing::warn!(
                "Concurrent write on player {} (attempt {}/{}), retrying",
                player_id,
                attempt,
                self.write_attempts
            );
        }

        Err(AppError::Contention(format!(
            "Player {player_id} is being modified concurrently, try again"
        )))
    }

    async fn remove<F>(&self, player_id: Uuid, guard: F) -> Result<Player, AppError>
    where
        F: Fn(&Player) -> Result<(), AppError> + Send + Sync,
    {
        let mut conn = self.redis.get().await?;
        let key = RedisKey::player(player_id);

        for _ in 0..self.write_attempts {
            let player = watch_and_load(&mut conn, &key, player_id).await?;

            if let Err(e) = guard(&player) {
                unwatch(&mut conn).await;
                return Err(e);
            }

            let committed: Option<()> = redis::pipe()
                .atomic()
                .cmd("DEL")
                .arg(&key)
                .ignore()
                .cmd("SREM")
                .arg(RedisKey::players_all())
                .arg(player_id.to_string())
                .ignore()
                .query_async(&mut *conn)
                .await
                .map_err(AppError::RedisCommandError)?;

            if committed.is_some() {
                return Ok(player);
            }
        }

        Err(AppError::Contention(format!(
            "Player {player_id} is being modified concurrently, try again"
        )))
    }
}

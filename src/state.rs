use bb8::Pool;
use bb8_redis::RedisConnectionManager;
use std::sync::Arc;

use crate::{config::Config, db::player::RedisPlayerStore};

#[derive(Clone)]
pub struct AppState {
    pub redis: RedisClient,
    pub players: RedisPlayerStore,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(redis: RedisClient, config: Config) -> Self {
        Self {
            players: RedisPlayerStore::new(redis.clone(), config.store_write_attempts),
            redis,
            config: Arc::new(config),
        }
    }
}

pub type RedisClient = Pool<RedisConnectionManager>;

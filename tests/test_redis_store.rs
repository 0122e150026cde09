//! Runs against the Redis at `REDIS_URL`; each test returns early when it is unset.

use bb8::Pool;
use bb8_redis::RedisConnectionManager;
use player_feedback_be::{
    db::{
        player::{MemoryPlayerStore, PlayerStore, RedisPlayerStore},
        team::{create_team, delete_team, get_all_teams, get_team_by_id, rename_team, save_existing_team},
    },
    errors::AppError,
    ledger::add_comment,
    models::{CommentInput, Player, PlayerFields, redis::RedisKey},
    state::RedisClient,
};
use uuid::Uuid;

fn redis_url() -> Option<String> {
    let url = std::env::var("REDIS_URL").ok();
    if url.is_none() {
        eprintln!("REDIS_URL not set, skipping");
    }
    url
}

async fn pool(url: &str) -> RedisClient {
    let manager = RedisConnectionManager::new(url).unwrap();
    Pool::builder().build(manager).await.unwrap()
}

async fn seeded_player(store: &RedisPlayerStore) -> Player {
    let player = Player::new(PlayerFields {
        player_name: "Iniesta".into(),
        image: "iniesta.png".into(),
        cost: 12.5,
        is_captain: false,
        information: "Midfielder".into(),
        team: Uuid::new_v4(),
    });
    store.insert(&player).await.unwrap();
    player
}

async fn cleanup(store: &RedisPlayerStore, player_id: Uuid) {
    store.remove(player_id, |_| Ok(())).await.unwrap();
}

#[tokio::test]
async fn test_concurrent_adds_by_one_member_keep_one_comment() {
    let Some(url) = redis_url() else { return };
    let store = RedisPlayerStore::new(pool(&url).await, 5);
    let player_id = seeded_player(&store).await.id;
    let member = Uuid::new_v4();

    let handles: Vec<_> = (0..2)
        .map(|i| {
            let store = store.clone();
            tokio::spawn(async move {
                let input = CommentInput::new(2, format!("take {i}")).unwrap();
                add_comment(&store, player_id, member, input).await
            })
        })
        .collect();

    let mut accepted = 0;
    let mut conflicts = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => accepted += 1,
            Err(AppError::Conflict(_)) => conflicts += 1,
            Err(e) => panic!("unexpected error: {e}"),
        }
    }
    assert_eq!((accepted, conflicts), (1, 1));

    let stored = store.get(player_id).await.unwrap();
    assert_eq!(stored.comments.len(), 1);
    assert_eq!(stored.comments[0].author, member);

    cleanup(&store, player_id).await;
}

#[tokio::test]
async fn test_concurrent_adds_by_different_members_are_all_kept() {
    let Some(url) = redis_url() else { return };
    let store = RedisPlayerStore::new(pool(&url).await, 10);
    let player_id = seeded_player(&store).await.id;

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let store = store.clone();
            tokio::spawn(async move {
                let input = CommentInput::new(3, "solid").unwrap();
                add_comment(&store, player_id, Uuid::new_v4(), input).await
            })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(store.get(player_id).await.unwrap().comments.len(), 4);
    cleanup(&store, player_id).await;
}

#[tokio::test]
async fn test_repeated_interference_ends_in_contention() {
    let Some(url) = redis_url() else { return };
    let store = RedisPlayerStore::new(pool(&url).await, 3);
    let player = seeded_player(&store).await;

    let key = RedisKey::player(player.id);
    let mut side = redis::Client::open(url.as_str())
        .unwrap()
        .get_connection()
        .unwrap();
    let mut calls = 0;

    // Every attempt is overwritten from another connection before it commits.
    let result = store
        .modify(player.id, |loaded| {
            calls += 1;
            let json = serde_json::to_string(&*loaded).unwrap();
            let _: () = redis::cmd("SET").arg(&key).arg(json).query(&mut side).unwrap();
            loaded.information = "never saved".into();
            Ok(())
        })
        .await;

    assert!(matches!(result, Err(AppError::Contention(_))));
    assert_eq!(calls, 3);
    assert_eq!(store.get(player.id).await.unwrap().information, "Midfielder");

    cleanup(&store, player.id).await;
}

#[tokio::test]
async fn test_team_delete_and_rename() {
    let Some(url) = redis_url() else { return };
    let redis = pool(&url).await;

    let team = create_team("Barcelona".into(), redis.clone()).await.unwrap();
    let renamed = rename_team(team.id, "FC Barcelona".into(), redis.clone())
        .await
        .unwrap();
    assert_eq!(
        get_team_by_id(team.id, redis.clone()).await.unwrap().team_name,
        renamed.team_name
    );

    delete_team(team.id, &MemoryPlayerStore::new(), redis.clone())
        .await
        .unwrap();

    let listed = get_all_teams(redis.clone()).await.unwrap();
    assert!(listed.iter().all(|t| t.id != team.id));
    assert!(matches!(
        delete_team(team.id, &MemoryPlayerStore::new(), redis.clone()).await,
        Err(AppError::NotFound(_))
    ));

    // A write of a team loaded before the delete must not bring it back.
    assert!(matches!(
        save_existing_team(&renamed, redis.clone()).await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        get_team_by_id(team.id, redis).await,
        Err(AppError::NotFound(_))
    ));
}

use chrono::{Duration, Utc};
use player_feedback_be::{
    db::player::{MemoryPlayerStore, PlayerStore},
    errors::AppError,
    ledger::{add_comment, delete_comment, detail, edit_comment},
    models::{CommentInput, Player, PlayerFields},
};
use uuid::Uuid;

fn input(rating: i64, content: &str) -> CommentInput {
    CommentInput::new(rating, content).expect("valid comment input")
}

async fn seeded_store() -> (MemoryPlayerStore, Uuid) {
    let store = MemoryPlayerStore::new();
    let player = Player::new(PlayerFields {
        player_name: "Lionel Messi".into(),
        image: "https://example.com/messi.png".into(),
        cost: 120.0,
        is_captain: true,
        information: "Forward".into(),
        team: Uuid::new_v4(),
    });
    store.insert(&player).await.expect("insert player");
    (store, player.id)
}

#[tokio::test]
async fn test_first_comment_then_duplicate_is_rejected() {
    let (store, player_id) = seeded_store().await;
    let m1 = Uuid::new_v4();

    let before = detail(&store, player_id, Some(m1)).await.unwrap();
    assert!(before.user_can_comment);
    assert!(before.player.comments.is_empty());

    let player = add_comment(&store, player_id, m1, input(3, "great")).await.unwrap();
    assert_eq!(player.comments.len(), 1);
    assert_eq!(player.comments[0].author, m1);
    assert_eq!(player.comments[0].rating.value(), 3);
    assert_eq!(player.comments[0].content, "great");

    let second = add_comment(&store, player_id, m1, input(2, "again")).await;
    assert!(matches!(second, Err(AppError::Conflict(_))));

    let after = detail(&store, player_id, Some(m1)).await.unwrap();
    assert!(!after.user_can_comment);
    assert_eq!(after.player.comments.len(), 1);
}

#[tokio::test]
async fn test_anonymous_viewer_cannot_comment() {
    let (store, player_id) = seeded_store().await;

    let view = detail(&store, player_id, None).await.unwrap();
    assert!(!view.user_can_comment);
}

#[tokio::test]
async fn test_other_members_can_still_comment() {
    let (store, player_id) = seeded_store().await;
    let m1 = Uuid::new_v4();
    let m2 = Uuid::new_v4();

    add_comment(&store, player_id, m1, input(1, "meh")).await.unwrap();

    let view = detail(&store, player_id, Some(m2)).await.unwrap();
    assert!(view.user_can_comment);

    let player = add_comment(&store, player_id, m2, input(2, "fine")).await.unwrap();
    let authors: Vec<Uuid> = player.comments.iter().map(|c| c.author).collect();
    assert_eq!(authors, vec![m1, m2]);
}

#[tokio::test]
async fn test_non_author_cannot_edit_or_delete() {
    let (store, player_id) = seeded_store().await;
    let m1 = Uuid::new_v4();
    let m2 = Uuid::new_v4();

    let player = add_comment(&store, player_id, m1, input(1, "original")).await.unwrap();
    let c1 = player.comments[0].clone();

    let edit = edit_comment(&store, player_id, c1.id, m2, input(2, "x")).await;
    assert!(matches!(edit, Err(AppError::Forbidden(_))));

    let delete = delete_comment(&store, player_id, c1.id, m2).await;
    assert!(matches!(delete, Err(AppError::Forbidden(_))));

    let stored = store.get(player_id).await.unwrap();
    assert_eq!(stored.comments, vec![c1]);
}

#[tokio::test]
async fn test_author_edits_in_place() {
    let (store, player_id) = seeded_store().await;
    let m1 = Uuid::new_v4();

    let player = add_comment(&store, player_id, m1, input(1, "meh")).await.unwrap();
    let c1 = player.comments[0].clone();

    let player = edit_comment(&store, player_id, c1.id, m1, input(3, "updated"))
        .await
        .unwrap();
    let edited = &player.comments[0];

    assert_eq!(player.comments.len(), 1);
    assert_eq!(edited.id, c1.id);
    assert_eq!(edited.author, m1);
    assert_eq!(edited.rating.value(), 3);
    assert_eq!(edited.content, "updated");
    assert_eq!(edited.created_at, c1.created_at);
    assert!(edited.updated_at >= c1.updated_at);
}

#[test]
fn test_edit_moves_updated_at_forward() {
    let mut player = Player::new(PlayerFields {
        player_name: "Kaka".into(),
        image: "kaka.png".into(),
        cost: 50.0,
        is_captain: false,
        information: "Midfielder".into(),
        team: Uuid::new_v4(),
    });
    let author = Uuid::new_v4();
    let created = Utc::now();

    let comment_id = player.push_comment(author, input(1, "ok"), created).unwrap().id;

    let later = created + Duration::minutes(5);
    let edited = player
        .edit_comment(comment_id, author, input(2, "better"), later)
        .unwrap();
    assert_eq!(edited.updated_at, later);
    assert_eq!(edited.created_at, created);

    // A clock that went backwards never rewinds the timestamp.
    let edited = player
        .edit_comment(comment_id, author, input(3, "best"), created)
        .unwrap();
    assert_eq!(edited.updated_at, later);
}

#[tokio::test]
async fn test_delete_allows_rating_again() {
    let (store, player_id) = seeded_store().await;
    let m1 = Uuid::new_v4();

    let player = add_comment(&store, player_id, m1, input(2, "first")).await.unwrap();
    let c1 = player.comments[0].id;

    let player = delete_comment(&store, player_id, c1, m1).await.unwrap();
    assert!(player.comments.is_empty());
    assert!(detail(&store, player_id, Some(m1)).await.unwrap().user_can_comment);

    let player = add_comment(&store, player_id, m1, input(3, "second")).await.unwrap();
    assert_eq!(player.comments.len(), 1);
    assert_ne!(player.comments[0].id, c1);
}

#[tokio::test]
async fn test_delete_unknown_comment_is_not_found() {
    let (store, player_id) = seeded_store().await;
    let m1 = Uuid::new_v4();
    add_comment(&store, player_id, m1, input(2, "kept")).await.unwrap();
    let before = store.get(player_id).await.unwrap();

    let result = delete_comment(&store, player_id, Uuid::new_v4(), m1).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));

    let after = store.get(player_id).await.unwrap();
    assert_eq!(before, after);
}

#[tokio::test]
async fn test_unknown_player_is_not_found() {
    let (store, _) = seeded_store().await;
    let missing = Uuid::new_v4();
    let member = Uuid::new_v4();

    assert!(matches!(
        detail(&store, missing, Some(member)).await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        add_comment(&store, missing, member, input(1, "x")).await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        edit_comment(&store, missing, Uuid::new_v4(), member, input(1, "x")).await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        delete_comment(&store, missing, Uuid::new_v4(), member).await,
        Err(AppError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_detail_is_idempotent() {
    let (store, player_id) = seeded_store().await;
    let m1 = Uuid::new_v4();
    add_comment(&store, player_id, m1, input(3, "solid")).await.unwrap();

    let first = detail(&store, player_id, Some(m1)).await.unwrap();
    for _ in 0..3 {
        assert_eq!(detail(&store, player_id, Some(m1)).await.unwrap(), first);
    }
}

#[tokio::test]
async fn test_concurrent_adds_by_one_member_keep_one_comment() {
    let (store, player_id) = seeded_store().await;
    let m1 = Uuid::new_v4();

    let mut handles = Vec::new();
    for i in 0..8 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            add_comment(&store, player_id, m1, input(2, &format!("try {i}"))).await
        }));
    }

    let mut successes = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => successes += 1,
            Err(AppError::Conflict(_)) => {}
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    assert_eq!(successes, 1);
    assert_eq!(store.get(player_id).await.unwrap().comments.len(), 1);
}

#[test]
fn test_comment_input_validation() {
    assert!(matches!(
        CommentInput::new(0, "too low"),
        Err(AppError::BadRequest(_))
    ));
    assert!(matches!(
        CommentInput::new(4, "too high"),
        Err(AppError::BadRequest(_))
    ));
    assert!(matches!(
        CommentInput::new(2, "   "),
        Err(AppError::BadRequest(_))
    ));

    let ok = CommentInput::new(1, "  trimmed  ").unwrap();
    assert_eq!(ok.rating.value(), 1);
    assert_eq!(ok.content, "trimmed");
}

#[test]
fn test_stored_comment_with_out_of_range_rating_is_rejected() {
    let json = format!(
        r#"{{"id":"{}","rating":5,"content":"x","author":"{}","createdAt":"2024-01-01T00:00:00Z","updatedAt":"2024-01-01T00:00:00Z"}}"#,
        Uuid::new_v4(),
        Uuid::new_v4()
    );
    assert!(serde_json::from_str::<player_feedback_be::models::Comment>(&json).is_err());
}

use chrono::{Duration, Utc};
use player_feedback_be::{
    ledger::{effective_capacity, paginate},
    models::{Comment, Rating},
};
use uuid::Uuid;

fn comments_by(authors: &[Uuid]) -> Vec<Comment> {
    let start = Utc::now();
    authors
        .iter()
        .enumerate()
        .map(|(i, author)| {
            let at = start + Duration::seconds(i as i64);
            Comment {
                id: Uuid::new_v4(),
                rating: Rating::try_from(1 + (i as i64 % 3)).unwrap(),
                content: format!("comment {i}"),
                author: *author,
                created_at: at,
                updated_at: at,
            }
        })
        .collect()
}

fn members(n: usize) -> Vec<Uuid> {
    (0..n).map(|_| Uuid::new_v4()).collect()
}

#[test]
fn test_six_foreign_comments_with_page_size_five() {
    let comments = comments_by(&members(6));
    let viewer = Some(Uuid::new_v4());

    let first = paginate(&comments, viewer, 5, 1);
    assert!(first.own_comment.is_none());
    assert_eq!(first.others.len(), 5);
    assert_eq!(first.total_pages, 2);

    let second = paginate(&comments, viewer, 5, 2);
    assert_eq!(second.others.len(), 1);
    assert_eq!(second.others[0].id, comments[5].id);
}

#[test]
fn test_own_comment_reserves_a_slot() {
    let authors = members(9);
    let viewer = authors[4];
    let comments = comments_by(&authors);

    let page = paginate(&comments, Some(viewer), 5, 1);
    assert_eq!(page.own_comment.map(|c| c.id), Some(comments[4].id));
    assert_eq!(page.others.len(), 4);
    // 8 others over a capacity of 4
    assert_eq!(page.total_pages, 2);
    assert!(page.others.iter().all(|c| c.author != viewer));
}

#[test]
fn test_pages_concatenate_to_others_in_order() {
    let authors = members(23);
    let viewer = authors[10];
    let comments = comments_by(&authors);
    let page_size = 4;

    let total_pages = paginate(&comments, Some(viewer), page_size, 1).total_pages;
    assert_eq!(total_pages, 22usize.div_ceil(page_size - 1));

    let seen: Vec<Uuid> = (1..=total_pages)
        .flat_map(|page| {
            paginate(&comments, Some(viewer), page_size, page)
                .others
                .into_iter()
                .map(|c| c.id)
        })
        .collect();

    let expected: Vec<Uuid> = comments
        .iter()
        .filter(|c| c.author != viewer)
        .map(|c| c.id)
        .collect();
    assert_eq!(seen, expected);
}

#[test]
fn test_empty_sequence_has_one_empty_page() {
    let page = paginate(&[], Some(Uuid::new_v4()), 5, 1);
    assert!(page.own_comment.is_none());
    assert!(page.others.is_empty());
    assert_eq!(page.total_pages, 1);

    let anonymous = paginate(&[], None, 5, 1);
    assert_eq!(anonymous.total_pages, 1);
}

#[test]
fn test_page_size_one_with_own_comment_falls_back() {
    let authors = members(3);
    let comments = comments_by(&authors);

    assert_eq!(effective_capacity(1, true), 1);
    let page = paginate(&comments, Some(authors[0]), 1, 2);
    assert_eq!(page.total_pages, 2);
    assert_eq!(page.others.len(), 1);
    assert_eq!(page.others[0].id, comments[2].id);
}

#[test]
fn test_out_of_range_pages() {
    let comments = comments_by(&members(3));

    let past_end = paginate(&comments, None, 2, 7);
    assert!(past_end.others.is_empty());
    assert_eq!(past_end.total_pages, 2);

    let zero = paginate(&comments, None, 2, 0);
    assert_eq!(zero.others.len(), 2);
}

#[test]
fn test_effective_capacity() {
    assert_eq!(effective_capacity(5, false), 5);
    assert_eq!(effective_capacity(5, true), 4);
    assert_eq!(effective_capacity(1, false), 1);
    assert_eq!(effective_capacity(0, false), 1);
}

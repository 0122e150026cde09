use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use uuid::Uuid;

use crate::models::{Comment, MemberSummary, Player, Rating, Team, TeamSummary};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    pub id: Uuid,
    pub rating: Rating,
    pub content: String,
    pub author: MemberSummary,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CommentView {
    pub fn populate(comment: &Comment, usernames: &HashMap<Uuid, String>) -> Self {
        Self {
            id: comment.id,
            rating: comment.rating,
            content: comment.content.clone(),
            author: MemberSummary {
                id: comment.author,
                username: usernames.get(&comment.author).cloned(),
            },
            created_at: comment.created_at,
            updated_at: comment.updated_at,
        }
    }
}

/// A player with its team and comment authors resolved for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerView {
    pub id: Uuid,
    pub player_name: String,
    pub image: String,
    pub cost: f64,
    pub is_captain: bool,
    pub information: String,
    pub team: TeamSummary,
    pub comments: Vec<CommentView>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PlayerView {
    pub fn populate(
        player: &Player,
        team: Option<&Team>,
        usernames: &HashMap<Uuid, String>,
    ) -> Self {
        Self {
            id: player.id,
            player_name: player.player_name.clone(),
            image: player.image.clone(),
            cost: player.cost,
            is_captain: player.is_captain,
            information: player.information.clone(),
            team: TeamSummary {
                id: player.team,
                team_name: team.map(|t| t.team_name.clone()),
            },
            comments: player
                .comments
                .iter()
                .map(|c| CommentView::populate(c, usernames))
                .collect(),
            created_at: player.created_at,
            updated_at: player.updated_at,
        }
    }
}

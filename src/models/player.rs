use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 3;

/// A rating accepted for persistence, always within `MIN_RATING..=MAX_RATING`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Rating {
    type Error = AppError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if (MIN_RATING as i64..=MAX_RATING as i64).contains(&value) {
            Ok(Rating(value as u8))
        } else {
            Err(AppError::BadRequest(format!(
                "Rating must be between {MIN_RATING} and {MAX_RATING}"
            )))
        }
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: Uuid,
    pub rating: Rating,
    pub content: String,
    pub author: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for adding or editing a comment.
#[derive(Debug, Clone, Deserialize)]
pub struct CommentPayload {
    pub rating: i64,
    pub content: String,
}

/// Rating and text as submitted by a member, checked before it touches a player.
#[derive(Debug, Clone)]
pub struct CommentInput {
    pub rating: Rating,
    pub content: String,
}

impl CommentInput {
    pub fn new(rating: i64, content: impl Into<String>) -> Result<Self, AppError> {
        let rating = Rating::try_from(rating)?;
        let content = content.into().trim().to_string();
        if content.is_empty() {
            return Err(AppError::BadRequest("Comment content cannot be empty".into()));
        }

        Ok(Self { rating, content })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: Uuid,
    pub player_name: String,
    pub image: String,
    pub cost: f64,
    pub is_captain: bool,
    pub information: String,
    pub team: Uuid,
    #[serde(default)]
    pub comments: Vec<Comment>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Catalog fields of a player, as written by an administrator.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerFields {
    pub player_name: String,
    pub image: String,
    pub cost: f64,
    #[serde(default)]
    pub is_captain: bool,
    #[serde(alias = "infomation")]
    pub information: String,
    pub team: Uuid,
}

impl PlayerFields {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.player_name.trim().is_empty() {
            return Err(AppError::BadRequest("Player name is required".into()));
        }
        if self.image.trim().is_empty() {
            return Err(AppError::BadRequest("Player image is required".into()));
        }
        if self.information.trim().is_empty() {
            return Err(AppError::BadRequest("Player information is required".into()));
        }
        if !self.cost.is_finite() || self.cost < 0.0 {
            return Err(AppError::BadRequest("Cost must be a non-negative number".into()));
        }
        Ok(())
    }
}

impl Player {
    pub fn new(fields: PlayerFields) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            player_name: fields.player_name.trim().to_string(),
            image: fields.image.trim().to_string(),
            cost: fields.cost,
            is_captain: fields.is_captain,
            information: fields.information.trim().to_string(),
            team: fields.team,
            comments: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply_fields(&mut self, fields: PlayerFields) {
        self.player_name = fields.player_name.trim().to_string();
        self.image = fields.image.trim().to_string();
        self.cost = fields.cost;
        self.is_captain = fields.is_captain;
        self.information = fields.information.trim().to_string();
        self.team = fields.team;
        self.updated_at = Utc::now();
    }

    pub fn comment_by(&self, member_id: Uuid) -> Option<&Comment> {
        self.comments.iter().find(|c| c.author == member_id)
    }

    /// Anonymous viewers never can; members can until they have one comment here.
    pub fn can_comment(&self, member_id: Option<Uuid>) -> bool {
        member_id.is_some_and(|id| self.comment_by(id).is_none())
    }

    pub fn push_comment(
        &mut self,
        author: Uuid,
        input: CommentInput,
        now: DateTime<Utc>,
    ) -> Result<&Comment, AppError> {
        if self.comment_by(author).is_some() {
            return Err(AppError::Conflict("You have already rated this player.".into()));
        }

        self.comments.push(Comment {
            id: Uuid::new_v4(),
            rating: input.rating,
            content: input.content,
            author,
            created_at: now,
            updated_at: now,
        });

        Ok(&self.comments[self.comments.len() - 1])
    }

    pub fn edit_comment(
        &mut self,
        comment_id: Uuid,
        member_id: Uuid,
        input: CommentInput,
        now: DateTime<Utc>,
    ) -> Result<&Comment, AppError> {
        let comment = self.owned_comment_mut(comment_id, member_id, "edit")?;

        comment.rating = input.rating;
        comment.content = input.content;
        comment.updated_at = now.max(comment.updated_at);

        Ok(comment)
    }

    pub fn remove_comment(&mut self, comment_id: Uuid, member_id: Uuid) -> Result<Comment, AppError> {
        self.owned_comment_mut(comment_id, member_id, "delete")?;

        let index = self
            .comments
            .iter()
            .position(|c| c.id == comment_id)
            .ok_or_else(|| AppError::NotFound("Comment not found".into()))?;

        Ok(self.comments.remove(index))
    }

    fn owned_comment_mut(
        &mut self,
        comment_id: Uuid,
        member_id: Uuid,
        action: &str,
    ) -> Result<&mut Comment, AppError> {
        let comment = self
            .comments
            .iter_mut()
            .find(|c| c.id == comment_id)
            .ok_or_else(|| AppError::NotFound("Comment not found".into()))?;

        if comment.author != member_id {
            return Err(AppError::Forbidden(format!(
                "You do not have permission to {action} this comment"
            )));
        }

        Ok(comment)
    }
}

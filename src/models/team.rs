use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: Uuid,
    pub team_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Team {
    pub fn new(team_name: &str) -> Result<Self, AppError> {
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            team_name: validate_team_name(team_name)?,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn rename(&mut self, team_name: &str) -> Result<(), AppError> {
        self.team_name = validate_team_name(team_name)?;
        self.updated_at = Utc::now();
        Ok(())
    }
}

fn validate_team_name(team_name: &str) -> Result<String, AppError> {
    let trimmed = team_name.trim();
    if trimmed.is_empty() || trimmed.len() > 100 {
        return Err(AppError::BadRequest("Invalid team name".into()));
    }
    Ok(trimmed.to_string())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamSummary {
    pub id: Uuid,
    pub team_name: Option<String>,
}

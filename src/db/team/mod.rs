pub mod delete;
pub mod get;
pub mod post;

pub use delete::delete_team;
pub use get::{get_all_teams, get_team_by_id};
pub use post::{create_team, rename_team, save_existing_team};

pub mod get;
pub mod patch;

pub use get::{get_all_members, get_member_by_id, get_usernames};
pub use patch::update_profile;

pub mod admin_player;
pub mod comment;
pub mod member;
pub mod player;
pub mod team;

pub use admin_player::{
    admin_list_players_handler, create_player_handler, delete_player_handler,
    update_player_handler,
};
pub use comment::{add_comment_handler, delete_comment_handler, edit_comment_handler};
pub use member::{get_profile_handler, list_accounts_handler, update_profile_handler};
pub use player::{comment_page_handler, list_players_handler, player_detail_handler};
pub use team::{
    create_team_handler, delete_team_handler, get_all_teams_handler, update_team_handler,
};

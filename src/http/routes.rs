use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::{http::handlers::*, state::AppState};

pub fn create_http_routes(state: AppState) -> Router {
    Router::new()
        .route("/api/all", get(list_players_handler))
        .route("/api/players/{player_id}", get(player_detail_handler))
        .route(
            "/api/players/{player_id}/comments",
            get(comment_page_handler).post(add_comment_handler),
        )
        .route(
            "/api/players/{player_id}/comments/{comment_id}",
            put(edit_comment_handler).delete(delete_comment_handler),
        )
        .route("/api/profile", get(get_profile_handler))
        .route("/api/profile/update", put(update_profile_handler))
        .route("/api/admin/accounts", get(list_accounts_handler))
        .route(
            "/api/admin/players",
            get(admin_list_players_handler).post(create_player_handler),
        )
        .route(
            "/api/admin/players/{player_id}",
            put(update_player_handler).delete(delete_player_handler),
        )
        .route("/api/admin/teams", get(get_all_teams_handler))
        .route("/api/admin/teams/create", post(create_team_handler))
        .route("/api/admin/teams/update/{team_id}", put(update_team_handler))
        .route("/api/admin/teams/{team_id}", delete(delete_team_handler))
        .with_state(state)
}

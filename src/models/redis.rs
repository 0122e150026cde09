use uuid::Uuid;

pub struct RedisKey;

impl RedisKey {
    pub fn player(player_id: Uuid) -> String {
        format!("player:{player_id}")
    }

    pub fn players_all() -> String {
        "players:all".to_string()
    }

    pub fn team(team_id: Uuid) -> String {
        format!("team:{team_id}")
    }

    pub fn teams_all() -> String {
        "teams:all".to_string()
    }

    pub fn member(member_id: Uuid) -> String {
        format!("member:{member_id}")
    }

    pub fn members_all() -> String {
        "members:all".to_string()
    }
}

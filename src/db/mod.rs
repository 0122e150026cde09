pub mod member;
pub mod player;
pub mod team;

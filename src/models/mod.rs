pub mod member;
pub mod player;
pub mod redis;
pub mod team;
pub mod view;

pub use member::{Member, MemberSummary};
pub use player::{Comment, CommentInput, CommentPayload, Player, PlayerFields, Rating};
pub use team::{Team, TeamSummary};

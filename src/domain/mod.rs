//! The demo domain: soccer players belonging to teams

pub(crate) mod player;
pub(crate) mod team;

pub use player::Player;
pub use player::PlayerActiveModel;
pub use player::PlayerColumn;
pub use player::PlayerEntity;
pub use team::Team;
pub use team::TeamActiveModel;
pub use team::TeamColumn;
pub use team::TeamEntity;

use rosterql_macros::Entity;
use serde::Serialize;

use super::player::Player;
use super::player::PlayerColumn;
use super::player::PlayerEntity;
use crate::ActiveModelExt;
use crate::Condition;
use crate::Connection;
use crate::EntitySelectExt;
use crate::Result;
use crate::entity::set;

#[derive(Clone, Debug, PartialEq, Serialize, Entity)]
#[rosterql(table_name = "teams")]
pub struct Team {
    #[rosterql(primary_key, auto_increment)]
    pub id:   i64,
    pub name: String,
}

impl Team {
    pub async fn create(conn: &Connection, name: &str) -> Result<Team> {
        let mut model = TeamEntity::active_model();
        model.name = set(name.to_string());
        model.insert(conn).await
    }

    /// Players currently assigned to this team, computed from the player-side
    /// reference
    pub async fn players(&self, conn: &Connection) -> Result<Vec<Player>> {
        PlayerEntity::find().filter(Condition::eq(PlayerColumn::TeamId, self.id)).all(conn).await
    }
}

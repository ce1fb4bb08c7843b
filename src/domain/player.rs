use rosterql_macros::Entity;
use serde::Serialize;

use super::team::Team;
use super::team::TeamEntity;
use crate::ActiveModelExt;
use crate::Condition;
use crate::Connection;
use crate::EntitySelectExt;
use crate::Result;
use crate::entity::set;
use crate::query::Update;

/// A roster member
///
/// `team_id` is the single source of truth for team membership: team-side
/// player sets are computed from it, never stored.
#[derive(Clone, Debug, PartialEq, Serialize, Entity)]
#[rosterql(table_name = "players")]
pub struct Player {
    #[rosterql(primary_key, auto_increment)]
    pub id:      i64,
    pub name:    String,
    pub height:  i64,
    pub weight:  i64,
    #[rosterql(references = "teams.id")]
    pub team_id: Option<i64>,
}

impl Player {
    /// Insert a new player, optionally assigned to a team from the start
    pub async fn create(
        conn: &Connection,
        name: &str,
        height: i64,
        weight: i64,
        team: Option<&Team>,
    ) -> Result<Player> {
        let mut model = PlayerEntity::active_model();
        model.name = set(name.to_string());
        model.height = set(height);
        model.weight = set(weight);
        model.team_id = set(team.map(|t| t.id));
        model.insert(conn).await
    }

    /// Move this player to another team
    ///
    /// Because membership follows the reference, the old team's player set
    /// shrinks by the same move; there is no second side to keep in sync.
    pub async fn change_team(&mut self, conn: &Connection, team: &Team) -> Result<()> {
        Update::<PlayerEntity>::many()
            .set(PlayerColumn::TeamId, team.id)
            .filter(Condition::eq(PlayerColumn::Id, self.id))
            .exec(conn)
            .await?;
        self.team_id = Some(team.id);
        Ok(())
    }

    /// The team this player belongs to, if any
    pub async fn team(&self, conn: &Connection) -> Result<Option<Team>> {
        match self.team_id {
            Some(team_id) => TeamEntity::find_by_id(team_id).one(conn).await,
            None => Ok(None),
        }
    }
}

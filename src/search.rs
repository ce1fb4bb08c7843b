//! Dynamic predicate search over players joined to their teams
//!
//! Criteria fields are optional; each present field contributes one condition
//! and the conditions are combined with AND. The content query and the total
//! count share the same join and predicates.

use serde::Serialize;

use crate::Condition;
use crate::Connection;
use crate::EntitySelectExt;
use crate::FromRow;
use crate::FromValue;
use crate::Result;
use crate::domain::PlayerColumn;
use crate::domain::PlayerEntity;
use crate::domain::TeamColumn;
use crate::domain::TeamEntity;
use crate::query::Page;
use crate::query::PageRequest;
use crate::query::Select;

/// Optional filter constraints over the player/team join
///
/// An absent field places no constraint on its dimension. Name fields match
/// exactly; the height/weight bounds are strict greater-than. Values are
/// passed to the comparison as-is, without validation.
#[derive(Clone, Debug, Default)]
pub struct PlayerSearch {
    pub player_name: Option<String>,
    pub team_name:   Option<String>,
    pub height_gt:   Option<i64>,
    pub weight_gt:   Option<i64>,
}

impl PlayerSearch {
    /// One condition per present field
    pub fn conditions(&self) -> Vec<Condition> {
        [
            player_name_eq(self.player_name.as_deref()),
            team_name_eq(self.team_name.as_deref()),
            height_gt(self.height_gt),
            weight_gt(self.weight_gt),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

fn player_name_eq(player_name: Option<&str>) -> Option<Condition> {
    player_name.map(|name| Condition::eq(PlayerColumn::Name, name))
}

fn team_name_eq(team_name: Option<&str>) -> Option<Condition> {
    team_name.map(|name| Condition::eq(TeamColumn::Name, name))
}

fn height_gt(height: Option<i64>) -> Option<Condition> {
    height.map(|bound| Condition::gt(PlayerColumn::Height, bound))
}

fn weight_gt(weight: Option<i64>) -> Option<Condition> {
    weight.map(|bound| Condition::gt(PlayerColumn::Weight, bound))
}

/// Flat result row: player id/name plus the joined team's id/name
///
/// The team side is nullable because players without a team survive the left
/// join.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlayerTeamRow {
    pub player_id:   i64,
    pub player_name: String,
    pub team_id:     Option<i64>,
    pub team_name:   Option<String>,
}

impl FromRow for PlayerTeamRow {
    fn from_row(row: &turso::Row) -> Result<Self> {
        Ok(Self {
            player_id:   FromValue::from_value(row.get_value(0)?)?,
            player_name: FromValue::from_value(row.get_value(1)?)?,
            team_id:     FromValue::from_value(row.get_value(2)?)?,
            team_name:   FromValue::from_value(row.get_value(3)?)?,
        })
    }
}

fn search_query(search: &PlayerSearch) -> Select<PlayerEntity> {
    let mut query = PlayerEntity::find().left_join::<TeamEntity>(PlayerColumn::TeamId, TeamColumn::Id);
    for condition in search.conditions() {
        query = query.filter(condition);
    }
    query
}

/// One page of projected search results plus the total matching count
///
/// Sort entries in the request name player properties; an unknown property is
/// a caller error. The total is computed by an independent count query over
/// the same join and predicates, skipped when the first page already shows
/// the result set is smaller than one page.
pub async fn search_page(
    conn: &Connection,
    search: &PlayerSearch,
    request: &PageRequest,
) -> Result<Page<PlayerTeamRow>> {
    search_query(search)
        .column(PlayerColumn::Id)
        .column(PlayerColumn::Name)
        .column(TeamColumn::Id)
        .column(TeamColumn::Name)
        .page_into::<PlayerTeamRow>(conn, request)
        .await
}

/// Unbounded count over the same join and predicates as [`search_page`]
pub async fn search_count(conn: &Connection, search: &PlayerSearch) -> Result<i64> {
    search_query(search).count(conn).await
}

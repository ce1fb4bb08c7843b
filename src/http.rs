//! HTTP surface: a single read-only player listing endpoint

use axum::Json;
use axum::Router;
use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use serde::Deserialize;

use crate::Condition;
use crate::Connection;
use crate::EntitySelectExt;
use crate::Error;
use crate::domain::Player;
use crate::domain::PlayerColumn;
use crate::domain::PlayerEntity;
use crate::query::Order;
use crate::query::Page;
use crate::query::PageRequest;

const DEFAULT_PAGE_SIZE: usize = 20;

#[derive(Clone)]
pub struct AppState {
    pub conn: Connection,
}

/// Query parameters of `GET /soccer-player`
///
/// Every filter field present becomes an exact-match condition on the
/// corresponding player column; `page`/`size`/`sort` control paging. Sort
/// takes `property` or `property,desc`.
#[derive(Debug, Default, Deserialize)]
pub struct PlayerListParams {
    pub name:    Option<String>,
    pub height:  Option<i64>,
    pub weight:  Option<i64>,
    pub team_id: Option<i64>,
    pub page:    Option<usize>,
    pub size:    Option<usize>,
    pub sort:    Option<String>,
}

impl PlayerListParams {
    fn conditions(&self) -> Vec<Condition> {
        let mut conditions = Vec::new();
        if let Some(name) = &self.name {
            conditions.push(Condition::eq(PlayerColumn::Name, name.as_str()));
        }
        if let Some(height) = self.height {
            conditions.push(Condition::eq(PlayerColumn::Height, height));
        }
        if let Some(weight) = self.weight {
            conditions.push(Condition::eq(PlayerColumn::Weight, weight));
        }
        if let Some(team_id) = self.team_id {
            conditions.push(Condition::eq(PlayerColumn::TeamId, team_id));
        }
        conditions
    }

    fn page_request(&self) -> PageRequest {
        let mut request = PageRequest::of(self.page.unwrap_or(0), self.size.unwrap_or(DEFAULT_PAGE_SIZE));
        if let Some(sort) = &self.sort {
            let (property, direction) = parse_sort(sort);
            request = request.sorted_by(property, direction);
        }
        request
    }
}

fn parse_sort(raw: &str) -> (String, Order) {
    match raw.split_once(',') {
        Some((property, direction)) if direction.trim().eq_ignore_ascii_case("desc") => {
            (property.trim().to_string(), Order::Desc)
        }
        Some((property, _)) => (property.trim().to_string(), Order::Asc),
        None => (raw.trim().to_string(), Order::Asc),
    }
}

pub fn router(state: AppState) -> Router {
    Router::new().route("/soccer-player", get(list_players)).with_state(state)
}

async fn list_players(
    State(state): State<AppState>,
    Query(params): Query<PlayerListParams>,
) -> Result<Json<Page<Player>>, (StatusCode, String)> {
    let request = params.page_request();

    let mut query = PlayerEntity::find();
    for condition in params.conditions() {
        query = query.filter(condition);
    }

    let page = query.page(&state.conn, &request).await.map_err(|e| match e {
        Error::ColumnNotFound(_) => (StatusCode::BAD_REQUEST, e.to_string()),
        other => (StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
    })?;

    Ok(Json(page))
}

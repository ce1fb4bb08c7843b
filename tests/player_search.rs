//! Search repository properties: dynamic criteria, pagination, totals

use std::collections::HashSet;

use fake::Fake;
use fake::faker::name::en::Name;
use rosterql::domain::Player;
use rosterql::domain::PlayerColumn;
use rosterql::domain::PlayerEntity;
use rosterql::domain::Team;
use rosterql::domain::TeamEntity;
use rosterql::prelude::*;
use rosterql::search::PlayerSearch;
use rosterql::search::PlayerTeamRow;
use rosterql::search::search_count;
use rosterql::search::search_page;

async fn create_test_db() -> Connection {
    let db = Builder::new_local(":memory:").build().await.unwrap();
    db.connect().unwrap()
}

async fn create_tables(conn: &Connection) {
    Schema::create_table::<TeamEntity>(conn, false).await.unwrap();
    Schema::create_table::<PlayerEntity>(conn, false).await.unwrap();
}

async fn seed_roster(conn: &Connection) -> (Team, Team) {
    let team_a = Team::create(conn, "TeamA").await.unwrap();
    let team_b = Team::create(conn, "TeamB").await.unwrap();

    Player::create(conn, "Roy", 173, 73, Some(&team_a)).await.unwrap();
    Player::create(conn, "Perry", 175, 75, Some(&team_a)).await.unwrap();
    Player::create(conn, "Sally", 160, 60, Some(&team_b)).await.unwrap();
    Player::create(conn, "Dice", 183, 83, Some(&team_b)).await.unwrap();

    (team_a, team_b)
}

fn sorted_names(rows: &[PlayerTeamRow]) -> Vec<&str> {
    let mut result: Vec<&str> = rows.iter().map(|r| r.player_name.as_str()).collect();
    result.sort();
    result
}

#[tokio::test]
async fn test_empty_criteria_returns_everyone() {
    let conn = create_test_db().await;
    create_tables(&conn).await;
    seed_roster(&conn).await;

    let page = search_page(&conn, &PlayerSearch::default(), &PageRequest::of(0, 10)).await.unwrap();

    assert_eq!(page.total, 4);
    assert_eq!(sorted_names(&page.content), vec!["Dice", "Perry", "Roy", "Sally"]);
}

#[tokio::test]
async fn test_player_name_criterion_matches_exactly() {
    let conn = create_test_db().await;
    create_tables(&conn).await;
    seed_roster(&conn).await;

    let search = PlayerSearch { player_name: Some("Roy".to_string()), ..Default::default() };
    let page = search_page(&conn, &search, &PageRequest::of(0, 10)).await.unwrap();

    assert_eq!(page.total, 1);
    assert_eq!(page.content[0].player_name, "Roy");
    assert_eq!(page.content[0].team_name.as_deref(), Some("TeamA"));
}

#[tokio::test]
async fn test_height_bound_is_strict() {
    let conn = create_test_db().await;
    create_tables(&conn).await;
    seed_roster(&conn).await;

    let search = PlayerSearch { height_gt: Some(170), ..Default::default() };
    let page = search_page(&conn, &search, &PageRequest::of(0, 10)).await.unwrap();

    assert_eq!(page.total, 3);
    assert_eq!(sorted_names(&page.content), vec!["Dice", "Perry", "Roy"]);

    // 173 is not > 173
    let search = PlayerSearch { height_gt: Some(173), ..Default::default() };
    let page = search_page(&conn, &search, &PageRequest::of(0, 10)).await.unwrap();
    assert_eq!(sorted_names(&page.content), vec!["Dice", "Perry"]);
}

#[tokio::test]
async fn test_team_name_criterion() {
    let conn = create_test_db().await;
    create_tables(&conn).await;
    seed_roster(&conn).await;

    let search = PlayerSearch { team_name: Some("TeamB".to_string()), ..Default::default() };
    let page = search_page(&conn, &search, &PageRequest::of(0, 10)).await.unwrap();

    assert_eq!(page.total, 2);
    assert_eq!(sorted_names(&page.content), vec!["Dice", "Sally"]);
}

#[tokio::test]
async fn test_combined_criteria_are_anded() {
    let conn = create_test_db().await;
    create_tables(&conn).await;
    seed_roster(&conn).await;

    let search = PlayerSearch {
        team_name: Some("TeamB".to_string()),
        height_gt: Some(170),
        ..Default::default()
    };
    let page = search_page(&conn, &search, &PageRequest::of(0, 10)).await.unwrap();

    assert_eq!(page.total, 1);
    assert_eq!(page.content[0].player_name, "Dice");
}

#[tokio::test]
async fn test_weight_bound() {
    let conn = create_test_db().await;
    create_tables(&conn).await;
    seed_roster(&conn).await;

    let search = PlayerSearch { weight_gt: Some(74), ..Default::default() };
    let page = search_page(&conn, &search, &PageRequest::of(0, 10)).await.unwrap();

    assert_eq!(sorted_names(&page.content), vec!["Dice", "Perry"]);
}

#[tokio::test]
async fn test_first_page_sorted_by_height_desc() {
    let conn = create_test_db().await;
    create_tables(&conn).await;
    seed_roster(&conn).await;

    let request = PageRequest::of(0, 2).sorted_by("height", Order::Desc);
    let page = search_page(&conn, &PlayerSearch::default(), &request).await.unwrap();

    assert_eq!(page.total, 4);
    assert_eq!(page.content.len(), 2);
    assert_eq!(page.content[0].player_name, "Dice");
    assert_eq!(page.content[1].player_name, "Perry");
}

#[tokio::test]
async fn test_total_is_invariant_across_pages() {
    let conn = create_test_db().await;
    create_tables(&conn).await;
    seed_roster(&conn).await;

    let search = PlayerSearch { height_gt: Some(160), ..Default::default() };

    let first = search_page(&conn, &search, &PageRequest::of(0, 2).sorted_by("id", Order::Asc)).await.unwrap();
    let second = search_page(&conn, &search, &PageRequest::of(1, 2).sorted_by("id", Order::Asc)).await.unwrap();

    assert_eq!(first.total, 3);
    assert_eq!(second.total, 3);
    assert_eq!(first.content.len(), 2);
    assert_eq!(second.content.len(), 1);
}

#[tokio::test]
async fn test_short_first_page_total_without_count_query() {
    let conn = create_test_db().await;
    create_tables(&conn).await;
    seed_roster(&conn).await;

    // first page, fewer matches than the page size: total derives from content
    let search = PlayerSearch { team_name: Some("TeamA".to_string()), ..Default::default() };
    let page = search_page(&conn, &search, &PageRequest::of(0, 10)).await.unwrap();

    assert_eq!(page.content.len(), 2);
    assert_eq!(page.total, 2);
}

#[tokio::test]
async fn test_page_invariants_hold() {
    let conn = create_test_db().await;
    create_tables(&conn).await;
    seed_roster(&conn).await;

    let page = search_page(&conn, &PlayerSearch::default(), &PageRequest::of(0, 3)).await.unwrap();

    assert!(page.content.len() <= 3);
    assert!(page.total >= page.content.len() as i64);
}

#[tokio::test]
async fn test_teamless_players_survive_the_left_join() {
    let conn = create_test_db().await;
    create_tables(&conn).await;
    seed_roster(&conn).await;
    Player::create(&conn, "Free", 190, 90, None).await.unwrap();

    let page = search_page(&conn, &PlayerSearch::default(), &PageRequest::of(0, 10)).await.unwrap();
    assert_eq!(page.total, 5);

    let free = page.content.iter().find(|r| r.player_name == "Free").unwrap();
    assert_eq!(free.team_id, None);
    assert_eq!(free.team_name, None);

    // but a team-name criterion only matches assigned players
    let search = PlayerSearch { team_name: Some("TeamA".to_string()), ..Default::default() };
    let page = search_page(&conn, &search, &PageRequest::of(0, 10)).await.unwrap();
    assert_eq!(sorted_names(&page.content), vec!["Perry", "Roy"]);
}

#[tokio::test]
async fn test_projection_carries_team_columns() {
    let conn = create_test_db().await;
    create_tables(&conn).await;
    let (team_a, _) = seed_roster(&conn).await;

    let search = PlayerSearch { player_name: Some("Perry".to_string()), ..Default::default() };
    let page = search_page(&conn, &search, &PageRequest::of(0, 10)).await.unwrap();

    let row = &page.content[0];
    assert!(row.player_id > 0);
    assert_eq!(row.team_id, Some(team_a.id));
    assert_eq!(row.team_name.as_deref(), Some("TeamA"));
}

#[tokio::test]
async fn test_search_count_matches_page_total() {
    let conn = create_test_db().await;
    create_tables(&conn).await;
    seed_roster(&conn).await;

    let search = PlayerSearch { height_gt: Some(170), ..Default::default() };

    let count = search_count(&conn, &search).await.unwrap();
    let page = search_page(&conn, &search, &PageRequest::of(0, 2)).await.unwrap();

    assert_eq!(count, 3);
    assert_eq!(page.total, count);
}

#[tokio::test]
async fn test_unknown_sort_property_is_an_error() {
    let conn = create_test_db().await;
    create_tables(&conn).await;
    seed_roster(&conn).await;

    let request = PageRequest::of(0, 2).sorted_by("goals", Order::Desc);
    let result = search_page(&conn, &PlayerSearch::default(), &request).await;

    assert!(matches!(result, Err(Error::ColumnNotFound(p)) if p == "goals"));
}

#[tokio::test]
async fn test_reassigned_player_appears_under_new_team() {
    let conn = create_test_db().await;
    create_tables(&conn).await;
    let (team_a, _) = seed_roster(&conn).await;

    let mut sally = PlayerEntity::find()
        .filter(Condition::eq(PlayerColumn::Name, "Sally"))
        .one(&conn)
        .await
        .unwrap()
        .unwrap();
    sally.change_team(&conn, &team_a).await.unwrap();

    let search = PlayerSearch { team_name: Some("TeamA".to_string()), ..Default::default() };
    let page = search_page(&conn, &search, &PageRequest::of(0, 10)).await.unwrap();

    assert_eq!(page.total, 3);
    assert!(sorted_names(&page.content).contains(&"Sally"));

    let search = PlayerSearch { team_name: Some("TeamB".to_string()), ..Default::default() };
    let page = search_page(&conn, &search, &PageRequest::of(0, 10)).await.unwrap();
    assert_eq!(sorted_names(&page.content), vec!["Dice"]);
}

#[tokio::test]
async fn test_paging_over_a_generated_roster() {
    let conn = create_test_db().await;
    create_tables(&conn).await;
    let team = Team::create(&conn, "Generated FC").await.unwrap();

    for i in 0..23 {
        let name: String = Name().fake();
        Player::create(&conn, &name, 150 + i, 50 + i, Some(&team)).await.unwrap();
    }

    let mut seen = HashSet::new();
    let mut fetched = 0usize;

    for page_index in 0..5 {
        let request = PageRequest::of(page_index, 5).sorted_by("id", Order::Asc);
        let page = search_page(&conn, &PlayerSearch::default(), &request).await.unwrap();

        assert_eq!(page.total, 23);
        assert!(page.content.len() <= 5);

        fetched += page.content.len();
        for row in &page.content {
            assert!(seen.insert(row.player_id), "page windows must not overlap");
        }
    }

    assert_eq!(fetched, 23);

    // one past the end: empty content, total still intact
    let request = PageRequest::of(5, 5).sorted_by("id", Order::Asc);
    let page = search_page(&conn, &PlayerSearch::default(), &request).await.unwrap();
    assert!(page.is_empty());
    assert_eq!(page.total, 23);
}

use std::net::SocketAddr;

use rosterql::Builder;
use rosterql::Connection;
use rosterql::EntitySelectExt;
use rosterql::Schema;
use rosterql::domain::Player;
use rosterql::domain::PlayerEntity;
use rosterql::domain::Team;
use rosterql::domain::TeamEntity;
use rosterql::http;
use rosterql::http::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "rosterql=debug".into()),
        )
        .init();

    let database_path = std::env::var("ROSTERQL_DB").unwrap_or_else(|_| "soccer.db".to_string());
    let port: u16 = std::env::var("PORT").ok().and_then(|p| p.parse().ok()).unwrap_or(3000);

    let db = Builder::new_local(&database_path).build().await?;
    let conn = db.connect()?;
    tracing::info!("Database open at {}", database_path);

    Schema::create_table::<TeamEntity>(&conn, true).await?;
    Schema::create_table::<PlayerEntity>(&conn, true).await?;
    seed_demo_roster(&conn).await?;

    let app = http::router(AppState { conn });

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn seed_demo_roster(conn: &Connection) -> rosterql::Result<()> {
    if PlayerEntity::find().exists(conn).await? {
        return Ok(());
    }

    let team_a = Team::create(conn, "TeamA").await?;
    let team_b = Team::create(conn, "TeamB").await?;

    Player::create(conn, "Roy", 173, 73, Some(&team_a)).await?;
    Player::create(conn, "Perry", 175, 75, Some(&team_a)).await?;
    Player::create(conn, "Sally", 160, 60, Some(&team_b)).await?;
    Player::create(conn, "Dice", 183, 83, Some(&team_b)).await?;

    tracing::info!("Seeded demo roster");
    Ok(())
}

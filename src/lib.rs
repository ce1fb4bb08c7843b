#![deny(warnings)]

//! # rosterql
//!
//! Typesafe query building over [Turso](https://turso.tech), demonstrated on a
//! two-entity soccer roster domain.
//!
//! ## Features
//!
//! - Derive macro for defining entities
//! - Type-safe query builders (Select, Insert, Update, Delete)
//! - Table-qualified conditions that stay unambiguous under joins
//! - Dynamic predicate search: optional criteria compose into an AND conjunction
//! - Pagination with a decoupled total count
//! - One HTTP endpoint (`GET /soccer-player`) serving filtered, paged players
//!
//! ## Quick Start
//!
//! ```ignore
//! use rosterql::prelude::*;
//! use rosterql::domain::{Player, PlayerColumn, PlayerEntity, Team, TeamEntity};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let db = Builder::new_local(":memory:").build().await?;
//!     let conn = db.connect()?;
//!
//!     Schema::create_table::<TeamEntity>(&conn, true).await?;
//!     Schema::create_table::<PlayerEntity>(&conn, true).await?;
//!
//!     let team_a = Team::create(&conn, "TeamA").await?;
//!     Player::create(&conn, "Roy", 173, 73, Some(&team_a)).await?;
//!
//!     // Find players taller than 170cm
//!     let tall = PlayerEntity::find()
//!         .filter(Condition::gt(PlayerColumn::Height, 170))
//!         .all(&conn)
//!         .await?;
//!
//!     println!("{} tall players", tall.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Dynamic search
//!
//! Criteria fields are optional; absent fields place no constraint:
//!
//! ```ignore
//! use rosterql::search::{self, PlayerSearch};
//!
//! let criteria = PlayerSearch { height_gt: Some(170), ..Default::default() };
//! let page = search::search_page(&conn, &criteria, &PageRequest::of(0, 20)).await?;
//! assert!(page.total >= page.content.len() as i64);
//! ```
//!
//! ## Entity Attributes
//!
//! The `#[rosterql(...)]` attribute supports:
//!
//! - `table_name = "..."` - Set the table name (default: struct name in snake_case)
//! - `primary_key` - Mark a field as the primary key
//! - `auto_increment` - Mark a primary key as auto-incrementing
//! - `column_name = "..."` - Set a custom column name
//! - `references = "table.column"` - Declare a foreign key target

// Lets the derive macro expand to `rosterql::...` paths inside this crate too.
extern crate self as rosterql;

pub mod connection;
pub mod domain;
pub mod entity;
pub mod error;
pub mod http;
pub mod prelude;
pub mod query;
pub mod schema;
pub mod search;
pub mod value;

// Re-export main types at crate root
pub use connection::Builder;
pub use connection::Connection;
pub use connection::Database;
pub use entity::ActiveModelExt;
pub use entity::ActiveModelTrait;
pub use entity::ActiveValue;
pub use entity::ColumnTrait;
pub use entity::EntitySelectExt;
pub use entity::EntityTrait;
pub use entity::FromRow;
pub use entity::ModelDeleteExt;
pub use entity::ModelTrait;
pub use entity::not_set;
pub use entity::set;
pub use error::Error;
pub use error::Result;
pub use query::Condition;
pub use query::Delete;
pub use query::Insert;
pub use query::InsertMany;
pub use query::Order;
pub use query::OrderBy;
pub use query::Page;
pub use query::PageRequest;
pub use query::Select;
pub use query::Update;
pub use schema::Schema;
pub use turso::Row;
pub use turso::Rows;
// Re-export the derive macro
pub use rosterql_macros::Entity;
pub use value::ColumnType;
pub use value::FromValue;
pub use value::IntoValue;
pub use value::Value;

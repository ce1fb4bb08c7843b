//! Prelude module for rosterql
//!
//! Re-exports the most commonly used types and traits.
//!
//! ```ignore
//! use rosterql::prelude::*;
//! ```

// Re-export the derive macro
pub use rosterql_macros::Entity;

pub use crate::connection::Builder;
pub use crate::connection::Connection;
pub use crate::entity::ActiveModelExt;
pub use crate::entity::ActiveModelTrait;
pub use crate::entity::ActiveValue;
pub use crate::entity::ColumnTrait;
pub use crate::entity::EntitySelectExt;
pub use crate::entity::EntityTrait;
pub use crate::entity::FromRow;
pub use crate::entity::ModelDeleteExt;
pub use crate::entity::ModelTrait;
pub use crate::entity::not_set;
pub use crate::entity::set;
pub use crate::error::Error;
pub use crate::error::Result;
pub use crate::query::Condition;
pub use crate::query::Delete;
pub use crate::query::Insert;
pub use crate::query::InsertMany;
pub use crate::query::Order;
pub use crate::query::OrderBy;
pub use crate::query::Page;
pub use crate::query::PageRequest;
pub use crate::query::Select;
pub use crate::query::Update;
pub use crate::schema::Schema;
pub use crate::value::ColumnType;
pub use crate::value::FromValue;
pub use crate::value::IntoValue;
pub use crate::value::Value;

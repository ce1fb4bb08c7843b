//! Entity and model traits for rosterql
//!
//! The core traits that tie a Rust struct to a database table:
//!
//! - [`EntityTrait`] - Table metadata (name, columns, primary key)
//! - [`ModelTrait`] - A database row as an immutable Rust struct
//! - [`ActiveModelTrait`] - Mutable model for insert/update operations
//! - [`ColumnTrait`] - Column metadata (name, owning table, type, constraints)
//! - [`FromRow`] - Converts database rows to model instances
//!
//! These are normally implemented by the `#[derive(Entity)]` macro.

use crate::Connection;
use crate::error::Error;
use crate::error::Result;
use crate::query::Condition;
use crate::query::Delete;
use crate::query::Insert;
use crate::query::Select;
use crate::query::Update;
use crate::value::ColumnType;
use crate::value::IntoValue;
use crate::value::Value;

/// Trait for column enum types that describe table columns
///
/// Column references are always rendered table-qualified (`players.name`) so
/// that queries stay unambiguous once a second table is joined in.
pub trait ColumnTrait: Copy + Clone + std::fmt::Debug + std::fmt::Display + 'static {
    /// Get the column name
    fn name(&self) -> &'static str;

    /// Get the name of the table this column belongs to
    fn table_name(&self) -> &'static str;

    /// Get the column type
    fn column_type(&self) -> ColumnType;

    /// Check if this column is nullable
    fn is_nullable(&self) -> bool {
        false
    }

    /// Check if this column is a primary key
    fn is_primary_key(&self) -> bool {
        false
    }

    /// Check if this column is auto-increment
    fn is_auto_increment(&self) -> bool {
        false
    }

    /// The (table, column) this column references, if it is a foreign key
    fn references(&self) -> Option<(&'static str, &'static str)> {
        None
    }

    /// Get all columns as a static slice
    fn all() -> &'static [Self];

    /// The table-qualified name, e.g. `players.name`
    fn qualified(&self) -> String {
        format!("{}.{}", self.table_name(), self.name())
    }
}

/// Trait for entity types that represent database tables
///
/// Typically implemented via the `#[derive(Entity)]` macro.
pub trait EntityTrait: std::fmt::Debug + Clone + Default + Send + Sync + 'static {
    /// The model type for this entity
    type Model: ModelTrait<Entity = Self> + FromRow + Send;

    /// The column enum type for this entity
    type Column: ColumnTrait;

    /// The active model type for this entity
    type ActiveModel: ActiveModelTrait<Entity = Self>;

    /// Get the table name
    fn table_name() -> &'static str;

    /// Get the primary key column
    fn primary_key() -> Self::Column;

    /// Check if primary key is auto-increment
    fn primary_key_auto_increment() -> bool;

    /// All columns as a comma-separated string (`id, name, ...`)
    fn all_columns() -> &'static str;

    /// All columns as a comma-separated, table-qualified string
    /// (`players.id, players.name, ...`)
    fn qualified_columns() -> &'static str;

    /// Get the number of columns
    fn column_count() -> usize;
}

/// Trait for model types that represent database rows
pub trait ModelTrait: std::fmt::Debug + Clone + Send + Sync {
    /// The entity type for this model
    type Entity: EntityTrait;

    /// Get the primary key value
    fn get_primary_key_value(&self) -> Value;
}

/// Trait for converting from a database row to a model or projection
///
/// Implementations should return errors for missing columns, type conversion
/// failures, and unexpected nulls in non-nullable fields.
pub trait FromRow: Sized {
    /// Convert from a database row
    ///
    /// # Errors
    ///
    /// Returns an error if the row cannot be converted to this type.
    fn from_row(row: &turso::Row) -> Result<Self>;
}

/// Trait for active model types used in INSERT and UPDATE operations
///
/// Each field is wrapped in [`ActiveValue`]; only `Set` fields are included
/// in the generated statements.
pub trait ActiveModelTrait: std::fmt::Debug + Default + Clone + Send + Sync + 'static {
    /// The entity type for this active model
    type Entity: EntityTrait;

    /// Get columns and values for insert
    fn get_insert_columns_and_values(&self) -> (Vec<&'static str>, Vec<Value>);

    /// Get column-value pairs for update (excluding primary key)
    fn get_update_sets(&self) -> Vec<(&'static str, Value)>;

    /// Get the primary key value if set
    fn get_primary_key_value(&self) -> Option<Value>;

    /// Get the primary key column name
    fn primary_key_column() -> &'static str;
}

/// `find`/`find_by_id` entry points, available on every entity
pub trait EntitySelectExt: EntityTrait {
    #[tracing::instrument]
    fn find() -> Select<Self> {
        Select::new()
    }

    #[tracing::instrument(skip(id))]
    fn find_by_id<V: IntoValue>(id: V) -> Select<Self> {
        Select::new().filter(Condition::eq(Self::primary_key(), id))
    }
}

impl<E: EntityTrait> EntitySelectExt for E {}

/// Delete a fetched model by its primary key
pub trait ModelDeleteExt: ModelTrait {
    #[tracing::instrument(skip(self))]
    fn delete(self) -> Delete<Self::Entity> {
        Delete::new().filter(Condition::eq(<Self::Entity as EntityTrait>::primary_key(), self.get_primary_key_value()))
    }
}

impl<M: ModelTrait> ModelDeleteExt for M {}

/// Async persistence conveniences on active models
#[async_trait::async_trait]
pub trait ActiveModelExt: ActiveModelTrait
where Self::Entity: EntityTrait<ActiveModel = Self>
{
    /// Insert this active model and fetch the stored row back
    async fn insert(self, conn: &Connection) -> Result<<Self::Entity as EntityTrait>::Model> {
        let row_id = Insert::<Self::Entity>::new(self).exec_with_last_insert_id(conn).await?;
        let row = Select::<Self::Entity>::new()
            .filter(Condition::eq(<Self::Entity as EntityTrait>::primary_key(), row_id))
            .one(conn)
            .await?;

        row.ok_or(Error::NoRowsAffected)
    }

    /// Insert this active model, returning only the affected row count
    async fn insert_exec(self, conn: &Connection) -> Result<u64> {
        Insert::<Self::Entity>::new(self).exec(conn).await
    }

    /// Update the row identified by this model's primary key, returning it
    async fn update(self, conn: &Connection) -> Result<<Self::Entity as EntityTrait>::Model> {
        Update::<Self::Entity>::new(self).exec_with_returning(conn).await
    }

    /// Update the row identified by this model's primary key
    async fn update_exec(self, conn: &Connection) -> Result<u64> {
        Update::<Self::Entity>::new(self).exec(conn).await
    }

    /// Delete the row identified by this model's primary key
    async fn delete(self, conn: &Connection) -> Result<u64> {
        let pk_value = self.get_primary_key_value().ok_or(Error::PrimaryKeyNotSet)?;
        Delete::<Self::Entity>::new()
            .filter(Condition::eq(<Self::Entity as EntityTrait>::primary_key(), pk_value))
            .exec(conn)
            .await
    }
}

impl<A: ActiveModelTrait> ActiveModelExt for A where A::Entity: EntityTrait<ActiveModel = A> {}

/// Active value wrapper for tracking field state in active models
///
/// Only `Set` values are included in INSERT and UPDATE statements; `NotSet`
/// fields are left to the database (defaults, auto-increment).
#[derive(Clone, Debug)]
pub enum ActiveValue<T> {
    Set(T),
    NotSet,
}

impl<T> Default for ActiveValue<T> {
    fn default() -> Self {
        ActiveValue::NotSet
    }
}

impl<T> ActiveValue<T> {
    pub fn set(value: T) -> Self {
        ActiveValue::Set(value)
    }

    pub fn is_set(&self) -> bool {
        matches!(self, ActiveValue::Set(_))
    }

    pub fn is_not_set(&self) -> bool {
        matches!(self, ActiveValue::NotSet)
    }

    /// Get a reference to the value if set
    pub fn get(&self) -> Option<&T> {
        match self {
            ActiveValue::Set(v) => Some(v),
            ActiveValue::NotSet => None,
        }
    }

    /// Take ownership of the value if set, consuming self
    pub fn take(self) -> Option<T> {
        match self {
            ActiveValue::Set(v) => Some(v),
            ActiveValue::NotSet => None,
        }
    }

    /// Unwrap the value
    ///
    /// # Panics
    ///
    /// Panics if the value is `NotSet`.
    pub fn unwrap(self) -> T {
        match self {
            ActiveValue::Set(v) => v,
            ActiveValue::NotSet => panic!("Called unwrap on NotSet ActiveValue"),
        }
    }
}

impl<T> From<T> for ActiveValue<T> {
    fn from(value: T) -> Self {
        ActiveValue::Set(value)
    }
}

/// Shorthand for `ActiveValue::Set`
pub fn set<T>(value: T) -> ActiveValue<T> {
    ActiveValue::Set(value)
}

/// Shorthand for `ActiveValue::NotSet`
pub fn not_set<T>() -> ActiveValue<T> {
    ActiveValue::NotSet
}

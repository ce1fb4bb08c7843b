use std::marker::PhantomData;

use crate::ActiveModelTrait;
use crate::ColumnTrait;
use crate::Condition;
use crate::Connection;
use crate::EntityTrait;
use crate::Error;
use crate::FromRow;
use crate::IntoValue;
use crate::Result;
use crate::Value;

/// UPDATE query builder
///
/// Two modes: `new(model)` updates the row identified by the model's primary
/// key, `many()` is a bulk update driven entirely by `set`/`filter` calls.
#[derive(Clone, Debug)]
pub struct Update<E: EntityTrait> {
    model:      Option<E::ActiveModel>,
    sets:       Vec<(String, Value)>,
    conditions: Vec<Condition>,
    _entity:    PhantomData<E>,
}

impl<E: EntityTrait> Update<E> {
    pub fn new(model: E::ActiveModel) -> Self {
        Self { model: Some(model), sets: Vec::new(), conditions: Vec::new(), _entity: PhantomData }
    }

    pub fn many() -> Self {
        Self { model: None, sets: Vec::new(), conditions: Vec::new(), _entity: PhantomData }
    }

    pub fn set<C: ColumnTrait, V: IntoValue>(mut self, column: C, value: V) -> Self {
        self.sets.push((column.name().to_string(), value.into_value()));
        self
    }

    pub fn filter(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    fn build(&self) -> Result<(String, Vec<Value>)> {
        let mut set_parts = Vec::new();
        let mut params = Vec::new();

        if let Some(ref model) = self.model {
            for (col, val) in model.get_update_sets() {
                set_parts.push(format!("{} = ?", col));
                params.push(val);
            }
        }

        for (col, val) in &self.sets {
            set_parts.push(format!("{} = ?", col));
            params.push(val.clone());
        }

        if set_parts.is_empty() {
            return Err(Error::Query("No columns to update".to_string()));
        }

        let mut sql = format!("UPDATE {} SET {}", E::table_name(), set_parts.join(", "));

        let mut where_conditions = self.conditions.clone();

        if let Some(ref model) = self.model {
            if let Some(pk_value) = model.get_primary_key_value() {
                let pk_column = E::ActiveModel::primary_key_column();
                where_conditions.push(Condition::raw(format!("{} = ?", pk_column), vec![pk_value]));
            } else if self.conditions.is_empty() {
                return Err(Error::PrimaryKeyNotSet);
            }
        }

        if !where_conditions.is_empty() {
            let where_parts: Vec<String> = where_conditions.iter().map(|c| format!("({})", c.sql())).collect();
            sql.push_str(" WHERE ");
            sql.push_str(&where_parts.join(" AND "));

            for condition in &where_conditions {
                params.extend(condition.values().iter().cloned());
            }
        }

        Ok((sql, params))
    }

    pub async fn exec(self, conn: &Connection) -> Result<u64> {
        let (sql, params) = self.build()?;
        tracing::trace!("SQL: {}", sql);
        let affected = conn.execute(&sql, params).await?;
        Ok(affected)
    }

    /// Execute the update and return the updated row
    pub async fn exec_with_returning(self, conn: &Connection) -> Result<E::Model> {
        let (base_sql, params) = self.build()?;
        let sql = format!("{} RETURNING {}", base_sql, E::all_columns());

        let mut rows = conn.query(&sql, params).await?;

        if let Some(row) = rows.next().await? { E::Model::from_row(&row) } else { Err(Error::NoRowsAffected) }
    }
}

impl<E: EntityTrait> Default for Update<E> {
    fn default() -> Self {
        Self::many()
    }
}

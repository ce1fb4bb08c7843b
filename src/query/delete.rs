use std::marker::PhantomData;

use crate::Condition;
use crate::Connection;
use crate::EntityTrait;
use crate::Result;
use crate::Value;

/// DELETE query builder
///
/// Without any filter this deletes every row in the table.
#[derive(Clone, Debug)]
pub struct Delete<E: EntityTrait> {
    conditions: Vec<Condition>,
    _entity:    PhantomData<E>,
}

impl<E: EntityTrait> Delete<E> {
    pub fn new() -> Self {
        Self { conditions: Vec::new(), _entity: PhantomData }
    }

    pub fn filter(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn build(&self) -> (String, Vec<Value>) {
        let mut sql = format!("DELETE FROM {}", E::table_name());
        let mut params = Vec::new();

        if !self.conditions.is_empty() {
            let where_parts: Vec<String> = self.conditions.iter().map(|c| format!("({})", c.sql())).collect();
            sql.push_str(" WHERE ");
            sql.push_str(&where_parts.join(" AND "));

            for condition in &self.conditions {
                params.extend(condition.values().iter().cloned());
            }
        }

        (sql, params)
    }

    pub async fn exec(self, conn: &Connection) -> Result<u64> {
        let (sql, params) = self.build();
        tracing::trace!("SQL: {}", sql);
        let affected = conn.execute(&sql, params).await?;
        Ok(affected)
    }
}

impl<E: EntityTrait> Default for Delete<E> {
    fn default() -> Self {
        Self::new()
    }
}

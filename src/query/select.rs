use std::marker::PhantomData;

use crate::ColumnTrait;
use crate::Condition;
use crate::Connection;
use crate::EntityTrait;
use crate::Error;
use crate::FromRow;
use crate::FromValue;
use crate::Order;
use crate::OrderBy;
use crate::Result;
use crate::Value;
use crate::query::page::Page;
use crate::query::page::PageRequest;

#[derive(Clone, Copy, Debug)]
pub(crate) enum JoinKind {
    Left,
    Inner,
}

impl std::fmt::Display for JoinKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JoinKind::Left => write!(f, "LEFT JOIN"),
            JoinKind::Inner => write!(f, "JOIN"),
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Join {
    kind:  JoinKind,
    table: &'static str,
    on:    String,
}

/// SELECT query builder
///
/// Starts from the entity's own table and qualified column list; joins,
/// projections, filters, ordering and paging are layered on by consuming
/// builder methods. Conditions accumulate as an AND conjunction.
#[derive(Clone, Debug)]
pub struct Select<E: EntityTrait> {
    columns:    Option<Vec<String>>,
    joins:      Vec<Join>,
    conditions: Vec<Condition>,
    order_by:   Vec<OrderBy>,
    limit:      Option<usize>,
    offset:     Option<usize>,
    _entity:    PhantomData<E>,
}

impl<E: EntityTrait> Select<E> {
    pub fn new() -> Self {
        Self {
            columns:    None,
            joins:      Vec::new(),
            conditions: Vec::new(),
            order_by:   Vec::new(),
            limit:      None,
            offset:     None,
            _entity:    PhantomData,
        }
    }

    /// Add a condition; all conditions are combined with AND
    pub fn filter(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Left-join another entity's table on `from = to`
    ///
    /// Rows of this entity without a join partner are kept, with the joined
    /// columns reading as NULL.
    pub fn left_join<J: EntityTrait>(mut self, from: E::Column, to: J::Column) -> Self {
        self.joins.push(Join {
            kind:  JoinKind::Left,
            table: J::table_name(),
            on:    format!("{} = {}", from.qualified(), to.qualified()),
        });
        self
    }

    /// Inner-join another entity's table on `from = to`
    pub fn inner_join<J: EntityTrait>(mut self, from: E::Column, to: J::Column) -> Self {
        self.joins.push(Join {
            kind:  JoinKind::Inner,
            table: J::table_name(),
            on:    format!("{} = {}", from.qualified(), to.qualified()),
        });
        self
    }

    /// Project onto a column list of this entity
    pub fn columns(mut self, columns: Vec<E::Column>) -> Self {
        self.columns = Some(columns.iter().map(|c| c.qualified()).collect());
        self
    }

    /// Append one projection column; may belong to a joined entity
    pub fn column<C: ColumnTrait>(mut self, column: C) -> Self {
        self.columns.get_or_insert_with(Vec::new).push(column.qualified());
        self
    }

    /// Project onto a single raw expression, e.g. `MAX(players.height)`
    ///
    /// Intended for subquery right-hand sides; the expression is embedded
    /// verbatim.
    pub fn expr(mut self, expression: impl Into<String>) -> Self {
        self.columns = Some(vec![expression.into()]);
        self
    }

    pub fn order_by<C: ColumnTrait>(mut self, column: C, direction: Order) -> Self {
        self.order_by.push(OrderBy { column: column.qualified(), direction });
        self
    }

    pub fn order_by_asc<C: ColumnTrait>(mut self, column: C) -> Self {
        self.order_by.push(OrderBy::asc(column));
        self
    }

    pub fn order_by_desc<C: ColumnTrait>(mut self, column: C) -> Self {
        self.order_by.push(OrderBy::desc(column));
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }

    fn push_from_clause(&self, sql: &mut String) {
        sql.push_str(" FROM ");
        sql.push_str(E::table_name());
        for join in &self.joins {
            sql.push_str(&format!(" {} {} ON {}", join.kind, join.table, join.on));
        }
    }

    fn push_where_clause(&self, sql: &mut String, params: &mut Vec<Value>) {
        if self.conditions.is_empty() {
            return;
        }

        let where_parts: Vec<String> = self.conditions.iter().map(|c| format!("({})", c.sql())).collect();
        sql.push_str(" WHERE ");
        sql.push_str(&where_parts.join(" AND "));

        for condition in &self.conditions {
            params.extend(condition.values().iter().cloned());
        }
    }

    /// Render the content query as SQL plus positional parameters
    pub fn build(&self) -> (String, Vec<Value>) {
        let columns =
            self.columns.as_ref().map(|c| c.join(", ")).unwrap_or_else(|| E::qualified_columns().to_string());

        let mut sql = format!("SELECT {}", columns);
        let mut params = Vec::new();

        self.push_from_clause(&mut sql);
        self.push_where_clause(&mut sql, &mut params);

        if !self.order_by.is_empty() {
            let order_parts: Vec<String> =
                self.order_by.iter().map(|o| format!("{} {}", o.column, o.direction)).collect();
            sql.push_str(" ORDER BY ");
            sql.push_str(&order_parts.join(", "));
        }

        if let Some(limit) = self.limit {
            sql.push_str(&format!(" LIMIT {}", limit));
        }

        if let Some(offset) = self.offset {
            sql.push_str(&format!(" OFFSET {}", offset));
        }

        (sql, params)
    }

    /// Render the count query: same FROM/JOIN/WHERE, no projection, no
    /// ordering, no limit/offset
    pub fn build_count(&self) -> (String, Vec<Value>) {
        let mut sql = "SELECT COUNT(*)".to_string();
        let mut params = Vec::new();

        self.push_from_clause(&mut sql);
        self.push_where_clause(&mut sql, &mut params);

        (sql, params)
    }

    /// Fetch all matching rows as entity models
    pub async fn all(self, conn: &Connection) -> Result<Vec<E::Model>> {
        self.all_into::<E::Model>(conn).await
    }

    /// Fetch all matching rows, decoding each through `P`
    ///
    /// Used with [`column`](Self::column) projections to read flat row shapes
    /// instead of full entities. Rows that fail to decode are logged and
    /// skipped.
    pub async fn all_into<P: FromRow>(self, conn: &Connection) -> Result<Vec<P>> {
        let (sql, params) = self.build();
        tracing::trace!("SQL: {}", sql);
        tracing::trace!("Params: {:?}", params);

        let mut rows = conn.query(&sql, params).await?;
        let mut results = Vec::new();

        while let Some(row) = rows.next().await? {
            match P::from_row(&row) {
                Ok(parsed) => results.push(parsed),
                Err(e) => {
                    tracing::warn!("Failed to decode row: {}", serde_json::to_string_pretty(&self.raw_row(&row)?)?);
                    tracing::warn!("{}", e);
                    continue;
                }
            }
        }

        Ok(results)
    }

    /// Fetch the first matching row, if any
    pub async fn one(self, conn: &Connection) -> Result<Option<E::Model>> {
        let query = self.limit(1);
        let (sql, params) = query.build();
        tracing::trace!("SQL: {}", sql);
        tracing::trace!("Params: {:?}", params);

        let mut rows = conn.query(&sql, params).await?;
        let row = rows.next().await?;

        row.map(|r| E::Model::from_row(&r)).transpose()
    }

    /// Fetch the single matching row
    ///
    /// Zero rows and more than one row are distinct outcomes: the former is
    /// `Ok(None)`, the latter is [`Error::NonUniqueResult`].
    pub async fn single(self, conn: &Connection) -> Result<Option<E::Model>> {
        let query = self.limit(2);
        let (sql, params) = query.build();

        let mut rows = conn.query(&sql, params).await?;

        let first = match rows.next().await? {
            Some(row) => E::Model::from_row(&row)?,
            None => return Ok(None),
        };

        if rows.next().await?.is_some() {
            return Err(Error::NonUniqueResult);
        }

        Ok(Some(first))
    }

    /// Count matching rows, ignoring any limit/offset on this builder
    pub async fn count(self, conn: &Connection) -> Result<i64> {
        let (sql, params) = self.build_count();
        tracing::trace!("SQL: {}", sql);

        let mut rows = conn.query(&sql, params).await?;

        if let Some(row) = rows.next().await? {
            match row.get_value(0)? {
                Value::Integer(count) => Ok(count),
                _ => Ok(0),
            }
        } else {
            Ok(0)
        }
    }

    pub async fn exists(self, conn: &Connection) -> Result<bool> {
        let count = self.count(conn).await?;
        Ok(count > 0)
    }

    /// Largest value of `column` over the matching rows, None when no row matches
    pub async fn max<C: ColumnTrait, V: FromValue>(self, column: C, conn: &Connection) -> Result<Option<V>> {
        self.scalar(format!("MAX({})", column.qualified()), conn).await
    }

    /// Smallest value of `column` over the matching rows
    pub async fn min<C: ColumnTrait, V: FromValue>(self, column: C, conn: &Connection) -> Result<Option<V>> {
        self.scalar(format!("MIN({})", column.qualified()), conn).await
    }

    /// Sum of `column` over the matching rows
    pub async fn sum<C: ColumnTrait, V: FromValue>(self, column: C, conn: &Connection) -> Result<Option<V>> {
        self.scalar(format!("SUM({})", column.qualified()), conn).await
    }

    /// Average of `column` over the matching rows
    pub async fn avg<C: ColumnTrait>(self, column: C, conn: &Connection) -> Result<Option<f64>> {
        self.scalar(format!("AVG({})", column.qualified()), conn).await
    }

    async fn scalar<V: FromValue>(mut self, expression: String, conn: &Connection) -> Result<Option<V>> {
        self.columns = Some(vec![expression]);
        self.order_by.clear();
        self.limit = None;
        self.offset = None;

        let (sql, params) = self.build();
        tracing::trace!("SQL: {}", sql);

        let mut rows = conn.query(&sql, params).await?;
        match rows.next().await? {
            Some(row) => Option::<V>::from_value(row.get_value(0)?),
            None => Ok(None),
        }
    }

    /// Fetch one page of entity models plus the total matching count
    pub async fn page(self, conn: &Connection, request: &PageRequest) -> Result<Page<E::Model>> {
        self.page_into::<E::Model>(conn, request).await
    }

    /// Fetch one page, decoding rows through `P`
    ///
    /// Sort entries name properties of this entity and are appended after any
    /// ordering already on the builder; an unknown property is a caller error
    /// ([`Error::ColumnNotFound`]). The total is computed by an independent
    /// count query over the same joins and conditions, skipped when the first
    /// page already shows the result set is smaller than one page.
    pub async fn page_into<P: FromRow>(mut self, conn: &Connection, request: &PageRequest) -> Result<Page<P>> {
        for (property, direction) in &request.sort {
            let column = resolve_property::<E>(property)?;
            self = self.order_by(column, *direction);
        }

        let content_query = self.clone().limit(request.size).offset(request.offset());
        let content = content_query.all_into::<P>(conn).await?;

        let total = if request.page == 0 && content.len() < request.size {
            content.len() as i64
        } else {
            self.count(conn).await?
        };

        Ok(Page::new(content, total, request))
    }

    fn raw_row(&self, row: &turso::Row) -> Result<serde_json::Value> {
        use serde_json::json;

        let column_names: Vec<String> = match &self.columns {
            Some(columns) => columns.clone(),
            None => E::all_columns().split(", ").map(|c| c.to_string()).collect(),
        };
        let mut values = serde_json::Map::new();

        for i in 0..row.column_count() {
            let column_name = column_names.get(i).cloned().unwrap_or_else(|| format!("column_{}", i));
            let value = match row.get_value(i)? {
                Value::Integer(v) => json!(v),
                Value::Real(v) => json!(v),
                Value::Text(v) => json!(v),
                Value::Blob(v) => json!(v),
                Value::Null => json!(null),
            };
            values.insert(column_name, value);
        }

        Ok(serde_json::Value::Object(values))
    }
}

impl<E: EntityTrait> Default for Select<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve a caller-supplied property name against an entity's columns
pub(crate) fn resolve_property<E: EntityTrait>(property: &str) -> Result<E::Column> {
    E::Column::all()
        .iter()
        .copied()
        .find(|c| c.name() == property)
        .ok_or_else(|| Error::ColumnNotFound(property.to_string()))
}

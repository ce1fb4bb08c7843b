use crate::ColumnTrait;
use crate::EntityTrait;
use crate::IntoValue;
use crate::Value;
use crate::query::select::Select;

/// One boolean test over a column, rendered as a SQL fragment plus its
/// positional parameters
///
/// Conditions are immutable values: combinators consume their inputs and
/// return a new condition. Column references are always table-qualified so a
/// condition built for a joined query means the same thing as in a
/// single-table query.
#[derive(Clone, Debug)]
pub struct Condition {
    pub(crate) sql:    String,
    pub(crate) values: Vec<Value>,
}

impl Condition {
    pub fn eq<Column: ColumnTrait, V: IntoValue>(column: Column, value: V) -> Self {
        Self { sql: format!("{} = ?", column.qualified()), values: vec![value.into_value()] }
    }

    pub fn ne<Column: ColumnTrait, V: IntoValue>(column: Column, value: V) -> Self {
        Self { sql: format!("{} != ?", column.qualified()), values: vec![value.into_value()] }
    }

    pub fn gt<Column: ColumnTrait, V: IntoValue>(column: Column, value: V) -> Self {
        Self { sql: format!("{} > ?", column.qualified()), values: vec![value.into_value()] }
    }

    pub fn gte<Column: ColumnTrait, V: IntoValue>(column: Column, value: V) -> Self {
        Self { sql: format!("{} >= ?", column.qualified()), values: vec![value.into_value()] }
    }

    pub fn lt<Column: ColumnTrait, V: IntoValue>(column: Column, value: V) -> Self {
        Self { sql: format!("{} < ?", column.qualified()), values: vec![value.into_value()] }
    }

    pub fn lte<Column: ColumnTrait, V: IntoValue>(column: Column, value: V) -> Self {
        Self { sql: format!("{} <= ?", column.qualified()), values: vec![value.into_value()] }
    }

    pub fn like<Column: ColumnTrait>(column: Column, pattern: impl Into<String>) -> Self {
        Self { sql: format!("{} LIKE ?", column.qualified()), values: vec![Value::Text(pattern.into())] }
    }

    pub fn not_like<Column: ColumnTrait>(column: Column, pattern: impl Into<String>) -> Self {
        Self { sql: format!("{} NOT LIKE ?", column.qualified()), values: vec![Value::Text(pattern.into())] }
    }

    pub fn contains<Column: ColumnTrait>(column: Column, value: impl Into<String>) -> Self {
        Self { sql: format!("{} LIKE ?", column.qualified()), values: vec![Value::Text(format!("%{}%", value.into()))] }
    }

    pub fn starts_with<Column: ColumnTrait>(column: Column, value: impl Into<String>) -> Self {
        Self { sql: format!("{} LIKE ?", column.qualified()), values: vec![Value::Text(format!("{}%", value.into()))] }
    }

    pub fn ends_with<Column: ColumnTrait>(column: Column, value: impl Into<String>) -> Self {
        Self { sql: format!("{} LIKE ?", column.qualified()), values: vec![Value::Text(format!("%{}", value.into()))] }
    }

    pub fn is_null<Column: ColumnTrait>(column: Column) -> Self {
        Self { sql: format!("{} IS NULL", column.qualified()), values: vec![] }
    }

    pub fn is_not_null<Column: ColumnTrait>(column: Column) -> Self {
        Self { sql: format!("{} IS NOT NULL", column.qualified()), values: vec![] }
    }

    pub fn is_in<Column: ColumnTrait, V: IntoValue>(column: Column, values: Vec<V>) -> Self {
        let placeholders: Vec<&str> = values.iter().map(|_| "?").collect();
        Self {
            sql:    format!("{} IN ({})", column.qualified(), placeholders.join(", ")),
            values: values.into_iter().map(|v| v.into_value()).collect(),
        }
    }

    pub fn not_in<Column: ColumnTrait, V: IntoValue>(column: Column, values: Vec<V>) -> Self {
        let placeholders: Vec<&str> = values.iter().map(|_| "?").collect();
        Self {
            sql:    format!("{} NOT IN ({})", column.qualified(), placeholders.join(", ")),
            values: values.into_iter().map(|v| v.into_value()).collect(),
        }
    }

    pub fn between<Column: ColumnTrait, V: IntoValue>(column: Column, low: V, high: V) -> Self {
        Self {
            sql:    format!("{} BETWEEN ? AND ?", column.qualified()),
            values: vec![low.into_value(), high.into_value()],
        }
    }

    /// Column equals the single value produced by a subquery
    pub fn eq_subquery<Column: ColumnTrait, E: EntityTrait>(column: Column, sub: Select<E>) -> Self {
        let (sql, values) = sub.build();
        Self { sql: format!("{} = ({})", column.qualified(), sql), values }
    }

    /// Column is greater than or equal to the value produced by a subquery
    pub fn gte_subquery<Column: ColumnTrait, E: EntityTrait>(column: Column, sub: Select<E>) -> Self {
        let (sql, values) = sub.build();
        Self { sql: format!("{} >= ({})", column.qualified(), sql), values }
    }

    /// Column is contained in the rows produced by a subquery
    pub fn in_subquery<Column: ColumnTrait, E: EntityTrait>(column: Column, sub: Select<E>) -> Self {
        let (sql, values) = sub.build();
        Self { sql: format!("{} IN ({})", column.qualified(), sql), values }
    }

    pub fn raw(sql: impl Into<String>, values: Vec<Value>) -> Self {
        Self { sql: sql.into(), values }
    }

    pub fn and(self, other: Condition) -> Self {
        let mut values = self.values;
        values.extend(other.values);
        Self { sql: format!("({}) AND ({})", self.sql, other.sql), values }
    }

    pub fn or(self, other: Condition) -> Self {
        let mut values = self.values;
        values.extend(other.values);
        Self { sql: format!("({}) OR ({})", self.sql, other.sql), values }
    }

    pub fn not(self) -> Self {
        Self { sql: format!("NOT ({})", self.sql), values: self.values }
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }
}

/// Sort direction for an ORDER BY entry
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Order {
    Asc,
    Desc,
}

impl std::fmt::Display for Order {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Order::Asc => write!(f, "ASC"),
            Order::Desc => write!(f, "DESC"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct OrderBy {
    pub(crate) column:    String,
    pub(crate) direction: Order,
}

impl OrderBy {
    pub fn asc<Column: ColumnTrait>(column: Column) -> Self {
        Self { column: column.qualified(), direction: Order::Asc }
    }

    pub fn desc<Column: ColumnTrait>(column: Column) -> Self {
        Self { column: column.qualified(), direction: Order::Desc }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ColumnType;

    #[derive(Clone, Copy, Debug)]
    enum TestColumn {
        Id,
        Name,
        Height,
        Weight,
    }

    impl std::fmt::Display for TestColumn {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{}", self.name())
        }
    }

    impl ColumnTrait for TestColumn {
        fn name(&self) -> &'static str {
            match self {
                TestColumn::Id => "id",
                TestColumn::Name => "name",
                TestColumn::Height => "height",
                TestColumn::Weight => "weight",
            }
        }

        fn table_name(&self) -> &'static str {
            "players"
        }

        fn column_type(&self) -> ColumnType {
            match self {
                TestColumn::Name => ColumnType::Text,
                _ => ColumnType::Integer,
            }
        }

        fn all() -> &'static [Self] {
            &[TestColumn::Id, TestColumn::Name, TestColumn::Height, TestColumn::Weight]
        }
    }

    #[test]
    fn test_condition_eq() {
        let cond = Condition::eq(TestColumn::Name, "Roy");
        assert_eq!(cond.sql(), "players.name = ?");
        assert_eq!(cond.values(), &[Value::Text("Roy".to_string())]);
    }

    #[test]
    fn test_condition_ne() {
        let cond = Condition::ne(TestColumn::Name, "Perry");
        assert_eq!(cond.sql(), "players.name != ?");
        assert_eq!(cond.values(), &[Value::Text("Perry".to_string())]);
    }

    #[test]
    fn test_condition_gt() {
        let cond = Condition::gt(TestColumn::Height, 170);
        assert_eq!(cond.sql(), "players.height > ?");
        assert_eq!(cond.values(), &[Value::Integer(170)]);
    }

    #[test]
    fn test_condition_gte() {
        let cond = Condition::gte(TestColumn::Height, 180);
        assert_eq!(cond.sql(), "players.height >= ?");
    }

    #[test]
    fn test_condition_lt() {
        let cond = Condition::lt(TestColumn::Height, 190);
        assert_eq!(cond.sql(), "players.height < ?");
    }

    #[test]
    fn test_condition_lte() {
        let cond = Condition::lte(TestColumn::Height, 190);
        assert_eq!(cond.sql(), "players.height <= ?");
    }

    #[test]
    fn test_condition_like() {
        let cond = Condition::like(TestColumn::Name, "Ro%");
        assert_eq!(cond.sql(), "players.name LIKE ?");
        assert_eq!(cond.values(), &[Value::Text("Ro%".to_string())]);
    }

    #[test]
    fn test_condition_not_like() {
        let cond = Condition::not_like(TestColumn::Name, "D%");
        assert_eq!(cond.sql(), "players.name NOT LIKE ?");
    }

    #[test]
    fn test_condition_contains() {
        let cond = Condition::contains(TestColumn::Name, "oy");
        assert_eq!(cond.sql(), "players.name LIKE ?");
        assert_eq!(cond.values(), &[Value::Text("%oy%".to_string())]);
    }

    #[test]
    fn test_condition_starts_with() {
        let cond = Condition::starts_with(TestColumn::Name, "Ro");
        assert_eq!(cond.values(), &[Value::Text("Ro%".to_string())]);
    }

    #[test]
    fn test_condition_ends_with() {
        let cond = Condition::ends_with(TestColumn::Name, "y");
        assert_eq!(cond.values(), &[Value::Text("%y".to_string())]);
    }

    #[test]
    fn test_condition_is_null() {
        let cond = Condition::is_null(TestColumn::Weight);
        assert_eq!(cond.sql(), "players.weight IS NULL");
        assert!(cond.values().is_empty());
    }

    #[test]
    fn test_condition_is_not_null() {
        let cond = Condition::is_not_null(TestColumn::Name);
        assert_eq!(cond.sql(), "players.name IS NOT NULL");
        assert!(cond.values().is_empty());
    }

    #[test]
    fn test_condition_is_in() {
        let cond = Condition::is_in(TestColumn::Name, vec!["Roy", "Perry"]);
        assert_eq!(cond.sql(), "players.name IN (?, ?)");
        assert_eq!(cond.values().len(), 2);
    }

    #[test]
    fn test_condition_is_in_empty() {
        let cond = Condition::is_in(TestColumn::Id, Vec::<i64>::new());
        assert_eq!(cond.sql(), "players.id IN ()");
        assert!(cond.values().is_empty());
    }

    #[test]
    fn test_condition_not_in() {
        let cond = Condition::not_in(TestColumn::Id, vec![1, 2]);
        assert_eq!(cond.sql(), "players.id NOT IN (?, ?)");
    }

    #[test]
    fn test_condition_between() {
        let cond = Condition::between(TestColumn::Height, 160, 180);
        assert_eq!(cond.sql(), "players.height BETWEEN ? AND ?");
        assert_eq!(cond.values(), &[Value::Integer(160), Value::Integer(180)]);
    }

    #[test]
    fn test_condition_raw() {
        let cond = Condition::raw("players.height > ? AND players.weight < ?", vec![
            Value::Integer(170),
            Value::Integer(80),
        ]);
        assert_eq!(cond.values().len(), 2);
    }

    #[test]
    fn test_condition_and() {
        let combined = Condition::eq(TestColumn::Name, "Roy").and(Condition::gt(TestColumn::Height, 170));
        assert_eq!(combined.sql(), "(players.name = ?) AND (players.height > ?)");
        assert_eq!(combined.values().len(), 2);
    }

    #[test]
    fn test_condition_or() {
        let combined = Condition::eq(TestColumn::Name, "Roy").or(Condition::eq(TestColumn::Name, "Perry"));
        assert_eq!(combined.sql(), "(players.name = ?) OR (players.name = ?)");
        assert_eq!(combined.values().len(), 2);
    }

    #[test]
    fn test_condition_not() {
        let cond = Condition::eq(TestColumn::Name, "Perry").not();
        assert_eq!(cond.sql(), "NOT (players.name = ?)");
        assert_eq!(cond.values().len(), 1);
    }

    #[test]
    fn test_condition_chained() {
        let cond = Condition::gt(TestColumn::Height, 170)
            .and(Condition::lt(TestColumn::Height, 190))
            .or(Condition::eq(TestColumn::Name, "Sally"));

        assert!(cond.sql().contains("AND"));
        assert!(cond.sql().contains("OR"));
        assert_eq!(cond.values().len(), 3);
    }

    #[test]
    fn test_condition_into_values() {
        let values = Condition::between(TestColumn::Height, 160, 180).into_values();
        assert_eq!(values, vec![Value::Integer(160), Value::Integer(180)]);
    }

    #[test]
    fn test_order_display() {
        assert_eq!(format!("{}", Order::Asc), "ASC");
        assert_eq!(format!("{}", Order::Desc), "DESC");
    }

    #[test]
    fn test_order_by_asc() {
        let order_by = OrderBy::asc(TestColumn::Name);
        assert_eq!(order_by.column, "players.name");
        assert_eq!(order_by.direction, Order::Asc);
    }

    #[test]
    fn test_order_by_desc() {
        let order_by = OrderBy::desc(TestColumn::Height);
        assert_eq!(order_by.column, "players.height");
        assert_eq!(order_by.direction, Order::Desc);
    }
}

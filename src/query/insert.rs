use std::marker::PhantomData;

use crate::ActiveModelTrait;
use crate::Connection;
use crate::EntityTrait;
use crate::Error;
use crate::Result;
use crate::Value;

/// INSERT query builder
///
/// Only `Set` fields of the active model are written; everything else is left
/// to the database.
#[derive(Clone, Debug)]
pub struct Insert<E: EntityTrait> {
    models:  Vec<E::ActiveModel>,
    _entity: PhantomData<E>,
}

impl<E: EntityTrait> Insert<E> {
    pub fn new(model: E::ActiveModel) -> Self {
        Self { models: vec![model], _entity: PhantomData }
    }

    pub fn empty() -> Self {
        Self { models: Vec::new(), _entity: PhantomData }
    }

    pub fn add(mut self, model: E::ActiveModel) -> Self {
        self.models.push(model);
        self
    }

    pub fn add_many(mut self, models: impl IntoIterator<Item = E::ActiveModel>) -> Self {
        self.models.extend(models);
        self
    }

    fn build_single(&self, model: &E::ActiveModel) -> (String, Vec<Value>) {
        let (columns, values) = model.get_insert_columns_and_values();

        if columns.is_empty() {
            return (format!("INSERT INTO {} DEFAULT VALUES", E::table_name()), Vec::new());
        }

        let placeholders: Vec<&str> = columns.iter().map(|_| "?").collect();

        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            E::table_name(),
            columns.join(", "),
            placeholders.join(", ")
        );

        (sql, values)
    }

    pub async fn exec(self, conn: &Connection) -> Result<u64> {
        let mut total_affected = 0u64;

        for model in &self.models {
            let (sql, params) = self.build_single(model);
            tracing::debug!("Insert SQL: {}", sql);
            let affected = conn.execute(&sql, params).await?;
            total_affected += affected;
        }

        Ok(total_affected)
    }

    /// Insert the first model and return the row id assigned to it
    pub async fn exec_with_last_insert_id(self, conn: &Connection) -> Result<i64> {
        let model = self.models.first().ok_or_else(|| Error::Query("No records to insert".to_string()))?;

        let (sql, params) = self.build_single(model);
        tracing::debug!("Insert SQL: {}", sql);
        tracing::debug!("Insert Params: {:?}", params);

        conn.execute(&sql, params).await?;
        Ok(conn.last_insert_rowid())
    }
}

/// Batch insert of a pre-collected set of active models
#[derive(Clone, Debug)]
pub struct InsertMany<E: EntityTrait> {
    models:  Vec<E::ActiveModel>,
    _entity: PhantomData<E>,
}

impl<E: EntityTrait> InsertMany<E> {
    pub fn new(models: Vec<E::ActiveModel>) -> Self {
        Self { models, _entity: PhantomData }
    }

    pub async fn exec(self, conn: &Connection) -> Result<u64> {
        Insert::<E>::empty().add_many(self.models).exec(conn).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ActiveValue;
    use crate::ColumnTrait;
    use crate::ColumnType;
    use crate::FromRow;
    use crate::ModelTrait;
    use crate::set;

    #[derive(Clone, Debug, PartialEq)]
    struct Athlete {
        id:   i64,
        name: String,
    }

    impl ModelTrait for Athlete {
        type Entity = AthleteEntity;

        fn get_primary_key_value(&self) -> Value {
            Value::Integer(self.id)
        }
    }

    impl FromRow for Athlete {
        fn from_row(_row: &turso::Row) -> Result<Self> {
            Ok(Athlete { id: 1, name: "test".to_string() })
        }
    }

    #[derive(Clone, Debug, Default)]
    struct AthleteActiveModel {
        id:     ActiveValue<i64>,
        name:   ActiveValue<String>,
        height: ActiveValue<i64>,
    }

    impl ActiveModelTrait for AthleteActiveModel {
        type Entity = AthleteEntity;

        fn get_insert_columns_and_values(&self) -> (Vec<&'static str>, Vec<Value>) {
            let mut columns = Vec::new();
            let mut values = Vec::new();
            if let ActiveValue::Set(ref v) = self.name {
                columns.push("name");
                values.push(Value::Text(v.clone()));
            }
            if let ActiveValue::Set(ref v) = self.height {
                columns.push("height");
                values.push(Value::Integer(*v));
            }
            (columns, values)
        }

        fn get_update_sets(&self) -> Vec<(&'static str, Value)> {
            Vec::new()
        }

        fn get_primary_key_value(&self) -> Option<Value> {
            self.id.clone().take().map(Value::Integer)
        }

        fn primary_key_column() -> &'static str {
            "id"
        }
    }

    #[derive(Clone, Copy, Debug)]
    enum AthleteColumn {
        Id,
        Name,
        Height,
    }

    impl std::fmt::Display for AthleteColumn {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{}", self.name())
        }
    }

    impl ColumnTrait for AthleteColumn {
        fn name(&self) -> &'static str {
            match self {
                AthleteColumn::Id => "id",
                AthleteColumn::Name => "name",
                AthleteColumn::Height => "height",
            }
        }

        fn table_name(&self) -> &'static str {
            "athletes"
        }

        fn column_type(&self) -> ColumnType {
            match self {
                AthleteColumn::Name => ColumnType::Text,
                _ => ColumnType::Integer,
            }
        }

        fn all() -> &'static [Self] {
            &[AthleteColumn::Id, AthleteColumn::Name, AthleteColumn::Height]
        }
    }

    #[derive(Clone, Copy, Debug, Default)]
    struct AthleteEntity;

    impl EntityTrait for AthleteEntity {
        type ActiveModel = AthleteActiveModel;
        type Column = AthleteColumn;
        type Model = Athlete;

        fn table_name() -> &'static str {
            "athletes"
        }

        fn primary_key() -> Self::Column {
            AthleteColumn::Id
        }

        fn primary_key_auto_increment() -> bool {
            true
        }

        fn all_columns() -> &'static str {
            "id, name, height"
        }

        fn qualified_columns() -> &'static str {
            "athletes.id, athletes.name, athletes.height"
        }

        fn column_count() -> usize {
            3
        }
    }

    #[test]
    fn test_insert_build_single() {
        let model = AthleteActiveModel { name: set("Roy".to_string()), height: set(173), ..Default::default() };
        let insert = Insert::<AthleteEntity>::new(model.clone());
        let (sql, values) = insert.build_single(&model);

        assert_eq!(sql, "INSERT INTO athletes (name, height) VALUES (?, ?)");
        assert_eq!(values, vec![Value::Text("Roy".to_string()), Value::Integer(173)]);
    }

    #[test]
    fn test_insert_build_single_partial_fields() {
        let model = AthleteActiveModel { name: set("Sally".to_string()), ..Default::default() };
        let insert = Insert::<AthleteEntity>::new(model.clone());
        let (sql, values) = insert.build_single(&model);

        assert_eq!(sql, "INSERT INTO athletes (name) VALUES (?)");
        assert_eq!(values.len(), 1);
    }

    #[test]
    fn test_insert_build_single_no_fields() {
        let model = AthleteActiveModel::default();
        let insert = Insert::<AthleteEntity>::new(model.clone());
        let (sql, values) = insert.build_single(&model);

        assert_eq!(sql, "INSERT INTO athletes DEFAULT VALUES");
        assert!(values.is_empty());
    }

    #[test]
    fn test_insert_chained_add() {
        let insert = Insert::<AthleteEntity>::empty()
            .add(AthleteActiveModel { name: set("Roy".to_string()), ..Default::default() })
            .add(AthleteActiveModel { name: set("Perry".to_string()), ..Default::default() });

        let debug = format!("{:?}", insert);
        assert!(debug.contains("Roy"));
        assert!(debug.contains("Perry"));
    }

    #[test]
    fn test_insert_add_many() {
        let models = vec![
            AthleteActiveModel { name: set("Sally".to_string()), ..Default::default() },
            AthleteActiveModel { name: set("Dice".to_string()), ..Default::default() },
        ];

        let insert = Insert::<AthleteEntity>::empty().add_many(models);
        let debug = format!("{:?}", insert);
        assert!(debug.contains("Sally"));
        assert!(debug.contains("Dice"));
    }

    #[test]
    fn test_insert_many_debug() {
        let insert_many =
            InsertMany::<AthleteEntity>::new(vec![AthleteActiveModel { name: set("Roy".to_string()), ..Default::default() }]);

        assert!(format!("{:?}", insert_many).contains("InsertMany"));
    }
}

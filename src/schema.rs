//! DDL helpers derived from entity metadata

use crate::ColumnTrait;
use crate::Connection;
use crate::EntityTrait;
use crate::Result;
use crate::value::ColumnType;

/// Generates and runs CREATE/DROP TABLE statements for entities
///
/// ```ignore
/// Schema::create_table::<PlayerEntity>(&conn, true).await?;
/// ```
pub struct Schema;

impl Schema {
    /// Create the table for an entity
    pub async fn create_table<E: EntityTrait>(conn: &Connection, if_not_exists: bool) -> Result<()> {
        let sql = Self::create_table_sql::<E>(if_not_exists);
        conn.execute(&sql, ()).await?;
        Ok(())
    }

    /// Generate the CREATE TABLE statement for an entity
    pub fn create_table_sql<E: EntityTrait>(if_not_exists: bool) -> String {
        let exists_clause = if if_not_exists { "IF NOT EXISTS " } else { "" };

        let mut column_defs = Vec::new();

        for col in E::Column::all() {
            let mut def = format!("{} {}", col.name(), column_type_to_sql(col.column_type()));

            if col.is_primary_key() {
                def.push_str(" PRIMARY KEY");
                if col.is_auto_increment() {
                    def.push_str(" AUTOINCREMENT");
                }
            } else if !col.is_nullable() {
                def.push_str(" NOT NULL");
            }

            if let Some((table, column)) = col.references() {
                def.push_str(&format!(" REFERENCES {}({})", table, column));
            }

            column_defs.push(def);
        }

        format!("CREATE TABLE {}{} (\n  {}\n)", exists_clause, E::table_name(), column_defs.join(",\n  "))
    }

    /// Drop the table for an entity
    pub async fn drop_table<E: EntityTrait>(conn: &Connection, if_exists: bool) -> Result<()> {
        let sql = Self::drop_table_sql::<E>(if_exists);
        conn.execute(&sql, ()).await?;
        Ok(())
    }

    /// Generate the DROP TABLE statement
    pub fn drop_table_sql<E: EntityTrait>(if_exists: bool) -> String {
        let exists_clause = if if_exists { "IF EXISTS " } else { "" };
        format!("DROP TABLE {}{}", exists_clause, E::table_name())
    }

    /// Check if the entity's table exists
    pub async fn table_exists<E: EntityTrait>(conn: &Connection) -> Result<bool> {
        let sql = "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?";

        let mut rows = conn.query(sql, [E::table_name()]).await?;

        if let Some(row) = rows.next().await? {
            match row.get_value(0)? {
                crate::Value::Integer(count) => Ok(count > 0),
                _ => Ok(false),
            }
        } else {
            Ok(false)
        }
    }
}

fn column_type_to_sql(col_type: ColumnType) -> &'static str {
    match col_type {
        ColumnType::Integer => "INTEGER",
        ColumnType::Float => "REAL",
        ColumnType::Text => "TEXT",
        ColumnType::Blob => "BLOB",
    }
}

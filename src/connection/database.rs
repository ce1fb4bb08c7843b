#[derive(Clone)]
pub struct Database {
    db: turso::Database,
}

impl Database {
    pub(super) fn new(db: turso::Database) -> Self {
        Self { db }
    }

    pub fn connect(&self) -> super::ConnectionResult<super::Connection> {
        let conn = self.db.connect()?;
        Ok(super::Connection::new(conn))
    }
}

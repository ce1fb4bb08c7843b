pub struct Builder {
    path: String,
}

impl Builder {
    /// Open or create a local database file; `:memory:` gives a throwaway store
    pub fn new_local(path: &str) -> Self {
        Self { path: path.to_string() }
    }

    pub async fn build(self) -> super::ConnectionResult<super::Database> {
        let db = turso::Builder::new_local(&self.path).build().await?;
        Ok(super::Database::new(db))
    }
}

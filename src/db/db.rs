use super::migrations::init_with_migrations;
use super::tasks::Tasks;
use crate::libs::config::ServerConfig;
use crate::libs::data_storage::DataStorage;
use crate::libs::error::TaskError;
use anyhow::Result;
use rusqlite::Connection;
use std::path::{Path, PathBuf};

/// Storage handle for the task database.
///
/// `Db` only carries the location of the database file. Every request opens
/// its own connection through [`Db::tasks`], so nothing is shared between
/// requests apart from the file itself.
#[derive(Debug, Clone)]
pub struct Db {
    path: PathBuf,
}

impl Db {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Db { path: path.into() }
    }

    /// Resolves the database location from the server settings.
    pub fn from_config(config: &ServerConfig) -> Result<Self> {
        Ok(Db::new(config.database_path(&DataStorage::new())?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn open(&self) -> Result<Connection, TaskError> {
        Ok(Connection::open(&self.path)?)
    }

    /// Brings the schema up to date. Run once before serving requests.
    pub fn migrate(&self) -> Result<()> {
        let mut conn = self.open()?;
        init_with_migrations(&mut conn)
    }

    /// Opens a fresh connection scoped to one unit of work.
    pub fn tasks(&self) -> Result<Tasks, TaskError> {
        Ok(Tasks::new(self.open()?))
    }
}

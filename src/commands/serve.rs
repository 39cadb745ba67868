use crate::db::db::Db;
use crate::libs::config::Config;
use crate::libs::logging;
use crate::libs::messages::Message;
use crate::server;
use anyhow::Result;
use tracing::info;

/// Opens (and migrates) the database, then serves requests until Ctrl+C.
pub async fn cmd() -> Result<()> {
    logging::init_stderr();

    let settings = Config::read()?.server_settings();
    let db = Db::from_config(&settings)?;
    info!("{}", Message::DatabaseOpened(db.path().display().to_string()));
    db.migrate()?;

    server::serve(&settings, db).await
}

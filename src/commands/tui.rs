use crate::api::TaskClient;
use crate::libs::config::Config;
use crate::libs::data_storage::DataStorage;
use crate::libs::logging::{self, LOG_FILE_NAME};
use crate::libs::messages::Message;
use crate::tui;
use anyhow::Result;
use tracing::info;

/// Starts the full-screen client against the configured store.
pub async fn cmd() -> Result<()> {
    logging::init_file(&DataStorage::new().get_path(LOG_FILE_NAME)?)?;

    let settings = Config::read()?.server_settings();
    let client = TaskClient::new(&settings.base_url);
    info!("{}", Message::SessionStarted(client.base_url().to_string()));

    tui::run(client).await?;

    info!("{}", Message::SessionEnded);
    Ok(())
}

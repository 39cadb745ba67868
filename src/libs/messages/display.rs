//! Display implementation for taskdeck messages.
//!
//! All user-facing text lives here so that the server responses, the
//! terminal status line and console output stay consistent.

use super::types::Message;
use crate::libs::data_storage::{APP_NAME, APP_VERSION};
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === TASK MESSAGES ===
            Message::TaskCreated(name) => format!("Task '{}' created", name),
            Message::TaskUpdated(name) => format!("Task '{}' updated", name),
            Message::TaskCompleted(name) => format!("Task '{}' completed", name),
            Message::TaskDeleted(id) => format!("Task {} deleted", id),
            Message::TaskNotFound => "Task not found".to_string(),
            Message::TaskCannotReopen(id) => format!("Task {} is completed and cannot be reopened", id),
            Message::NoChangesDetected => "No changes detected.".to_string(),
            Message::PageLimitExceeded(limit, max) => format!("limit {} exceeds the maximum page size of {}", limit, max),

            // === SESSION MESSAGES ===
            Message::AppTitle => format!("Task Manager ({} v{})", APP_NAME, APP_VERSION),
            Message::KeyLegend => "a=Add  u=Update  Space=Complete  Del=Delete  ↑/↓=Navigate  q=Quit".to_string(),
            Message::NoTasks => "No tasks yet. Press 'a' to add one.".to_string(),
            Message::PromptCancelled => "Cancelled".to_string(),
            Message::InvalidPriorityChoice(input) => format!("'{}' is not a priority, answer n or h", input),
            Message::RequestFailed(error) => format!("Request failed: {}", error),
            Message::FetchFailed(error) => format!("Could not load tasks: {}", error),
            Message::TerminalNotSupported(reason) => format!("Interactive terminal unavailable: {}", reason),
            Message::SessionStarted(url) => format!("Terminal session started against {}", url),
            Message::SessionEnded => "Terminal session ended".to_string(),

            // === PROMPTS ===
            Message::PromptTaskName => "Enter task name: ".to_string(),
            Message::PromptTaskPriority => "Priority? [n]ormal/[h]igh: ".to_string(),
            Message::PromptUpdateName(name) => format!("Update name ({}): ", name),
            Message::PromptUpdatePriority(priority) => format!("Update priority ({})? [n]ormal/[h]igh/[Enter]=no change: ", priority),
            Message::PromptBindAddr => "Address the task store listens on".to_string(),
            Message::PromptBaseUrl => "Base URL the terminal client connects to".to_string(),
            Message::PromptDatabasePath => "Database file (leave empty for the default)".to_string(),

            // === SERVER MESSAGES ===
            Message::Welcome => "Welcome to the Task Manager API".to_string(),
            Message::ServerListening(addr) => format!("Task store listening on {}", addr),
            Message::ServerStopping => "Task store shutting down".to_string(),
            Message::DatabaseOpened(path) => format!("Using database {}", path),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigDeleted => "Configuration removed".to_string(),
            Message::ConfigNotFound => "No configuration file to remove".to_string(),
            Message::ConfigModuleServer => "Server settings".to_string(),

            // === MIGRATION MESSAGES ===
            Message::MigrationsFound(count) => format!("Found {} pending migration(s)", count),
            Message::RunningMigration(version, name) => format!("Running migration v{}: {}", version, name),
            Message::MigrationCompleted(version) => format!("Migration v{} completed", version),
            Message::MigrationFailed(version, error) => format!("Migration v{} failed: {}", version, error),
            Message::AllMigrationsCompleted => "All migrations completed successfully".to_string(),
            Message::DatabaseUpToDate => "Database is up to date".to_string(),
        };
        write!(f, "{}", text)
    }
}

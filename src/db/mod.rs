//! Database layer for the task store.
//!
//! Persistence is a single SQLite file. [`db::Db`] is the storage handle
//! passed into every request; it opens a fresh connection per unit of work
//! and hands back a [`tasks::Tasks`] repository bound to it.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use taskdeck::db::db::Db;
//! use taskdeck::libs::task::{NewTask, Priority};
//!
//! let db = Db::new("task.db");
//! db.migrate()?;
//! let created = db.tasks()?.insert(&NewTask::new("Buy milk", Priority::Normal))?;
//! println!("stored as #{}", created.id);
//! # Ok::<(), anyhow::Error>(())
//! ```

/// Storage handle and per-request connection factory.
pub mod db;

/// Versioned schema migrations, applied at service startup.
pub mod migrations;

/// CRUD operations over the `tasks` table.
pub mod tasks;

//! # Taskdeck - a terminal to-do list over a small HTTP task store
//!
//! Two halves share one crate: `taskdeck serve` exposes a SQLite-backed
//! JSON CRUD service, and `taskdeck tui` is a keyboard-driven full-screen
//! client that talks to it.
//!
//! ## Features
//!
//! - **Task store**: paginated listing, creation, partial updates and deletion
//! - **Terminal client**: cursor navigation, inline prompts, status line
//! - **Configuration**: interactive `init` wizard with environment overrides
//!
//! ## Usage
//!
//! ```rust,no_run
//! use taskdeck::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod api;
pub mod commands;
pub mod db;
pub mod libs;
pub mod server;
pub mod tui;

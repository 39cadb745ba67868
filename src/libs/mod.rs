//! Core library modules for the taskdeck application.
//!
//! - **Domain**: the [`task`] model and the [`error`] taxonomy
//! - **Infrastructure**: [`config`], [`data_storage`], [`logging`]
//! - **Messaging**: user-facing text and console macros in [`messages`]
//!
//! ## Usage
//!
//! ```rust
//! use taskdeck::libs::task::{display_sort, Task};
//!
//! let ordered: Vec<Task> = display_sort(Vec::new());
//! assert!(ordered.is_empty());
//! ```

pub mod config;
pub mod data_storage;
pub mod error;
pub mod logging;
pub mod messages;
pub mod task;

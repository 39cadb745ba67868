//! Task domain model shared by the store service and the terminal client.
//!
//! A [`Task`] carries an id assigned by the store, a free-text name, a
//! [`Priority`], a short creation stamp (`"Jan 2"`) and a [`Status`].
//! Creation payloads use [`NewTask`]; partial edits use [`TaskUpdate`],
//! where every absent field is left untouched.
//!
//! ## Usage
//!
//! ```rust
//! use taskdeck::libs::task::{display_sort, NewTask, Priority, TaskUpdate};
//!
//! let draft = NewTask::new("Buy milk", Priority::High);
//! let update = TaskUpdate { priority: Some(Priority::Normal), ..Default::default() };
//! assert!(!update.is_empty());
//! ```

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;
use thiserror::Error;

/// `strftime` pattern of the creation stamp, e.g. `"Jan 2"`.
pub const DATE_FORMAT: &str = "%b %-d";

/// Raised when a stored or submitted enum value is outside its enumeration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown {kind} value '{value}'")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    #[default]
    Normal,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Normal => "Normal",
            Priority::High => "High",
        }
    }

    /// Resolves the single-letter answer of a priority prompt (`n` or `h`).
    ///
    /// Full names are accepted as well. Matching ignores case and
    /// surrounding whitespace.
    pub fn from_choice(input: &str) -> Option<Self> {
        match input.trim().to_uppercase().as_str() {
            "N" | "NORMAL" => Some(Priority::Normal),
            "H" | "HIGH" => Some(Priority::High),
            _ => None,
        }
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Normal" => Ok(Priority::Normal),
            "High" => Ok(Priority::High),
            other => Err(ParseEnumError {
                kind: "priority",
                value: other.to_string(),
            }),
        }
    }
}

/// Completion state. Only the `New -> Completed` transition exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    New,
    Completed,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::New => "new",
            Status::Completed => "completed",
        }
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Status {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(Status::New),
            "completed" => Ok(Status::Completed),
            other => Err(ParseEnumError {
                kind: "status",
                value: other.to_string(),
            }),
        }
    }
}

/// A stored task record as returned by the task store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub name: String,
    pub priority: Priority,
    pub date: String,
    pub status: Status,
}

impl Task {
    pub fn is_completed(&self) -> bool {
        self.status == Status::Completed
    }
}

/// Creation payload. The store assigns the id; status always starts as `new`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTask {
    pub name: String,
    #[serde(default)]
    pub priority: Priority,
    pub date: String,
}

impl NewTask {
    /// Builds a payload stamped with today's local date.
    pub fn new(name: &str, priority: Priority) -> Self {
        NewTask {
            name: name.to_string(),
            priority,
            date: today_stamp(),
        }
    }
}

/// Partial update. `None` means "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
}

impl TaskUpdate {
    pub fn complete() -> Self {
        TaskUpdate {
            status: Some(Status::Completed),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.priority.is_none() && self.date.is_none() && self.status.is_none()
    }

    /// Writes every present field onto `task`; `id` is never touched.
    pub fn apply(&self, task: &mut Task) {
        if let Some(name) = &self.name {
            task.name = name.clone();
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(date) = &self.date {
            task.date = date.clone();
        }
        if let Some(status) = self.status {
            task.status = status;
        }
    }
}

pub fn format_stamp(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn today_stamp() -> String {
    format_stamp(Local::now().date_naive())
}

/// Display order: active tasks first, completed tasks last.
///
/// The partition is stable, so tasks sharing a status keep the order in which
/// the store returned them. Storage order and ids are unaffected.
pub fn display_sort(tasks: Vec<Task>) -> Vec<Task> {
    let (mut active, completed): (Vec<Task>, Vec<Task>) = tasks.into_iter().partition(|task| !task.is_completed());
    active.extend(completed);
    active
}

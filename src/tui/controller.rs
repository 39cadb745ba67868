//! Interactive session state machine.
//!
//! The [`Controller`] owns the cursor, the scroll offset and the modal
//! prompt state. It never talks to the store: [`Controller::handle_key`]
//! turns one key event into an [`Outcome`], and a mutating outcome carries
//! the [`Request`] the caller should send. The task list itself is replaced
//! wholesale every frame through [`Controller::refresh`].
//!
//! Invariants kept after every call:
//!
//! - `cursor < tasks.len()`, or `cursor == 0` when the list is empty
//! - `offset <= cursor < offset + viewport_height`

use crate::libs::messages::Message;
use crate::libs::task::{display_sort, NewTask, Priority, Task, TaskUpdate};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

pub const QUIT_KEY: char = 'q';
pub const ADD_KEY: char = 'a';
pub const UPDATE_KEY: char = 'u';
pub const COMPLETE_KEY: char = ' ';

/// Which answer the bottom input row is collecting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptField {
    AddName,
    AddPriority {
        name: String,
    },
    EditName {
        id: i64,
        current_name: String,
        current_priority: Priority,
    },
    EditPriority {
        id: i64,
        current_name: String,
        current_priority: Priority,
        name: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub field: PromptField,
    pub buffer: String,
}

impl Prompt {
    fn new(field: PromptField) -> Self {
        Prompt { field, buffer: String::new() }
    }

    pub fn label(&self) -> String {
        match &self.field {
            PromptField::AddName => Message::PromptTaskName.to_string(),
            PromptField::AddPriority { .. } => Message::PromptTaskPriority.to_string(),
            PromptField::EditName { current_name, .. } => Message::PromptUpdateName(current_name.clone()).to_string(),
            PromptField::EditPriority { current_priority, .. } => Message::PromptUpdatePriority(current_priority.to_string()).to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Browsing,
    Prompting(Prompt),
}

/// A store call the session should issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Create(NewTask),
    Update { id: i64, update: TaskUpdate },
    Delete { id: i64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Local state changed (or nothing happened); no request needed.
    Idle,
    Send(Request),
    Quit,
}

/// Smallest offset change that keeps `cursor` inside the visible window.
pub fn scroll_into_view(cursor: usize, offset: usize, viewport_height: usize) -> usize {
    let height = viewport_height.max(1);
    if cursor < offset {
        cursor
    } else if cursor >= offset + height {
        cursor + 1 - height
    } else {
        offset
    }
}

#[derive(Debug)]
pub struct Controller {
    tasks: Vec<Task>,
    cursor: usize,
    offset: usize,
    viewport_height: usize,
    mode: Mode,
    status: Option<String>,
    /// Cursor saved by [`Controller::clear`], restored on the next refresh.
    parked_cursor: Option<usize>,
}

impl Default for Controller {
    fn default() -> Self {
        Self::new()
    }
}

impl Controller {
    pub fn new() -> Self {
        Controller {
            tasks: Vec::new(),
            cursor: 0,
            offset: 0,
            viewport_height: 1,
            mode: Mode::Browsing,
            status: None,
            parked_cursor: None,
        }
    }

    /// Installs a freshly fetched list for this frame.
    ///
    /// The list is display-sorted and the cursor clamped, since the
    /// collection may have shrunk since the last mutation.
    pub fn refresh(&mut self, tasks: Vec<Task>) {
        self.tasks = display_sort(tasks);
        let cursor = self.parked_cursor.take().unwrap_or(self.cursor);
        self.cursor = cursor.min(self.tasks.len().saturating_sub(1));
        self.reveal_cursor();
    }

    /// Shows an empty frame after a failed fetch without losing the
    /// user's place: the cursor comes back with the next good refresh.
    pub fn clear(&mut self) {
        if self.parked_cursor.is_none() {
            self.parked_cursor = Some(self.cursor);
        }
        self.tasks.clear();
        self.cursor = 0;
        self.offset = 0;
    }

    pub fn set_viewport_height(&mut self, height: usize) {
        self.viewport_height = height.max(1);
        self.reveal_cursor();
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn viewport_height(&self) -> usize {
        self.viewport_height
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn set_status(&mut self, message: Message) {
        self.status = Some(message.to_string());
    }

    pub fn selected(&self) -> Option<&Task> {
        self.tasks.get(self.cursor)
    }

    /// Rows inside the scroll window, paired with their list index.
    pub fn visible(&self) -> impl Iterator<Item = (usize, &Task)> {
        self.tasks.iter().enumerate().skip(self.offset).take(self.viewport_height)
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Outcome {
        if key.kind != KeyEventKind::Press {
            return Outcome::Idle;
        }
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Outcome::Quit;
        }

        self.status = None;

        match std::mem::replace(&mut self.mode, Mode::Browsing) {
            Mode::Browsing => self.browse(key),
            Mode::Prompting(prompt) => self.prompt(prompt, key),
        }
    }

    fn browse(&mut self, key: KeyEvent) -> Outcome {
        match key.code {
            KeyCode::Up => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                }
            }
            KeyCode::Down => {
                if self.cursor + 1 < self.tasks.len() {
                    self.cursor += 1;
                }
            }
            KeyCode::Char(QUIT_KEY) => return Outcome::Quit,
            KeyCode::Char(COMPLETE_KEY) => return self.complete_selected(),
            KeyCode::Delete => return self.delete_selected(),
            KeyCode::Char(ADD_KEY) => self.mode = Mode::Prompting(Prompt::new(PromptField::AddName)),
            KeyCode::Char(UPDATE_KEY) => {
                if let Some(task) = self.selected() {
                    let field = PromptField::EditName {
                        id: task.id,
                        current_name: task.name.clone(),
                        current_priority: task.priority,
                    };
                    self.mode = Mode::Prompting(Prompt::new(field));
                }
            }
            _ => {}
        }
        self.reveal_cursor();
        Outcome::Idle
    }

    /// Marks the selected task completed (unless it already is) and moves
    /// down one row so repeated presses sweep through the list.
    fn complete_selected(&mut self) -> Outcome {
        let Some(task) = self.selected() else {
            return Outcome::Idle;
        };
        let request = (!task.is_completed()).then(|| Request::Update {
            id: task.id,
            update: TaskUpdate::complete(),
        });

        if self.cursor + 1 < self.tasks.len() {
            self.cursor += 1;
        }
        self.reveal_cursor();

        request.map_or(Outcome::Idle, Outcome::Send)
    }

    /// Deletes the selected task. The cursor is left alone: if the row was
    /// the last one, the clamp in the next [`Controller::refresh`] steps it
    /// back, and only when the store actually removed the row.
    fn delete_selected(&mut self) -> Outcome {
        match self.selected() {
            Some(task) => Outcome::Send(Request::Delete { id: task.id }),
            None => Outcome::Idle,
        }
    }

    fn prompt(&mut self, mut prompt: Prompt, key: KeyEvent) -> Outcome {
        match key.code {
            KeyCode::Esc => {
                self.set_status(Message::PromptCancelled);
                Outcome::Idle
            }
            KeyCode::Enter => self.submit(prompt),
            KeyCode::Backspace => {
                prompt.buffer.pop();
                self.mode = Mode::Prompting(prompt);
                Outcome::Idle
            }
            KeyCode::Char(c) if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
                prompt.buffer.push(c);
                self.mode = Mode::Prompting(prompt);
                Outcome::Idle
            }
            _ => {
                self.mode = Mode::Prompting(prompt);
                Outcome::Idle
            }
        }
    }

    fn submit(&mut self, prompt: Prompt) -> Outcome {
        let input = prompt.buffer.trim().to_string();

        match prompt.field {
            PromptField::AddName => {
                self.mode = Mode::Prompting(Prompt::new(PromptField::AddPriority { name: input }));
                Outcome::Idle
            }
            PromptField::AddPriority { name } => match Priority::from_choice(&input) {
                Some(priority) => Outcome::Send(Request::Create(NewTask::new(&name, priority))),
                None => {
                    self.set_status(Message::InvalidPriorityChoice(input));
                    self.mode = Mode::Prompting(Prompt::new(PromptField::AddPriority { name }));
                    Outcome::Idle
                }
            },
            PromptField::EditName {
                id,
                current_name,
                current_priority,
            } => {
                let name = Some(input).filter(|n| !n.is_empty() && *n != current_name);
                let field = PromptField::EditPriority {
                    id,
                    current_name,
                    current_priority,
                    name,
                };
                self.mode = Mode::Prompting(Prompt::new(field));
                Outcome::Idle
            }
            PromptField::EditPriority {
                id,
                current_name,
                current_priority,
                name,
            } => {
                let priority = if input.is_empty() {
                    None
                } else {
                    match Priority::from_choice(&input) {
                        Some(priority) => Some(priority),
                        None => {
                            self.set_status(Message::InvalidPriorityChoice(input));
                            let field = PromptField::EditPriority {
                                id,
                                current_name,
                                current_priority,
                                name,
                            };
                            self.mode = Mode::Prompting(Prompt::new(field));
                            return Outcome::Idle;
                        }
                    }
                };

                let update = TaskUpdate {
                    name,
                    priority: priority.filter(|p| *p != current_priority),
                    ..Default::default()
                };
                if update.is_empty() {
                    self.set_status(Message::NoChangesDetected);
                    return Outcome::Idle;
                }
                Outcome::Send(Request::Update { id, update })
            }
        }
    }

    fn reveal_cursor(&mut self) {
        self.offset = scroll_into_view(self.cursor, self.offset, self.viewport_height);
    }
}

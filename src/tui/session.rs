//! Glue between the [`Controller`] and a [`TaskStore`].
//!
//! A session fetches the collection at the start of every frame, feeds key
//! events to the controller and executes whatever request comes back. Store
//! failures never escape: they become the controller's status line.

use super::controller::{Controller, Outcome, Request};
use crate::api::TaskStore;
use crate::libs::error::ErrorKind;
use crate::libs::messages::Message;
use crossterm::event::KeyEvent;
use tracing::{debug, error, info, warn};

pub struct Session<S> {
    store: S,
    controller: Controller,
}

impl<S: TaskStore> Session<S> {
    pub fn new(store: S) -> Self {
        Session {
            store,
            controller: Controller::new(),
        }
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut Controller {
        &mut self.controller
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Replaces the controller's list with the store's current contents.
    pub async fn sync(&mut self) {
        match self.store.fetch_all().await {
            Ok(tasks) => self.controller.refresh(tasks),
            Err(e) => {
                warn!(error = %e, "failed to fetch tasks");
                self.controller.clear();
                self.controller.set_status(Message::FetchFailed(e.to_string()));
            }
        }
    }

    /// Applies one key. Returns `true` when the session should end.
    pub async fn handle_key(&mut self, key: KeyEvent) -> bool {
        match self.controller.handle_key(key) {
            Outcome::Quit => true,
            Outcome::Idle => false,
            Outcome::Send(request) => {
                self.execute(request).await;
                false
            }
        }
    }

    async fn execute(&mut self, request: Request) {
        debug!(?request, "sending request");
        let result = match request {
            Request::Create(task) => self.store.create_task(&task).await.map(|task| Message::TaskCreated(task.name)),
            Request::Update { id, update } => self.store.update_task(id, &update).await.map(|task| {
                if update.status.is_some() && task.is_completed() {
                    Message::TaskCompleted(task.name)
                } else {
                    Message::TaskUpdated(task.name)
                }
            }),
            Request::Delete { id } => self.store.delete_task(id).await.map(|_| Message::TaskDeleted(id)),
        };

        match result {
            Ok(message) => {
                info!("{}", message);
                self.controller.set_status(message);
            }
            Err(e) => match e.kind() {
                ErrorKind::NotFound => {
                    warn!(error = %e, "task vanished before the request");
                    self.controller.set_status(Message::TaskNotFound);
                }
                ErrorKind::Validation | ErrorKind::Infra => {
                    error!(error = %e, "request failed");
                    self.controller.set_status(Message::RequestFailed(e.to_string()));
                }
            },
        }
    }
}

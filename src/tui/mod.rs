//! Full-screen terminal client.
//!
//! One loop iteration is one frame: fetch the whole list, draw it, wait for
//! a single key, apply it. Nothing runs between key presses.
//!
//! - [`controller`] – cursor, scroll and prompt state machine
//! - [`session`] – executes controller requests against a store
//! - [`ui`] – ratatui rendering
//! - [`terminal`] – raw mode and alternate screen handling

use crate::api::TaskStore;
use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};

pub mod controller;
pub mod session;
pub mod terminal;
pub mod ui;

pub use controller::Controller;
pub use session::Session;

enum Input {
    Key(KeyEvent),
    Redraw,
}

/// Runs the interactive session until the user quits.
///
/// The terminal is restored even when the loop fails.
pub async fn run<S: TaskStore>(store: S) -> Result<()> {
    terminal::check_tui_support()?;
    let mut screen = terminal::setup_terminal()?;
    let result = event_loop(&mut screen, Session::new(store)).await;
    terminal::restore_terminal(&mut screen);
    result
}

async fn event_loop<S: TaskStore>(screen: &mut terminal::Screen, mut session: Session<S>) -> Result<()> {
    loop {
        session.sync().await;
        screen.draw(|f| {
            let controller = session.controller_mut();
            controller.set_viewport_height(ui::list_height(f.area()));
            ui::draw(f, controller);
        })?;

        match next_input().await? {
            Input::Key(key) => {
                if session.handle_key(key).await {
                    return Ok(());
                }
            }
            Input::Redraw => {}
        }
    }
}

/// Blocks (off the executor) until a key press or a resize arrives.
async fn next_input() -> Result<Input> {
    loop {
        match tokio::task::spawn_blocking(event::read).await?? {
            Event::Key(key) if key.kind == KeyEventKind::Press => return Ok(Input::Key(key)),
            Event::Resize(..) => return Ok(Input::Redraw),
            _ => {}
        }
    }
}

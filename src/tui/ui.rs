use super::controller::{Controller, Mode};
use crate::libs::messages::Message;
use crate::libs::task::{Priority, Task};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

/// Rows taken by the title, legend, spacers, prompt and status line.
const CHROME_HEIGHT: u16 = 6;

/// Number of task rows that fit in a frame of this size.
pub fn list_height(area: Rect) -> usize {
    area.height.saturating_sub(CHROME_HEIGHT) as usize
}

pub fn row_text(task: &Task) -> String {
    let checkbox = if task.is_completed() { "[x]" } else { "[ ]" };
    format!("{} {:<20} {:<6} {:<6}", checkbox, task.name, task.priority, task.date)
}

/// Selection, high priority and completion each add their own emphasis.
pub fn row_style(task: &Task, selected: bool) -> Style {
    let mut style = Style::default();
    if selected {
        style = style.add_modifier(Modifier::REVERSED);
    }
    if task.priority == Priority::High {
        style = style.fg(Color::Red);
    }
    if task.is_completed() {
        style = style.add_modifier(Modifier::DIM);
    }
    style
}

pub fn draw(f: &mut Frame<'_>, controller: &Controller) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(f.area());

    let title = Paragraph::new(Span::styled(
        Message::AppTitle.to_string(),
        Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
    ));
    f.render_widget(title, chunks[0]);
    f.render_widget(Paragraph::new(Message::KeyLegend.to_string()), chunks[2]);

    draw_tasks(f, chunks[4], controller);
    draw_input(f, chunks[5], controller);

    if let Some(status) = controller.status() {
        let line = Paragraph::new(Span::styled(status.to_string(), Style::default().fg(Color::Yellow)));
        f.render_widget(line, chunks[6]);
    }
}

fn draw_tasks(f: &mut Frame<'_>, area: Rect, controller: &Controller) {
    if controller.tasks().is_empty() {
        let empty = Paragraph::new(Span::styled(Message::NoTasks.to_string(), Style::default().fg(Color::DarkGray)));
        f.render_widget(empty, area);
        return;
    }

    let lines: Vec<Line> = controller
        .visible()
        .map(|(index, task)| Line::from(Span::styled(row_text(task), row_style(task, index == controller.cursor()))))
        .collect();
    f.render_widget(Paragraph::new(lines), area);
}

fn draw_input(f: &mut Frame<'_>, area: Rect, controller: &Controller) {
    let Mode::Prompting(prompt) = controller.mode() else {
        return;
    };

    let label = prompt.label();
    let cursor_x = area.x + (label.chars().count() + prompt.buffer.chars().count()) as u16;
    let line = Line::from(vec![Span::raw(label), Span::raw(prompt.buffer.clone())]);
    f.render_widget(Paragraph::new(line), area);
    f.set_cursor_position((cursor_x.min(area.right().saturating_sub(1)), area.y));
}

//! Shared rendering primitives: theme palettes, layout helpers and the
//! per-task row.

use ratatui::prelude::*;
use ratatui::widgets::ListItem;

use crate::command::Command;
use crate::model::{Task, Theme};

/// Colors for one theme. Chosen from the store's theme flag on every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub fg: Color,
    pub bg: Color,
    pub accent: Color,
    pub muted: Color,
    pub done: Color,
    pub highlight: Color,
    pub error: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                fg: Color::Black,
                bg: Color::White,
                accent: Color::Blue,
                muted: Color::Gray,
                done: Color::Green,
                highlight: Color::Rgb(220, 220, 235),
                error: Color::Red,
            },
            Theme::Dark => Self {
                fg: Color::White,
                bg: Color::Black,
                accent: Color::Cyan,
                muted: Color::DarkGray,
                done: Color::LightGreen,
                highlight: Color::Rgb(50, 50, 70),
                error: Color::LightRed,
            },
        }
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }
}

/// Center a rectangle within an area.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

/// Stateless display row for one task.
///
/// The row's toggle/edit/delete controls are exposed as [`Command`]s bound
/// to the task's id; the caller decides when to dispatch them.
pub struct TaskItemView<'a> {
    task: &'a Task,
    selected: bool,
}

impl<'a> TaskItemView<'a> {
    pub fn new(task: &'a Task, selected: bool) -> Self {
        Self { task, selected }
    }

    pub fn toggle(&self) -> Command {
        Command::ToggleComplete { id: self.task.id }
    }

    pub fn edit(&self) -> Command {
        Command::OpenEdit { id: self.task.id }
    }

    pub fn delete(&self) -> Command {
        Command::DeleteTask { id: self.task.id }
    }

    pub fn line(&self, palette: &Palette) -> Line<'a> {
        let (check, check_style) = if self.task.completed {
            ("[\u{2713}] ", Style::default().fg(palette.done).bold())
        } else {
            ("[ ] ", Style::default().fg(palette.muted))
        };
        let text_style = if self.task.completed {
            Style::default().fg(palette.muted).crossed_out()
        } else {
            Style::default().fg(palette.fg)
        };

        let mut spans = vec![
            Span::styled(check, check_style),
            Span::styled(self.task.text.as_str(), text_style),
        ];
        for tag in &self.task.tags {
            spans.push(Span::styled(
                format!(" #{tag}"),
                Style::default().fg(palette.accent),
            ));
        }
        if self.selected {
            spans.push(Span::styled(
                "   space:toggle  e:edit  d:delete",
                Style::default().fg(palette.muted),
            ));
        }
        Line::from(spans)
    }

    pub fn item(&self, palette: &Palette) -> ListItem<'a> {
        let item = ListItem::new(self.line(palette));
        if self.selected {
            item.style(Style::default().bg(palette.highlight))
        } else {
            item
        }
    }
}

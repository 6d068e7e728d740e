use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, List, Paragraph, Wrap};

use super::app::{App, Mode};
use crate::ui::{self, Palette, TaskItemView};
use crate::view;

pub fn render(frame: &mut Frame, app: &mut App) {
    let palette = Palette::for_theme(app.store.theme());
    let area = frame.area();
    frame.render_widget(Block::default().style(palette.base()), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Length(3), // input + staged tags
            Constraint::Length(1), // search
            Constraint::Length(1), // tag filter
            Constraint::Min(0),    // list
            Constraint::Length(1), // footer
        ])
        .split(area);

    render_header(frame, app, &palette, chunks[0]);
    render_input(frame, app, &palette, chunks[1]);
    render_search(frame, app, &palette, chunks[2]);
    render_tag_bar(frame, app, &palette, chunks[3]);
    render_list(frame, app, &palette, chunks[4]);
    render_footer(frame, app, &palette, chunks[5]);

    match app.mode {
        Mode::Edit => render_edit_dialog(frame, app, &palette),
        Mode::Help => render_help(frame, &palette),
        Mode::ConfirmClear => render_confirm_clear(frame, app, &palette),
        _ => {}
    }
}

fn render_header(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let (done, total) = view::counts(app.store);
    let line = Line::from(vec![
        Span::styled(" Todo List ", Style::default().fg(palette.accent).bold()),
        Span::styled(
            format!(" {done}/{total} done "),
            Style::default().fg(palette.muted),
        ),
        Span::raw("  "),
        Span::styled(
            format!("{} T", app.store.theme().switcher_icon()),
            Style::default().fg(palette.muted),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn focus_style(palette: &Palette, focused: bool) -> Style {
    if focused {
        Style::default().fg(palette.accent)
    } else {
        Style::default().fg(palette.muted)
    }
}

fn render_input(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let typing_task = app.mode == Mode::Input;
    let typing_tag = app.mode == Mode::Tag;

    let mut spans = Vec::new();
    if app.store.input().is_empty() && !typing_task {
        spans.push(Span::styled(
            "Add a new task...",
            Style::default().fg(palette.muted).italic(),
        ));
    } else {
        spans.push(Span::styled(app.store.input(), Style::default().fg(palette.fg)));
    }
    if typing_task {
        spans.push(Span::styled("_", Style::default().fg(palette.accent)));
    }
    for tag in app.store.tag_draft() {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            format!("[#{tag}]"),
            Style::default().fg(palette.bg).bg(palette.accent),
        ));
    }
    if typing_tag {
        spans.push(Span::styled(
            format!(" #{}_", app.tag_buf),
            Style::default().fg(palette.accent),
        ));
    }

    let title = if typing_tag { " New tag " } else { " New task " };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(focus_style(palette, typing_task || typing_tag));
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_search(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let searching = app.mode == Mode::Search;
    let query = &app.store.filter().search_query;
    let cursor = if searching { "_" } else { "" };
    let line = Line::from(vec![
        Span::styled(" Search: ", focus_style(palette, searching)),
        Span::styled(format!("{query}{cursor}"), Style::default().fg(palette.fg)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_tag_bar(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let selected = app.store.filter().selected_tag.as_deref();
    let chip = |label: String, active: bool| {
        if active {
            Span::styled(label, Style::default().fg(palette.bg).bg(palette.accent).bold())
        } else {
            Span::styled(label, Style::default().fg(palette.muted))
        }
    };

    let mut spans = vec![
        Span::styled(" Tags: ", Style::default().fg(palette.muted)),
        chip(" All ".to_string(), selected.is_none()),
    ];
    for tag in view::available_tags(app.store) {
        spans.push(Span::raw(" "));
        spans.push(chip(format!(" {tag} "), selected == Some(tag)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_list(frame: &mut Frame, app: &mut App, palette: &Palette, area: Rect) {
    let tasks = view::visible_tasks(app.store);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Tasks ")
        .border_style(focus_style(palette, app.mode == Mode::Normal));

    if tasks.is_empty() {
        let msg = if app.store.tasks().is_empty() {
            "No tasks yet. Press a to add one."
        } else {
            "No tasks match the current filter."
        };
        frame.render_widget(
            Paragraph::new(msg)
                .style(Style::default().fg(palette.muted))
                .block(block),
            area,
        );
        return;
    }

    let items: Vec<_> = tasks
        .iter()
        .enumerate()
        .map(|(i, task)| TaskItemView::new(task, i == app.cursor).item(palette))
        .collect();
    let list = List::new(items).block(block);
    frame.render_stateful_widget(list, area, &mut app.list_state);
}

fn render_footer(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    if let Some(err) = &app.error {
        frame.render_widget(
            Paragraph::new(err.as_str()).style(Style::default().fg(palette.error)),
            area,
        );
        return;
    }
    let hint = match app.mode {
        Mode::Normal => "a: add  t: tag  /: search  f/F: filter  M: all done  C: clear  T: theme  ?: help  q: quit",
        Mode::Input => "Enter: add  Tab: tags  C-u: clear  Esc: back",
        Mode::Tag => "Enter: stage tag  Bksp: unstage last  Tab: text  Esc: back",
        Mode::Search => "Enter: keep  Esc: clear  C-u: clear",
        Mode::Edit => "Enter: save  Esc: cancel  C-u: clear",
        Mode::Help => "?/Esc/q: close help",
        Mode::ConfirmClear => "y/Enter: clear all  any other key: cancel",
    };
    frame.render_widget(
        Paragraph::new(hint).style(Style::default().fg(palette.muted)),
        area,
    );
}

fn render_edit_dialog(frame: &mut Frame, app: &App, palette: &Palette) {
    let Some(session) = app.store.edit_session() else {
        return;
    };
    let term = frame.area();
    let width = 60.min(term.width.saturating_sub(4));
    let height = 5.min(term.height.saturating_sub(2));
    let area = ui::centered_rect(width, height, term);
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Edit Todo ")
        .style(palette.base())
        .border_style(Style::default().fg(palette.accent));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let text = vec![
        Line::from(vec![
            Span::styled(session.draft.as_str(), Style::default().fg(palette.fg)),
            Span::styled("_", Style::default().fg(palette.accent)),
        ]),
        Line::raw(""),
        Line::styled(
            "Enter: save  Esc: cancel",
            Style::default().fg(palette.muted),
        ),
    ];
    frame.render_widget(Paragraph::new(text).wrap(Wrap { trim: false }), inner);
}

fn render_confirm_clear(frame: &mut Frame, app: &App, palette: &Palette) {
    let term = frame.area();
    let width = 44.min(term.width.saturating_sub(4));
    let height = 5.min(term.height.saturating_sub(2));
    let area = ui::centered_rect(width, height, term);
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Clear All ")
        .style(palette.base())
        .border_style(Style::default().fg(palette.error));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let text = vec![
        Line::raw(format!("Delete all {} tasks?", app.store.tasks().len())),
        Line::raw(""),
        Line::from(vec![
            Span::raw("Proceed? "),
            Span::styled("y", Style::default().fg(palette.done).bold()),
            Span::raw("/"),
            Span::styled("n", Style::default().fg(palette.error).bold()),
        ]),
    ];
    frame.render_widget(Paragraph::new(text), inner);
}

fn render_help(frame: &mut Frame, palette: &Palette) {
    let term = frame.area();
    let width = 50.min(term.width.saturating_sub(4));
    let height = 22.min(term.height.saturating_sub(2));
    let area = ui::centered_rect(width, height, term);
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(palette.base())
        .border_style(Style::default().fg(palette.accent));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let keys: &[(&str, &str)] = &[
        ("j/Down  ", "Move down"),
        ("k/Up    ", "Move up"),
        ("Space/x ", "Toggle completed"),
        ("e/Enter ", "Edit task"),
        ("d/Del   ", "Delete task"),
        ("a/i     ", "Type a new task"),
        ("t       ", "Stage a tag for the new task"),
        ("/       ", "Search"),
        ("f/F     ", "Next/prev tag filter"),
        ("0       ", "Show all tags"),
        ("M       ", "Mark all completed"),
        ("C       ", "Clear all tasks"),
        ("T       ", "Toggle light/dark theme"),
        ("?       ", "Toggle help"),
        ("q/Esc   ", "Quit"),
    ];
    let mut lines: Vec<Line> = keys
        .iter()
        .map(|(k, desc)| {
            Line::from(vec![
                Span::styled(*k, Style::default().fg(palette.accent)),
                Span::raw(*desc),
            ])
        })
        .collect();
    lines.push(Line::raw(""));
    lines.push(Line::styled("Text fields:", Style::default().bold()));
    lines.push(Line::from(vec![
        Span::styled("  C-u     ", Style::default().fg(palette.accent)),
        Span::raw("Clear field"),
    ]));
    lines.push(Line::from(vec![
        Span::styled("  Tab     ", Style::default().fg(palette.accent)),
        Span::raw("Switch between task text and tag"),
    ]));

    frame.render_widget(Paragraph::new(lines), inner);
}

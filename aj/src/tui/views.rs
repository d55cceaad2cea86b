//! TUI views and rendering
//!
//! All rendering logic is contained here. The views module draws the UI from
//! the App's state and form, but never modifies either.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use tracing::trace;

use super::app::App;
use super::state::{ConfirmDialog, Focus, InteractionMode};
use super::theme::Palette;
use crate::entry::SLOTS;

/// Render the whole screen
pub fn render(app: &App, frame: &mut Frame) {
    let state = app.state();
    trace!(?state.focus, "render: called");
    let palette = state.theme.palette();

    frame.render_widget(
        Block::default().style(Style::default().bg(palette.bg).fg(palette.fg)),
        frame.area(),
    );

    let mut constraints = vec![
        Constraint::Length(1), // Header
        Constraint::Length(3), // Title
    ];
    constraints.extend(std::iter::repeat_n(Constraint::Min(4), SLOTS));
    constraints.push(Constraint::Length(3)); // Footer

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(frame.area());

    render_header(app, &palette, frame, chunks[0]);
    render_title(app, &palette, frame, chunks[1]);
    for slot in 0..SLOTS {
        render_slot(app, slot, &palette, frame, chunks[2 + slot]);
    }
    render_footer(app, &palette, frame, chunks[2 + SLOTS]);

    // Render overlays
    match &state.interaction_mode {
        InteractionMode::Help => render_help_overlay(&palette, frame, frame.area()),
        InteractionMode::Confirm(dialog) => render_confirm_dialog(dialog, &palette, frame, frame.area()),
        InteractionMode::Preview => render_preview(app, &palette, frame, frame.area()),
        InteractionMode::Normal => {}
    }
}

/// App name, save state and theme glyph
fn render_header(app: &App, palette: &Palette, frame: &mut Frame, area: Rect) {
    let (marker, marker_color) = if app.form().has_unsaved_changes() {
        ("● unsaved", palette.locked)
    } else {
        ("○ saved", palette.ok)
    };

    let left = Line::from(vec![
        Span::styled(
            " Aided Journal",
            Style::default().fg(palette.header).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  {}", app.today().format("%A, %B %-d, %Y")), Style::default().fg(palette.dim)),
    ]);
    let right = Line::from(vec![
        Span::styled(marker, Style::default().fg(marker_color)),
        Span::raw("  "),
        Span::styled(app.state().theme.icon(), Style::default().fg(palette.focus)),
        Span::raw(" "),
    ]);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(right.width() as u16)])
        .split(area);
    frame.render_widget(Paragraph::new(left), chunks[0]);
    frame.render_widget(Paragraph::new(right), chunks[1]);
}

fn field_block<'a>(title: Line<'a>, focused: bool, palette: &Palette) -> Block<'a> {
    let border = if focused { palette.focus } else { palette.border };
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(title)
}

fn render_title(app: &App, palette: &Palette, frame: &mut Frame, area: Rect) {
    let state = app.state();
    let focused = state.focus == Focus::Title;
    let title = app.form().entry().title();

    let text = if title.is_empty() && !focused {
        Line::from(Span::styled("Untitled entry", Style::default().fg(palette.dim)))
    } else {
        Line::from(title)
    };

    let block = field_block(Line::from(" Title "), focused, palette);
    let inner = block.inner(area);
    frame.render_widget(Paragraph::new(text).block(block), area);

    if focused && state.interaction_mode.is_editing() {
        place_cursor(frame, inner, title, state.cursor_pos);
    }
}

fn render_slot(app: &App, slot: usize, palette: &Palette, frame: &mut Frame, area: Rect) {
    trace!(slot, "render_slot: called");
    let state = app.state();
    let entry = app.form().entry();
    let focused = state.focus == Focus::Answer(slot);

    let mut heading = vec![Span::styled(
        format!(" {}. {} ", slot + 1, entry.prompt(slot)),
        Style::default().add_modifier(Modifier::BOLD),
    )];
    if entry.is_locked(slot) {
        heading.push(Span::styled("[locked] ", Style::default().fg(palette.locked)));
    }

    let answer = entry.answer(slot);
    let body = if answer.is_empty() && !focused {
        Text::from(Span::styled("Write your response here...", Style::default().fg(palette.dim)))
    } else {
        Text::from(answer)
    };

    let block = field_block(Line::from(heading), focused, palette);
    let inner = block.inner(area);
    frame.render_widget(Paragraph::new(body).block(block), area);

    if focused && state.interaction_mode.is_editing() {
        place_cursor(frame, inner, answer, state.cursor_pos);
    }
}

/// Put the terminal cursor at a byte offset inside unwrapped text
fn place_cursor(frame: &mut Frame, inner: Rect, text: &str, cursor_pos: usize) {
    let before = &text[..cursor_pos.min(text.len())];
    let row = before.matches('\n').count() as u16;
    let col = before.rsplit('\n').next().map(|l| l.chars().count()).unwrap_or(0) as u16;
    if row < inner.height {
        let x = inner.x + col.min(inner.width.saturating_sub(1));
        frame.set_cursor_position(Position::new(x, inner.y + row));
    }
}

fn render_footer(app: &App, palette: &Palette, frame: &mut Frame, area: Rect) {
    let state = app.state();
    trace!(?state.interaction_mode, "render_footer: called");
    let key_style = Style::default().fg(palette.keybind).add_modifier(Modifier::BOLD);

    let content = if let Some(ref error) = state.error_message {
        Line::from(Span::styled(format!(" {}", error), Style::default().fg(palette.error)))
    } else if let Some(ref status) = state.status_message {
        Line::from(Span::styled(format!(" {}", status), Style::default().fg(palette.ok)))
    } else {
        let export_style = if app.form().can_export() {
            key_style
        } else {
            Style::default().fg(palette.dim)
        };
        let keybinds = [
            ("[Tab]", "Next", key_style),
            ("[^R]", "New prompt", key_style),
            ("[^L]", "Lock", key_style),
            ("[^S]", "Save", export_style),
            ("[^P]", "Preview", key_style),
            ("[^N]", "New", key_style),
            ("[^T]", "Theme", key_style),
            ("[F1]", "Help", key_style),
            ("[^Q]", "Quit", key_style),
        ];
        let mut spans = vec![Span::raw(" ")];
        for (key, action, style) in keybinds {
            spans.push(Span::styled(key, style));
            spans.push(Span::raw(format!(" {} ", action)));
        }
        Line::from(spans)
    };

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.border)),
    );
    frame.render_widget(footer, area);
}

/// Render the export as it would be written, through tui-markdown
fn render_preview(app: &App, palette: &Palette, frame: &mut Frame, area: Rect) {
    trace!("render_preview: called");
    let popup_area = centered_rect(80, 80, area);
    frame.render_widget(Clear, popup_area);

    let doc = app.form().preview(app.today());
    let body = tui_markdown::from_str(&doc.body);
    let preview = Paragraph::new(body)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} (Esc to close) ", doc.filename))
                .style(Style::default().bg(palette.popup_bg).fg(palette.fg)),
        )
        .wrap(Wrap { trim: false })
        .scroll((app.state().preview_scroll, 0));

    frame.render_widget(preview, popup_area);
}

/// Render help overlay
fn render_help_overlay(palette: &Palette, frame: &mut Frame, area: Rect) {
    trace!("render_help_overlay: called");
    let popup_area = centered_rect(60, 70, area);
    frame.render_widget(Clear, popup_area);

    let section = |name: &'static str| Line::from(Span::styled(name, Style::default().add_modifier(Modifier::BOLD)));

    let help_text = vec![
        Line::from(Span::styled(
            "Keyboard Shortcuts",
            Style::default()
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
                .fg(palette.header),
        )),
        Line::from(""),
        section("Writing"),
        key_line("Tab", "Next field", palette),
        key_line("Shift+Tab", "Previous field", palette),
        key_line("Enter", "Title: next field / Answer: new line", palette),
        key_line("←/→ Home/End", "Move the cursor", palette),
        Line::from(""),
        section("Prompts"),
        key_line("Ctrl+R", "Draw a different prompt for this slot", palette),
        key_line("Ctrl+L", "Lock or unlock this slot's prompt", palette),
        Line::from(""),
        section("Entry"),
        key_line("Ctrl+S", "Save entry as markdown", palette),
        key_line("Ctrl+P", "Preview the markdown", palette),
        key_line("Ctrl+N", "Start a new entry", palette),
        key_line("Ctrl+T", "Toggle light/dark", palette),
        key_line("Ctrl+Q/Esc", "Quit (asks if unsaved)", palette),
        Line::from(""),
        Line::from(Span::styled(
            "Drafts are saved as you type.",
            Style::default().fg(palette.dim),
        )),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Help (Esc to close) ")
                .style(Style::default().bg(palette.popup_bg).fg(palette.fg)),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(help, popup_area);
}

/// Helper to create a key binding line
fn key_line<'a>(key: &'a str, desc: &'a str, palette: &Palette) -> Line<'a> {
    Line::from(vec![
        Span::raw("  "),
        Span::styled(format!("{:<14}", key), Style::default().fg(palette.keybind)),
        Span::raw(desc),
    ])
}

/// Render confirmation dialog
fn render_confirm_dialog(dialog: &ConfirmDialog, palette: &Palette, frame: &mut Frame, area: Rect) {
    trace!("render_confirm_dialog: called");
    let popup_area = centered_rect(50, 25, area);
    frame.render_widget(Clear, popup_area);

    let selected = Style::default()
        .fg(palette.popup_bg)
        .bg(palette.focus)
        .add_modifier(Modifier::BOLD);
    let idle = Style::default().fg(palette.focus);
    let (cancel_style, confirm_style) = if dialog.selected_button {
        (idle, selected)
    } else {
        (selected, idle)
    };

    let content = vec![
        Line::from(""),
        Line::from(dialog.message.as_str()),
        Line::from(""),
        Line::from(vec![
            Span::styled(format!(" {} ", dialog.cancel_label), cancel_style),
            Span::raw("    "),
            Span::styled(format!(" {} ", dialog.confirm_label), confirm_style),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Tab/←→: switch  Enter: confirm  Esc: cancel",
            Style::default().fg(palette.dim),
        )),
    ];

    let dialog_widget = Paragraph::new(content)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Confirm ")
                .style(Style::default().bg(palette.popup_bg).fg(palette.fg)),
        )
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center);

    frame.render_widget(dialog_widget, popup_area);
}

/// Helper to create a centered rect
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::DraftStore;
    use crate::export::{FixedClock, MemorySink};
    use crate::form::JournalForm;
    use crate::prompts::{Catalog, SequenceSource};
    use crate::tui::theme::Theme;
    use chrono::NaiveDate;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use draftstore::MemoryStore;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn make_app() -> App {
        let drafts = DraftStore::new(Box::new(MemoryStore::new()));
        let form = JournalForm::load(Catalog::embedded(), drafts, Box::new(SequenceSource::new(vec![0]))).unwrap();
        let clock = FixedClock(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
        App::new(form, Box::new(MemorySink::default()), Box::new(clock), Theme::Dark)
    }

    fn screen(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|frame| render(app, frame)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_render_shows_prompts_and_header() {
        let app = make_app();
        let text = screen(&app);
        assert!(text.contains("Aided Journal"));
        assert!(text.contains("saved"));
        let first: String = app.form().entry().prompt(0).chars().take(12).collect();
        assert!(text.contains(&first));
    }

    #[test]
    fn test_render_overlays() {
        let mut app = make_app();
        app.handle_key(KeyEvent::from(KeyCode::F(1)));
        assert!(screen(&app).contains("Keyboard Shortcuts"));

        app.handle_key(KeyEvent::from(KeyCode::Esc));
        app.handle_key(KeyEvent::new(KeyCode::Char('p'), KeyModifiers::CONTROL));
        assert!(screen(&app).contains("05-mar-2024.md"));
    }

    #[test]
    fn test_centered_rect_is_inside_area() {
        let area = Rect::new(0, 0, 100, 50);
        let popup = centered_rect(50, 20, area);
        assert!(popup.x >= 25 && popup.right() <= 75);
        assert_eq!(popup.height, 10);
    }
}

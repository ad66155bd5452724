//! TUI rendering for Parley using ratatui.
//!
//! Rendering is a pure function of engine state: [`draw`] reads the
//! [`App`] and paints the route's screen; it never mutates anything.
//! Key events are translated into engine calls by [`handle_events`].

mod forms;
mod input;
mod theme;

pub use input::handle_events;
pub use theme::{Palette, palette, spinner_frame, styles};

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph, Wrap};

use parley_engine::{App, Route};
use parley_types::{Message, Sender};

/// Main draw function.
pub fn draw(frame: &mut Frame, app: &App) {
    let palette = palette();
    let bg = Block::default().style(Style::default().bg(palette.bg_dark).fg(palette.text));
    frame.render_widget(bg, frame.area());

    match app.route() {
        Route::SignIn => forms::draw_sign_in(frame, app, &palette),
        Route::Register => forms::draw_register(frame, app, &palette),
        Route::Chat => draw_chat(frame, app, &palette),
    }
}

fn draw_chat(frame: &mut Frame, app: &App, palette: &Palette) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(32), Constraint::Min(20)])
        .split(frame.area());

    draw_sidebar(frame, app, columns[0], palette);

    let main = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header hints
            Constraint::Min(1),    // Transcript
            Constraint::Length(3), // Compose bar
        ])
        .split(columns[1]);

    draw_header(frame, main[0], palette);
    draw_transcript(frame, app, main[1], palette);
    draw_compose(frame, app, main[2], palette);
}

fn draw_header(frame: &mut Frame, area: Rect, palette: &Palette) {
    let hints = Line::from(vec![
        Span::styled("Ctrl+N", styles::title(palette)),
        Span::styled(" new chat  ", styles::muted(palette)),
        Span::styled("Tab", styles::title(palette)),
        Span::styled(" open selected  ", styles::muted(palette)),
        Span::styled("Ctrl+O", styles::title(palette)),
        Span::styled(" sign out  ", styles::muted(palette)),
        Span::styled("Ctrl+C", styles::title(palette)),
        Span::styled(" quit", styles::muted(palette)),
    ])
    .alignment(Alignment::Right);
    let header = Paragraph::new(hints).style(Style::default().bg(palette.bg_panel));
    frame.render_widget(header, area);
}

fn draw_sidebar(frame: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let block = Block::default()
        .title(Span::styled(" History ", styles::title(palette)))
        .borders(Borders::RIGHT)
        .border_style(styles::blurred_border(palette))
        .style(Style::default().bg(palette.bg_panel))
        .padding(Padding::new(1, 1, 0, 0));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if app.history().is_loading() {
        let spinner = Line::from(Span::styled(
            format!("{} loading…", spinner_frame(app.tick_count() / 4)),
            styles::muted(palette),
        ));
        frame.render_widget(Paragraph::new(spinner), inner);
        return;
    }

    let active_id = app.active_chat().chat().map(|chat| chat.id);
    let mut lines: Vec<Line> = Vec::new();
    for (idx, chat) in app.history().chats().iter().enumerate() {
        let selected = idx == app.sidebar_cursor();
        let active = active_id == Some(chat.id);
        let marker = if active { "▸ " } else { "  " };
        let mut style = Style::default().fg(palette.text);
        if selected {
            style = style.bg(palette.bg_item).add_modifier(Modifier::BOLD);
        }
        let title = truncate_to_width(&chat.title, inner.width.saturating_sub(2) as usize);
        lines.push(Line::from(Span::styled(format!("{marker}{title}"), style)));
    }
    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "No conversations yet",
            styles::muted(palette),
        )));
    }

    // Keep the selection in view.
    let visible = inner.height as usize;
    let scroll = app
        .sidebar_cursor()
        .saturating_sub(visible.saturating_sub(1));
    let list = Paragraph::new(lines).scroll((scroll as u16, 0));
    frame.render_widget(list, inner);
}

fn draw_transcript(frame: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let block = Block::default().padding(Padding::new(2, 2, 1, 0));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line> = Vec::new();
    for message in app.active_chat().transcript().messages() {
        push_message_lines(&mut lines, message, palette);
    }

    if app.active_chat().is_loading() {
        lines.push(Line::from(Span::styled(
            format!("{} loading conversation…", spinner_frame(app.tick_count() / 4)),
            styles::muted(palette),
        )));
    } else if app.is_sending() {
        lines.push(Line::from(""));
        lines.push(
            Line::from(Span::styled(
                format!("{} thinking…", spinner_frame(app.tick_count() / 4)),
                styles::muted(palette),
            ))
            .alignment(Alignment::Right),
        );
    } else if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "Type a message to start a new conversation",
            styles::muted(palette),
        )));
    }

    // Pin the view to the newest message.
    let height = wrapped_height(&lines, inner.width as usize);
    let scroll = height.saturating_sub(inner.height as usize);
    let transcript = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((scroll as u16, 0));
    frame.render_widget(transcript, inner);
}

fn push_message_lines(lines: &mut Vec<Line<'static>>, message: &Message, palette: &Palette) {
    if !lines.is_empty() {
        lines.push(Line::from(""));
    }
    let (label, bubble, alignment) = match message.sender {
        Sender::User => ("You", palette.user_bubble, Alignment::Left),
        Sender::Agent => ("Agent", palette.agent_bubble, Alignment::Right),
    };
    lines.push(
        Line::from(Span::styled(
            label,
            Style::default()
                .fg(palette.text_muted)
                .add_modifier(Modifier::BOLD),
        ))
        .alignment(alignment),
    );
    for text_line in message.text.lines() {
        lines.push(
            Line::from(Span::styled(
                format!(" {text_line} "),
                Style::default().fg(palette.text).bg(bubble),
            ))
            .alignment(alignment),
        );
    }
}

fn draw_compose(frame: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let sending = app.is_sending();
    let (title, border) = if sending {
        (
            format!(" {} sending… ", spinner_frame(app.tick_count() / 4)),
            styles::blurred_border(palette),
        )
    } else {
        (" Message ".to_owned(), styles::focused_border(palette))
    };

    let block = Block::default()
        .title(Span::styled(title, styles::muted(palette)))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let text = app.compose().as_str();
    let style = if sending {
        styles::muted(palette)
    } else {
        Style::default().fg(palette.text)
    };
    // Keep the cursor end of long input visible.
    let width = inner.width.saturating_sub(1) as usize;
    let shown = tail_to_width(text, width);
    let mut spans = vec![Span::styled(shown.to_owned(), style)];
    if !sending {
        spans.push(Span::styled("█", styles::focused_border(palette)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), inner);
}

/// Number of terminal rows `lines` occupy at `width` once wrapped.
fn wrapped_height(lines: &[Line], width: usize) -> usize {
    if width == 0 {
        return lines.len();
    }
    lines
        .iter()
        .map(|line| line.width().div_ceil(width).max(1))
        .sum()
}

fn truncate_to_width(text: &str, width: usize) -> String {
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > width {
            out.push('…');
            break;
        }
        used += w;
        out.push(c);
    }
    out
}

/// The longest suffix of `text` that fits in `width` columns.
fn tail_to_width(text: &str, width: usize) -> &str {
    let mut start = text.len();
    let mut used = 0;
    for (idx, c) in text.char_indices().rev() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        start = idx;
    }
    &text[start..]
}

//! Sign-in and register dialogs.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};

use parley_engine::{App, DraftInput, RegisterField, SignInField};
use parley_types::ValidationError;

use crate::theme::{Palette, spinner_frame, styles};

const FIELD_HEIGHT: u16 = 3;

/// Centered dialog area of the given size.
fn dialog_area(frame_area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(frame_area.width);
    let height = height.min(frame_area.height);
    Rect {
        x: frame_area.x + (frame_area.width - width) / 2,
        y: frame_area.y + (frame_area.height - height) / 2,
        width,
        height,
    }
}

fn draw_field(
    frame: &mut Frame,
    area: Rect,
    palette: &Palette,
    label: &str,
    input: &DraftInput,
    masked: bool,
    focused: bool,
    error: Option<ValidationError>,
) {
    let border = if focused {
        styles::focused_border(palette)
    } else {
        styles::blurred_border(palette)
    };
    let block = Block::default()
        .title(Span::styled(format!(" {label} "), styles::muted(palette)))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let shown = if masked {
        "•".repeat(input.as_str().chars().count())
    } else {
        input.as_str().to_owned()
    };
    let mut spans = vec![Span::styled(shown, Style::default().fg(palette.text))];
    if focused {
        spans.push(Span::styled("█", styles::focused_border(palette)));
    }
    if let Some(error) = error {
        spans.push(Span::styled(
            format!("  {error}"),
            styles::error(palette),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), inner);
}

fn status_line(app: &App, palette: &Palette, busy: bool, error: Option<&str>) -> Line<'static> {
    if busy {
        Line::from(Span::styled(
            format!("{} working…", spinner_frame(app.tick_count() / 4)),
            styles::muted(palette),
        ))
        .alignment(Alignment::Center)
    } else if let Some(error) = error {
        Line::from(Span::styled(error.to_owned(), styles::error(palette)))
            .alignment(Alignment::Center)
    } else {
        Line::from("")
    }
}

pub(crate) fn draw_sign_in(frame: &mut Frame, app: &App, palette: &Palette) {
    let form = app.sign_in_form();
    let area = dialog_area(frame.area(), 52, 14);
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(Span::styled(" Sign In ", styles::title(palette)))
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(styles::blurred_border(palette))
        .style(Style::default().bg(palette.bg_panel));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Greeting / notice
            Constraint::Length(FIELD_HEIGHT),
            Constraint::Length(FIELD_HEIGHT),
            Constraint::Length(1), // Busy spinner / submit error
            Constraint::Length(1), // Register hint
            Constraint::Length(1), // Key hints
        ])
        .split(inner);

    let greeting = form
        .notice
        .clone()
        .unwrap_or_else(|| "Welcome back! Please sign in".to_owned());
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(greeting, styles::muted(palette))))
            .alignment(Alignment::Center),
        rows[0],
    );

    draw_field(
        frame,
        rows[1],
        palette,
        "Email",
        &form.email,
        false,
        form.focus == SignInField::Email,
        form.email_error,
    );
    draw_field(
        frame,
        rows[2],
        palette,
        "Password",
        &form.password,
        true,
        form.focus == SignInField::Password,
        form.password_error,
    );

    frame.render_widget(
        Paragraph::new(status_line(
            app,
            palette,
            form.busy,
            form.submit_error.as_deref(),
        )),
        rows[3],
    );

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            "Don't have an account? Press Ctrl+R to register",
            styles::muted(palette),
        )))
        .alignment(Alignment::Center),
        rows[4],
    );
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            "Tab next field · Enter sign in · Ctrl+C quit",
            styles::muted(palette),
        )))
        .alignment(Alignment::Center),
        rows[5],
    );
}

pub(crate) fn draw_register(frame: &mut Frame, app: &App, palette: &Palette) {
    let form = app.register_form();
    let area = dialog_area(frame.area(), 56, 19);
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(Span::styled(" Register as New User ", styles::title(palette)))
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(styles::blurred_border(palette))
        .style(Style::default().bg(palette.bg_panel));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(FIELD_HEIGHT),
            Constraint::Length(FIELD_HEIGHT),
            Constraint::Length(FIELD_HEIGHT),
            Constraint::Length(FIELD_HEIGHT),
            Constraint::Length(1), // Busy spinner / submit error
            Constraint::Length(1), // Key hints
        ])
        .split(inner);

    draw_field(
        frame,
        rows[0],
        palette,
        "Email",
        &form.email,
        false,
        form.focus == RegisterField::Email,
        form.email_error,
    );
    draw_field(
        frame,
        rows[1],
        palette,
        "Display Name",
        &form.display_name,
        false,
        form.focus == RegisterField::DisplayName,
        form.display_name_error,
    );
    draw_field(
        frame,
        rows[2],
        palette,
        "Password",
        &form.password,
        true,
        form.focus == RegisterField::Password,
        form.password_error,
    );
    draw_field(
        frame,
        rows[3],
        palette,
        "Confirm Password",
        &form.password_confirm,
        true,
        form.focus == RegisterField::PasswordConfirm,
        form.confirm_error,
    );

    frame.render_widget(
        Paragraph::new(status_line(
            app,
            palette,
            form.busy,
            form.submit_error.as_deref(),
        )),
        rows[4],
    );
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            "Tab next field · Enter register · Esc back to sign in",
            styles::muted(palette),
        )))
        .alignment(Alignment::Center),
        rows[5],
    );
}

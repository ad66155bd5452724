//! Color palette and shared styling.

use ratatui::style::{Color, Modifier, Style};

/// Dark palette matching the web client this replaces: near-black radial
/// background, graphite panels, blue agent bubbles.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub bg_dark: Color,
    pub bg_panel: Color,
    pub bg_item: Color,
    pub user_bubble: Color,
    pub agent_bubble: Color,
    pub text: Color,
    pub text_muted: Color,
    pub accent: Color,
    pub error: Color,
}

#[must_use]
pub fn palette() -> Palette {
    Palette {
        bg_dark: Color::Rgb(0x14, 0x14, 0x14),
        bg_panel: Color::Rgb(0x28, 0x28, 0x28),
        bg_item: Color::Rgb(0x3a, 0x3a, 0x3a),
        user_bubble: Color::Rgb(0x49, 0x49, 0x49),
        agent_bubble: Color::Rgb(0x00, 0x3b, 0x90),
        text: Color::White,
        text_muted: Color::Rgb(0x9a, 0x9a, 0x9a),
        accent: Color::Rgb(0x4a, 0x9e, 0xff),
        error: Color::Rgb(0xe0, 0x5c, 0x5c),
    }
}

pub mod styles {
    use super::{Modifier, Palette, Style};

    #[must_use]
    pub fn title(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.text)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn muted(palette: &Palette) -> Style {
        Style::default().fg(palette.text_muted)
    }

    #[must_use]
    pub fn error(palette: &Palette) -> Style {
        Style::default().fg(palette.error)
    }

    #[must_use]
    pub fn focused_border(palette: &Palette) -> Style {
        Style::default().fg(palette.accent)
    }

    #[must_use]
    pub fn blurred_border(palette: &Palette) -> Style {
        Style::default().fg(palette.bg_item)
    }
}

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Braille spinner frame for the given frame counter.
#[must_use]
pub fn spinner_frame(tick: usize) -> &'static str {
    SPINNER_FRAMES[tick % SPINNER_FRAMES.len()]
}

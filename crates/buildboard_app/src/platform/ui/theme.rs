use ratatui::style::{Color, Modifier, Style};

pub const HEADER_STYLE: Style = Style::new()
    .fg(Color::Rgb(142, 192, 124))
    .add_modifier(Modifier::BOLD);
pub const AUTHOR_STYLE: Style = Style::new().add_modifier(Modifier::BOLD);
pub const LINK_STYLE: Style = Style::new()
    .fg(Color::Rgb(131, 165, 152))
    .add_modifier(Modifier::UNDERLINED);
pub const ERROR_STYLE: Style = Style::new().fg(Color::Rgb(251, 73, 52));

pub fn zebra_row_style(index: usize) -> Style {
    let bg = if index % 2 == 0 {
        Color::Rgb(18, 20, 26)
    } else {
        Color::Rgb(24, 27, 34)
    };
    Style::new().bg(bg)
}

pub mod icons {
    pub const SUCCESS: &str = "✔";
    pub const FAILURE: &str = "✘";
    pub const RUNNING: &str = "◐";
    pub const CONNECTED: &str = "●";
    pub const DISCONNECTED: &str = "○";
}

pub const SUCCESS_COLOR: Color = Color::Rgb(184, 187, 38);
pub const FAILURE_COLOR: Color = Color::Rgb(251, 73, 52);
pub const RUNNING_COLOR: Color = Color::Rgb(250, 189, 47);
pub const MUTED_COLOR: Color = Color::Rgb(146, 131, 116);

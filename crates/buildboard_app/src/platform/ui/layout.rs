use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Column widths for STATUS, CHANGES, AUTHOR and the log link.
pub const TABLE_WIDTHS: [Constraint; 4] = [
    Constraint::Length(22),
    Constraint::Min(24),
    Constraint::Length(16),
    Constraint::Length(40),
];

pub struct ScreenAreas {
    pub table: Rect,
    pub status: Rect,
}

/// Build table on top, one-line status bar at the bottom.
pub fn split(area: Rect) -> ScreenAreas {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);
    ScreenAreas {
        table: chunks[0],
        status: chunks[1],
    }
}

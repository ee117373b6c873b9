use buildboard_core::{AppViewModel, BuildRow, ConnectionStatus, LogCell, StatusToken};
use buildboard_feed::DEFAULT_ENVIRONMENT;
use ratatui::{
    style::Style,
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};
use url::Url;

use super::layout::{self, TABLE_WIDTHS};
use super::theme::{self, icons};

pub fn render(f: &mut Frame, view: &AppViewModel, server: &Url) {
    let areas = layout::split(f.size());
    f.render_widget(build_table(view, server), areas.table);
    f.render_widget(Paragraph::new(status_line(view)), areas.status);
}

fn build_table(view: &AppViewModel, server: &Url) -> Table<'static> {
    let rows: Vec<Row> = view
        .table
        .rows
        .iter()
        .enumerate()
        .map(|(index, row)| build_row(row, server).style(theme::zebra_row_style(index)))
        .collect();

    Table::new(rows, TABLE_WIDTHS)
        .header(Row::new(view.table.header()).style(theme::HEADER_STYLE))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Builds [{DEFAULT_ENVIRONMENT}]")),
        )
}

fn build_row(row: &BuildRow, server: &Url) -> Row<'static> {
    // Comments are preformatted; every line gets its own terminal row.
    let comment = Text::raw(row.comment.clone());
    let height = comment.height().max(1) as u16;

    Row::new(vec![
        Cell::from(status_cell(&row.status)),
        Cell::from(comment),
        Cell::from(Span::styled(row.author.clone(), theme::AUTHOR_STYLE)),
        Cell::from(log_cell(&row.log, server)),
    ])
    .height(height)
}

fn status_cell(status: &StatusToken) -> Line<'static> {
    match status {
        StatusToken::InProgress { text } => Line::from(vec![
            Span::styled(icons::RUNNING, Style::new().fg(theme::RUNNING_COLOR)),
            Span::raw(" "),
            Span::raw(text.clone()),
        ]),
        StatusToken::Success => Line::from(Span::styled(
            icons::SUCCESS,
            Style::new().fg(theme::SUCCESS_COLOR),
        )),
        StatusToken::Failure => Line::from(Span::styled(
            icons::FAILURE,
            Style::new().fg(theme::FAILURE_COLOR),
        )),
    }
}

fn log_cell(log: &LogCell, server: &Url) -> Span<'static> {
    match log {
        LogCell::Link { path } => {
            let target = log
                .resolve(server)
                .map(|url| url.to_string())
                .unwrap_or_else(|| path.clone());
            Span::styled(target, theme::LINK_STYLE)
        }
        LogCell::Blank => Span::raw(" "),
    }
}

fn connection_label(connection: &ConnectionStatus) -> (String, Style) {
    match connection {
        ConnectionStatus::Idle => (
            format!("{} idle", icons::DISCONNECTED),
            Style::new().fg(theme::MUTED_COLOR),
        ),
        ConnectionStatus::Connecting => (
            format!("{} connecting", icons::DISCONNECTED),
            Style::new().fg(theme::RUNNING_COLOR),
        ),
        ConnectionStatus::Open => (
            format!("{} connected", icons::CONNECTED),
            Style::new().fg(theme::SUCCESS_COLOR),
        ),
        ConnectionStatus::Closed { reason } => (
            format!("{} disconnected: {reason}", icons::DISCONNECTED),
            theme::ERROR_STYLE,
        ),
    }
}

fn status_line(view: &AppViewModel) -> Line<'static> {
    let (label, style) = connection_label(&view.connection);
    let mut spans = vec![
        Span::raw(format!(" {DEFAULT_ENVIRONMENT} | ")),
        Span::styled(label, style),
        Span::raw(format!(
            " | {} builds | {} frames",
            view.build_count, view.frames_received
        )),
    ];
    if let Some(updated) = &view.last_update {
        spans.push(Span::raw(format!(" | updated {updated}")));
    }
    if let Some(error) = &view.last_error {
        spans.push(Span::styled(format!(" | {error}"), theme::ERROR_STYLE));
    }
    spans.push(Span::styled(" | q quit", Style::new().fg(theme::MUTED_COLOR)));
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use buildboard_core::{update, AppState, Msg};
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

    const FAILURE_FRAME: &str = r#"{"build":[{"id":42,"state":"done","status":"FAILURE","statusText":"","changes":{"change":[{"username":"alice","comment":"fix bug"}]}}]}"#;

    fn server() -> Url {
        Url::parse("http://ci.local:7777").unwrap()
    }

    fn view_after(frames: &[&str]) -> AppViewModel {
        let (mut state, _) = update(AppState::new(), Msg::Mounted);
        for frame in frames {
            (state, _) = update(
                state,
                Msg::FrameReceived {
                    frame: frame.to_string(),
                    received_at: "09:30:00".to_string(),
                },
            );
        }
        state.view()
    }

    fn draw(view: &AppViewModel) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(120, 12)).unwrap();
        terminal.draw(|f| render(f, view, &server())).unwrap();
        lines(terminal.backend().buffer())
    }

    fn lines(buffer: &Buffer) -> Vec<String> {
        let area = buffer.area;
        (area.top()..area.bottom())
            .map(|y| {
                (area.left()..area.right())
                    .map(|x| buffer.get(x, y).symbol())
                    .collect::<String>()
            })
            .collect()
    }

    fn plain(line: &Line) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    #[test]
    fn failure_build_renders_linked_row() {
        let screen = draw(&view_after(&[FAILURE_FRAME]));

        let header = screen.iter().position(|line| line.contains("STATUS")).unwrap();
        let body = &screen[header + 1];
        assert!(screen[header].contains("CHANGES"));
        assert!(screen[header].contains("AUTHOR"));
        assert!(body.contains(icons::FAILURE));
        assert!(body.contains("fix bug"));
        assert!(body.contains("alice"));
        assert!(body.contains("http://ci.local:7777/build_log/42"));
    }

    #[test]
    fn empty_snapshot_renders_header_only() {
        let screen = draw(&view_after(&[r#"{"build":[]}"#]));
        let header = screen.iter().position(|line| line.contains("STATUS")).unwrap();
        // Next line is blank table body.
        assert!(screen[header + 1]
            .trim_matches(|c: char| c == '│' || c.is_whitespace())
            .is_empty());
    }

    #[test]
    fn running_build_shows_progress_text_without_link() {
        let frame = r#"{"build":[{"id":7,"state":"running","status":"SUCCESS","statusText":"Step 3/9","changes":{"change":[{"username":"bob","comment":"wip"}]}}]}"#;
        let screen = draw(&view_after(&[frame]));

        let row = screen.iter().find(|line| line.contains("wip")).unwrap();
        assert!(row.contains(icons::RUNNING));
        assert!(row.contains("Step 3/9"));
        assert!(!row.contains("build_log"));
    }

    #[test]
    fn multi_line_comment_spans_rows() {
        let frame = r#"{"build":[{"id":1,"state":"finished","status":"SUCCESS","statusText":"","changes":{"change":[{"username":"eve","comment":"first line\nsecond line"}]}}]}"#;
        let screen = draw(&view_after(&[frame]));

        let first = screen.iter().position(|line| line.contains("first line")).unwrap();
        assert!(screen[first + 1].contains("second line"));
    }

    #[test]
    fn status_line_reports_closed_feed_and_errors() {
        let (state, _) = update(AppState::new(), Msg::Mounted);
        let (state, _) = update(
            state,
            Msg::FrameReceived {
                frame: "nope".to_string(),
                received_at: "10:00:00".to_string(),
            },
        );
        let (state, _) = update(
            state,
            Msg::FeedClosed {
                reason: "server closed".to_string(),
            },
        );
        let line = plain(&status_line(&state.view()));

        assert!(line.contains("Prod"));
        assert!(line.contains("disconnected: server closed"));
        assert!(line.contains("malformed frame"));
        assert!(line.contains("0 builds"));
    }

    #[test]
    fn status_line_shows_last_update() {
        let line = plain(&status_line(&view_after(&[FAILURE_FRAME])));
        assert!(line.contains("1 builds"));
        assert!(line.contains("updated 09:30:00"));
        assert!(line.contains("connecting"));
    }
}

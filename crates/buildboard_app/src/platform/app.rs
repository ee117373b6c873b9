use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use board_logging::{board_debug, board_info};
use buildboard_core::{update, AppState, Msg};
use buildboard_feed::FeedSettings;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use url::Url;

use super::config::{Cli, DashboardConfig};
use super::effects::FeedRunner;
use super::{logging, ui};

pub fn run_app() -> Result<()> {
    let cli = Cli::parse();
    let config = DashboardConfig::resolve(&cli).context("loading dashboard config")?;
    logging::initialize(config.log, &config.log_file);

    let server = config.server_url()?;
    board_info!("Starting dashboard for {}", server);

    let mut shell = AppShell::new(server);
    let mut terminal = setup_terminal().context("preparing terminal")?;
    let result = shell.run(&mut terminal, Duration::from_millis(config.tick_ms));
    restore_terminal(&mut terminal).context("restoring terminal")?;
    drop(shell);

    board_info!("Dashboard stopped");
    result
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Top-level component: owns the view state and the feed, mounted into a terminal.
struct AppShell {
    state: AppState,
    feed: FeedRunner,
    server: Url,
}

impl AppShell {
    fn new(server: Url) -> Self {
        Self {
            state: AppState::new(),
            feed: FeedRunner::new(FeedSettings::new(server.clone())),
            server,
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.feed.apply(effects);
    }

    fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>, tick: Duration) -> Result<()> {
        self.dispatch(Msg::Mounted);

        loop {
            if self.state.consume_dirty() {
                let view = self.state.view();
                terminal.draw(|f| ui::render::render(f, &view, &self.server))?;
            }

            if event::poll(tick)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press && is_quit(&key) => {
                        board_debug!("Quit requested");
                        break;
                    }
                    Event::Resize(_, _) => self.dispatch(Msg::Resized),
                    _ => {}
                }
            }

            let mut inbox = Vec::new();
            self.feed.poll(&mut inbox);
            for msg in inbox {
                self.dispatch(msg);
            }
            self.dispatch(Msg::Tick);
        }

        self.dispatch(Msg::Unmounted);
        Ok(())
    }
}

fn is_quit(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quit_keys() {
        let plain = |code| KeyEvent::new(code, KeyModifiers::NONE);
        assert!(is_quit(&plain(KeyCode::Char('q'))));
        assert!(is_quit(&plain(KeyCode::Esc)));
        assert!(is_quit(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!is_quit(&plain(KeyCode::Char('c'))));
        assert!(!is_quit(&plain(KeyCode::Enter)));
    }
}

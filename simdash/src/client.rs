use crate::{config::Config, dashboard::dashboard::Dashboard, error::Error, utils::any::Any};
use crossterm::{
    cursor::{Hide, Show},
    event::{DisableMouseCapture, EnableMouseCapture, EventStream},
    terminal::{Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
    QueueableCommand,
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{
    io::{StdoutLock, Write},
    process::ExitCode,
};

pub struct Client {
    terminal: Terminal<CrosstermBackend<StdoutLock<'static>>>,
}

impl Client {
    fn new() -> Result<Self, Error> {
        let stdout = std::io::stdout().lock();
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        let mut client = Self { terminal };

        client.on_init()?;

        client.ok()
    }

    fn on_init(&mut self) -> Result<(), Error> {
        crossterm::terminal::enable_raw_mode()?;
        self.terminal
            .backend_mut()
            .queue(EnableMouseCapture)?
            .queue(EnterAlternateScreen)?
            .queue(Hide)?
            .queue(Clear(ClearType::All))?
            .flush()?;

        ().ok()
    }

    fn on_drop(&mut self) -> Result<(), Error> {
        crossterm::terminal::disable_raw_mode()?;
        self.terminal
            .backend_mut()
            .queue(DisableMouseCapture)?
            .queue(LeaveAlternateScreen)?
            .queue(Show)?
            .flush()?;

        ().ok()
    }

    fn draw(&mut self, dashboard: &Dashboard) -> Result<(), Error> {
        let mut render_res = ().ok();

        self.terminal.draw(|frame| render_res = dashboard.render(frame))?;

        render_res
    }

    // NOTE: events are handled one at a time on the current thread; each one updates the dashboard and redraws it
    pub async fn run(config: Config) -> Result<ExitCode, Error> {
        let mut client = Self::new()?;
        let terminal_area = client.terminal.size()?;
        let mut dashboard = Dashboard::new(config, terminal_area);
        let mut events = EventStream::new();

        client.draw(&dashboard)?;

        while let Some(event_res) = events.next().await {
            let event = event_res?;

            if dashboard.feed(&event) {
                break;
            }

            client.draw(&dashboard)?;
        }

        tracing::info!(position = ?dashboard.simulation().position(), "exiting");

        ExitCode::SUCCESS.ok()
    }
}

impl Drop for Client {
    fn drop(&mut self) {
        self.on_drop().error::<(), Error>().unit();
    }
}

use crate::{
    config::Config,
    dashboard::{
        color_scheme::ColorScheme,
        command::{Command, ControlToken},
        keymap::Keymap,
        layout::DashboardLayout,
        position::Size,
        simulation::{ControlOutcome, Simulation},
        surface::{canvas::CanvasSurface, Surface},
    },
    error::Error,
    utils::any::Any,
};
use crossterm::event::{Event, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style, Stylize},
    text::Line,
    widgets::{Block, Borders},
    Frame,
};

macro_rules! mouse_pattern {
    ($variant:ident($button:ident), $column:ident, $row:ident) => {
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::$variant(MouseButton::$button),
            column: $column,
            row: $row,
            ..
        })
    };
}

pub struct Dashboard {
    title: String,
    color_scheme: ColorScheme,
    keymap: Keymap,
    simulation: Simulation,
    layout: DashboardLayout,
    cell_size: Size,
    min_viewport: Size,
    last_control: Option<ControlToken>,
}

impl Dashboard {
    const MAP_TITLE: &'static str = "Rob (GPS Map)";
    const INFRA_TITLE: &'static str = "Infra";
    const VIDEO_TITLE: &'static str = "Video";
    const CONTROLS_TITLE: &'static str = "Controls";
    const NO_FEED: &'static str = "no feed";

    pub fn new(config: Config, terminal_area: Rect) -> Self {
        let layout = DashboardLayout::new(terminal_area);
        let viewport = layout.map_viewport(config.map.cell_size, config.map.min_viewport);
        let simulation = Simulation::new(&config, viewport);

        Self {
            title: config.title,
            color_scheme: config.color_scheme,
            keymap: Keymap::new(config.keymap),
            simulation,
            layout,
            cell_size: config.map.cell_size,
            min_viewport: config.map.min_viewport,
            last_control: None,
        }
    }

    pub fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    fn resize(&mut self, terminal_area: Rect) {
        self.layout = DashboardLayout::new(terminal_area);

        let viewport = self.layout.map_viewport(self.cell_size, self.min_viewport);

        tracing::debug!(?terminal_area, ?viewport, "resize");

        self.simulation.resize(viewport);
    }

    fn press(&mut self, token: ControlToken) -> ControlOutcome {
        self.last_control = token.some();
        self.simulation.apply(token)
    }

    /// Returns true when the event asks the dashboard to quit.
    pub fn feed(&mut self, event: &Event) -> bool {
        match self.keymap.get(event) {
            Ok(Command::Quit) => return true,
            Ok(Command::Control(token)) => self.press(token).unit(),
            Err(Event::Resize(width, height)) => self.resize((*width, *height).rect()),
            Err(mouse_pattern!(Down(Left), column, row)) => {
                if let Some(token) = self.layout.button_at(*column, *row) {
                    self.press(token).unit();
                }
            }
            Err(ignored_event) => tracing::trace!(?ignored_event),
        }

        false
    }

    fn panel<'a>(&self, title: &'a str) -> Block<'a> {
        Block::default()
            .borders(Borders::ALL)
            .border_style(self.color_scheme.border_style())
            .title(Line::styled(std::format!(" {title} "), Style::new().add_modifier(Modifier::BOLD)))
            .style(self.color_scheme.style(&self.color_scheme.panel))
    }

    fn render_title(&self, frame: &mut Frame) {
        let title = self
            .title
            .as_str()
            .paragraph()
            .alignment(Alignment::Center)
            .style(self.color_scheme.style(&self.color_scheme.title))
            .add_modifier(Modifier::BOLD);

        frame.render_widget(title, self.layout.title);
    }

    fn render_map(&self, frame: &mut Frame) -> Result<(), Error> {
        let area = self.layout.map;
        let inner = DashboardLayout::panel_inner(area);
        let description = self.simulation.describe();

        frame.render_widget(self.panel(Self::MAP_TITLE), area);

        CanvasSurface::new(
            frame.buffer_mut(),
            inner,
            self.simulation.viewport(),
            &self.color_scheme,
        )
        .paint(&description)
    }

    fn render_placeholder(&self, frame: &mut Frame, title: &str, area: Rect) {
        let placeholder = Self::NO_FEED
            .paragraph()
            .alignment(Alignment::Center)
            .block(self.panel(title))
            .add_modifier(Modifier::DIM);

        frame.render_widget(placeholder, area);
    }

    fn render_controls(&self, frame: &mut Frame) {
        frame.render_widget(self.panel(Self::CONTROLS_TITLE), self.layout.controls);

        for &(token, area) in &self.layout.buttons {
            let style = self.color_scheme.button_style(self.last_control == Some(token));
            let button = token
                .label()
                .paragraph()
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).border_style(style))
                .style(style)
                .bold();

            frame.render_widget(button, area);
        }

        let status = self
            .simulation
            .status()
            .paragraph()
            .style(self.color_scheme.style(&self.color_scheme.panel));

        frame.render_widget(status, self.layout.status);
    }

    pub fn render(&self, frame: &mut Frame) -> Result<(), Error> {
        let background = Block::default().style(self.color_scheme.style(&self.color_scheme.window));

        frame.render_widget(background, frame.size());

        self.render_title(frame);
        self.render_map(frame)?;
        self.render_placeholder(frame, Self::INFRA_TITLE, self.layout.infra);
        self.render_placeholder(frame, Self::VIDEO_TITLE, self.layout.video);
        self.render_controls(frame);

        ().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::position::Position;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::{backend::TestBackend, Terminal};

    const AREA: Rect = Rect {
        x: 0,
        y: 0,
        width: 120,
        height: 40,
    };

    fn dashboard() -> Dashboard {
        Dashboard::new(Config::default_config().expect("default config must parse"), AREA)
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn click(column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn arrow_keys_move_the_agent() {
        let mut dashboard = dashboard();
        let start = dashboard.simulation().position();

        assert!(!dashboard.feed(&key(KeyCode::Up)));
        assert_eq!(dashboard.simulation().position(), Position::new(start.x, start.y - 15));
        assert!(!dashboard.feed(&key(KeyCode::Char('d'))));
        assert_eq!(dashboard.simulation().position(), Position::new(start.x + 15, start.y - 15));
    }

    #[test]
    fn quit_keys_stop_the_loop() {
        let mut dashboard = dashboard();

        assert!(dashboard.feed(&key(KeyCode::Char('q'))));
        assert!(dashboard.feed(&Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL))));
    }

    #[test]
    fn clicking_pad_buttons_presses_them() {
        let mut dashboard = dashboard();
        let start = dashboard.simulation().position();

        // NOTE: the left button's top-left corner, see layout tests
        assert!(!dashboard.feed(&click(1, 33)));
        assert_eq!(dashboard.simulation().position(), Position::new(start.x - 15, start.y));
        assert_eq!(dashboard.last_control, Some(ControlToken::Left));

        assert!(!dashboard.feed(&click(25, 30)));
        assert_eq!(dashboard.last_control, Some(ControlToken::A));
        assert_eq!(dashboard.simulation().status(), "Control: A");
    }

    #[test]
    fn unbound_events_change_nothing() {
        let mut dashboard = dashboard();
        let start = dashboard.simulation().position();

        assert!(!dashboard.feed(&key(KeyCode::Char('Z'))));
        assert!(!dashboard.feed(&click(60, 10)));
        assert_eq!(dashboard.simulation().position(), start);
        assert_eq!(dashboard.last_control, None);
    }

    #[test]
    fn reserved_keys_only_update_the_status() {
        let mut dashboard = dashboard();
        let start = dashboard.simulation().position();

        assert!(!dashboard.feed(&key(KeyCode::Char('x'))));
        assert_eq!(dashboard.simulation().position(), start);
        assert_eq!(dashboard.simulation().status(), "Control: B");
        assert_eq!(dashboard.last_control, Some(ControlToken::B));
    }

    #[test]
    fn shrinking_the_terminal_reclamps_the_agent() {
        let mut dashboard = dashboard();

        for _ in 0..40 {
            dashboard.feed(&key(KeyCode::Right));
            dashboard.feed(&key(KeyCode::Down));
        }

        dashboard.feed(&Event::Resize(30, 20));

        let viewport = dashboard.simulation().viewport();
        let position = dashboard.simulation().position();

        assert_eq!(viewport, Size::new(300, 300));
        assert_eq!(position, Position::new(276, 276));
    }

    #[test]
    fn renders_every_panel() {
        let dashboard = dashboard();
        let mut terminal = Terminal::new(TestBackend::new(AREA.width, AREA.height)).expect("test backend");

        terminal
            .draw(|frame| dashboard.render(frame).expect("render"))
            .expect("draw");

        let buffer = terminal.backend().buffer();
        let text = buffer.content().iter().map(|cell| cell.symbol()).collect::<String>();

        for needle in ["Simulation Dashboard", "Rob (GPS Map)", "Infra", "Video", "Controls", "no feed", "↑", "A"] {
            assert!(text.contains(needle), "missing {needle}");
        }
    }

    #[test]
    fn renders_into_tiny_terminals() {
        let area = Rect::new(0, 0, 12, 6);
        let dashboard = Dashboard::new(Config::default_config().expect("default config must parse"), area);
        let mut terminal = Terminal::new(TestBackend::new(area.width, area.height)).expect("test backend");

        terminal
            .draw(|frame| dashboard.render(frame).expect("render"))
            .expect("draw");
    }
}

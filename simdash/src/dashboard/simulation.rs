use crate::{
    config::Config,
    dashboard::{
        command::ControlToken,
        draw::DrawDescription,
        map_renderer::MapRenderer,
        position::{Movement, Position, PositionModel, Size},
    },
    error::Error,
    utils::any::Any,
};
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ControlOutcome {
    Moved(Position),
    Unchanged(Position),
    Reserved(ControlToken),
    Ignored,
}

/// The simulated robot: its position model and the renderer for the map panel it lives in.
pub struct Simulation {
    position_model: PositionModel,
    map_renderer: MapRenderer,
    status: String,
}

impl Simulation {
    pub fn new(config: &Config, viewport: Size) -> Self {
        let agent = &config.agent;
        let top_margin = config.map.label_height;
        let position_model = match agent.initial {
            Some(initial) => PositionModel::with_position(initial, agent.size, agent.step_size, top_margin, viewport),
            None => PositionModel::new(agent.size, agent.step_size, top_margin, viewport),
        };
        let map_renderer = MapRenderer::new(&config.map, config.color_scheme.map);
        let status = Self::position_status(position_model.position());

        Self {
            position_model,
            map_renderer,
            status,
        }
    }

    fn position_status(position: Position) -> String {
        std::format!("Rob at ({x}, {y})", x = position.x, y = position.y)
    }

    pub fn position(&self) -> Position {
        self.position_model.position()
    }

    pub fn viewport(&self) -> Size {
        self.position_model.bounds()
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn resize(&mut self, viewport: Size) {
        if let Movement::Moved(position) = self.position_model.set_bounds(viewport) {
            tracing::debug!(?viewport, ?position, "viewport change moved the agent");

            self.status = Self::position_status(position);
        }
    }

    pub fn apply(&mut self, token: ControlToken) -> ControlOutcome {
        let Some(direction) = token.direction() else {
            tracing::info!(%token, "control");

            self.status = std::format!("Control: {token}");

            return ControlOutcome::Reserved(token);
        };

        match self.position_model.step(direction) {
            Movement::Moved(position) => {
                tracing::info!(%direction, ?position, "moved");

                self.status = Self::position_status(position);

                ControlOutcome::Moved(position)
            }
            Movement::Unchanged(position) => {
                tracing::debug!(%direction, ?position, "clamped");

                ControlOutcome::Unchanged(position)
            }
        }
    }

    /// Lenient control handler: unrecognized tokens are logged and leave the simulation untouched.
    pub fn handle_control(&mut self, token: &str) -> ControlOutcome {
        match ControlToken::from_str(token) {
            Ok(token) => self.apply(token),
            Err(_parse_err) => {
                tracing::warn!(token, "ignoring unrecognized control token");

                ControlOutcome::Ignored
            }
        }
    }

    /// Strict control handler: unrecognized tokens are an [`Error::InvalidDirection`].
    pub fn handle_control_strict(&mut self, token: &str) -> Result<ControlOutcome, Error> {
        match ControlToken::from_str(token) {
            Ok(token) => self.apply(token).ok(),
            Err(_parse_err) => Error::InvalidDirection(token.to_owned()).err(),
        }
    }

    pub fn describe(&self) -> DrawDescription {
        self.map_renderer.render(
            self.position_model.position(),
            self.position_model.size(),
            self.position_model.bounds(),
        )
    }
}

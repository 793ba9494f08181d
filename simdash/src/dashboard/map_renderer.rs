use crate::{
    config::MapConfig,
    dashboard::{
        color_scheme::MapPalette,
        draw::{DrawDescription, Ellipse, FillRect, Line, Text},
        position::{Position, Size},
    },
};

/// Produces the map panel's draw description from the agent's position and the viewport.
#[derive(Clone, Debug)]
pub struct MapRenderer {
    label_height: i32,
    grid_step: usize,
    glow_margin: i32,
    label_offset: Position,
    palette: MapPalette,
}

impl MapRenderer {
    pub fn new(map_config: &MapConfig, palette: MapPalette) -> Self {
        Self {
            label_height: map_config.label_height,
            grid_step: map_config.grid_step,
            glow_margin: map_config.glow_margin,
            label_offset: map_config.label_offset,
            palette,
        }
    }

    fn push_grid(&self, description: &mut DrawDescription, viewport: Size) {
        let top = self.label_height;

        for x in (0..viewport.width).step_by(self.grid_step) {
            description.push(Line {
                x1: x,
                y1: top,
                x2: x,
                y2: viewport.height.max(top),
                color: self.palette.grid,
            });
        }

        for y in (top..viewport.height).step_by(self.grid_step) {
            description.push(Line {
                x1: 0,
                y1: y,
                x2: viewport.width,
                y2: y,
                color: self.palette.grid,
            });
        }
    }

    fn push_agent(&self, description: &mut DrawDescription, position: Position, size: i32) {
        // NOTE: the glow goes first so that the marker is painted over it
        description.push(Ellipse {
            x: position.x - self.glow_margin,
            y: position.y - self.glow_margin,
            width: size + 2 * self.glow_margin,
            height: size + 2 * self.glow_margin,
            color: self.palette.glow,
        });
        description.push(Ellipse {
            x: position.x,
            y: position.y,
            width: size,
            height: size,
            color: self.palette.agent,
        });
    }

    pub fn render(&self, position: Position, size: i32, viewport: Size) -> DrawDescription {
        let mut description = DrawDescription::default();

        description.push(FillRect {
            x: 0,
            y: self.label_height,
            width: viewport.width,
            height: (viewport.height - self.label_height).max(0),
            color: self.palette.background,
        });

        self.push_grid(&mut description, viewport);
        self.push_agent(&mut description, position, size);

        description.push(Text {
            x: self.label_offset.x,
            y: viewport.height - self.label_offset.y,
            text: std::format!("({x}, {y})", x = position.x, y = position.y),
            color: self.palette.coordinates,
        });

        description
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::Config, dashboard::draw::Primitive, utils::any::Any};

    fn renderer() -> MapRenderer {
        let config = Config::default_config().expect("default config must parse");

        MapRenderer::new(&config.map, config.color_scheme.map)
    }

    fn count_lines(description: &DrawDescription) -> (usize, usize) {
        description
            .primitives()
            .iter()
            .fold((0, 0), |(vertical, horizontal), primitive| match primitive {
                Primitive::Line(line) if line.x1 == line.x2 => (vertical + 1, horizontal),
                Primitive::Line(_line) => (vertical, horizontal + 1),
                _ => (vertical, horizontal),
            })
    }

    #[test]
    fn render_produces_layers_in_order() {
        let description = renderer().render(Position::new(138, 138), 24, Size::new(300, 300));
        let primitives = description.primitives();

        assert!(matches!(
            &primitives[0],
            Primitive::FillRect(FillRect { x: 0, y: 28, width: 300, height: 272, .. })
        ));
        assert!(matches!(
            &primitives[primitives.len() - 3],
            Primitive::Ellipse(Ellipse { x: 132, y: 132, width: 36, height: 36, .. })
        ));
        assert!(matches!(
            &primitives[primitives.len() - 2],
            Primitive::Ellipse(Ellipse { x: 138, y: 138, width: 24, height: 24, .. })
        ));
        assert!(matches!(
            &primitives[primitives.len() - 1],
            Primitive::Text(Text { x: 10, y: 290, text, .. }) if text == "(138, 138)"
        ));
    }

    #[test]
    fn grid_starts_below_label_strip() {
        let description = renderer().render(Position::new(138, 138), 24, Size::new(300, 300));

        // NOTE: x = 0, 30, ..., 270 and y = 28, 58, ..., 298
        assert_eq!(count_lines(&description), (10, 10));

        let first_horizontal = description
            .primitives()
            .iter()
            .find_map(|primitive| match primitive {
                Primitive::Line(line) if line.y1 == line.y2 => line.some(),
                _ => None,
            });

        assert!(matches!(first_horizontal, Some(Line { y1: 28, x1: 0, x2: 300, .. })));
    }

    #[test]
    fn degenerate_viewports_degrade_gracefully() {
        let renderer = renderer();

        assert_eq!(count_lines(&renderer.render(Position::new(0, 28), 24, Size::new(0, 0))), (0, 0));
        assert_eq!(count_lines(&renderer.render(Position::new(0, 28), 24, Size::new(20, 28))), (1, 0));
        assert_eq!(count_lines(&renderer.render(Position::new(0, 28), 24, Size::new(20, 40))), (1, 1));

        let description = renderer.render(Position::new(0, 28), 24, Size::new(5, 5));

        assert!(matches!(&description.primitives()[0], Primitive::FillRect(FillRect { height: 0, .. })));
    }

    #[test]
    fn vertical_lines_never_point_upwards() {
        let description = renderer().render(Position::new(0, 28), 24, Size::new(20, 10));

        for primitive in description.primitives() {
            if let Primitive::Line(line) = primitive {
                assert!(line.y2 >= line.y1, "inverted line {line:?}");
            }
        }

        assert_eq!(count_lines(&description), (1, 0));
    }

    #[test]
    fn render_is_deterministic() {
        let renderer = renderer();
        let first = renderer.render(Position::new(42, 99), 24, Size::new(320, 310));
        let second = renderer.render(Position::new(42, 99), 24, Size::new(320, 310));

        assert_eq!(first.to_json().ok(), second.to_json().ok());
        assert_eq!(first, second);
    }
}

use crate::{
    dashboard::{
        color_scheme::ColorScheme,
        draw::{DrawDescription, Ellipse, FillRect, Line, Primitive, Text},
        position::Size,
        surface::Surface,
    },
    error::Error,
    utils::any::Any,
};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    symbols::Marker,
    text::Line as TextLine,
    widgets::{
        canvas::{Canvas, Context, Line as CanvasLine, Painter, Shape},
        Widget,
    },
};

#[derive(Clone, Copy)]
enum Outline {
    Rect,
    Ellipse,
}

/// A filled rect or ellipse in canvas space, sampled once per canvas pixel.
struct Fill {
    left: f64,
    bottom: f64,
    width: f64,
    height: f64,
    outline: Outline,
    color: Color,
    pixel_size: (f64, f64),
}

impl Fill {
    fn contains(&self, x: f64, y: f64) -> bool {
        match self.outline {
            Outline::Rect => true,
            Outline::Ellipse => {
                let radius_x = self.width / 2.0;
                let radius_y = self.height / 2.0;
                let dx = (x - self.left - radius_x) / radius_x;
                let dy = (y - self.bottom - radius_y) / radius_y;

                dx * dx + dy * dy <= 1.0
            }
        }
    }
}

impl Shape for Fill {
    fn draw(&self, painter: &mut Painter) {
        let (pixel_width, pixel_height) = self.pixel_size;

        if self.width <= 0.0 || self.height <= 0.0 || pixel_width <= 0.0 || pixel_height <= 0.0 {
            return;
        }

        let mut y = self.bottom + pixel_height / 2.0;

        while y < self.bottom + self.height {
            let mut x = self.left + pixel_width / 2.0;

            while x < self.left + self.width {
                if self.contains(x, y) {
                    if let Some((column, row)) = painter.get_point(x, y) {
                        painter.paint(column, row, self.color);
                    }
                }

                x += pixel_width;
            }

            y += pixel_height;
        }
    }
}

/// Maps logical units onto the canvas: the y axis is flipped, since canvas coordinates grow upwards.
struct Projection<'a> {
    viewport: Size,
    pixel_size: (f64, f64),
    color_scheme: &'a ColorScheme,
}

impl Projection<'_> {
    fn flip(&self, y: i32) -> f64 {
        f64::from(self.viewport.height.saturating_sub(y))
    }

    fn fill(&self, outline: Outline, (x, y, width, height): (i32, i32, i32, i32), color: Color) -> Fill {
        Fill {
            left: f64::from(x),
            bottom: self.flip(y.saturating_add(height)),
            width: f64::from(width),
            height: f64::from(height),
            outline,
            color,
            pixel_size: self.pixel_size,
        }
    }

    fn paint_primitive(&self, context: &mut Context, primitive: &Primitive) {
        match primitive {
            Primitive::FillRect(FillRect {
                x,
                y,
                width,
                height,
                color,
            }) => {
                let color = self.color_scheme.map_color(*color);

                context.draw(&self.fill(Outline::Rect, (*x, *y, *width, *height), color));
            }
            Primitive::Ellipse(Ellipse {
                x,
                y,
                width,
                height,
                color,
            }) => {
                let color = self.color_scheme.map_color(*color);

                context.draw(&self.fill(Outline::Ellipse, (*x, *y, *width, *height), color));
            }
            Primitive::Line(Line { x1, y1, x2, y2, color }) => context.draw(&CanvasLine {
                x1: f64::from(*x1),
                y1: self.flip(*y1),
                x2: f64::from(*x2),
                y2: self.flip(*y2),
                color: self.color_scheme.map_color(*color),
            }),
            Primitive::Text(Text { x, y, text, color }) => {
                let style = Style::new().fg(self.color_scheme.map_color(*color));

                context.print(f64::from(*x), self.flip(*y), TextLine::styled(text.clone(), style));
            }
        }
    }
}

/// Paints draw descriptions onto a region of a terminal buffer, scaling the viewport to fit the region.
pub struct CanvasSurface<'a> {
    buffer: &'a mut Buffer,
    area: Rect,
    viewport: Size,
    color_scheme: &'a ColorScheme,
}

impl<'a> CanvasSurface<'a> {
    pub fn new(buffer: &'a mut Buffer, area: Rect, viewport: Size, color_scheme: &'a ColorScheme) -> Self {
        Self {
            buffer,
            area,
            viewport,
            color_scheme,
        }
    }

    // NOTE: half block markers give each cell two vertically stacked pixels
    fn pixel_size(&self) -> (f64, f64) {
        let width = f64::from(self.viewport.width) / f64::from(self.area.width);
        let height = f64::from(self.viewport.height) / (2.0 * f64::from(self.area.height));

        (width, height)
    }
}

impl Surface for CanvasSurface<'_> {
    fn paint(&mut self, description: &DrawDescription) -> Result<(), Error> {
        if self.area.is_empty() {
            return ().ok();
        }

        let projection = Projection {
            viewport: self.viewport,
            pixel_size: self.pixel_size(),
            color_scheme: self.color_scheme,
        };
        let canvas = Canvas::default()
            .background_color(self.color_scheme.background())
            .marker(Marker::HalfBlock)
            .x_bounds([0.0, f64::from(self.viewport.width)])
            .y_bounds([0.0, f64::from(self.viewport.height)])
            .paint(|context| {
                for primitive in description.primitives() {
                    projection.paint_primitive(context, primitive);
                }
            });

        canvas.render(self.area, self.buffer);

        ().ok()
    }
}

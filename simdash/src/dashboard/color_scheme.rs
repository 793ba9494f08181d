use crate::dashboard::draw::Rgba;
use ratatui::style::{Color, Style};
use serde::Deserialize;

#[derive(Clone, Copy, Debug, Deserialize)]
pub struct Spec {
    pub fg: Rgba,
    pub bg: Rgba,
}

/// Colors of the map panel's draw description.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct MapPalette {
    pub background: Rgba,
    pub grid: Rgba,
    pub agent: Rgba,
    pub glow: Rgba,
    pub coordinates: Rgba,
}

#[derive(Clone, Copy, Debug, Deserialize)]
pub struct Buttons {
    pub idle: Spec,
    pub pressed: Spec,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ColorScheme {
    // NOTE: when set, colors are mapped onto the 256-color palette for terminals without truecolor support
    #[serde(default)]
    pub indexed: bool,
    pub window: Spec,
    pub title: Spec,
    pub panel: Spec,
    pub border: Rgba,
    pub buttons: Buttons,
    pub map: MapPalette,
}

impl ColorScheme {
    /// Converts to a terminal color, compositing any transparency over the window background.
    pub fn color(&self, rgba: Rgba) -> Color {
        self.color_over(rgba, self.window.bg)
    }

    /// Converts a map primitive's color, compositing any transparency over the map background.
    pub fn map_color(&self, rgba: Rgba) -> Color {
        self.color_over(rgba, self.map.background)
    }

    fn color_over(&self, rgba: Rgba, background: Rgba) -> Color {
        let (r, g, b) = rgba.over(background);

        if self.indexed {
            Color::Indexed(ansi_colours::ansi256_from_rgb((r, g, b)))
        } else {
            Color::Rgb(r, g, b)
        }
    }

    pub fn style(&self, spec: &Spec) -> Style {
        Style::new().fg(self.color(spec.fg)).bg(self.color(spec.bg))
    }

    pub fn border_style(&self) -> Style {
        Style::new().fg(self.color(self.border)).bg(self.color(self.panel.bg))
    }

    pub fn background(&self) -> Color {
        self.color(self.window.bg)
    }

    pub fn button_style(&self, pressed: bool) -> Style {
        let spec = if pressed { &self.buttons.pressed } else { &self.buttons.idle };

        self.style(spec)
    }
}

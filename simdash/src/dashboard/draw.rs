use crate::{error::Error, utils::any::Any};
use serde::{Deserialize, Serialize};
use simdash_macros::expand;

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(into = "String", try_from = "String")]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, u8::MAX)
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Composites `self` over an opaque `background`.
    pub fn over(self, background: Self) -> (u8, u8, u8) {
        let alpha = u16::from(self.a);
        let blend = |fg: u8, bg: u8| {
            let value = (u16::from(fg) * alpha + u16::from(bg) * (255 - alpha) + 127) / 255;

            u8::try_from(value).unwrap_or(u8::MAX)
        };

        (blend(self.r, background.r), blend(self.g, background.g), blend(self.b, background.b))
    }
}

impl TryFrom<String> for Rgba {
    type Error = Error;

    fn try_from(string: String) -> Result<Self, Self::Error> {
        let invalid = || Error::InvalidColor(string.clone());
        let hex = string.strip_prefix('#').ok_or_else(invalid)?;
        let channel = |idx: usize| {
            hex.get(idx..idx + 2)
                .and_then(|digits| u8::from_str_radix(digits, 16).ok())
                .ok_or_else(invalid)
        };

        match hex.len() {
            6 => Self::rgb(channel(0)?, channel(2)?, channel(4)?).ok(),
            8 => Self::rgba(channel(0)?, channel(2)?, channel(4)?, channel(6)?).ok(),
            _ => invalid().err(),
        }
    }
}

impl From<Rgba> for String {
    fn from(Rgba { r, g, b, a }: Rgba) -> Self {
        if a == u8::MAX {
            std::format!("#{r:02x}{g:02x}{b:02x}")
        } else {
            std::format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }
}

/// A single drawing primitive in logical units, with the y axis pointing down. Ellipses are filled and described
/// by their bounding box.
#[expand]
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Primitive {
    FillRect {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        color: Rgba,
    },
    Line {
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        color: Rgba,
    },
    Ellipse {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        color: Rgba,
    },
    Text {
        x: i32,
        y: i32,
        text: String,
        color: Rgba,
    },
}

/// An ordered list of primitives; later primitives are painted over earlier ones.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct DrawDescription {
    // NOTE: serde_yaml would otherwise write variants as !tags; this keeps YAML in the same fill_rect: shape as JSON
    #[serde(serialize_with = "serde_yaml::with::singleton_map_recursive::serialize")]
    primitives: Vec<Primitive>,
}

impl DrawDescription {
    pub fn push<P: Into<Primitive>>(&mut self, primitive: P) {
        self.primitives.push(primitive.into());
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_colors() {
        assert_eq!(Rgba::try_from("#1e2824".to_owned()).ok(), Some(Rgba::rgb(30, 40, 36)));
        assert_eq!(Rgba::try_from("#3cff7850".to_owned()).ok(), Some(Rgba::rgba(60, 255, 120, 80)));
    }

    #[test]
    fn rejects_malformed_colors() {
        for string in ["1e2824", "#1e28", "#1e28zz", "#1e2824ff00"] {
            assert!(
                matches!(Rgba::try_from(string.to_owned()), Err(Error::InvalidColor(_))),
                "accepted {string}"
            );
        }
    }

    #[test]
    fn serializes_colors_as_hex() {
        assert_eq!(String::from(Rgba::rgb(120, 255, 200)), "#78ffc8");
        assert_eq!(String::from(Rgba::rgba(60, 255, 120, 220)), "#3cff78dc");
    }

    #[test]
    fn blends_over_background() {
        let background = Rgba::rgb(0, 0, 0);

        assert_eq!(Rgba::rgb(200, 100, 50).over(background), (200, 100, 50));
        assert_eq!(Rgba::rgba(200, 100, 50, 0).over(background), (0, 0, 0));
        assert_eq!(Rgba::rgba(255, 255, 255, 128).over(background), (128, 128, 128));
    }

    #[test]
    fn push_accepts_expanded_structs() {
        let mut description = DrawDescription::default();

        description.push(Text {
            x: 10,
            y: 290,
            text: "(138, 138)".to_owned(),
            color: Rgba::rgb(120, 255, 200),
        });

        assert!(matches!(&description.primitives()[0], Primitive::Text(text) if text.text == "(138, 138)"));
    }
}

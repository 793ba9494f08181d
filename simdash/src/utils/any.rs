use ratatui::{layout::Rect, text::Text, widgets::Paragraph};
use serde::{Deserialize, Serialize};
use serde_json::Error as SerdeJsonError;
use serde_yaml::Error as SerdeYamlError;
use std::{
    borrow::Borrow,
    fmt::Display,
    fs::File,
    io::{Error as IoError, Write},
    path::Path,
};

pub trait Any: Sized {
    fn create(&self) -> Result<File, IoError>
    where
        Self: AsRef<Path>,
    {
        File::create(self)
    }

    fn deserialize_from_yaml<'a, T: Deserialize<'a>>(&'a self) -> Result<T, SerdeYamlError>
    where
        Self: AsRef<str>,
    {
        serde_yaml::from_str(self.as_ref())
    }

    fn err<T>(self) -> Result<T, Self> {
        Err(self)
    }

    fn error<T, E: Display>(self) -> Option<T>
    where
        Self: Into<Result<T, E>>,
    {
        match self.into() {
            Ok(ok) => ok.some(),
            Err(error) => {
                tracing::error!(%error);

                None
            }
        }
    }

    fn ok<E>(self) -> Result<Self, E> {
        Ok(self)
    }

    fn paragraph<'a>(self) -> Paragraph<'a>
    where
        Self: Into<Text<'a>>,
    {
        Paragraph::new(self)
    }

    fn read_to_string(&self) -> Result<String, IoError>
    where
        Self: AsRef<Path>,
    {
        std::fs::read_to_string(self)
    }

    fn rect<T: Borrow<u16>>(&self) -> Rect
    where
        Self: Borrow<(T, T)>,
    {
        let (width, height) = self.borrow();

        Rect::new(0, 0, *width.borrow(), *height.borrow())
    }

    fn some(self) -> Option<Self> {
        Some(self)
    }

    fn to_json(&self) -> Result<String, SerdeJsonError>
    where
        Self: Serialize,
    {
        serde_json::to_string_pretty(self)
    }

    fn to_yaml(&self) -> Result<String, SerdeYamlError>
    where
        Self: Serialize,
    {
        serde_yaml::to_string(self)
    }

    fn unit(self) {}

    fn write_all_and_flush(&mut self, bytes: &[u8]) -> Result<(), IoError>
    where
        Self: Write,
    {
        self.write_all(bytes)?;
        self.flush()?;

        ().ok()
    }
}

impl<T> Any for T {}

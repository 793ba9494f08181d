use crate::{
    dashboard::{draw::DrawDescription, surface::Surface},
    error::Error,
    utils::any::Any,
};
use clap::ValueEnum;
use std::io::Write;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum Format {
    #[default]
    Json,
    Yaml,
}

/// Serializes draw descriptions to a writer, for consumers outside the terminal.
pub struct WriterSurface<W> {
    writer: W,
    format: Format,
}

impl<W: Write> WriterSurface<W> {
    pub fn new(writer: W, format: Format) -> Self {
        Self { writer, format }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Surface for WriterSurface<W> {
    fn paint(&mut self, description: &DrawDescription) -> Result<(), Error> {
        let mut serialized = match self.format {
            Format::Json => description.to_json()?,
            Format::Yaml => description.to_yaml()?,
        };

        if !serialized.ends_with('\n') {
            serialized.push('\n');
        }

        self.writer.write_all_and_flush(serialized.as_bytes())?.ok()
    }
}

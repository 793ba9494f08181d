pub mod canvas;
pub mod writer;

use crate::{dashboard::draw::DrawDescription, error::Error};

/// Anything a draw description can be painted onto.
pub trait Surface {
    fn paint(&mut self, description: &DrawDescription) -> Result<(), Error>;
}

use derive_more::{Display, From};
use serde_json::Error as SerdeJsonError;
use serde_yaml::Error as SerdeYamlError;
use std::io::Error as IoError;

// NOTE:
// - Error must implement Debug to be used as E in fn main() -> Result<ExitCode, E>
// - Error must implement Display for Any::error() and for serde's #[serde(try_from = "...")]
#[derive(Debug, Display, From)]
pub enum Error {
    Io(IoError),
    SerdeJson(SerdeJsonError),
    SerdeYaml(SerdeYamlError),

    #[display(fmt = "invalid color {_0:?}, expected #rrggbb or #rrggbbaa")]
    #[from(ignore)]
    InvalidColor(String),

    #[display(fmt = "invalid config: {_0}")]
    #[from(ignore)]
    InvalidConfig(&'static str),

    #[display(fmt = "invalid direction {_0:?}")]
    #[from(ignore)]
    InvalidDirection(String),

    #[display(fmt = "invalid position {_0:?}, expected x,y")]
    #[from(ignore)]
    InvalidPosition(String),
}

// NOTE: clap requires value parser errors to implement std::error::Error
impl std::error::Error for Error {}

//! Errors that can occur while extracting run metadata.

use std::{io, path::PathBuf};

use thiserror::Error;


pub type Result<T, E = Error> = std::result::Result<T, E>;


#[derive(Error, Debug)]
pub enum Error {
    /// Input could not be read or output could not be written
    #[error("couldn't access {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        source: io::Error,
    },
    /// RunInfo.xml is malformed, is missing a field, or has a bad value
    #[error("Error parsing RunInfo: {0}")]
    Xml(#[from] serde_xml_rs::Error),
    /// RunInfo.xml parsed, but describes something we can't use
    #[error("invalid RunInfo: {0}")]
    InvalidRunInfo(String),
    #[error("invalid run date '{0}': expected YYMMDD or YYYYMMDD")]
    InvalidDate(String),
    #[error("invalid read structure '{0}': {1}")]
    InvalidReadStructure(String, String),
}


impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Error {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

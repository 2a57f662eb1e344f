use std::path::PathBuf;

use thiserror::Error;

use crate::report::ErrorReport;

/// Why a sizer call produced no value.
#[derive(Debug, Error)]
pub enum SizerError {
    /// The server answered with something other than 200. The report has
    /// already been printed by the time this is returned.
    #[error("API call failed with status code {}", .0.status())]
    Status(ErrorReport),

    #[error("failed to send request to {url}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to open spreadsheet {}", .path.display())]
    Spreadsheet {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to build request")]
    Request(#[source] reqwest::Error),

    #[error("response body is not valid JSON")]
    Decode(#[source] reqwest::Error),

    #[error("response is missing field `{0}`")]
    MissingField(&'static str),

    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),
}

impl SizerError {
    /// Status code of the failed response, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            SizerError::Status(report) => Some(report.status()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, SizerError>;

use std::path::PathBuf;

use thiserror::Error;

/// Failure while acquiring or decoding a geometry document.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("request for {url} failed")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} responded with {status}")]
    Status { url: String, status: u16 },
    #[error("failed to read geometry file {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("geometry document is not valid TopoJSON: {message}")]
    Parse { message: String },
    #[error("geometry document is a bare geometry, expected a Topology")]
    NotTopology,
    #[error("failed to extract object {object:?} from topology: {message}")]
    Convert { object: String, message: String },
}

use thiserror::Error;

use crate::gateway::bill::FetchError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Internal Server Error")]
    Internal,
    #[error("Unauthorized")]
    Unauthorized,
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    /// A gateway failure surfaced to the user with its message intact.
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

use thiserror::Error;

/// Fatal conditions that abort a grade retrieval run.
#[derive(Debug, Error)]
pub enum GradesError {
    /// The profile endpoint rejected the access token.
    #[error("The Canvas API token is invalid.")]
    Auth,

    /// The profile response was unsuccessful or carried no usable `id`.
    #[error("Could not fetch user profile from Canvas: {0}")]
    Profile(String),

    /// The active course list was not a JSON array.
    #[error("Did not receive a valid list of courses: {0}")]
    CourseList(String),

    /// Request or body decoding failure in the transport.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The HTTP client could not be built, e.g. the token is not a valid
    /// header value.
    #[error("Could not build Canvas client: {0}")]
    Client(String),

    /// A request URL could not be built from the configured domain.
    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),
}

/// Type alias for Results using GradesError
pub type Result<T> = std::result::Result<T, GradesError>;

use reqwest::StatusCode;

/// Any error that can occur within the crate.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Request error: {}", .0)]
    Reqwest(#[from] reqwest::Error),
    #[error("Request middleware error: {}", .0)]
    ReqwestMiddleware(anyhow::Error),
    #[error("Error {}", .0)]
    Http(StatusCode),
    #[error("Error parsing response: {}", .0)]
    Parse(#[from] serde_json::Error),
    #[error("Invalid URL: {}", .0)]
    Url(#[from] url::ParseError),
    /// The service answered with a status other than `bought` or `unbought`.
    #[error("Invalid reservation status: {:?}", .0)]
    InvalidStatus(String),
    #[error("Controller is no longer running")]
    ControllerStopped,
}

impl Error {
    /// Whether this error is a broken contract with the service rather than a transport failure.
    /// These are never recovered from.
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, Self::InvalidStatus(_))
    }
}

impl From<reqwest_middleware::Error> for Error {
    fn from(error: reqwest_middleware::Error) -> Error {
        match error {
            reqwest_middleware::Error::Reqwest(e) => Error::Reqwest(e),
            reqwest_middleware::Error::Middleware(e) => Error::ReqwestMiddleware(e),
        }
    }
}

use std::fmt;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// An error returned from the Cloud Resource Manager service.
    #[error(transparent)]
    Response(#[from] ErrorResponse),

    /// An error from the HTTP client.
    #[error(transparent)]
    HttpClient(#[from] reqwest::Error),

    /// An error from one of the middleware used.
    #[error(transparent)]
    HttpMiddleware(anyhow::Error),

    /// An error from a token source.
    #[error("token source failed: {0}")]
    TokenSource(Box<dyn std::error::Error + Send + Sync>),

    /// The request body is a stream and can not be sent again.
    #[error("request can not be cloned for sending")]
    RequestNotCloneable,
}

impl From<reqwest_middleware::Error> for Error {
    fn from(error: reqwest_middleware::Error) -> Self {
        match error {
            reqwest_middleware::Error::Middleware(err) => Error::HttpMiddleware(err),
            reqwest_middleware::Error::Reqwest(err) => Error::HttpClient(err),
        }
    }
}

impl Error {
    /// Returns `true` if sending the same request again may succeed.
    ///
    /// Timeouts, connection failures, `408`, `429` and `5xx` responses are retriable.
    pub fn is_retriable(&self) -> bool {
        match self {
            Error::Response(response) => response.is_retriable(),
            Error::HttpClient(err) => {
                err.is_timeout()
                    || err.is_connect()
                    || err
                        .status()
                        .map(|status| matches!(status.as_u16(), 408 | 429 | 500..=599))
                        .unwrap_or(false)
            }
            _ => false,
        }
    }
}

/// An error response returned from Google APIs.
///
/// See the [`API error model`][1] documentation for more details.
///
/// [1]: https://cloud.google.com/apis/design/errors#http_mapping
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// An HTTP status value, without the textual description.
    ///
    /// Example values include: `400` (Bad Request), `403` (Forbidden), and `404` (Not Found).
    pub code: u16,

    /// Description of the error.
    pub message: String,

    /// The canonical status name, for example `PERMISSION_DENIED`.
    #[serde(default)]
    pub status: Option<String>,
}

impl ErrorResponse {
    pub fn is_retriable(&self) -> bool {
        matches!(self.code, 408 | 429 | 500..=599)
    }
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.status {
            Some(status) => write!(f, "{} {}: {}", self.code, status, self.message),
            None => write!(f, "{}: {}", self.code, self.message),
        }
    }
}

impl std::error::Error for ErrorResponse {}

/// Google APIs wrap the error in an extra object level.
#[derive(serde::Deserialize)]
pub(crate) struct ErrorWrapper {
    pub(crate) error: ErrorResponse,
}

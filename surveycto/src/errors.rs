//! Errors for this crate.
//! About anyhow: see https://github.com/TrueLayer/reqwest-middleware/issues/119

use reqwest::StatusCode;
use serde::Deserialize;

#[derive(thiserror::Error, Debug)]
pub enum InvalidServerUrl {
    #[error("Given URL does not start with \"http://\" or \"https://\": {0}")]
    Protocol(String),

    #[error("Given URL must not end with \"/\": {0}")]
    TrailingSlash(String),

    #[error("\"{0}\" is not a valid SurveyCTO server name")]
    ServerName(String),
}

aliri_braid::from_infallible!(InvalidServerUrl);

/// Errors representing failed interactions with a SurveyCTO server,
/// or a request which was rejected before being sent.
#[derive(thiserror::Error, Debug)]
pub enum SctoError {
    /// Bad option value or a forbidden combination of options.
    #[error("{0}")]
    InvalidArgument(String),

    /// An option was given a value of the wrong kind, e.g. a date which is not a date.
    #[error("{0}")]
    TypeMismatch(String),

    /// Error response from SurveyCTO. `message` is the explanation given
    /// by the server in the body of a 417 response.
    #[error("({status:?} {reason:?}): {}", .message.as_deref().unwrap_or(.text.as_str()))]
    Error {
        status: StatusCode,
        reason: &'static str,
        text: String,
        message: Option<String>,
        source: reqwest::Error,
    },

    /// Error without any response from SurveyCTO, e.g. connection refused.
    #[error(transparent)]
    Raw(#[from] reqwest::Error),

    /// Error from reqwest middleware function.
    #[error(transparent)]
    Middleware(anyhow::Error),

    #[error(transparent)]
    Url(#[from] url::ParseError),

    /// The server did not send a CSRF token during the login handshake.
    #[error("response from {0} is missing the X-csrf-token header")]
    MissingCsrfToken(String),
}

impl SctoError {
    /// HTTP status code of the error response, if there was one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Error { status, .. } => Some(*status),
            Self::Raw(e) => e.status(),
            _ => None,
        }
    }

    pub(crate) fn encrypted_extraction() -> Self {
        Self::InvalidArgument(
            "Encrypted data extraction is only supported when returning data in json format \
            without review status filter."
                .to_string(),
        )
    }
}

impl From<reqwest_middleware::Error> for SctoError {
    fn from(error: reqwest_middleware::Error) -> Self {
        match error {
            reqwest_middleware::Error::Middleware(e) => SctoError::Middleware(e),
            reqwest_middleware::Error::Reqwest(e) => SctoError::Raw(e),
        }
    }
}

#[derive(Deserialize)]
struct ExpectationFailed {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

pub(crate) async fn check(res: reqwest::Response) -> Result<reqwest::Response, SctoError> {
    match res.error_for_status_ref() {
        Ok(_) => Ok(res),
        Err(source) => {
            let status = res.status();
            let reason = status.canonical_reason().unwrap_or("unknown reason");
            let text = res.text().await.map_err(SctoError::Raw)?;
            let message = if status == StatusCode::EXPECTATION_FAILED {
                server_message(&text)
            } else {
                None
            };
            Err(SctoError::Error {
                status,
                reason,
                text,
                message,
                source,
            })
        }
    }
}

/// Extract `error.message` from the JSON body of a 417 response.
fn server_message(text: &str) -> Option<String> {
    serde_json::from_str::<ExpectationFailed>(text)
        .ok()
        .map(|body| body.error.message)
}

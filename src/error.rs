use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Fixed message for rejected credentials or an expired session.
pub const AUTHENTICATION_FAILED: &str = "Authentication failed. Please check your credentials.";

/// Fallback message for a `400` response without a usable `message` field.
pub const VALIDATION_FAILED: &str = "Validation error";

/// Status code and body text of an error response, kept for inspection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// Coarse error categories callers can branch on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Credentials rejected or session expired (`401`).
    Authentication,
    /// Addressed resource is absent (`404`).
    NotFound,
    /// Malformed request payload (`400`).
    Validation,
    /// Any other status `>= 400`.
    Api,
    /// No response was obtained from the service.
    Transport,
    /// Local configuration or path problem detected before any request was sent.
    Config,
    /// A request record could not be encoded, or a success payload could not be
    /// decoded into the requested type.
    Serialization,
}

/// Errors returned by client operations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Base URL is not a valid absolute URL.
    #[error("invalid base URL '{0}'")]
    InvalidBaseUrl(String),

    /// Endpoint path could not be joined to the base URL.
    #[error("invalid endpoint path '{0}'")]
    InvalidPath(String),

    /// A path template placeholder was not provided a value.
    #[error("missing path parameter '{parameter}' for '{template}'")]
    MissingPathParameter {
        template: &'static str,
        parameter: &'static str,
    },

    /// The service answered `401`.
    #[error("{message}")]
    Authentication {
        message: String,
        response: RawResponse,
    },

    /// The service answered `404`.
    #[error("{message}")]
    NotFound {
        message: String,
        path: String,
        response: RawResponse,
    },

    /// The service answered `400`.
    #[error("{message}")]
    Validation {
        message: String,
        response: RawResponse,
    },

    /// The service answered with any other error status.
    #[error("{message}")]
    Api {
        status: StatusCode,
        message: String,
        response: RawResponse,
    },

    /// HTTP transport-layer failure: no response, or its body could not be read.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// JSON encoding of a request body or decoding of a response failed.
    #[error("failed to process JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl ClientError {
    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidBaseUrl(_) | Self::InvalidPath(_) | Self::MissingPathParameter { .. } => {
                ErrorKind::Config
            }
            Self::Authentication { .. } => ErrorKind::Authentication,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Validation { .. } => ErrorKind::Validation,
            Self::Api { .. } => ErrorKind::Api,
            Self::Transport(_) => ErrorKind::Transport,
            Self::Json(_) => ErrorKind::Serialization,
        }
    }

    /// HTTP status of the response that caused this error, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport(error) => error.status().map(|status| status.as_u16()),
            other => other.response().map(|response| response.status),
        }
    }

    /// Raw error response, present for every status-classified error.
    pub fn response(&self) -> Option<&RawResponse> {
        match self {
            Self::Authentication { response, .. }
            | Self::NotFound { response, .. }
            | Self::Validation { response, .. }
            | Self::Api { response, .. } => Some(response),
            _ => None,
        }
    }

    /// Human-readable message; equals the `Display` output.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

/// Maps a response status to an error, or `None` for statuses below `400`.
///
/// Specific codes are checked before the catch-all bucket: `401`, then `404`,
/// then `400`, then anything else `>= 400`. `path` is the request path and only
/// feeds the not-found message. An absent or non-JSON `body` never fails
/// classification; it falls back to the bucket's fixed message.
pub fn classify(status: StatusCode, path: &str, body: &str) -> Option<ClientError> {
    let response = RawResponse {
        status: status.as_u16(),
        body: body.to_owned(),
    };

    match status.as_u16() {
        401 => Some(ClientError::Authentication {
            message: AUTHENTICATION_FAILED.to_owned(),
            response,
        }),
        404 => Some(ClientError::NotFound {
            message: format!("Resource not found: {path}"),
            path: path.to_owned(),
            response,
        }),
        400 => Some(ClientError::Validation {
            message: body_message(body).unwrap_or_else(|| VALIDATION_FAILED.to_owned()),
            response,
        }),
        code if code >= 400 => Some(ClientError::Api {
            status,
            message: body_message(body).unwrap_or_else(|| format!("API error: {code}")),
            response,
        }),
        _ => None,
    }
}

/// Extracts the `message` field of a JSON object body.
fn body_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.as_object()?.get("message")? {
        Value::Null => None,
        Value::String(message) => Some(message.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;

    use super::{AUTHENTICATION_FAILED, ClientError, ErrorKind, VALIDATION_FAILED, classify};

    fn kind_of(code: u16, body: &str) -> Option<ErrorKind> {
        let status = StatusCode::from_u16(code).expect("valid status code");
        classify(status, "/api/v1/volumes/7", body).map(|error| error.kind())
    }

    #[test]
    fn statuses_below_400_are_not_errors() {
        for code in [100, 200, 201, 204, 301, 304, 399] {
            assert_eq!(kind_of(code, ""), None, "status {code}");
        }
    }

    #[test]
    fn specific_codes_win_over_the_generic_bucket() {
        assert_eq!(kind_of(401, ""), Some(ErrorKind::Authentication));
        assert_eq!(kind_of(404, ""), Some(ErrorKind::NotFound));
        assert_eq!(kind_of(400, ""), Some(ErrorKind::Validation));
        for code in (402..=599).filter(|code| *code != 404) {
            assert_eq!(kind_of(code, ""), Some(ErrorKind::Api), "status {code}");
        }
    }

    #[test]
    fn authentication_message_is_fixed_even_with_a_body() {
        let error = classify(
            StatusCode::UNAUTHORIZED,
            "/api/v1/auth/login",
            r#"{"message":"bad password"}"#,
        )
        .expect("401 is an error");
        assert_eq!(error.message(), AUTHENTICATION_FAILED);
        assert_eq!(error.status(), Some(401));
    }

    #[test]
    fn not_found_message_names_the_path() {
        let error = classify(StatusCode::NOT_FOUND, "/api/v1/volumes/7", "").expect("404");
        assert_eq!(error.message(), "Resource not found: /api/v1/volumes/7");
        match error {
            ClientError::NotFound { path, .. } => assert_eq!(path, "/api/v1/volumes/7"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn validation_uses_body_message_when_present() {
        let error = classify(StatusCode::BAD_REQUEST, "/", r#"{"message":"name is required"}"#)
            .expect("400");
        assert_eq!(error.message(), "name is required");
        assert_eq!(
            error.response().map(|response| response.body.as_str()),
            Some(r#"{"message":"name is required"}"#)
        );
    }

    #[test]
    fn validation_falls_back_for_unusable_bodies() {
        for body in ["", "not json", "[1,2]", r#"{"error":"x"}"#, r#"{"message":null}"#] {
            let error = classify(StatusCode::BAD_REQUEST, "/", body).expect("400");
            assert_eq!(error.message(), VALIDATION_FAILED, "body {body:?}");
        }
    }

    #[test]
    fn generic_errors_use_body_message_or_status() {
        let error = classify(
            StatusCode::INTERNAL_SERVER_ERROR,
            "/",
            r#"{"message":"restic exited with code 1"}"#,
        )
        .expect("500");
        assert_eq!(error.message(), "restic exited with code 1");

        let error = classify(StatusCode::CONFLICT, "/", "<html>oops</html>").expect("409");
        assert_eq!(error.message(), "API error: 409");
        assert_eq!(error.status(), Some(409));
    }

    #[test]
    fn non_string_message_is_rendered_as_json() {
        let error = classify(StatusCode::UNPROCESSABLE_ENTITY, "/", r#"{"message":["a","b"]}"#)
            .expect("422");
        assert_eq!(error.message(), r#"["a","b"]"#);
    }
}

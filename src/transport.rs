use reqwest::{Method, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::ClientError;
use crate::error::{ErrorKind, classify};
use crate::session::Session;

/// One API call: method, path relative to the base URL, optional JSON body and
/// query parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct Request {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
    pub query: Vec<(String, String)>,
}

impl Request {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            query: Vec::new(),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Serializes `body` as the JSON request payload.
    pub fn json(mut self, body: &impl Serialize) -> Result<Self, ClientError> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Appends one query parameter.
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Appends a query parameter only when `value` is present.
    #[must_use]
    pub fn query_opt(self, key: impl Into<String>, value: Option<&str>) -> Self {
        match value {
            Some(value) => self.query(key, value),
            None => self,
        }
    }
}

/// Body of a successful response.
#[derive(Clone, Debug, PartialEq)]
pub enum Payload {
    /// Body parsed as JSON (including a literal `null`).
    Json(Value),
    /// Body was present but not valid JSON.
    Text(String),
    /// Response carried no body.
    NoContent,
}

impl Payload {
    /// Decodes the payload into `T`.
    ///
    /// Text bodies decode as a JSON string and an empty body as `null`, so
    /// `Value`, `String` and `Option<_>` targets accept every payload.
    pub fn decode<T: DeserializeOwned>(self) -> Result<T, ClientError> {
        let value = match self {
            Self::Json(value) => value,
            Self::Text(text) => Value::String(text),
            Self::NoContent => Value::Null,
        };
        Ok(serde_json::from_value(value)?)
    }

    /// Returns the body as text: raw text as-is, JSON strings unquoted, other
    /// JSON rendered compactly, and an empty string for no content.
    pub fn into_text(self) -> String {
        match self {
            Self::Json(Value::String(text)) | Self::Text(text) => text,
            Self::Json(value) => value.to_string(),
            Self::NoContent => String::new(),
        }
    }

    pub fn is_no_content(&self) -> bool {
        matches!(self, Self::NoContent)
    }
}

/// Blocking executor shared by every façade.
///
/// Performs exactly one HTTP exchange per call with no retry and no caching.
/// The service-issued session cookie is carried by the underlying client's
/// cookie store.
#[derive(Debug)]
pub struct Transport {
    session: Session,
    http: reqwest::blocking::Client,
}

impl Transport {
    pub(crate) fn new(session: Session, http: reqwest::blocking::Client) -> Self {
        Self { session, http }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Sends `request` and classifies the response.
    ///
    /// Error statuses are classified before the body is interpreted as a
    /// success payload. A `401` from any endpoint clears the session's
    /// authenticated flag.
    pub fn execute(&self, request: Request) -> Result<Payload, ClientError> {
        let url = self.build_url(&request.path)?;
        debug!(method = %request.method, path = %request.path, "sending request");

        let mut builder = self
            .http
            .request(request.method, url)
            .header(reqwest::header::ACCEPT, "application/json");

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }

        if let Some(json_body) = &request.body {
            builder = builder.json(json_body);
        }

        let response = builder.send()?;
        let status = response.status();
        let payload = response.text()?;
        debug!(status = status.as_u16(), path = %request.path, "received response");

        if let Some(error) = classify(status, &request.path, &payload) {
            if error.kind() == ErrorKind::Authentication {
                if self.session.is_authenticated() {
                    warn!(path = %request.path, "session rejected by server");
                }
                self.session.set_authenticated(false);
            }
            return Err(error);
        }

        Ok(decode_success(payload))
    }

    fn build_url(&self, path: &str) -> Result<Url, ClientError> {
        let relative = path.trim_start_matches('/');
        self.session
            .base_url()
            .join(relative)
            .map_err(|_| ClientError::InvalidPath(path.to_owned()))
    }
}

/// Interprets a success body: JSON when it parses, raw text otherwise.
fn decode_success(payload: String) -> Payload {
    if payload.is_empty() {
        return Payload::NoContent;
    }
    match serde_json::from_str(&payload) {
        Ok(value) => Payload::Json(value),
        Err(_) => Payload::Text(payload),
    }
}

pub(crate) fn ensure_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let mut path = url.path().to_owned();
        path.push('/');
        url.set_path(&path);
    }
    url
}

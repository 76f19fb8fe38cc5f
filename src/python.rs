use std::str::FromStr;
use std::sync::Mutex;

use pyo3::create_exception;
use pyo3::exceptions::{PyException, PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use reqwest::Method;
use serde_json::Value;

use crate::{ClientConfig, ClientError, ErrorKind, Payload, Request, ZerobyteClient};

create_exception!(zerobyte_client, ZerobyteError, PyException);
create_exception!(zerobyte_client, AuthenticationError, ZerobyteError);
create_exception!(zerobyte_client, APIError, ZerobyteError);
create_exception!(zerobyte_client, NotFoundError, APIError);
create_exception!(zerobyte_client, ValidationError, APIError);

#[pyclass(name = "Client")]
pub struct PyClient {
    inner: Mutex<ZerobyteClient>,
}

#[pymethods]
impl PyClient {
    #[new]
    #[pyo3(signature = (url, username, password, auto_login=true))]
    fn new(url: String, username: String, password: String, auto_login: bool) -> PyResult<Self> {
        let config = ClientConfig::new(url, username, password).auto_login(auto_login);
        let client = ZerobyteClient::new(config).map_err(to_py_error)?;

        Ok(Self {
            inner: Mutex::new(client),
        })
    }

    /// Logs in again and returns the auth response as a JSON string, or
    /// `None` when the server echoed no profile.
    fn login(&self) -> PyResult<Option<String>> {
        let response = self.with_client(ZerobyteClient::login)?;
        response
            .map(|response| serde_json::to_string(&response).map_err(to_py_value_error))
            .transpose()
    }

    fn logout(&self) -> PyResult<()> {
        self.with_client(ZerobyteClient::logout)
    }

    #[getter]
    fn is_authenticated(&self) -> PyResult<bool> {
        let client = self
            .inner
            .lock()
            .map_err(|e| PyRuntimeError::new_err(e.to_string()))?;
        Ok(client.is_authenticated())
    }

    fn get(&self, path: String) -> PyResult<Option<String>> {
        self.request("GET".to_owned(), path, None, None)
    }

    /// Sends a raw request; returns the body as a string, or `None` when empty.
    #[pyo3(signature = (method, path, query_json=None, body_json=None))]
    fn request(
        &self,
        method: String,
        path: String,
        query_json: Option<String>,
        body_json: Option<String>,
    ) -> PyResult<Option<String>> {
        let parsed_method = Method::from_str(&method)
            .map_err(|e| PyValueError::new_err(format!("invalid HTTP method: {e}")))?;
        let mut request = Request::new(parsed_method, path);
        request.query = parse_map_arg(query_json)?;
        request.body = body_json
            .map(|raw| serde_json::from_str::<Value>(&raw).map_err(to_py_value_error))
            .transpose()?;

        let payload = self.with_client(|client| client.request(request))?;
        Ok(match payload {
            Payload::NoContent => None,
            Payload::Json(value) => Some(value.to_string()),
            Payload::Text(text) => Some(text),
        })
    }
}

impl PyClient {
    fn with_client<T>(
        &self,
        call: impl FnOnce(&ZerobyteClient) -> Result<T, ClientError>,
    ) -> PyResult<T> {
        let client = self
            .inner
            .lock()
            .map_err(|e| PyRuntimeError::new_err(e.to_string()))?;
        call(&client).map_err(to_py_error)
    }
}

#[pymodule]
fn zerobyte_client(py: Python<'_>, module: &Bound<'_, PyModule>) -> PyResult<()> {
    module.add_class::<PyClient>()?;
    module.add("ZerobyteError", py.get_type::<ZerobyteError>())?;
    module.add("AuthenticationError", py.get_type::<AuthenticationError>())?;
    module.add("APIError", py.get_type::<APIError>())?;
    module.add("NotFoundError", py.get_type::<NotFoundError>())?;
    module.add("ValidationError", py.get_type::<ValidationError>())?;
    Ok(())
}

fn to_py_error(error: ClientError) -> PyErr {
    let message = error.to_string();
    match error.kind() {
        ErrorKind::Authentication => AuthenticationError::new_err(message),
        ErrorKind::NotFound => NotFoundError::new_err(message),
        ErrorKind::Validation => ValidationError::new_err(message),
        ErrorKind::Api => APIError::new_err(message),
        ErrorKind::Config => PyValueError::new_err(message),
        ErrorKind::Transport | ErrorKind::Serialization => ZerobyteError::new_err(message),
    }
}

fn to_py_value_error(error: impl std::fmt::Display) -> PyErr {
    PyValueError::new_err(error.to_string())
}

fn parse_map_arg(raw_json: Option<String>) -> PyResult<Vec<(String, String)>> {
    let Some(raw_json) = raw_json else {
        return Ok(Vec::new());
    };

    let value: Value = serde_json::from_str(&raw_json).map_err(to_py_value_error)?;
    let object = value
        .as_object()
        .ok_or_else(|| PyValueError::new_err("expected a JSON object"))?;

    Ok(object
        .iter()
        .map(|(key, value)| {
            let rendered = match value.as_str() {
                Some(as_str) => as_str.to_owned(),
                None => value.to_string(),
            };
            (key.to_owned(), rendered)
        })
        .collect())
}

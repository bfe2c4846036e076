//! Shared test support: an in-memory transport and a recording
//! notification sink.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use courtside_client::{ClientError, ClientResult, HttpApi, Notify};
use shared::ApiError;

/// Notification sink that records everything it is shown
#[derive(Debug, Default)]
pub struct RecordingNotify {
    pub successes: Mutex<Vec<String>>,
    pub infos: Mutex<Vec<String>>,
    pub warnings: Mutex<Vec<String>>,
    pub errors: Mutex<Vec<String>>,
}

impl RecordingNotify {
    pub fn error_count(&self) -> usize {
        self.errors.lock().unwrap().len()
    }

    pub fn last_error(&self) -> Option<String> {
        self.errors.lock().unwrap().last().cloned()
    }
}

impl Notify for RecordingNotify {
    fn success(&self, message: &str) {
        self.successes.lock().unwrap().push(message.to_string());
    }

    fn info(&self, message: &str) {
        self.infos.lock().unwrap().push(message.to_string());
    }

    fn warning(&self, message: &str) {
        self.warnings.lock().unwrap().push(message.to_string());
    }

    fn error(&self, message: &str) {
        self.errors.lock().unwrap().push(message.to_string());
    }
}

/// One recorded transport call
#[derive(Debug, Clone)]
pub struct Call {
    pub path: String,
    pub body: Value,
}

type Handler = Box<dyn Fn(&Value) -> ClientResult<Value> + Send + Sync>;

/// In-memory transport: handlers return the envelope's `data` payload (or
/// a `ClientError` standing for a non-zero code / transport failure), and
/// every call is recorded for sequence assertions.
#[derive(Default)]
pub struct MockHttp {
    handlers: HashMap<String, Handler>,
    calls: Mutex<Vec<Call>>,
}

impl MockHttp {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for a path
    pub fn on<F>(mut self, path: &str, handler: F) -> Self
    where
        F: Fn(&Value) -> ClientResult<Value> + Send + Sync + 'static,
    {
        self.handlers.insert(path.to_string(), Box::new(handler));
        self
    }

    /// Register a handler that always answers the same payload
    pub fn on_data(self, path: &str, data: Value) -> Self {
        self.on(path, move |_| Ok(data.clone()))
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Paths in call order
    pub fn call_paths(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(|c| c.path.clone()).collect()
    }

    /// Recorded bodies of calls to one path
    pub fn calls_to(&self, path: &str) -> Vec<Value> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.path == path)
            .map(|c| c.body.clone())
            .collect()
    }

    fn dispatch(&self, path: &str, body: Value) -> ClientResult<Value> {
        self.calls.lock().unwrap().push(Call {
            path: path.to_string(),
            body: body.clone(),
        });
        let handler = self
            .handlers
            .get(path)
            .unwrap_or_else(|| panic!("no handler for {path}"));
        handler(&body)
    }
}

#[async_trait]
impl HttpApi for MockHttp {
    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ClientResult<T> {
        let body = Value::Array(
            query
                .iter()
                .map(|(k, v)| Value::Array(vec![Value::from(*k), Value::from(v.clone())]))
                .collect(),
        );
        let data = self.dispatch(path, body)?;
        Ok(serde_json::from_value(data)?)
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let data = self.dispatch(path, serde_json::to_value(body)?)?;
        Ok(serde_json::from_value(data)?)
    }

    async fn post_empty<B: Serialize + Sync>(&self, path: &str, body: &B) -> ClientResult<()> {
        self.dispatch(path, serde_json::to_value(body)?)?;
        Ok(())
    }
}

/// An application error as the transport surfaces it
pub fn api_err(code: i32, msg: &str) -> ClientError {
    ClientError::Api(ApiError::new(code, msg))
}

/// Query-pair lookup for bodies recorded from GET calls
pub fn query_value(body: &Value, key: &str) -> Option<String> {
    body.as_array()?.iter().find_map(|pair| {
        let pair = pair.as_array()?;
        (pair[0].as_str()? == key).then(|| pair[1].as_str().unwrap_or_default().to_string())
    })
}

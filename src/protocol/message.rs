//! JSON-RPC 2.0 envelopes exchanged with the harness.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{AppError, Result};

/// Protocol version carried by every outbound message.
pub const JSONRPC_VERSION: &str = "2.0";

/// Error code for an unrecognised method.
pub const METHOD_NOT_FOUND: i64 = -32601;

/// Outbound handshake announcing the implemented methods.
pub const METHOD_START: &str = "jipe.start";
/// Outbound seed-population notification.
pub const METHOD_POPULATE: &str = "evolve.populate";
/// Inbound fitness request.
pub const METHOD_MEASURE: &str = "evolve.measure";
/// Inbound template request.
pub const METHOD_TEMPLATE: &str = "evolve.template";

/// Capabilities declared in the `jipe.start` handshake.
pub const IMPLEMENTS: &[&str] = &["request.evolve.measure", "request.evolve.template"];

/// Inbound message envelope.
///
/// `jsonrpc` is not validated. Absent `id`, `method`, and `params` decode
/// as `null`.
#[derive(Debug, Clone, Deserialize)]
pub struct Request {
    /// Correlation identifier, echoed verbatim.
    #[serde(default)]
    pub id: Value,
    /// Method name; `null` marks a notification.
    #[serde(default)]
    pub method: Value,
    /// Method-specific payload.
    #[serde(default)]
    pub params: Value,
}

/// Routing decision for an inbound request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    /// `evolve.measure`.
    Measure,
    /// `evolve.template`.
    Template,
    /// Anything else, including non-string method values.
    Unknown(String),
}

impl Request {
    /// Decode one inbound line.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Protocol` if the line is not a JSON object.
    pub fn parse(line: &str) -> Result<Self> {
        serde_json::from_str(line).map_err(|err| AppError::Protocol(format!("malformed json: {err}")))
    }

    /// Resolve the method, or `None` when the message is a notification.
    #[must_use]
    pub fn method(&self) -> Option<Method> {
        match &self.method {
            Value::Null => None,
            Value::String(name) => Some(match name.as_str() {
                METHOD_MEASURE => Method::Measure,
                METHOD_TEMPLATE => Method::Template,
                other => Method::Unknown(other.to_owned()),
            }),
            other => Some(Method::Unknown(other.to_string())),
        }
    }

    /// The candidate configuration carried by `evolve.measure`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Protocol` if `params.solution` is absent.
    pub fn solution(&self) -> Result<&Value> {
        self.params.get("solution").ok_or_else(|| {
            AppError::Protocol("missing required field: params.solution".into())
        })
    }
}

/// JSON-RPC error object.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RpcError {
    /// Numeric error code.
    pub code: i64,
    /// Human-readable message; empty for `method not found`.
    pub message: String,
}

impl RpcError {
    /// The `-32601` error returned for unrecognised methods.
    #[must_use]
    pub fn method_not_found() -> Self {
        Self {
            code: METHOD_NOT_FOUND,
            message: String::new(),
        }
    }
}

/// Outbound response. Exactly one of `result` or `error` is set.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Response {
    jsonrpc: &'static str,
    /// Correlation identifier copied from the request.
    pub id: Value,
    /// Success payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// Failure payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
}

impl Response {
    /// Successful response carrying `result`.
    #[must_use]
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Error response carrying `error`.
    #[must_use]
    pub fn failure(id: Value, error: RpcError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            result: None,
            error: Some(error),
        }
    }
}

/// Outbound message initiated by the worker.
#[derive(Debug, Clone, Serialize)]
pub struct Outbound<P> {
    jsonrpc: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<u64>,
    method: &'static str,
    params: P,
}

/// `jipe.start` parameters.
#[derive(Debug, Clone, Serialize)]
pub struct StartParams {
    /// Methods this worker answers.
    pub implements: &'static [&'static str],
}

/// `evolve.populate` parameters.
#[derive(Debug, Clone, Serialize)]
pub struct PopulateParams<'a> {
    /// Seed configurations in catalog order.
    pub solutions: &'a [Value],
}

impl Outbound<StartParams> {
    /// The handshake announcing [`IMPLEMENTS`].
    #[must_use]
    pub fn start(id: u64) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id: Some(id),
            method: METHOD_START,
            params: StartParams {
                implements: IMPLEMENTS,
            },
        }
    }
}

impl<'a> Outbound<PopulateParams<'a>> {
    /// The seed-population notification.
    #[must_use]
    pub fn populate(solutions: &'a [Value]) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id: None,
            method: METHOD_POPULATE,
            params: PopulateParams { solutions },
        }
    }
}

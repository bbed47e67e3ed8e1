//! Inbound event normalization.
//!
//! Two invocation shapes reach the function: API Gateway proxy events carrying
//! `httpMethod`, and direct invocations carrying an `action`. Both are resolved
//! here into a single [`Operation`] plus a [`Params`] view over the query string
//! and the parsed body, so dispatch never looks at the raw event.

use lambda_http::http::Method;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::store::Item;

pub(crate) const UNSUPPORTED_METHOD: &str = "Unsupported method";
pub(crate) const UNSUPPORTED_ACTION: &str = "Unsupported action or method";

// Fields stay untyped: a wrongly-typed method or action is an unsupported
// operation, not a malformed event.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct InboundEvent {
    #[serde(rename = "httpMethod")]
    pub http_method: Option<Value>,
    pub action: Option<Value>,
    pub body: Option<Value>,
    #[serde(rename = "queryStringParameters")]
    pub query_string_parameters: Option<Value>,
}

/// `None` inside a variant means the field was present but not a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Invocation<'a> {
    Http(Option<&'a str>),
    Direct(Option<&'a str>),
    Unrecognized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Operation {
    Create,
    Read,
    Update,
    Delete,
    Preflight,
    /// Carries the error message reported to the caller.
    Unsupported(&'static str),
}

impl Operation {
    pub(crate) fn name(&self) -> &'static str {
        match self {
            Operation::Create => "create",
            Operation::Read => "read",
            Operation::Update => "update",
            Operation::Delete => "delete",
            Operation::Preflight => "preflight",
            Operation::Unsupported(_) => "unsupported",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Malformed event: queryStringParameters must be an object, got {0}")]
pub(crate) struct MalformedQuery(pub String);

impl InboundEvent {
    /// `action` is never consulted once `httpMethod` is present.
    pub(crate) fn invocation(&self) -> Invocation<'_> {
        match (&self.http_method, &self.action) {
            (Some(method), _) => Invocation::Http(method.as_str()),
            (None, Some(action)) => Invocation::Direct(action.as_str()),
            (None, None) => Invocation::Unrecognized,
        }
    }

    pub(crate) fn operation(&self) -> Operation {
        match self.invocation() {
            Invocation::Http(Some(method)) => match Method::from_bytes(method.as_bytes()) {
                Ok(Method::OPTIONS) => Operation::Preflight,
                Ok(Method::GET) => Operation::Read,
                Ok(Method::POST) => Operation::Create,
                Ok(Method::PUT) | Ok(Method::PATCH) => Operation::Update,
                Ok(Method::DELETE) => Operation::Delete,
                _ => Operation::Unsupported(UNSUPPORTED_METHOD),
            },
            Invocation::Http(None) => Operation::Unsupported(UNSUPPORTED_METHOD),
            Invocation::Direct(Some(action)) => match action {
                "create" => Operation::Create,
                "read" => Operation::Read,
                "update" => Operation::Update,
                "delete" => Operation::Delete,
                _ => Operation::Unsupported(UNSUPPORTED_ACTION),
            },
            Invocation::Direct(None) | Invocation::Unrecognized => {
                Operation::Unsupported(UNSUPPORTED_ACTION)
            }
        }
    }

    pub(crate) fn into_params(self) -> Params {
        Params {
            query: self.query_string_parameters.unwrap_or_default(),
            body: parse_body(self.body),
        }
    }
}

/// Parses the raw body into an object, degrading to an empty one.
///
/// Never fails: malformed JSON, non-object JSON and missing bodies all yield `{}`.
pub(crate) fn parse_body(raw: Option<Value>) -> Item {
    match raw {
        Some(Value::String(text)) => match serde_json::from_str(&text) {
            Ok(Value::Object(body)) => body,
            _ => Item::new(),
        },
        Some(Value::Object(body)) => body,
        _ => Item::new(),
    }
}

/// Null, `false`, zero, `""`, `[]` and `{}` count as absent.
pub(crate) fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64() != Some(0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(values) => !values.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

pub(crate) fn key_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum Source {
    Query(&'static str),
    Body(&'static str),
}

#[derive(Debug, Default)]
pub(crate) struct Params {
    query: Value,
    body: Item,
}

impl Params {
    /// First non-empty value across `sources`, in order.
    ///
    /// The query string is only checked for shape when a query source is consulted.
    pub(crate) fn first(&self, sources: &[Source]) -> Result<Option<&Value>, MalformedQuery> {
        for source in sources {
            let value = match source {
                Source::Query(name) => self.query_map()?.and_then(|query| query.get(*name)),
                Source::Body(name) => self.body.get(*name),
            };
            if let Some(value) = value.filter(|value| is_present(value)) {
                return Ok(Some(value));
            }
        }
        Ok(None)
    }

    fn query_map(&self) -> Result<Option<&Map<String, Value>>, MalformedQuery> {
        match &self.query {
            Value::Object(query) => Ok(Some(query)),
            other if !is_present(other) => Ok(None),
            other => Err(MalformedQuery(other.to_string())),
        }
    }

    pub(crate) fn into_body(self) -> Item {
        self.body
    }
}

use serde_json::Value;

use crate::event::{key_string, MalformedQuery, Operation, Params, Source};
use crate::store::{Item, KEY_ATTRIBUTE};

const CREATE_KEY: &[Source] = &[Source::Body("user_id")];
const READ_KEY: &[Source] = &[
    Source::Query("userId"),
    Source::Body("user_id"),
    Source::Body("userId"),
];
const DELETE_KEY: &[Source] = &[Source::Query("userId"), Source::Body("user_id")];
const UPDATE_KEY: &[Source] = &[Source::Body("user_id")];
const UPDATE_NAME: &[Source] = &[Source::Body("name")];

/// Attribute written by the update operation.
pub(crate) const NAME_ATTRIBUTE: &str = "name";

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Command {
    Create { id: String, item: Item },
    Read { id: String },
    Update { id: String, name: Value },
    Delete { id: String },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field} required for {operation}")]
pub(crate) struct ValidationError {
    pub field: &'static str,
    pub operation: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub(crate) enum RequestError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error(transparent)]
    Malformed(#[from] MalformedQuery),
}

fn require<'a>(
    params: &'a Params,
    sources: &[Source],
    field: &'static str,
    operation: Operation,
) -> Result<&'a Value, RequestError> {
    params.first(sources)?.ok_or_else(|| {
        RequestError::Invalid(ValidationError {
            field,
            operation: operation.name(),
        })
    })
}

impl Command {
    /// `None` for preflight and unsupported operations, which never reach the store.
    pub(crate) fn from_params(
        operation: Operation,
        params: Params,
    ) -> Option<Result<Self, RequestError>> {
        let command = match operation {
            Operation::Create => Self::create(params),
            Operation::Read => require(&params, READ_KEY, KEY_ATTRIBUTE, operation)
                .map(|id| Command::Read { id: key_string(id) }),
            Operation::Update => Self::update(&params),
            Operation::Delete => require(&params, DELETE_KEY, KEY_ATTRIBUTE, operation)
                .map(|id| Command::Delete { id: key_string(id) }),
            Operation::Preflight | Operation::Unsupported(_) => return None,
        };
        Some(command)
    }

    // The caller's `user_id` stays in the item next to the normalized `userId`.
    fn create(params: Params) -> Result<Self, RequestError> {
        let id = key_string(require(&params, CREATE_KEY, "user_id", Operation::Create)?);
        let mut item = params.into_body();
        item.insert(KEY_ATTRIBUTE.to_string(), Value::String(id.clone()));
        Ok(Command::Create { id, item })
    }

    fn update(params: &Params) -> Result<Self, RequestError> {
        let id = key_string(require(params, UPDATE_KEY, "user_id", Operation::Update)?);
        let name = require(params, UPDATE_NAME, NAME_ATTRIBUTE, Operation::Update)?.clone();
        Ok(Command::Update { id, name })
    }
}

use lambda_http::{lambda_runtime::LambdaEvent, Error};
use serde_json::{json, Value};

use crate::event::{InboundEvent, MalformedQuery, Operation, UNSUPPORTED_ACTION};
use crate::request::{Command, RequestError, NAME_ATTRIBUTE};
use crate::response::{ApiResponse, Cors};
use crate::store::{StoreError, UserStore};

#[derive(Debug, thiserror::Error)]
enum HandlerError {
    #[error("Malformed event: {0}")]
    Event(#[from] serde_json::Error),
    #[error(transparent)]
    Query(#[from] MalformedQuery),
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[tracing::instrument(skip_all, fields(request_id = %event.context.request_id))]
pub(crate) async fn function_handler(
    store: &dyn UserStore,
    cors: &Cors,
    event: LambdaEvent<Value>,
) -> Result<ApiResponse, Error> {
    Ok(handle(store, cors, event.payload).await)
}

pub(crate) async fn handle(store: &dyn UserStore, cors: &Cors, event: Value) -> ApiResponse {
    tracing::debug!(event = %event, "received event");

    match dispatch(store, cors, event).await {
        Ok(response) => response,
        Err(e) => {
            tracing::error!(error = %e, "request failed");
            cors.internal_error(&e.to_string())
        }
    }
}

async fn dispatch(
    store: &dyn UserStore,
    cors: &Cors,
    event: Value,
) -> Result<ApiResponse, HandlerError> {
    let event: InboundEvent = serde_json::from_value(event)?;
    let operation = event.operation();
    tracing::info!(operation = operation.name(), "resolved operation");

    let command = match operation {
        Operation::Preflight => return Ok(cors.ok(json!({ "message": "CORS preflight" }))),
        Operation::Unsupported(message) => return Ok(cors.bad_request(message)),
        _ => match Command::from_params(operation, event.into_params()) {
            Some(Ok(command)) => command,
            Some(Err(RequestError::Invalid(invalid))) => {
                tracing::debug!(%invalid, "validation failed");
                return Ok(cors.bad_request(&invalid.to_string()));
            }
            Some(Err(RequestError::Malformed(malformed))) => return Err(malformed.into()),
            None => return Ok(cors.bad_request(UNSUPPORTED_ACTION)),
        },
    };

    let response = match command {
        Command::Create { id, item } => {
            store.put(item.clone()).await?;
            cors.ok(json!({
                "message": format!("User {id} created"),
                "item": item,
            }))
        }
        Command::Read { id } => {
            let item = store.get(&id).await?.unwrap_or_default();
            cors.ok(json!({ "item": item }))
        }
        Command::Update { id, name } => {
            store.update(&id, NAME_ATTRIBUTE, name).await?;
            cors.ok(json!({ "message": format!("User {id} updated") }))
        }
        Command::Delete { id } => {
            store.delete(&id).await?;
            cors.ok(json!({ "message": format!("User {id} deleted") }))
        }
    };
    Ok(response)
}

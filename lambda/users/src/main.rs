use lambda_http::{lambda_runtime, service_fn, Error};

mod config;
mod event;
mod http_handler;
mod request;
mod response;
mod store;

use config::Config;
use http_handler::function_handler;
use response::Cors;
use store::DynamoUserStore;

#[tokio::main]
async fn main() -> Result<(), Error> {
    lambda_http::tracing::init_default_subscriber();

    let config = Config::from_env()?;
    let store = DynamoUserStore::from_config(&config).await;
    let cors = Cors::new(config.allowed_origin.as_str());

    tracing::info!(
        table = store.table_name(),
        region = %config.region,
        allowed_origin = %config.allowed_origin,
        "users handler initialized"
    );

    lambda_runtime::run(service_fn(|event| function_handler(&store, &cors, event))).await
}

use lambda_http::{run, service_fn, tracing, Error};
use std::env;
use std::sync::Arc;
use taskhub_shared::{database, AppConfig, AppState};

mod http_handler;
mod local;

use http_handler::function_handler;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing::init_default_subscriber();

    let config = AppConfig::from_env();
    let store = database::connect(&config).await;
    let state = Arc::new(AppState::new(config, store));

    // Inside Lambda the runtime API is always advertised; anywhere else we
    // serve the same handler over plain HTTP.
    if env::var("AWS_LAMBDA_RUNTIME_API").is_ok() {
        run(service_fn(move |event| {
            let state = state.clone();
            async move { function_handler(event, state).await }
        }))
        .await
    } else {
        local::serve(state).await
    }
}

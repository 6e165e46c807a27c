use std::sync::Arc;

use summarizer::api::{AppState, handler};

#[tokio::main]
async fn main() -> Result<(), lambda_runtime::Error> {
    summarizer::setup_logging();

    let state = Arc::new(AppState::from_env());
    lambda_runtime::run(lambda_runtime::service_fn(move |event| {
        let state = Arc::clone(&state);
        async move { handler(state, event).await }
    }))
    .await
}

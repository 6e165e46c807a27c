//! API Lambda handler - thin router that delegates to the route handlers.
//!
//! Paths are matched by suffix so API Gateway stage prefixes (`/prod/...`) are
//! tolerated. CORS headers are applied to every response on the way out.

use std::sync::Arc;

use lambda_runtime::{Error, LambdaEvent};
use serde_json::Value;
use tracing::{Instrument, info, info_span, warn};
use uuid::Uuid;

use super::helpers::{apply_cors, err_response, preflight};
use super::parsing;
use super::routes;
use super::state::AppState;
use crate::ai::RemoteModel;

pub use self::function_handler as handler;

enum Route {
    Root,
    Health,
    ModelInfo,
    Summarize,
    SummarizeFile,
}

impl Route {
    fn resolve(path: &str) -> Option<Self> {
        if path == "/" {
            Some(Route::Root)
        } else if path.ends_with("/api/summarize-file") {
            Some(Route::SummarizeFile)
        } else if path.ends_with("/api/summarize") {
            Some(Route::Summarize)
        } else if path.ends_with("/api/health") {
            Some(Route::Health)
        } else if path.ends_with("/api/model-info") {
            Some(Route::ModelInfo)
        } else {
            None
        }
    }

    fn method(&self) -> &'static str {
        match self {
            Route::Root | Route::Health | Route::ModelInfo => "GET",
            Route::Summarize | Route::SummarizeFile => "POST",
        }
    }
}

/// Lambda handler for the API entrypoint.
///
/// # Errors
///
/// Never fails in practice; every problem is turned into an HTTP response.
#[tracing::instrument(level = "info", skip(state, event))]
pub async fn function_handler<M: RemoteModel>(
    state: Arc<AppState<M>>,
    event: LambdaEvent<Value>,
) -> Result<Value, Error> {
    Ok(handle_request(&state, &event.payload).await)
}

/// Routes one API Gateway proxy event and returns the proxy response.
pub async fn handle_request<M: RemoteModel>(state: &AppState<M>, event: &Value) -> Value {
    let request_id = parsing::request_id(event)
        .map_or_else(|| Uuid::new_v4().to_string(), ToString::to_string);
    let method = parsing::request_method(event);
    let path = parsing::request_path(event);

    let span = info_span!("request", %request_id, %method, %path);
    async move {
        info!("API Lambda received request");

        let mut response = route(state, event, &method, &path).await;
        apply_cors(&mut response, &state.cors, parsing::header(event, "origin"));

        info!(status = response["statusCode"].as_u64().unwrap_or(0), "Responding");
        response
    }
    .instrument(span)
    .await
}

async fn route<M: RemoteModel>(
    state: &AppState<M>,
    event: &Value,
    method: &str,
    path: &str,
) -> Value {
    if method == "OPTIONS" {
        return preflight(parsing::header(event, "access-control-request-headers"));
    }

    let Some(route) = Route::resolve(path) else {
        warn!("No route for path");
        return err_response(404, "Not Found");
    };
    if method != route.method() {
        warn!(expected = route.method(), "Method not allowed");
        return err_response(405, "Method Not Allowed");
    }

    match route {
        Route::Root => routes::root(),
        Route::Health => routes::health(state),
        Route::ModelInfo => routes::model_info(state),
        Route::Summarize => routes::summarize_text(state, event).await,
        Route::SummarizeFile => routes::summarize_file(state, event).await,
    }
}

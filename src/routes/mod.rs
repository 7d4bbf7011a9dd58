// HTTP routes: SNS delivery endpoint and version

mod http;
mod sns;

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::dispatcher::Dispatcher;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) dispatcher: Arc<Dispatcher>,
    pub(crate) http: reqwest::Client,
}

pub fn app(dispatcher: Arc<Dispatcher>) -> Router {
    let state = AppState {
        dispatcher,
        http: reqwest::Client::new(),
    };
    Router::new()
        .route("/version", get(http::version_handler)) // GET /version
        .route("/sns", post(sns::sns_handler)) // POST /sns
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

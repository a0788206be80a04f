//! Endpoints of HTTP server.
//!
use std::sync::Arc;

use axum::{
    extract::Multipart,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Extension, Json,
};
use bytes::Bytes;
use common::protocol::ClassifyResponse;

use crate::{capture::acquire, page::render_index, pipeline::Pipeline};

/// State shared by all handlers. Read-only after startup.
pub struct AppState {
    pub pipeline: Pipeline,
    pub presentation: Option<Bytes>,
}

/// Health check endpoint.
pub async fn healthcheck() -> &'static str {
    "healthy"
}

/// Landing page with the camera widget.
pub async fn index(Extension(state): Extension<Arc<AppState>>) -> Html<String> {
    Html(render_index(
        env!("CARGO_PKG_VERSION"),
        state.presentation.is_some(),
    ))
}

pub async fn presentation(Extension(state): Extension<Arc<AppState>>) -> Response {
    match &state.presentation {
        Some(bytes) => ([(header::CONTENT_TYPE, "image/jpeg")], bytes.clone()).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Classify the photo posted by the camera widget.
pub async fn classify(
    Extension(state): Extension<Arc<AppState>>,
    multipart: Multipart,
) -> (StatusCode, Json<ClassifyResponse>) {
    let capture = match acquire(multipart).await {
        Ok(capture) => capture,
        Err(e) => {
            log::warn!("Malformed capture request: {e:#}");
            return (
                StatusCode::BAD_REQUEST,
                Json(ClassifyResponse::failed(format!("{e:#}"))),
            );
        }
    };

    let (status, response) = classify_capture(&state.pipeline, capture.as_deref());
    (status, Json(response))
}

/// Run the pipeline on an optional capture and map the result to an HTTP answer.
///
/// Failures only end the current attempt; the server keeps serving.
pub fn classify_capture(
    pipeline: &Pipeline,
    capture: Option<&[u8]>,
) -> (StatusCode, ClassifyResponse) {
    match pipeline.run(capture) {
        Ok(None) => {
            log::debug!("No capture yet");
            (StatusCode::OK, ClassifyResponse::NoCapture)
        }
        Ok(Some(report)) => {
            log::info!("Classified capture: {}", report.outcome);
            (
                StatusCode::OK,
                ClassifyResponse::classified(report.prediction.into_vec(), report.outcome),
            )
        }
        Err(e) => {
            log::warn!("Classification failed: {e}");
            let status = match e.is_client_error() {
                true => StatusCode::UNPROCESSABLE_ENTITY,
                false => StatusCode::INTERNAL_SERVER_ERROR,
            };
            (status, ClassifyResponse::failed(e))
        }
    }
}

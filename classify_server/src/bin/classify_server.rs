//! Classify server binary.
//!
use std::{net::SocketAddr, path::PathBuf, sync::Arc};

use anyhow::Result;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Extension, Router,
};
use clap::Parser;
use classify_server::{
    endpoints::{self, classify, healthcheck, index, AppState},
    nn::TractClassifier,
    pipeline::Pipeline,
    presentation::load_presentation,
    DEFAULT_MODEL_PATH, DEFAULT_PRESENTATION_IMAGE,
};
use env_logger::TimestampPrecision;

/// Upper bound for a posted snapshot.
const MAX_CAPTURE_BYTES: usize = 16 * 1024 * 1024;

#[derive(Parser, Debug)]
#[clap(author, version)]
struct Args {
    /// Address to serve the page on
    #[clap(long, default_value = "127.0.0.1:3000")]
    server_address: String,

    /// Classifier exported to ONNX
    #[clap(long, default_value = DEFAULT_MODEL_PATH)]
    model_path: PathBuf,

    /// Image shown on the landing page
    #[clap(long, default_value = DEFAULT_PRESENTATION_IMAGE)]
    presentation_image: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Setup logger
    env_logger::builder()
        .format_timestamp(Some(TimestampPrecision::Millis))
        .init();

    // Without a model there is nothing to serve
    let model = TractClassifier::load(&args.model_path)?;
    let pipeline = Pipeline::new(Box::new(model));

    let presentation = load_presentation(&args.presentation_image);

    let state = Arc::new(AppState {
        pipeline,
        presentation,
    });

    // Build HTTP server with endpoints
    let app = Router::new()
        .route("/", get(index))
        .route("/healthcheck", get(healthcheck))
        .route("/presentation.jpg", get(endpoints::presentation))
        .route("/classify", post(classify))
        .layer(DefaultBodyLimit::max(MAX_CAPTURE_BYTES))
        .layer(Extension(state));

    // Serve HTTP server
    let addr: SocketAddr = args.server_address.parse()?;
    log::info!("Serving on http://{}", addr);
    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await?;

    Ok(())
}

//! Classify image files from the command line.
//!
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use classify_server::{nn::TractClassifier, pipeline::Pipeline, DEFAULT_MODEL_PATH};
use env_logger::TimestampPrecision;

#[derive(Parser, Debug)]
#[clap(author, version)]
struct Args {
    /// Classifier exported to ONNX
    #[clap(long, default_value = DEFAULT_MODEL_PATH)]
    model_path: PathBuf,

    /// Images to classify
    #[clap(required = true)]
    images: Vec<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::builder()
        .format_timestamp(Some(TimestampPrecision::Millis))
        .init();

    let pipeline = Pipeline::new(Box::new(TractClassifier::load(&args.model_path)?));

    for path in args.images.iter() {
        let data = match std::fs::read(path) {
            Ok(data) => data,
            Err(e) => {
                log::warn!("Could not read {}: {}", path.display(), e);
                continue;
            }
        };

        match pipeline.classify(&data) {
            Ok(report) => println!(
                "{}: probabilities {:?}, {}",
                path.display(),
                report.prediction.as_slice(),
                report.outcome
            ),
            Err(e) => log::warn!("{}: {}", path.display(), e),
        }
    }

    Ok(())
}

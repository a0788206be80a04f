//! Post an image file to the classify server, the way the camera widget does.
//!
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use common::protocol::ClassifyResponse;
use env_logger::TimestampPrecision;
use reqwest::multipart;

#[derive(Parser, Debug)]
#[clap(author, version)]
struct Args {
    /// Address of the classify server to connect to
    #[clap(long, default_value = "127.0.0.1:3000")]
    address: String,

    /// Image file to classify
    image: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::builder()
        .format_timestamp(Some(TimestampPrecision::Millis))
        .init();

    let data = tokio::fs::read(&args.image)
        .await
        .with_context(|| format!("failed to read {}", args.image.display()))?;
    log::info!("Sending {} ({} bytes)", args.image.display(), data.len());

    let file_name = args
        .image
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "snapshot".into());
    let part = multipart::Part::bytes(data).file_name(file_name);
    let form = multipart::Form::new().part("image", part);

    let response = reqwest::Client::new()
        .post(&format!("http://{}/classify", &args.address))
        .multipart(form)
        .send()
        .await?;

    let status = response.status();
    let answer: ClassifyResponse = response.json().await?;
    log::debug!("Server answered {status}");

    println!("{answer}");

    Ok(())
}

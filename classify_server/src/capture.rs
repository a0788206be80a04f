//! Acquire the snapshot sent by the camera widget.
//!
//! The page posts a `multipart/form-data` body with one part named [`CAPTURE_FIELD`]. Having
//! no such part, or an empty one, is the normal state before the first photo is taken.
use axum::extract::Multipart;
use bytes::Bytes;

/// Name of the multipart field carrying the encoded image.
pub const CAPTURE_FIELD: &str = "image";

/// Take the captured image out of a multipart body.
///
/// Returns `Ok(None)` when no photo was taken. Other fields are skipped.
pub async fn acquire(mut multipart: Multipart) -> anyhow::Result<Option<Bytes>> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(CAPTURE_FIELD) {
            log::debug!("Skipping multipart field {:?}", field.name());
            continue;
        }

        let data = field.bytes().await?;
        log::debug!("Capture of {} bytes received", data.len());
        return Ok(non_empty(data));
    }

    Ok(None)
}

/// Treat an empty buffer as "no image yet".
pub fn non_empty(data: Bytes) -> Option<Bytes> {
    match data.is_empty() {
        true => None,
        false => Some(data),
    }
}

//! Turn a captured image into the tensor layout the classifier was trained on.
//!
//! The network expects a single NHWC image of 224x224 RGB pixels with values scaled by
//! `(pixel / 127.0) - 1.0`. The image is stretched to the input size; no cropping or
//! letterboxing happens.

use image::{imageops::FilterType, RgbImage};
use tract_onnx::prelude::*;

use crate::{ClassifierError, INPUT_SIZE};

/// Divisor of the affine pixel map. The paired model was trained with 127, not 127.5.
pub const NORMALIZATION_SCALE: f32 = 127.0;

/// Network input of shape `(1, INPUT_SIZE, INPUT_SIZE, 3)` with values in `[-1, 1]`.
///
/// Only constructed by [`preprocess_image`], so holding one guarantees the shape contract.
#[derive(Debug)]
pub struct InputTensor(tract_ndarray::Array4<f32>);

impl InputTensor {
    pub fn shape(&self) -> &[usize] {
        self.0.shape()
    }

    /// Value at batch 0, row `y`, column `x`, channel `c`.
    pub fn value(&self, y: usize, x: usize, c: usize) -> f32 {
        self.0[[0, y, x, c]]
    }

    pub fn iter(&self) -> impl Iterator<Item = &f32> {
        self.0.iter()
    }

    pub fn into_tensor(self) -> Tensor {
        self.0.into()
    }
}

/// Decode an encoded capture (JPEG, PNG, ...) into an RGB pixel grid.
pub fn decode_capture(buf: &[u8]) -> Result<RgbImage, ClassifierError> {
    let image = image::load_from_memory(buf)?;
    log::debug!("Decoded capture of {}x{}", image.width(), image.height());

    Ok(image.to_rgb8())
}

/// Stretch an image of any resolution to the square network input size.
pub fn resize_capture(image: &RgbImage) -> RgbImage {
    image::imageops::resize(image, INPUT_SIZE, INPUT_SIZE, FilterType::Triangle)
}

/// Map a raw channel value onto the training range.
///
/// `255 / 127 - 1` slightly overshoots 1, so the top value saturates at 1.
pub fn normalize_value(raw: u8) -> f32 {
    (raw as f32 / NORMALIZATION_SCALE - 1.0).min(1.0)
}

/// Resize, normalize and batch an already decoded image.
pub fn preprocess_image(image: &RgbImage) -> InputTensor {
    let resized = resize_capture(image);
    let size = INPUT_SIZE as usize;

    let array = tract_ndarray::Array4::from_shape_fn((1, size, size, 3), |(_, y, x, c)| {
        normalize_value(resized[(x as _, y as _)][c])
    });

    InputTensor(array)
}

/// Full preprocessing of an encoded capture.
pub fn preprocess(buf: &[u8]) -> Result<InputTensor, ClassifierError> {
    let image = decode_capture(buf)?;
    Ok(preprocess_image(&image))
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use image::{DynamicImage, ImageOutputFormat, Rgb};

    use super::*;

    fn gradient(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| {
            Rgb([
                (x * 255 / width.max(1)) as u8,
                (y * 255 / height.max(1)) as u8,
                ((x + y) % 256) as u8,
            ])
        })
    }

    #[test]
    fn any_resolution_yields_fixed_shape_and_range() {
        for (width, height) in [(1, 1), (640, 480), (31, 517), (224, 224), (1280, 720)] {
            let tensor = preprocess_image(&gradient(width, height));

            assert_eq!(tensor.shape(), &[1, 224, 224, 3]);
            assert!(tensor.iter().all(|v| (-1.0..=1.0).contains(v)));
        }
    }

    #[test]
    fn normalization_is_invertible() {
        let image = gradient(300, 200);
        let resized = resize_capture(&image);
        let tensor = preprocess_image(&image);

        for y in 0..224 {
            for x in 0..224 {
                for c in 0..3 {
                    let raw = resized[(x as u32, y as u32)][c];
                    let restored = ((tensor.value(y, x, c) + 1.0) * NORMALIZATION_SCALE).round();
                    if raw < 255 {
                        assert_eq!(restored as u8, raw);
                    } else {
                        assert_eq!(restored as u8, 254);
                    }
                }
            }
        }
    }

    #[test]
    fn constant_is_127() {
        assert_eq!(normalize_value(0), -1.0);
        assert_eq!(normalize_value(127), 0.0);
        assert!((normalize_value(254) - 1.0).abs() < 1e-6);
        assert_eq!(normalize_value(255), 1.0);
    }

    #[test]
    fn uniform_image_stays_uniform() {
        let image = RgbImage::from_pixel(97, 53, Rgb([127, 0, 254]));
        let tensor = preprocess_image(&image);

        assert!(tensor.value(0, 0, 0).abs() < 1e-6);
        assert_eq!(tensor.value(111, 57, 1), -1.0);
        assert!((tensor.value(223, 223, 2) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn encoded_png_is_decoded() {
        let mut buf = Vec::new();
        DynamicImage::ImageRgb8(gradient(64, 48))
            .write_to(&mut Cursor::new(&mut buf), ImageOutputFormat::Png)
            .unwrap();

        let tensor = preprocess(&buf).unwrap();
        assert_eq!(tensor.shape(), &[1, 224, 224, 3]);
    }

    #[test]
    fn garbage_is_a_shape_error() {
        let result = preprocess(b"definitely not an image");
        assert!(matches!(result, Err(ClassifierError::Shape(_))));
    }
}

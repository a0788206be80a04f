//! Classify single camera snapshots in the browser with a pre-trained network.

pub mod capture;
pub mod endpoints;
pub mod error;
pub mod interpret;
pub mod nn;
pub mod page;
pub mod pipeline;
pub mod preproc;
pub mod presentation;

pub use error::ClassifierError;

/// Side length of the square network input.
pub const INPUT_SIZE: u32 = 224;

/// Default location of the exported classifier.
pub const DEFAULT_MODEL_PATH: &str = "keras_model.onnx";

/// Default location of the image shown on the landing page.
pub const DEFAULT_PRESENTATION_IMAGE: &str = "OIG5.jpg";

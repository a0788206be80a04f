//! Single-shot classification of one capture.
//!
use std::time::Instant;

use common::protocol::Outcome;

use crate::{
    interpret::interpret,
    nn::{InferModel, PredictionVector},
    preproc::preprocess,
    ClassifierError,
};

/// Result of one successful run.
#[derive(Debug, PartialEq)]
pub struct Report {
    pub prediction: PredictionVector,
    pub outcome: Outcome,
}

/// Preprocessing, inference and interpretation around an already loaded model.
///
/// A pipeline can only be built from a model handle, so nothing downstream of the loader
/// runs when loading fails.
pub struct Pipeline {
    model: Box<dyn InferModel>,
}

impl Pipeline {
    pub fn new(model: Box<dyn InferModel>) -> Self {
        Self { model }
    }

    /// Run the pipeline if a capture is present. `None` in, `None` out.
    pub fn run(&self, capture: Option<&[u8]>) -> Result<Option<Report>, ClassifierError> {
        match capture {
            None => Ok(None),
            Some(buf) => self.classify(buf).map(Some),
        }
    }

    /// Classify one encoded image.
    pub fn classify(&self, capture: &[u8]) -> Result<Report, ClassifierError> {
        let start = Instant::now();

        let input = preprocess(capture)?;
        log::debug!("Preprocessing done after {:?}", start.elapsed());

        let prediction = self.model.predict(input)?;
        log::debug!(
            "Inference done after {:?}: {:?}",
            start.elapsed(),
            prediction.as_slice()
        );

        let outcome = interpret(&prediction)?;

        Ok(Report {
            prediction,
            outcome,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::{
        io::Cursor,
        sync::atomic::{AtomicUsize, Ordering},
        sync::Arc,
    };

    use common::protocol::Label;
    use image::{DynamicImage, ImageOutputFormat, Rgb, RgbImage};

    use super::*;
    use crate::preproc::InputTensor;

    struct FixedModel {
        output: Vec<f32>,
        calls: Arc<AtomicUsize>,
    }

    impl InferModel for FixedModel {
        fn predict(&self, input: InputTensor) -> Result<PredictionVector, ClassifierError> {
            assert_eq!(input.shape(), &[1, 224, 224, 3]);
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(PredictionVector::new(self.output.clone()))
        }
    }

    struct BrokenModel;

    impl InferModel for BrokenModel {
        fn predict(&self, _input: InputTensor) -> Result<PredictionVector, ClassifierError> {
            Err(ClassifierError::Inference(anyhow::anyhow!("shape mismatch")))
        }
    }

    fn pipeline_with(output: Vec<f32>) -> (Pipeline, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let model = FixedModel {
            output,
            calls: calls.clone(),
        };
        (Pipeline::new(Box::new(model)), calls)
    }

    fn jpeg(width: u32, height: u32) -> Vec<u8> {
        let mut buf = Vec::new();
        DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([10, 200, 30])))
            .write_to(&mut Cursor::new(&mut buf), ImageOutputFormat::Jpeg(90))
            .unwrap();
        buf
    }

    #[test]
    fn no_capture_runs_nothing() {
        let (pipeline, calls) = pipeline_with(vec![0.9, 0.1]);

        assert_eq!(pipeline.run(None).unwrap(), None);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn capture_is_classified_once() {
        let (pipeline, calls) = pipeline_with(vec![0.3, 0.6]);

        let report = pipeline.run(Some(jpeg(640, 480).as_slice())).unwrap().unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(report.prediction.as_slice(), &[0.3, 0.6]);
        assert_eq!(
            report.outcome,
            Outcome::Confident {
                label: Label::Up,
                score: 0.6
            }
        );
    }

    #[test]
    fn undecodable_capture_never_reaches_model() {
        let (pipeline, calls) = pipeline_with(vec![0.9, 0.1]);

        let result = pipeline.run(Some(&b"\xff\xd8 truncated"[..]));

        assert!(matches!(result, Err(ClassifierError::Shape(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn inference_failure_is_surfaced() {
        let pipeline = Pipeline::new(Box::new(BrokenModel));

        let result = pipeline.classify(&jpeg(32, 32));

        assert!(matches!(result, Err(ClassifierError::Inference(_))));
    }
}

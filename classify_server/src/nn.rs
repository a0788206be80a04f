use std::path::Path;

use tract_onnx::prelude::*;

use crate::{preproc::InputTensor, ClassifierError, INPUT_SIZE};

type NnModel = SimplePlan<TypedFact, Box<dyn TypedOp>, Graph<TypedFact, Box<dyn TypedOp>>>;

/// Class probabilities of one image, in the order the model was trained with.
///
/// Values come straight from the network and are not checked to sum to one.
#[derive(Clone, Debug, PartialEq)]
pub struct PredictionVector(Vec<f32>);

impl PredictionVector {
    pub fn new(probabilities: Vec<f32>) -> Self {
        Self(probabilities)
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<f32> {
        self.0
    }
}

/// A loaded classifier that can be queried for one image at a time.
pub trait InferModel: Send + Sync {
    fn predict(&self, input: InputTensor) -> Result<PredictionVector, ClassifierError>;
}

/// Classifier exported to ONNX and executed with tract.
pub struct TractClassifier {
    model: NnModel,
}

impl TractClassifier {
    /// Load, optimize and plan the model at `path` for an NHWC `1x224x224x3` input.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ClassifierError> {
        let path = path.as_ref();
        let model = build_plan(path).map_err(|reason| ClassifierError::Load {
            path: path.to_owned(),
            reason,
        })?;
        log::info!("Loaded model from {}", path.display());

        Ok(Self { model })
    }
}

impl InferModel for TractClassifier {
    fn predict(&self, input: InputTensor) -> Result<PredictionVector, ClassifierError> {
        let raw_nn_out = self
            .model
            .run(tvec!(input.into_tensor().into()))
            .map_err(ClassifierError::Inference)?;

        let probabilities: Vec<f32> = raw_nn_out
            .first()
            .ok_or(ClassifierError::Output(0))?
            .to_array_view::<f32>()
            .map_err(ClassifierError::Inference)?
            .iter()
            .cloned()
            .collect();

        Ok(PredictionVector::new(probabilities))
    }
}

fn build_plan(path: &Path) -> TractResult<NnModel> {
    let size = INPUT_SIZE as usize;
    let input_fact = InferenceFact::dt_shape(f32::datum_type(), tvec!(1, size, size, 3));

    tract_onnx::onnx()
        .model_for_path(path)?
        .with_input_fact(0, input_fact)?
        .into_optimized()?
        .into_runnable()
}

//! Threshold rule mapping the model output onto a label.
//!
//! The rule inspects class 0 and then class 1, each against [`CONFIDENCE_THRESHOLD`]. It is
//! not an argmax: when both exceed the threshold the first one wins, and any classes past
//! the second are ignored.
use common::protocol::{Label, Outcome, CONFIDENCE_THRESHOLD};

use crate::{nn::PredictionVector, ClassifierError};

/// Labels in the order of the model's output classes.
const CLASS_LABELS: [Label; 2] = [Label::Left, Label::Up];

pub fn interpret(prediction: &PredictionVector) -> Result<Outcome, ClassifierError> {
    let probabilities = prediction.as_slice();
    if probabilities.len() < CLASS_LABELS.len() {
        return Err(ClassifierError::Output(probabilities.len()));
    }

    let outcome = CLASS_LABELS
        .iter()
        .zip(probabilities.iter())
        .find(|(_, score)| **score > CONFIDENCE_THRESHOLD)
        .map(|(label, score)| Outcome::Confident {
            label: *label,
            score: *score,
        })
        .unwrap_or(Outcome::NoConfidentClass);

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(probabilities: &[f32]) -> Outcome {
        interpret(&PredictionVector::new(probabilities.to_vec())).unwrap()
    }

    #[test]
    fn first_class_above_threshold_is_left() {
        assert_eq!(
            run(&[0.7, 0.2]),
            Outcome::Confident {
                label: Label::Left,
                score: 0.7
            }
        );
    }

    #[test]
    fn second_class_above_threshold_is_up() {
        assert_eq!(
            run(&[0.3, 0.6]),
            Outcome::Confident {
                label: Label::Up,
                score: 0.6
            }
        );
    }

    #[test]
    fn nothing_above_threshold() {
        assert_eq!(run(&[0.4, 0.4]), Outcome::NoConfidentClass);
        // The threshold is exclusive
        assert_eq!(run(&[0.5, 0.5]), Outcome::NoConfidentClass);
    }

    #[test]
    fn first_match_wins() {
        assert_eq!(
            run(&[0.6, 0.6]),
            Outcome::Confident {
                label: Label::Left,
                score: 0.6
            }
        );
    }

    #[test]
    fn extra_classes_are_ignored() {
        assert_eq!(run(&[0.1, 0.1, 0.8]), Outcome::NoConfidentClass);
    }

    #[test]
    fn nan_is_never_confident() {
        assert_eq!(run(&[f32::NAN, 0.9]).to_string(), "Up (score 0.900)");
        assert_eq!(run(&[f32::NAN, f32::NAN]), Outcome::NoConfidentClass);
    }

    #[test]
    fn short_vector_is_rejected() {
        let result = interpret(&PredictionVector::new(vec![0.9]));
        assert!(matches!(result, Err(ClassifierError::Output(1))));
    }
}

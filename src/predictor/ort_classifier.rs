//! ONNX Runtime backed classifier adapter.
//!
//! Wraps a pre-trained ONNX digit model behind the [`Classifier`] trait so
//! an exported model file can be plugged into the recognizer. Input and
//! output tensor names are discovered from the session, so any model with
//! a single `(batch, 28, 28, 1)` input and a `(batch, classes)` output
//! works without extra configuration.

use crate::core::{DigitError, SimpleError, Tensor2D, Tensor4D};
use crate::predictor::Classifier;
use ndarray::ArrayView2;
use ort::session::Session;
use ort::value::TensorRef;
use std::path::Path;
use std::sync::Mutex;

/// A digit classifier backed by an ONNX Runtime session.
#[derive(Debug)]
pub struct OrtClassifier {
    session: Mutex<Session>,
    input_name: String,
    output_name: String,
}

impl OrtClassifier {
    /// Loads a classifier from an ONNX model file.
    ///
    /// # Arguments
    ///
    /// * `model_path` - Path to the exported model
    ///
    /// # Returns
    ///
    /// A new `OrtClassifier`, or a `DigitError` if the session cannot be
    /// created or the model declares no inputs or outputs.
    pub fn from_file(model_path: &Path) -> Result<Self, DigitError> {
        let session = Session::builder()?.commit_from_file(model_path)?;

        let input_name = session
            .inputs
            .first()
            .map(|input| input.name.clone())
            .ok_or_else(|| {
                DigitError::classification_error(SimpleError::new(
                    "model declares no inputs - it may be invalid or corrupted",
                ))
            })?;
        let output_name = session
            .outputs
            .first()
            .map(|output| output.name.clone())
            .ok_or_else(|| {
                DigitError::classification_error(SimpleError::new(
                    "model declares no outputs - it may be invalid or corrupted",
                ))
            })?;

        Ok(Self {
            session: Mutex::new(session),
            input_name,
            output_name,
        })
    }
}

impl Classifier for OrtClassifier {
    fn classify(&self, input: &Tensor4D) -> Result<Tensor2D, DigitError> {
        let batch = input.shape()[0];

        let input_tensor = TensorRef::from_array_view(input.view())?;
        let inputs = ort::inputs![self.input_name.as_str() => input_tensor];

        let mut session = self.session.lock().map_err(|_| {
            DigitError::classification_error(SimpleError::new(
                "failed to acquire classifier session lock",
            ))
        })?;

        let outputs = session.run(inputs)?;
        let (shape, data) = outputs[self.output_name.as_str()].try_extract_tensor::<f32>()?;

        if shape.len() != 2 {
            return Err(DigitError::classification_error(SimpleError::new(format!(
                "expected a (batch, classes) output, got {}D tensor with shape {:?}",
                shape.len(),
                shape
            ))));
        }

        let classes = shape[1] as usize;
        if data.len() != batch * classes {
            return Err(DigitError::classification_error(SimpleError::new(format!(
                "output data size mismatch: {} values for {} x {} scores",
                data.len(),
                batch,
                classes
            ))));
        }

        let view = ArrayView2::from_shape((batch, classes), data)?;
        Ok(view.to_owned())
    }
}

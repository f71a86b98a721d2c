use std::path::{Path, PathBuf};

use ndarray::Array1;
use tract_onnx::prelude::*;

use crate::error::BundleError;
use crate::features::FeatureVector;

/// A fitted model mapping one feature vector to one price.
pub trait Regressor: Send + Sync {
    fn predict(&self, features: &FeatureVector) -> Result<f64, BundleError>;
}

/// Closed-form linear model exported as plain coefficients.
#[derive(Debug, Clone)]
pub struct LinearRegressor {
    intercept: f64,
    coefficients: Array1<f64>,
}

impl LinearRegressor {
    pub fn new(intercept: f64, coefficients: Vec<f64>, width: usize) -> Result<Self, BundleError> {
        if coefficients.len() != width {
            return Err(BundleError::Shape {
                what: "linear coefficients",
                expected: width,
                found: coefficients.len(),
            });
        }
        Ok(Self {
            intercept,
            coefficients: Array1::from(coefficients),
        })
    }
}

impl Regressor for LinearRegressor {
    fn predict(&self, features: &FeatureVector) -> Result<f64, BundleError> {
        if features.len() != self.coefficients.len() {
            return Err(BundleError::Shape {
                what: "feature vector",
                expected: self.coefficients.len(),
                found: features.len(),
            });
        }
        Ok(self.intercept + self.coefficients.dot(features.values()))
    }
}

type OnnxPlan = SimplePlan<TypedFact, Box<dyn TypedOp>, Graph<TypedFact, Box<dyn TypedOp>>>;

/// ONNX graph (e.g. a converted gradient-boosting model) taking a `[1, n]` f32 input.
pub struct OnnxRegressor {
    plan: OnnxPlan,
    width: usize,
}

impl OnnxRegressor {
    pub fn load(path: &Path, width: usize) -> Result<Self, BundleError> {
        let fail = |stage: &str, e: TractError| BundleError::Onnx {
            path: PathBuf::from(path),
            reason: format!("{stage}: {e}"),
        };

        let plan = tract_onnx::onnx()
            .model_for_path(path)
            .map_err(|e| fail("read", e))?
            .with_input_fact(
                0,
                InferenceFact::dt_shape(f32::datum_type(), tvec!(1usize, width)),
            )
            .map_err(|e| fail("input shape", e))?
            .into_optimized()
            .map_err(|e| fail("optimize", e))?
            .into_runnable()
            .map_err(|e| fail("plan", e))?;

        log::info!("loaded ONNX regressor from {} ({} features)", path.display(), width);
        Ok(Self { plan, width })
    }
}

impl Regressor for OnnxRegressor {
    fn predict(&self, features: &FeatureVector) -> Result<f64, BundleError> {
        if features.len() != self.width {
            return Err(BundleError::Shape {
                what: "feature vector",
                expected: self.width,
                found: features.len(),
            });
        }

        let row = features.to_f32();
        let input: Tensor = tract_ndarray::Array2::from_shape_vec((1, self.width), row)
            .map_err(|e| BundleError::Inference(e.to_string()))?
            .into();

        let outputs = self
            .plan
            .run(tvec!(input.into()))
            .map_err(|e| BundleError::Inference(e.to_string()))?;

        let first = outputs.first().ok_or(BundleError::EmptyOutput)?;
        let view = first
            .to_array_view::<f32>()
            .map_err(|e| BundleError::Inference(e.to_string()))?;
        view.iter()
            .next()
            .map(|price| f64::from(*price))
            .ok_or(BundleError::EmptyOutput)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_prediction_is_intercept_plus_dot() {
        let model = LinearRegressor::new(10.0, vec![2.0, -1.0, 0.5], 3).unwrap();
        let mut x = FeatureVector::zeros(3);
        x.set(0, 3.0);
        x.set(1, 4.0);
        x.set(2, 2.0);
        assert_eq!(model.predict(&x).unwrap(), 13.0);
    }

    #[test]
    fn coefficient_count_must_match_layout() {
        let err = LinearRegressor::new(0.0, vec![1.0, 2.0], 3).unwrap_err();
        assert!(matches!(err, BundleError::Shape { expected: 3, found: 2, .. }));
    }

    #[test]
    fn missing_onnx_file_is_a_load_error() {
        let result = OnnxRegressor::load(Path::new("does/not/exist.onnx"), 4);
        assert!(matches!(result, Err(BundleError::Onnx { .. })));
    }
}

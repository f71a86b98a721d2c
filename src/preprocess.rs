//! Preprocessing artifacts fitted alongside the regressor.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::BundleError;
use crate::features::{FeatureLayout, FeatureVector};

/// Standard-scaler parameters as exported from training.
///
/// Without `features` the scaler applies to the leading columns of the model.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScalerSpec {
    #[serde(default)]
    pub features: Option<Vec<String>>,
    #[serde(default)]
    pub mean: Option<Vec<f64>>,
    #[serde(default)]
    pub scale: Option<Vec<f64>>,
}

#[derive(Debug, Clone)]
pub struct StandardScaler {
    columns: Vec<usize>,
    mean: Vec<f64>,
    scale: Vec<f64>,
}

impl StandardScaler {
    pub fn resolve(spec: ScalerSpec, layout: &FeatureLayout) -> Result<Self, BundleError> {
        let width = spec
            .features
            .as_ref()
            .map(Vec::len)
            .or_else(|| spec.mean.as_ref().map(Vec::len))
            .or_else(|| spec.scale.as_ref().map(Vec::len))
            .ok_or(BundleError::EmptyScaler)?;

        let columns = match &spec.features {
            Some(features) => features
                .iter()
                .map(|name| {
                    layout
                        .position(name)
                        .ok_or_else(|| BundleError::MissingFeature(name.clone()))
                })
                .collect::<Result<Vec<_>, _>>()?,
            None => {
                if width > layout.len() {
                    return Err(BundleError::Shape {
                        what: "scaler",
                        expected: layout.len(),
                        found: width,
                    });
                }
                let columns: Vec<usize> = (0..width).collect();
                if !covers_numeric_features(&columns, layout) {
                    log::warn!(
                        "scaler has no feature names and its leading {} columns are not \
                         Area/Bedrooms/Bathrooms",
                        width
                    );
                }
                columns
            }
        };

        let mean = spec.mean.unwrap_or_else(|| vec![0.0; width]);
        let scale: Vec<f64> = spec
            .scale
            .unwrap_or_else(|| vec![1.0; width])
            .into_iter()
            .map(|s| if s == 0.0 { 1.0 } else { s })
            .collect();

        for (what, found) in [("scaler mean", mean.len()), ("scaler scale", scale.len())] {
            if found != width {
                return Err(BundleError::Shape {
                    what,
                    expected: width,
                    found,
                });
            }
        }

        Ok(Self {
            columns,
            mean,
            scale,
        })
    }

    pub fn columns(&self) -> &[usize] {
        &self.columns
    }

    pub fn transform(&self, x: &mut FeatureVector) {
        for (i, &column) in self.columns.iter().enumerate() {
            let scaled = (x.get(column) - self.mean[i]) / self.scale[i];
            x.set(column, scaled);
        }
    }
}

/// Whether `columns` are exactly the numeric feature positions, in any order.
pub fn covers_numeric_features(columns: &[usize], layout: &FeatureLayout) -> bool {
    let mut expected = [layout.area(), layout.bedrooms(), layout.bathrooms()];
    expected.sort_unstable();
    let mut actual = columns.to_vec();
    actual.sort_unstable();
    actual == expected
}

/// Categories seen by the one-hot encoder during training, keyed by column prefix.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryEncoder {
    #[serde(default)]
    pub categories: BTreeMap<String, Vec<String>>,
}

impl CategoryEncoder {
    /// `None` when the encoder has no record of `prefix`.
    pub fn knows(&self, prefix: &str, value: &str) -> Option<bool> {
        self.categories
            .get(prefix)
            .map(|known| known.iter().any(|k| k == value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> FeatureLayout {
        FeatureLayout::new(
            ["Area", "Bedrooms", "Bathrooms", "District_Marina"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        )
        .unwrap()
    }

    fn vector(values: &[f64]) -> FeatureVector {
        let mut x = FeatureVector::zeros(values.len());
        for (i, v) in values.iter().enumerate() {
            x.set(i, *v);
        }
        x
    }

    #[test]
    fn unnamed_scaler_covers_leading_columns() {
        let spec = ScalerSpec {
            features: None,
            mean: Some(vec![1000.0, 2.0, 2.0]),
            scale: Some(vec![500.0, 1.0, 2.0]),
        };
        let scaler = StandardScaler::resolve(spec, &layout()).unwrap();
        let mut x = vector(&[1200.0, 3.0, 4.0, 1.0]);
        scaler.transform(&mut x);
        assert!((x.get(0) - 0.4).abs() < 1e-12);
        assert_eq!(x.get(1), 1.0);
        assert_eq!(x.get(2), 1.0);
        assert_eq!(x.get(3), 1.0);
    }

    #[test]
    fn named_scaler_follows_feature_names() {
        let spec = ScalerSpec {
            features: Some(vec!["Bathrooms".into(), "Area".into()]),
            mean: Some(vec![1.0, 100.0]),
            scale: Some(vec![1.0, 10.0]),
        };
        let scaler = StandardScaler::resolve(spec, &layout()).unwrap();
        assert_eq!(scaler.columns(), &[2, 0]);
        let mut x = vector(&[200.0, 5.0, 3.0, 0.0]);
        scaler.transform(&mut x);
        assert_eq!(x.get(0), 10.0);
        assert_eq!(x.get(1), 5.0);
        assert_eq!(x.get(2), 2.0);
    }

    #[test]
    fn leading_columns_are_checked_against_numeric_positions() {
        assert!(covers_numeric_features(&[0, 1, 2], &layout()));
        assert!(covers_numeric_features(&[2, 0, 1], &layout()));

        let shifted = FeatureLayout::new(
            ["District_Marina", "Area", "Bedrooms", "Bathrooms"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        )
        .unwrap();
        assert!(!covers_numeric_features(&[0, 1, 2], &shifted));
        assert!(!covers_numeric_features(&[0, 1], &layout()));
    }

    #[test]
    fn zero_scale_leaves_centred_value() {
        let spec = ScalerSpec {
            features: None,
            mean: Some(vec![3.0]),
            scale: Some(vec![0.0]),
        };
        let scaler = StandardScaler::resolve(spec, &layout()).unwrap();
        let mut x = vector(&[5.0, 0.0, 0.0, 0.0]);
        scaler.transform(&mut x);
        assert_eq!(x.get(0), 2.0);
    }

    #[test]
    fn mismatched_lengths_are_rejected() {
        let spec = ScalerSpec {
            features: None,
            mean: Some(vec![1.0, 2.0, 3.0]),
            scale: Some(vec![1.0, 2.0]),
        };
        let err = StandardScaler::resolve(spec, &layout()).unwrap_err();
        assert!(matches!(err, BundleError::Shape { expected: 3, found: 2, .. }));
    }

    #[test]
    fn empty_scaler_is_rejected() {
        let err = StandardScaler::resolve(ScalerSpec::default(), &layout()).unwrap_err();
        assert!(matches!(err, BundleError::EmptyScaler));
    }

    #[test]
    fn encoder_reports_unlisted_prefixes_as_unknown() {
        let encoder: CategoryEncoder =
            serde_json::from_str(r#"{"categories": {"District": ["Marina", "Downtown"]}}"#)
                .unwrap();
        assert_eq!(encoder.knows("District", "Marina"), Some(true));
        assert_eq!(encoder.knows("District", "Atlantis"), Some(false));
        assert_eq!(encoder.knows("B_type", "Villa"), None);
    }
}

//! The trained artifacts (regressor, scaler, categorical encoder) and the
//! encoding of a pending request plus form input into a model prediction.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::BundleError;
use crate::features::{
    one_hot_column, FeatureLayout, FeatureVector, BUILDING_TYPE_PREFIX, DISTRICT_PREFIX,
};
use crate::models::{PendingRequest, PropertyDetails};
use crate::preprocess::{CategoryEncoder, ScalerSpec, StandardScaler};
use crate::regressor::{LinearRegressor, OnnxRegressor, Regressor};

/// Model manifest: the training column order plus how to run the regressor.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelManifest {
    pub feature_names: Vec<String>,
    #[serde(flatten)]
    pub regressor: RegressorSpec,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "format", rename_all = "lowercase")]
pub enum RegressorSpec {
    /// Path is resolved against the manifest's directory when relative.
    Onnx { path: PathBuf },
    Linear {
        intercept: f64,
        coefficients: Vec<f64>,
    },
}

#[derive(Debug, Clone)]
pub struct ArtifactPaths {
    pub model: PathBuf,
    pub scaler: PathBuf,
    pub encoder: Option<PathBuf>,
}

pub struct ModelBundle {
    layout: FeatureLayout,
    scaler: StandardScaler,
    encoder: CategoryEncoder,
    regressor: Box<dyn Regressor>,
}

impl ModelBundle {
    pub fn load(paths: &ArtifactPaths) -> Result<Self, BundleError> {
        let manifest: ModelManifest = read_json(&paths.model)?;
        let scaler: ScalerSpec = read_json(&paths.scaler)?;
        let encoder = match &paths.encoder {
            Some(path) if path.exists() => read_json(path)?,
            Some(path) => {
                log::warn!(
                    "encoder file {} not found, category diagnostics disabled",
                    path.display()
                );
                CategoryEncoder::default()
            }
            None => CategoryEncoder::default(),
        };
        let base_dir = paths.model.parent().unwrap_or_else(|| Path::new("."));

        Self::from_parts(manifest, scaler, encoder, base_dir)
    }

    pub fn from_parts(
        manifest: ModelManifest,
        scaler: ScalerSpec,
        encoder: CategoryEncoder,
        base_dir: &Path,
    ) -> Result<Self, BundleError> {
        let layout = FeatureLayout::new(manifest.feature_names)?;
        let scaler = StandardScaler::resolve(scaler, &layout)?;

        let regressor: Box<dyn Regressor> = match manifest.regressor {
            RegressorSpec::Onnx { path } => {
                Box::new(OnnxRegressor::load(&base_dir.join(path), layout.len())?)
            }
            RegressorSpec::Linear {
                intercept,
                coefficients,
            } => Box::new(LinearRegressor::new(intercept, coefficients, layout.len())?),
        };

        for (prefix, values) in &encoder.categories {
            for value in values {
                let column = one_hot_column(prefix, value);
                if layout.position(&column).is_none() {
                    log::debug!("encoder category {column} has no model column");
                }
            }
        }

        Ok(Self {
            layout,
            scaler,
            encoder,
            regressor,
        })
    }

    pub fn layout(&self) -> &FeatureLayout {
        &self.layout
    }

    /// Builds the scaled input vector. Unknown or missing categories leave
    /// every indicator of their group at zero.
    pub fn encode(&self, pending: &PendingRequest, details: &PropertyDetails) -> FeatureVector {
        let mut x = FeatureVector::zeros(self.layout.len());
        x.set(self.layout.area(), details.area);
        x.set(self.layout.bedrooms(), details.bedrooms as f64);
        x.set(self.layout.bathrooms(), details.bathrooms as f64);

        let categories = [
            (DISTRICT_PREFIX, pending.district.as_deref()),
            (BUILDING_TYPE_PREFIX, pending.building_type.as_deref()),
        ];
        for (prefix, value) in categories {
            let Some(value) = value else { continue };
            let column = one_hot_column(prefix, value);
            match self.layout.position(&column) {
                Some(position) => x.set(position, 1.0),
                None => {
                    if self.encoder.knows(prefix, value) == Some(false) {
                        log::warn!("{prefix} `{value}` was not seen in training");
                    } else {
                        log::debug!("no model column {column}");
                    }
                }
            }
        }

        self.scaler.transform(&mut x);
        x
    }

    pub fn predict(
        &self,
        pending: &PendingRequest,
        details: &PropertyDetails,
    ) -> Result<f64, BundleError> {
        let x = self.encode(pending, details);
        self.regressor.predict(&x)
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, BundleError> {
    let text = fs::read_to_string(path).map_err(|source| BundleError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| BundleError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

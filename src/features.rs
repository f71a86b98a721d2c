//! Feature layout of the trained model and the vector handed to it.

use std::collections::HashMap;

use ndarray::Array1;

use crate::error::BundleError;

pub const AREA: &str = "Area";
pub const BEDROOMS: &str = "Bedrooms";
pub const BATHROOMS: &str = "Bathrooms";

pub const DISTRICT_PREFIX: &str = "District";
pub const BUILDING_TYPE_PREFIX: &str = "B_type";

/// Name of the indicator column for `value` within a categorical group.
pub fn one_hot_column(prefix: &str, value: &str) -> String {
    format!("{prefix}_{value}")
}

/// Ordered feature names with positions resolved once at load time.
#[derive(Debug, Clone)]
pub struct FeatureLayout {
    names: Vec<String>,
    index: HashMap<String, usize>,
    area: usize,
    bedrooms: usize,
    bathrooms: usize,
}

impl FeatureLayout {
    pub fn new(names: Vec<String>) -> Result<Self, BundleError> {
        let mut index = HashMap::with_capacity(names.len());
        for (position, name) in names.iter().enumerate() {
            if index.insert(name.clone(), position).is_some() {
                return Err(BundleError::DuplicateFeature(name.clone()));
            }
        }

        let require = |name: &str| {
            index
                .get(name)
                .copied()
                .ok_or_else(|| BundleError::MissingFeature(name.to_string()))
        };
        let area = require(AREA)?;
        let bedrooms = require(BEDROOMS)?;
        let bathrooms = require(BATHROOMS)?;

        Ok(Self {
            names,
            index,
            area,
            bedrooms,
            bathrooms,
        })
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn area(&self) -> usize {
        self.area
    }

    pub fn bedrooms(&self) -> usize {
        self.bedrooms
    }

    pub fn bathrooms(&self) -> usize {
        self.bathrooms
    }
}

/// Model input for a single prediction, one slot per layout feature.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector(Array1<f64>);

impl FeatureVector {
    pub fn zeros(len: usize) -> Self {
        Self(Array1::zeros(len))
    }

    pub fn set(&mut self, position: usize, value: f64) {
        self.0[position] = value;
    }

    pub fn get(&self, position: usize) -> f64 {
        self.0[position]
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn values(&self) -> &Array1<f64> {
        &self.0
    }

    pub fn to_f32(&self) -> Vec<f32> {
        self.0.iter().map(|v| *v as f32).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn one_hot_names_are_plain_concatenation() {
        assert_eq!(one_hot_column(DISTRICT_PREFIX, "Marina"), "District_Marina");
        assert_eq!(
            one_hot_column(BUILDING_TYPE_PREFIX, "Villa Compound"),
            "B_type_Villa Compound"
        );
    }

    #[test]
    fn numeric_positions_are_resolved_by_name() {
        let layout =
            FeatureLayout::new(names(&["District_Marina", "Bathrooms", "Area", "Bedrooms"]))
                .unwrap();
        assert_eq!(layout.area(), 2);
        assert_eq!(layout.bedrooms(), 3);
        assert_eq!(layout.bathrooms(), 1);
        assert_eq!(layout.position("District_Marina"), Some(0));
        assert_eq!(layout.position("District_Unknown"), None);
    }

    #[test]
    fn missing_numeric_feature_is_rejected() {
        let err = FeatureLayout::new(names(&["Area", "Bedrooms"])).unwrap_err();
        assert!(matches!(err, BundleError::MissingFeature(name) if name == BATHROOMS));
    }

    #[test]
    fn duplicate_feature_is_rejected() {
        let err =
            FeatureLayout::new(names(&["Area", "Bedrooms", "Bathrooms", "Area"])).unwrap_err();
        assert!(matches!(err, BundleError::DuplicateFeature(name) if name == AREA));
    }
}

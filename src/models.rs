use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AppError;

/// Location and category reported by the device when it opens a request.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct PendingRequest {
    pub district: Option<String>,
    pub building_type: Option<String>,
}

/// Body of `POST /initialize-request`.
///
/// Fields are taken as raw JSON so that a device sending `"request_id": 42`
/// registers the same id a browser later uses in `/input/42`.
#[derive(Debug, Deserialize, Default)]
pub struct InitializeRequest {
    #[serde(default)]
    pub request_id: Option<Value>,
    #[serde(default)]
    pub district: Option<Value>,
    #[serde(default)]
    pub building_type: Option<Value>,
}

impl InitializeRequest {
    pub fn request_id(&self) -> Option<String> {
        scalar_text(self.request_id.as_ref())
    }

    pub fn pending(&self) -> PendingRequest {
        PendingRequest {
            district: scalar_text(self.district.as_ref()),
            building_type: scalar_text(self.building_type.as_ref()),
        }
    }
}

fn scalar_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[derive(Debug, Serialize)]
pub struct InitializeResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub request_id: Option<String>,
}

impl InitializeResponse {
    pub fn success(request_id: Option<String>) -> Self {
        Self {
            status: "success",
            message: "Request initialized",
            request_id,
        }
    }
}

/// Fields posted by the input form. Numbers arrive as text and are parsed
/// only once the request id is known to be valid.
#[derive(Debug, Deserialize, Clone)]
pub struct PredictForm {
    /// Absent ids map to the empty key, as on initialize.
    #[serde(default)]
    pub request_id: String,
    pub bedrooms: String,
    pub bathrooms: String,
    pub area: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropertyDetails {
    pub bedrooms: i64,
    pub bathrooms: i64,
    pub area: f64,
}

impl PredictForm {
    pub fn details(&self) -> Result<PropertyDetails, AppError> {
        Ok(PropertyDetails {
            bedrooms: parse_field("bedrooms", &self.bedrooms)?,
            bathrooms: parse_field("bathrooms", &self.bathrooms)?,
            area: parse_field("area", &self.area)?,
        })
    }
}

fn parse_field<T: std::str::FromStr>(field: &'static str, raw: &str) -> Result<T, AppError> {
    raw.trim().parse().map_err(|_| AppError::InvalidField {
        field,
        value: raw.to_string(),
    })
}

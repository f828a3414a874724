//! Request/response shapes and validation for the HTTP API.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::geocode::{Coordinates, GeocodeError};

pub const MAX_ADDRESS_LEN: usize = 255;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Geocode(#[from] GeocodeError),
    #[error("{0}")]
    NotFound(String),
    #[error("data provider failed: {0}")]
    Provider(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::Geocode(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Provider(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProcessAddressRequest {
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessAddressResponse {
    pub coordinates: Coordinates,
}

/// Raw `/api/data` query. Fields stay optional so missing values produce a
/// validation error rather than an extractor rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DataQueryParams {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub radius: Option<f64>,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DataQuery {
    pub center: Coordinates,
    pub radius_m: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadResponse {
    pub message: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub format: String,
    pub file_name: String,
    pub mime_type: String,
}

/// Trimmed, length-checked address.
pub fn validate_address(req: &ProcessAddressRequest) -> Result<String, ApiError> {
    let address = req
        .address
        .as_deref()
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .ok_or_else(|| ApiError::Validation("The address field is required.".to_string()))?;
    if address.chars().count() > MAX_ADDRESS_LEN {
        return Err(ApiError::Validation(format!(
            "The address may not be greater than {MAX_ADDRESS_LEN} characters."
        )));
    }
    Ok(address.to_string())
}

pub fn validate_data_query(
    params: &DataQueryParams,
    default_radius: f64,
    max_radius: f64,
) -> Result<DataQuery, ApiError> {
    let lat = params
        .lat
        .ok_or_else(|| ApiError::Validation("The lat field is required.".to_string()))?;
    let lng = params
        .lng
        .ok_or_else(|| ApiError::Validation("The lng field is required.".to_string()))?;
    if !(-90.0..=90.0).contains(&lat) {
        return Err(ApiError::Validation(
            "The lat field must be between -90 and 90.".to_string(),
        ));
    }
    if !(-180.0..=180.0).contains(&lng) {
        return Err(ApiError::Validation(
            "The lng field must be between -180 and 180.".to_string(),
        ));
    }
    let radius = params.radius.unwrap_or(default_radius);
    if !(radius.is_finite() && radius > 0.0) {
        return Err(ApiError::Validation(
            "The radius field must be greater than 0.".to_string(),
        ));
    }
    if radius > max_radius {
        return Err(ApiError::Validation(format!(
            "The radius field may not be greater than {max_radius}."
        )));
    }
    Ok(DataQuery {
        center: Coordinates::new(lat, lng),
        radius_m: radius,
    })
}

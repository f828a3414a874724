//! HTTP client for the visualization server.

use std::path::{Path, PathBuf};

use formats::model::{ModelFormat, ModelKind, download_file_name};
use formats::payload::VisualizationData;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("geocoding failed: {0}")]
    Geocode(String),
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("No data available for download")]
    NoData,
}

#[derive(Debug, Copy, Clone, PartialEq, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Deserialize)]
struct ProcessAddressResponse {
    coordinates: Coordinates,
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn process_address(&self, address: &str) -> Result<Coordinates, ClientError> {
        let resp = self
            .http
            .post(self.url("/api/process-address"))
            .json(&json!({ "address": address }))
            .send()
            .await?;
        let status = resp.status();
        if status == reqwest::StatusCode::UNPROCESSABLE_ENTITY {
            return Err(ClientError::Geocode(error_message(resp).await));
        }
        let resp = check_status(resp).await?;
        let body: ProcessAddressResponse = resp.json().await?;
        debug!(
            "{address:?} -> ({}, {})",
            body.coordinates.latitude, body.coordinates.longitude
        );
        Ok(body.coordinates)
    }

    /// Without a radius the server applies its own default (500 m unless
    /// reconfigured).
    pub async fn get_visualization_data(
        &self,
        coords: Coordinates,
        radius_m: Option<f64>,
    ) -> Result<VisualizationData, ClientError> {
        let mut query = vec![("lat", coords.latitude), ("lng", coords.longitude)];
        if let Some(radius) = radius_m {
            query.push(("radius", radius));
        }
        let resp = self
            .http
            .get(self.url("/api/data"))
            .query(&query)
            .send()
            .await?;
        let resp = check_status(resp).await?;
        Ok(resp.json().await?)
    }

    /// Fetches a model export and writes it to `out_dir/{type}_model.{format}`.
    pub async fn download_model(
        &self,
        kind: ModelKind,
        format: ModelFormat,
        out_dir: &Path,
    ) -> Result<PathBuf, ClientError> {
        let resp = self
            .http
            .get(self.url(&format!("/api/download/{kind}/{format}")))
            .send()
            .await?;
        let resp = check_status(resp).await?;
        let bytes = resp.bytes().await?;

        tokio::fs::create_dir_all(out_dir).await?;
        let path = out_dir.join(download_file_name(kind, format));
        tokio::fs::write(&path, &bytes).await?;
        info!("wrote {} bytes to {}", bytes.len(), path.display());
        Ok(path)
    }
}

async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    Err(ClientError::Status {
        status: status.as_u16(),
        body: error_message(resp).await,
    })
}

/// `error` field of a JSON error body, else the raw text.
async fn error_message(resp: reqwest::Response) -> String {
    let text = resp.text().await.unwrap_or_default();
    serde_json::from_str::<serde_json::Value>(&text)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
        .unwrap_or(text)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use axum::Json;
    use axum::Router;
    use axum::extract::{Path, Query};
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use axum::routing::{get, post};
    use formats::model::{ModelFormat, ModelKind};
    use formats::payload::{BoundsPayload, VisualizationData};
    use serde_json::{Value, json};

    use super::{ApiClient, ClientError, Coordinates};

    async fn fake_process_address(Json(body): Json<Value>) -> impl IntoResponse {
        match body["address"].as_str() {
            Some("nowhere") => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "error": "could not geocode \"nowhere\"" })),
            ),
            _ => (
                StatusCode::OK,
                Json(json!({ "coordinates": { "latitude": 32.5, "longitude": -117.25 } })),
            ),
        }
    }

    // Echoes the radius it received through the bounds, -1 when absent.
    async fn fake_data(Query(params): Query<HashMap<String, String>>) -> impl IntoResponse {
        let lat = params.get("lat").and_then(|l| l.parse::<f64>().ok());
        if lat.is_some_and(|l| l > 80.0) {
            return (StatusCode::NOT_FOUND, Json(json!({ "error": "no data here" })))
                .into_response();
        }
        let radius = params
            .get("radius")
            .and_then(|r| r.parse::<f64>().ok())
            .unwrap_or(-1.0);
        Json(VisualizationData {
            bounds: Some(BoundsPayload {
                min_x: 0.0,
                min_z: 0.0,
                max_x: radius,
                max_z: 0.0,
            }),
            ..Default::default()
        })
        .into_response()
    }

    async fn fake_download(Path((kind, format)): Path<(String, String)>) -> impl IntoResponse {
        if kind == "vegetation" {
            return (StatusCode::NOT_FOUND, "plain text failure").into_response();
        }
        format!("solid {kind}.{format}").into_response()
    }

    async fn serve() -> ApiClient {
        let app = Router::new()
            .route("/api/process-address", post(fake_process_address))
            .route("/api/data", get(fake_data))
            .route("/api/download/:kind/:format", get(fake_download));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind");
        let addr = listener.local_addr().expect("addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve");
        });
        ApiClient::new(format!("http://{addr}"))
    }

    fn arctic() -> Coordinates {
        Coordinates {
            latitude: 85.0,
            longitude: 0.0,
        }
    }

    #[test]
    fn base_url_is_normalized() {
        let client = ApiClient::new("http://localhost:8080/");
        assert_eq!(client.base_url(), "http://localhost:8080");
        assert_eq!(client.url("/api/data"), "http://localhost:8080/api/data");
    }

    #[test]
    fn no_data_message_matches_banner_text() {
        assert_eq!(
            ClientError::NoData.to_string(),
            "No data available for download"
        );
    }

    #[tokio::test]
    async fn process_address_decodes_coordinates() {
        let client = serve().await;
        let coords = client.process_address("San Diego").await.expect("coords");
        assert_eq!(
            coords,
            Coordinates {
                latitude: 32.5,
                longitude: -117.25
            }
        );
    }

    #[tokio::test]
    async fn unprocessable_address_is_a_geocode_error() {
        let client = serve().await;
        let err = client.process_address("nowhere").await.unwrap_err();
        match err {
            ClientError::Geocode(msg) => assert_eq!(msg, "could not geocode \"nowhere\""),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn radius_is_sent_only_when_given() {
        let client = serve().await;
        let at = Coordinates {
            latitude: 1.0,
            longitude: 2.0,
        };
        let with = client
            .get_visualization_data(at, Some(250.0))
            .await
            .expect("data");
        assert_eq!(with.bounds.map(|b| b.max_x), Some(250.0));

        let without = client.get_visualization_data(at, None).await.expect("data");
        assert_eq!(without.bounds.map(|b| b.max_x), Some(-1.0));
    }

    #[tokio::test]
    async fn non_success_status_carries_json_error_field() {
        let client = serve().await;
        let err = client
            .get_visualization_data(arctic(), None)
            .await
            .unwrap_err();
        match err {
            ClientError::Status { status, body } => {
                assert_eq!(status, 404);
                assert_eq!(body, "no data here");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn download_writes_named_file() {
        let client = serve().await;
        let dir = tempfile::tempdir().expect("tempdir");
        let out = dir.path().join("models");
        let path = client
            .download_model(ModelKind::Terrain, ModelFormat::Obj, &out)
            .await
            .expect("download");
        assert_eq!(path, out.join("terrain_model.obj"));
        let written = std::fs::read_to_string(&path).expect("read");
        assert_eq!(written, "solid terrain.obj");
    }

    #[tokio::test]
    async fn failed_download_keeps_raw_body_and_writes_nothing() {
        let client = serve().await;
        let dir = tempfile::tempdir().expect("tempdir");
        let err = client
            .download_model(ModelKind::Vegetation, ModelFormat::Stl, dir.path())
            .await
            .unwrap_err();
        match err {
            ClientError::Status { status, body } => {
                assert_eq!(status, 404);
                assert_eq!(body, "plain text failure");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(!dir.path().join("vegetation_model.stl").exists());
    }
}

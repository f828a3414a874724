mod api;
mod data_sources;
mod geocode;

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::{Method, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use formats::model::{ModelFormat, ModelKind, download_file_name, parse_model_request};
use formats::payload::VisualizationData;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::api::{
    ApiError, DataQueryParams, DownloadResponse, ProcessAddressRequest, ProcessAddressResponse,
    validate_address, validate_data_query,
};
use crate::data_sources::{DataProvider, StubDataProvider, VisualizationQuery};
use crate::geocode::{Geocoder, StubGeocoder};

#[derive(Clone)]
struct AppState {
    config: Arc<ServerConfig>,
    geocoder: Arc<dyn Geocoder>,
    provider: Arc<dyn DataProvider>,
}

#[derive(Clone, Debug)]
struct ServerConfig {
    default_radius: f64,
    max_radius: f64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            default_radius: 500.0,
            max_radius: 5000.0,
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let addr_raw = env::var("VIZ_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
    let addr: SocketAddr = match addr_raw.parse() {
        Ok(addr) => addr,
        Err(err) => {
            error!("invalid VIZ_ADDR {addr_raw:?}: {err}");
            return;
        }
    };

    let defaults = ServerConfig::default();
    let config = ServerConfig {
        default_radius: env_var_f64("VIZ_DEFAULT_RADIUS", defaults.default_radius),
        max_radius: env_var_f64("VIZ_MAX_RADIUS", defaults.max_radius),
    };
    if config.default_radius > config.max_radius {
        warn!(
            "VIZ_DEFAULT_RADIUS {} exceeds VIZ_MAX_RADIUS {}; \
             requests without a radius will be rejected",
            config.default_radius,
            config.max_radius
        );
    }

    let provider = StubDataProvider;
    info!("data provider: {}", provider.name());
    let state = AppState {
        config: Arc::new(config),
        geocoder: Arc::new(StubGeocoder::default()),
        provider: Arc::new(provider),
    };

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(err) => {
            error!("failed to bind {addr}: {err}");
            return;
        }
    };
    info!("visualization server listening on http://{addr}");
    if let Err(err) = axum::serve(listener, app(state)).await {
        error!("server error: {err}");
    }
}

fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS]);

    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/process-address", post(process_address))
        .route("/api/data", get(get_data))
        .route("/api/download/:kind", get(download_default))
        .route("/api/download/:kind/:format", get(download))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

async fn process_address(
    State(state): State<AppState>,
    body: Result<Json<ProcessAddressRequest>, JsonRejection>,
) -> Result<Json<ProcessAddressResponse>, ApiError> {
    let Json(req) = body.map_err(|rej| ApiError::Validation(rej.body_text()))?;
    let address = validate_address(&req)?;
    let coordinates = state.geocoder.geocode(&address).await?;
    info!(
        "geocoded {address:?} to ({}, {})",
        coordinates.latitude, coordinates.longitude
    );
    Ok(Json(ProcessAddressResponse { coordinates }))
}

async fn get_data(
    State(state): State<AppState>,
    params: Result<Query<DataQueryParams>, QueryRejection>,
) -> Result<Json<VisualizationData>, ApiError> {
    let Query(params) = params.map_err(|rej| ApiError::Validation(rej.body_text()))?;
    let query = validate_data_query(
        &params,
        state.config.default_radius,
        state.config.max_radius,
    )?;
    let data = state
        .provider
        .visualization_data(VisualizationQuery {
            center: query.center,
            radius_m: query.radius_m,
        })
        .await
        .map_err(|err| {
            error!("data provider {} failed: {err}", state.provider.name());
            ApiError::Provider(err.to_string())
        })?;
    Ok(Json(data))
}

async fn download_default(Path(kind): Path<String>) -> Result<Json<DownloadResponse>, ApiError> {
    download_response(&kind, None)
}

async fn download(
    Path((kind, format)): Path<(String, String)>,
) -> Result<Json<DownloadResponse>, ApiError> {
    download_response(&kind, Some(&format))
}

/// Model export is not implemented; the endpoint only acknowledges a valid request.
fn download_response(
    kind: &str,
    format: Option<&str>,
) -> Result<Json<DownloadResponse>, ApiError> {
    let (kind, format): (ModelKind, ModelFormat) =
        parse_model_request(kind, format).map_err(|err| ApiError::NotFound(err.to_string()))?;
    Ok(Json(DownloadResponse {
        message: format!("This endpoint would download a {kind} model in {format} format."),
        kind: kind.to_string(),
        format: format.to_string(),
        file_name: download_file_name(kind, format),
        mime_type: format.mime_type().to_string(),
    }))
}

fn env_var_f64(key: &str, default: f64) -> f64 {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_sources::{BoxFuture, DataSourceError};
    use crate::geocode::STUB_LOCATION;

    struct OfflineProvider;

    impl DataProvider for OfflineProvider {
        fn name(&self) -> &str {
            "offline"
        }

        fn visualization_data(
            &self,
            _query: VisualizationQuery,
        ) -> BoxFuture<'_, Result<VisualizationData, DataSourceError>> {
            Box::pin(async { Err(DataSourceError::new("database unreachable")) })
        }
    }

    fn state() -> AppState {
        AppState {
            config: Arc::new(ServerConfig::default()),
            geocoder: Arc::new(StubGeocoder::default()),
            provider: Arc::new(StubDataProvider),
        }
    }

    #[tokio::test]
    async fn process_address_returns_coordinates() {
        let body = Ok(Json(ProcessAddressRequest {
            address: Some("San Diego".to_string()),
        }));
        let Json(resp) = process_address(State(state()), body).await.expect("ok");
        assert_eq!(resp.coordinates, STUB_LOCATION);
    }

    #[tokio::test]
    async fn process_address_requires_address() {
        let body = Ok(Json(ProcessAddressRequest { address: None }));
        let err = process_address(State(state()), body).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn data_endpoint_serves_provider_payload() {
        let params = Ok(Query(DataQueryParams {
            lat: Some(STUB_LOCATION.latitude),
            lng: Some(STUB_LOCATION.longitude),
            radius: None,
        }));
        let Json(data) = get_data(State(state()), params).await.expect("ok");
        assert_eq!(data, StubDataProvider::payload());
    }

    #[tokio::test]
    async fn data_endpoint_validates_query() {
        let params = Ok(Query(DataQueryParams {
            lat: Some(120.0),
            lng: Some(0.0),
            radius: None,
        }));
        let err = get_data(State(state()), params).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn provider_failure_is_bad_gateway() {
        let state = AppState {
            provider: Arc::new(OfflineProvider),
            ..state()
        };
        let params = Ok(Query(DataQueryParams {
            lat: Some(0.0),
            lng: Some(0.0),
            radius: Some(100.0),
        }));
        let err = get_data(State(state), params).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(err.to_string(), "data provider failed: database unreachable");
    }

    #[tokio::test]
    async fn download_defaults_to_stl() {
        let Json(resp) = download_default(Path("buildings".to_string()))
            .await
            .expect("ok");
        assert_eq!(resp.format, "stl");
        assert_eq!(resp.file_name, "buildings_model.stl");
        assert_eq!(
            resp.message,
            "This endpoint would download a buildings model in stl format."
        );
    }

    #[tokio::test]
    async fn download_rejects_unknown_kind_or_format() {
        let err = download(Path(("roads".to_string(), "stl".to_string())))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        let err = download(Path(("terrain".to_string(), "fbx".to_string())))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);

        let Json(ok) = download(Path(("terrain".to_string(), "gltf".to_string())))
            .await
            .expect("ok");
        assert_eq!(ok.mime_type, "model/gltf+json");
    }

    #[test]
    fn env_var_falls_back_on_missing_or_garbage() {
        assert_eq!(env_var_f64("VIZ_TEST_UNSET_RADIUS", 42.0), 42.0);
    }
}

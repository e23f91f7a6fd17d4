// Axum API Server Module
//
// Purpose: REST API for point hazard assessment, nearby facilities and
// GeoJSON layer export. Engines are pure; collaborators are injected via AppState.

#[cfg(feature = "api")]
use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};

#[cfg(feature = "api")]
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    trace::TraceLayer,
};

#[cfg(feature = "api")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "api")]
use std::sync::Arc;

#[cfg(feature = "api")]
use std::time::Duration;

#[cfg(feature = "api")]
use crate::config::ServerConfig;

#[cfg(feature = "api")]
use crate::error::HazardError;

#[cfg(feature = "api")]
use crate::facilities::{
    FacilityProvider, FacilityProximityRanker, NearbyFacilitiesService, RankedFacilities,
    StaticFacilityProvider,
};

#[cfg(feature = "api")]
use crate::formatters::{HtmlFormatter, MarkdownFormatter, OutputFormat};

#[cfg(feature = "api")]
use crate::hazard::{
    FeatureCollection, HazardLookupService, HazardReading, HazardType, InMemorySpatialIndex,
    SpatialIndex,
};

#[cfg(feature = "api")]
use crate::risk::{Advisory, RiskAggregator, RiskAssessment, RiskTables, SafetyLevel};

/// Facility search radius when the query omits `radius` (meters)
#[cfg(feature = "api")]
pub const DEFAULT_RADIUS_M: f64 = 3000.0;

// ============================================================================
// Application State
// ============================================================================

#[cfg(feature = "api")]
#[derive(Clone)]
pub struct AppState {
    pub hazards: Arc<HazardLookupService>,
    pub aggregator: Arc<RiskAggregator>,
    pub facilities: Arc<NearbyFacilitiesService>,
}

#[cfg(feature = "api")]
impl AppState {
    pub fn new(
        index: Arc<dyn SpatialIndex>,
        provider: Arc<dyn FacilityProvider>,
        tables: RiskTables,
        timeout: Duration,
    ) -> Self {
        Self {
            hazards: Arc::new(HazardLookupService::new(index, timeout)),
            aggregator: Arc::new(RiskAggregator::new(tables)),
            facilities: Arc::new(NearbyFacilitiesService::new(
                provider,
                FacilityProximityRanker::default(),
                timeout,
            )),
        }
    }

    /// Load data files named by the configuration
    pub fn from_config(config: &ServerConfig) -> anyhow::Result<Self> {
        tracing::info!("Loading hazard polygons...");
        let index = Arc::new(InMemorySpatialIndex::load(&config.hazard_data)?);

        tracing::info!("Loading facilities...");
        let provider = Arc::new(StaticFacilityProvider::load(&config.facility_data)?);

        let tables = match &config.risk_tables {
            Some(path) => {
                tracing::info!("Loading risk tables from {}", path.display());
                RiskTables::load(path)?
            }
            None => RiskTables::default(),
        };

        Ok(Self::new(index, provider, tables, config.upstream_timeout))
    }
}

// ============================================================================
// Router
// ============================================================================

#[cfg(feature = "api")]
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))

        // Point assessment
        .route("/api/hazards/location", get(get_location_hazards))

        // Layer export (GeoJSON)
        .route("/api/hazards/:hazard_type/geojson", get(get_hazard_layer))

        // Facilities
        .route("/api/facilities/nearby", get(get_nearby_facilities))

        // Middleware (applied in reverse order)
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ============================================================================
// Response Types
// ============================================================================

#[cfg(feature = "api")]
#[derive(Debug, Deserialize)]
struct LocationParams {
    lat: f64,
    lng: f64,
    format: Option<String>,
}

#[cfg(feature = "api")]
#[derive(Debug, Deserialize)]
struct NearbyParams {
    lat: f64,
    lng: f64,
    radius: Option<f64>,
}

#[cfg(feature = "api")]
#[derive(Debug, Serialize)]
struct LocationHazardsResponse {
    overall_risk: OverallRisk,
    flood: HazardReading,
    landslide: HazardReading,
    liquefaction: HazardReading,
}

#[cfg(feature = "api")]
#[derive(Debug, Serialize)]
struct OverallRisk {
    score: f64,
    raw_score: f64,
    category: &'static str,
    message: String,
    color: String,
    icon: String,
    recommendation_summary: String,
    recommendation_details: Vec<Advisory>,
    safety_level: SafetyLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    recommendation_rendered: Option<String>,
}

#[cfg(feature = "api")]
impl OverallRisk {
    fn from_assessment(assessment: RiskAssessment, format: OutputFormat) -> Self {
        let recommendation_rendered = match format {
            OutputFormat::Html => Some(HtmlFormatter::format_recommendation(&assessment.recommendation)),
            OutputFormat::Markdown => {
                Some(MarkdownFormatter::format_recommendation(&assessment.recommendation))
            }
            OutputFormat::Json => None,
        };

        Self {
            score: round1(assessment.score),
            raw_score: round1(assessment.raw_score),
            category: assessment.category.label(),
            message: assessment.message,
            color: assessment.color,
            icon: assessment.icon,
            recommendation_summary: assessment.recommendation.summary,
            recommendation_details: assessment.recommendation.details,
            safety_level: assessment.safety_level,
            recommendation_rendered,
        }
    }
}

#[cfg(feature = "api")]
fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

// ============================================================================
// Endpoint Handlers
// ============================================================================

#[cfg(feature = "api")]
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

#[cfg(feature = "api")]
async fn get_location_hazards(
    State(state): State<AppState>,
    params: Result<Query<LocationParams>, QueryRejection>,
) -> Result<Json<LocationHazardsResponse>, AppError> {
    let Query(params) = params.map_err(|e| AppError::BadRequest(format!("Invalid coordinates: {}", e)))?;

    let format = match params.format.as_deref() {
        Some(f) => f.parse::<OutputFormat>().map_err(AppError::BadRequest)?,
        None => OutputFormat::Json,
    };

    let profile = state.hazards.lookup_all_at(params.lat, params.lng).await?;
    let assessment = state.aggregator.assess_profile(&profile);

    tracing::debug!(
        "Assessment at ({}, {}): {} ({:.1})",
        params.lat,
        params.lng,
        assessment.category.label(),
        assessment.raw_score
    );

    Ok(Json(LocationHazardsResponse {
        overall_risk: OverallRisk::from_assessment(assessment, format),
        flood: profile.flood,
        landslide: profile.landslide,
        liquefaction: profile.liquefaction,
    }))
}

#[cfg(feature = "api")]
async fn get_hazard_layer(
    State(state): State<AppState>,
    Path(hazard_type): Path<String>,
) -> Result<Json<FeatureCollection>, AppError> {
    let hazard: HazardType = hazard_type
        .parse()
        .map_err(|_| AppError::NotFound(format!("Unknown hazard layer '{}'", hazard_type)))?;

    let collection = state.hazards.export_layer(hazard).await?;
    Ok(Json(collection))
}

#[cfg(feature = "api")]
async fn get_nearby_facilities(
    State(state): State<AppState>,
    params: Result<Query<NearbyParams>, QueryRejection>,
) -> Result<Json<RankedFacilities>, AppError> {
    let Query(params) =
        params.map_err(|e| AppError::BadRequest(format!("Invalid coordinates or radius: {}", e)))?;

    let radius = params.radius.unwrap_or(DEFAULT_RADIUS_M);
    let ranked = state
        .facilities
        .nearby(params.lat, params.lng, radius)
        .await?;

    Ok(Json(ranked))
}

// ============================================================================
// Error Handling
// ============================================================================

#[cfg(feature = "api")]
#[derive(Debug)]
enum AppError {
    BadRequest(String),
    NotFound(String),
    Upstream(String),
}

#[cfg(feature = "api")]
impl From<HazardError> for AppError {
    fn from(err: HazardError) -> Self {
        match err {
            HazardError::InvalidCoordinate(_) | HazardError::InvalidQuery(_) => {
                AppError::BadRequest(err.to_string())
            }
            HazardError::UpstreamUnavailable(_) => {
                tracing::warn!("{}", err);
                AppError::Upstream(err.to_string())
            }
        }
    }
}

#[cfg(feature = "api")]
impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Upstream(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
        };

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

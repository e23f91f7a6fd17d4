// API Integration Tests
//
// Purpose: Exercise every endpoint against in-memory polygons and facilities
// Run with: cargo test --features api --test api_integration_tests

#[cfg(feature = "api")]
mod api_tests {
    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use hazard_risk_engine::facilities::{FacilityRecord, StaticFacilityProvider};
    use hazard_risk_engine::hazard::{
        Geometry, HazardType, InMemorySpatialIndex, PolygonRecord, SpatialIndex,
    };
    use hazard_risk_engine::{create_router, AppState, Point, RiskTables};
    use serde_json::Value;
    use std::sync::Arc;
    use std::time::Duration;
    use tower::ServiceExt; // for oneshot

    fn square(min_lng: f64, min_lat: f64, size: f64) -> Geometry {
        Geometry::Polygon(vec![vec![
            [min_lng, min_lat],
            [min_lng + size, min_lat],
            [min_lng + size, min_lat + size],
            [min_lng, min_lat + size],
            [min_lng, min_lat],
        ]])
    }

    fn polygon(id: i64, layer: HazardType, code: &str, geometry: Geometry) -> PolygonRecord {
        PolygonRecord {
            id,
            layer,
            susceptibility: code.to_string(),
            original_code: Some(format!("{}-{}", code, id)),
            shape_area: Some(0.0001),
            dataset_id: 3,
            geometry,
        }
    }

    fn facility(id: i64, name: &str, facility_type: &str, lat: f64, lng: f64) -> FacilityRecord {
        FacilityRecord {
            id,
            name: name.to_string(),
            facility_type: facility_type.to_string(),
            lat,
            lng,
            category: None,
            address: None,
        }
    }

    // Flood VHS over (14.59..14.60, 120.98..120.99); debris flow over a second cell
    fn test_index() -> InMemorySpatialIndex {
        InMemorySpatialIndex::from_records(vec![
            polygon(1, HazardType::Flood, "VHS", square(120.98, 14.59, 0.01)),
            polygon(2, HazardType::Landslide, "DF", square(121.10, 14.70, 0.01)),
            polygon(3, HazardType::Liquefaction, "HS", square(121.10, 14.70, 0.01)),
        ])
    }

    fn test_facilities() -> StaticFacilityProvider {
        StaticFacilityProvider::from_records(vec![
            facility(10, "Rizal Elementary School", "school", 14.5960, 120.9850),
            facility(11, "Botica", "pharmacy", 14.5952, 120.9850),
            facility(12, "Manila Doctors Hospital", "hospital", 14.6050, 120.9850),
            facility(13, "Station 5", "police", 14.5955, 120.9855),
            facility(14, "Far Away Clinic", "clinic", 14.9000, 120.9850),
        ])
    }

    fn create_test_app() -> axum::Router {
        let state = AppState::new(
            Arc::new(test_index()),
            Arc::new(test_facilities()),
            RiskTables::default(),
            Duration::from_secs(2),
        );
        create_router(state)
    }

    struct HangingIndex;

    #[async_trait]
    impl SpatialIndex for HangingIndex {
        async fn find_containing(
            &self,
            _: Point,
            _: HazardType,
        ) -> anyhow::Result<Vec<PolygonRecord>> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(vec![])
        }

        async fn layer_records(&self, _: HazardType) -> anyhow::Result<Vec<PolygonRecord>> {
            anyhow::bail!("connection refused")
        }
    }

    async fn get(app: axum::Router, uri: &str) -> axum::response::Response {
        app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    // Helper: Parse JSON response
    async fn json_response(response: axum::response::Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body");
        serde_json::from_slice(&body).expect("Failed to parse JSON")
    }

    // =========================================================================
    // Section 1: Health Check
    // =========================================================================

    #[tokio::test]
    async fn test_health_check() {
        let response = get(create_test_app(), "/health").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_response(response).await;
        assert_eq!(body["status"], "healthy");
        assert!(body["timestamp"].is_string());
    }

    // =========================================================================
    // Section 2: Hazard-at-point
    // =========================================================================

    #[tokio::test]
    async fn test_location_flood_only() {
        let response = get(create_test_app(), "/api/hazards/location?lat=14.595&lng=120.985").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_response(response).await;
        assert_eq!(body["flood"]["level"], "VHS");
        assert_eq!(body["flood"]["label"], "Very High Susceptibility");
        assert!(body["landslide"]["level"].is_null());
        assert_eq!(body["landslide"]["label"], "No Data Available");

        let overall = &body["overall_risk"];
        assert_eq!(overall["score"], 55.0);
        assert_eq!(overall["raw_score"], 55.0);
        assert_eq!(overall["category"], "HIGH RISK");
        assert_eq!(overall["safety_level"], "WARNING");
        assert_eq!(overall["recommendation_summary"], "VERY HIGH FLOOD RISK");
        assert_eq!(overall["recommendation_details"].as_array().unwrap().len(), 1);
        assert!(overall.get("recommendation_rendered").is_none());
    }

    #[tokio::test]
    async fn test_location_debris_flow_multiple_hazards() {
        let response = get(create_test_app(), "/api/hazards/location?lat=14.705&lng=121.105").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_response(response).await;
        assert_eq!(body["landslide"]["level"], "DF");
        let overall = &body["overall_risk"];
        // 5 + 45 + 15
        assert_eq!(overall["raw_score"], 65.0);
        assert_eq!(
            overall["recommendation_summary"],
            "DEBRIS FLOW ZONE + HIGH LIQUEFACTION RISK"
        );
        let details = overall["recommendation_details"].as_array().unwrap();
        assert_eq!(details.len(), 3);
        assert_eq!(details[2]["advisory_type"], "multiple_hazards");
        assert!(details[0]["prohibition"].is_string());
    }

    #[tokio::test]
    async fn test_location_no_data() {
        let response = get(create_test_app(), "/api/hazards/location?lat=10.0&lng=123.0").await;
        let body = json_response(response).await;
        assert_eq!(body["overall_risk"]["score"], 10.0);
        assert_eq!(body["overall_risk"]["category"], "LOW RISK");
        assert_eq!(
            body["flood"]["risk_label"],
            "Not at risk - No hazard data for this area (safe zone)"
        );
    }

    #[tokio::test]
    async fn test_location_rendered_html() {
        let response = get(
            create_test_app(),
            "/api/hazards/location?lat=14.595&lng=120.985&format=html",
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_response(response).await;
        let rendered = body["overall_risk"]["recommendation_rendered"].as_str().unwrap();
        assert!(rendered.contains("<h3>🌊 VERY HIGH FLOOD RISK</h3>"));
    }

    #[tokio::test]
    async fn test_location_bad_format() {
        let response = get(
            create_test_app(),
            "/api/hazards/location?lat=14.595&lng=120.985&format=pdf",
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_location_invalid_coordinates() {
        for uri in [
            "/api/hazards/location?lat=100&lng=120",
            "/api/hazards/location?lat=14.5",
            "/api/hazards/location?lat=abc&lng=120",
        ] {
            let response = get(create_test_app(), uri).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", uri);
            let body = json_response(response).await;
            assert!(body["error"].is_string());
        }
    }

    #[tokio::test]
    async fn test_location_upstream_timeout() {
        let state = AppState::new(
            Arc::new(HangingIndex),
            Arc::new(test_facilities()),
            RiskTables::default(),
            Duration::from_millis(50),
        );
        let response = get(create_router(state), "/api/hazards/location?lat=14.595&lng=120.985").await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let body = json_response(response).await;
        assert!(body["error"].as_str().unwrap().contains("timed out"));
    }

    // =========================================================================
    // Section 3: GeoJSON Export
    // =========================================================================

    #[tokio::test]
    async fn test_geojson_layer() {
        let response = get(create_test_app(), "/api/hazards/flood/geojson").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_response(response).await;
        assert_eq!(body["type"], "FeatureCollection");
        let features = body["features"].as_array().unwrap();
        assert_eq!(features.len(), 1);
        assert_eq!(features[0]["type"], "Feature");
        assert_eq!(features[0]["properties"]["susceptibility"], "VHS");
        assert_eq!(features[0]["properties"]["dataset_id"], 3);
        assert_eq!(features[0]["geometry"]["type"], "Polygon");
    }

    #[tokio::test]
    async fn test_geojson_unknown_layer() {
        let response = get(create_test_app(), "/api/hazards/volcano/geojson").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_geojson_store_failure() {
        let state = AppState::new(
            Arc::new(HangingIndex),
            Arc::new(test_facilities()),
            RiskTables::default(),
            Duration::from_secs(1),
        );
        let response = get(create_router(state), "/api/hazards/landslide/geojson").await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    // =========================================================================
    // Section 4: Nearby Facilities
    // =========================================================================

    #[tokio::test]
    async fn test_nearby_facilities() {
        let response = get(create_test_app(), "/api/facilities/nearby?lat=14.595&lng=120.985").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_response(response).await;
        // Far Away Clinic is outside the default 3 km radius
        assert_eq!(body["counts"]["total"], 4);
        assert_eq!(body["counts"]["medical"], 2);
        assert_eq!(body["medical"][0]["name"], "Botica");
        assert_eq!(body["medical"][0]["priority"], 2);
        assert_eq!(body["medical"][0]["subcategory"], "medical");
        assert_eq!(body["medical"][0]["is_walkable"], true);

        let summary = &body["summary"];
        assert_eq!(summary["nearest_hospital"]["name"], "Manila Doctors Hospital");
        assert_eq!(summary["nearest_evacuation"]["name"], "Rizal Elementary School");
        assert_eq!(summary["nearest_fire_station"]["found"], false);
        assert_eq!(summary["nearest_fire_station"]["distance"], "N/A");
    }

    #[tokio::test]
    async fn test_nearby_custom_radius() {
        let response = get(
            create_test_app(),
            "/api/facilities/nearby?lat=14.595&lng=120.985&radius=100",
        )
        .await;
        let body = json_response(response).await;
        assert_eq!(body["counts"]["total"], 2);
        assert_eq!(body["summary"]["nearest_hospital"]["name"], "None within 100 m");
    }

    #[tokio::test]
    async fn test_nearby_invalid_radius() {
        for uri in [
            "/api/facilities/nearby?lat=14.595&lng=120.985&radius=0",
            "/api/facilities/nearby?lat=14.595&lng=120.985&radius=-10",
            "/api/facilities/nearby?lat=91&lng=120.985",
        ] {
            let response = get(create_test_app(), uri).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", uri);
        }
    }
}

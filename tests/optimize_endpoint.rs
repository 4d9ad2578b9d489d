use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use beam_optimizer::api::{create_router, AppState};
use beam_optimizer::prelude::*;
use serde_json::{json, Value};
use tower::ServiceExt;

fn sample_library() -> Vec<CatalogSection> {
    vec![
        CatalogSection::new("A", 15.0, 100.0),
        CatalogSection::new("B", 25.0, 80.0),
        CatalogSection::new("C", 25.0, 120.0),
    ]
}

fn build_app(beams: Vec<BeamRecord>, library: Vec<CatalogSection>) -> Router {
    let optimizer = Optimizer::new(
        Arc::new(StaticBeamSource::new(beams)),
        Arc::new(StaticCatalog::new(library)),
    );
    create_router(AppState::new(optimizer, "http://bridge.test"))
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn optimize_reports_every_beam_in_order() {
    let beams = vec![
        // M = 20 -> B
        BeamRecord::new("X", 4.0, 10.0, "W200"),
        // M = 30 -> nothing carries it
        BeamRecord::new("Y", 4.0, 15.0, "W310"),
        BeamRecord::new("Z", 2.0, 10.0, "W150"),
    ];
    let (status, body) = get_json(build_app(beams, sample_library()), "/optimize").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            {"beam": "X", "original": "W200", "optimized": "B", "cost": 80.0},
            {"beam": "Y", "original": "W310", "optimized": "W310", "cost": "No replacement"},
            {"beam": "Z", "original": "W150", "optimized": "B", "cost": 80.0}
        ])
    );
}

#[tokio::test]
async fn versioned_route_matches_plain_route() {
    let beams = vec![BeamRecord::new("X", 4.0, 10.0, "W200")];
    let (_, plain) = get_json(build_app(beams.clone(), sample_library()), "/optimize").await;
    let (status, versioned) =
        get_json(build_app(beams, sample_library()), "/api/v1/optimize").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(plain, versioned);
}

#[tokio::test]
async fn no_beams_is_an_empty_success() {
    let (status, body) = get_json(build_app(vec![], sample_library()), "/optimize").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn empty_library_reports_error_field_only() {
    let beams = vec![BeamRecord::new("X", 4.0, 10.0, "W200")];
    let (status, body) = get_json(build_app(beams, vec![]), "/optimize").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let object = body.as_object().unwrap();
    assert_eq!(object.len(), 1);
    assert!(object["error"].as_str().unwrap().contains("no sections"));
}

#[tokio::test]
async fn end_to_end_single_beam() {
    let beams = vec![BeamRecord::new("B1", 6.0, 12.0, "W200")];
    let library = vec![
        CatalogSection::new("W150", 50.0, 40.0),
        CatalogSection::new("W180", 60.0, 50.0),
    ];
    let (status, body) = get_json(build_app(beams, library), "/optimize").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["beam"], "B1");
    assert_eq!(body[0]["original"], "W200");
    assert_eq!(body[0]["optimized"], "W180");
    assert_eq!(body[0]["cost"].as_f64(), Some(50.0));
}

#[tokio::test]
async fn summary_includes_cost_comparison() {
    let beams = vec![
        BeamRecord::new("B1", 4.0, 10.0, "C"),
        BeamRecord::new("B2", 4.0, 15.0, "A"),
    ];
    let (status, body) = get_json(
        build_app(beams, sample_library()),
        "/api/v1/optimize/summary",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["results"].as_array().unwrap().len(), 2);

    let summary = &body["summary"];
    assert_eq!(summary["replaced"], 1);
    assert_eq!(summary["upsized"], 0);
    assert_eq!(summary["unchanged"], 1);
    assert_eq!(summary["unpriced"], 0);
    assert_eq!(summary["total_original_cost"].as_f64(), Some(120.0 * 4.0 + 100.0 * 4.0));
    assert_eq!(summary["total_optimized_cost"].as_f64(), Some(80.0 * 4.0 + 100.0 * 4.0));
    assert_eq!(summary["savings"].as_f64(), Some(160.0));
}

#[tokio::test]
async fn summary_separates_kept_and_upsized_beams() {
    let library = vec![
        CatalogSection::new("I-150", 60.0, 50.0),
        CatalogSection::new("I-200", 100.0, 65.0),
    ];
    let beams = vec![
        BeamRecord::new("B1", 6.0, 12.0, "I-150"),
        BeamRecord::new("B2", 8.0, 10.0, "I-150"),
    ];
    let (status, body) = get_json(build_app(beams, library), "/api/v1/optimize/summary").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["results"][0]["optimized"], "I-150");
    assert_eq!(body["results"][1]["optimized"], "I-200");

    let summary = &body["summary"];
    assert_eq!(summary["replaced"], 0);
    assert_eq!(summary["upsized"], 1);
    assert_eq!(summary["unchanged"], 1);
    assert_eq!(summary["savings"].as_f64(), Some(-120.0));
}

#[tokio::test]
async fn health_reports_library_state() {
    let (status, body) = get_json(build_app(vec![], sample_library()), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["catalog_available"], true);
    assert_eq!(body["catalog_sections"], 3);
    assert_eq!(body["model_bridge"], "http://bridge.test");
}

#[tokio::test]
async fn version_endpoint() {
    let (status, body) = get_json(build_app(vec![], vec![]), "/api/v1/version").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["api_version"], "v1");
}

//! HTTP host tests against an in-process service

use actix_web::{http::StatusCode, test, web, App};
use fairrec_core::{Corpus, Parameters};
use fairrec_engine::server::{configure_routes, AppState};
use serde_json::{json, Value};
use std::sync::Arc;

fn corpus_json() -> Value {
    json!({
        "users": [
            {
                "id": 1,
                "demographics": {"gender": "feminino", "age": "jovem", "ethnicity": "parda"},
                "preferences": {"genres": ["drama"], "accessibility_needs": ["legendas"]},
                "history": [1]
            },
            {
                "id": 2,
                "demographics": {"gender": "masculino", "age": "idoso", "ethnicity": "branca"},
                "preferences": {"genres": ["comédia"]},
                "history": [1, 3]
            }
        ],
        "items": [
            {"id": 1, "title": "A", "type": "filme", "genres": ["drama"], "metadata": {"popularity": 90}},
            {"id": 2, "title": "B", "type": "série", "genres": ["comédia"],
             "metadata": {"popularity": 40, "accessibility": {"subtitles": true}}},
            {"id": 3, "title": "C", "type": "documentário", "genres": ["documentário", "drama"],
             "metadata": {"popularity": 20, "cast_diversity": ["indígena"]}},
            {"id": 4, "title": "D", "type": "filme", "genres": ["ação"], "metadata": {"popularity": 65}}
        ]
    })
}

fn state(with_corpus: bool) -> web::Data<AppState> {
    let corpus = with_corpus
        .then(|| serde_json::from_value::<Corpus>(corpus_json()).map(Arc::new))
        .transpose()
        .unwrap();
    web::Data::new(AppState::new(corpus, Parameters::default()))
}

#[actix_web::test]
async fn test_health_reports_corpus_state() {
    let app = test::init_service(App::new().app_data(state(true)).configure(configure_routes)).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "fairrec-service");
    assert_eq!(body["corpusLoaded"], true);
}

#[actix_web::test]
async fn test_experiment_with_inline_corpus() {
    let app = test::init_service(App::new().app_data(state(false)).configure(configure_routes)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/experiments")
        .set_json(json!({
            "corpus": corpus_json(),
            "parameters": {"numRecommendations": 2}
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert!(body["runId"].is_string());
    assert_eq!(body["parameters"]["numRecommendations"], 2);
    // omitted fields keep their defaults
    assert_eq!(body["parameters"]["repetitionPenalty"], 0.5);
    assert!(body["baselineMetrics"]["bias"]["popularity"]["bias"].is_number());
    assert!(body["inclusiveMetrics"]["accessibility"]["coverage"]["coverage"].is_number());
    assert_eq!(
        body["insights"].as_array().and_then(|a| a.last()).map(|i| i["kind"].clone()),
        Some(json!("conclusion"))
    );
}

#[actix_web::test]
async fn test_experiment_uses_startup_corpus() {
    let app = test::init_service(App::new().app_data(state(true)).configure(configure_routes)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/experiments")
        .set_json(json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_experiment_without_any_corpus_is_rejected() {
    let app = test::init_service(App::new().app_data(state(false)).configure(configure_routes)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/experiments")
        .set_json(json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].is_string());
}

#[actix_web::test]
async fn test_out_of_range_parameters_are_rejected() {
    let app = test::init_service(App::new().app_data(state(true)).configure(configure_routes)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/experiments")
        .set_json(json!({"parameters": {"diversityWeight": 1.5}}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_duplicate_ids_in_inline_corpus_are_rejected() {
    let app = test::init_service(App::new().app_data(state(false)).configure(configure_routes)).await;

    let mut corpus = corpus_json();
    corpus["items"][1]["id"] = json!(1);

    let req = test::TestRequest::post()
        .uri("/api/v1/experiments")
        .set_json(json!({"corpus": corpus}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_recommendations_for_known_user() {
    let app = test::init_service(App::new().app_data(state(true)).configure(configure_routes)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/recommendations")
        .set_json(json!({
            "algorithm": "inclusive",
            "userId": 1,
            "parameters": {"numRecommendations": 3}
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["userId"], 1);
    assert_eq!(body["algorithm"], "inclusive");
    let recs = body["recommendations"].as_array().unwrap();
    assert_eq!(recs.len(), 3);
    // item 1 is in the user's history
    assert!(recs.iter().all(|r| r["itemId"] != 1));
}

#[actix_web::test]
async fn test_recommendations_for_unknown_user() {
    let app = test::init_service(App::new().app_data(state(true)).configure(configure_routes)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/recommendations")
        .set_json(json!({"algorithm": "baseline", "userId": 99}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_malformed_body_is_bad_request() {
    let app = test::init_service(App::new().app_data(state(true)).configure(configure_routes)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/recommendations")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"algorithm\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].is_string());
}

// HTTP tests for the schedule endpoints

use actix_web::{test, web, App};
use matchmaker::core::Scheduler;
use matchmaker::routes::{self, schedule::AppState};
use serde_json::{json, Value};

fn startup_json(id: &str, target: u64) -> Value {
    json!({
        "id": id,
        "companyName": format!("Startup {}", id),
        "geoMarkets": ["NA"],
        "industry": "AI/ML",
        "fundingTarget": target,
        "fundingStage": "Series A"
    })
}

fn investor_json(id: &str) -> Value {
    json!({
        "id": id,
        "firmName": "North Ventures",
        "memberName": "Alex Kim",
        "geoFocus": ["NA", "Europe"],
        "industryPreferences": ["AI/ML"],
        "stagePreferences": ["Series A"],
        "minTicketSize": 1_000_000,
        "maxTicketSize": 5_000_000,
        "totalSlots": 2,
        "tableNumber": "7"
    })
}

macro_rules! app {
    () => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(AppState {
                    scheduler: Scheduler::default(),
                }))
                .configure(routes::configure_routes),
        )
        .await
    };
}

#[actix_web::test]
async fn test_health_endpoint() {
    let app = app!();
    let req = test::TestRequest::get().uri("/api/v1/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["status"], "healthy");
}

#[actix_web::test]
async fn test_generate_returns_matches() {
    let app = app!();
    let req = test::TestRequest::post()
        .uri("/api/v1/schedule/generate")
        .set_json(json!({
            "startups": [startup_json("s1", 2_000_000), startup_json("s2", 3_000_000)],
            "investors": [investor_json("i1")],
            "timeSlots": [
                {"id": "slot-1", "label": "Slot 1", "startTime": "09:00:00", "endTime": "09:20:00"},
                {"id": "slot-2", "label": "Slot 2", "startTime": "09:20:00", "endTime": "09:40:00"}
            ]
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);

    let body: Value = test::read_body_json(resp).await;
    let matches = body["matches"].as_array().unwrap();
    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0]["timeSlot"], "Slot 1");
    assert_eq!(matches[0]["slotTime"], "09:00 - 09:20");
    assert_eq!(matches[0]["investorName"], "North Ventures (Alex Kim)");
    assert_eq!(matches[0]["tableNumber"], "7");
    assert_eq!(matches[0]["status"], "upcoming");
    assert_eq!(body["stats"]["fairnessMatches"], 2);
}

#[actix_web::test]
async fn test_generate_applies_min_score_override() {
    let app = app!();
    let req = test::TestRequest::post()
        .uri("/api/v1/schedule/generate")
        .set_json(json!({
            // scores 90 with the default roster; a 95 floor excludes it
            "startups": [startup_json("s1", 2_000_000)],
            "investors": [investor_json("i1")],
            "minScore": 95
        }))
        .to_request();

    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert!(body["matches"].as_array().unwrap().is_empty());
    assert_eq!(body["stats"]["unmatchedStartups"], 1);
}

#[actix_web::test]
async fn test_generate_rejects_invalid_threshold() {
    let app = app!();
    let req = test::TestRequest::post()
        .uri("/api/v1/schedule/generate")
        .set_json(json!({
            "startups": [],
            "investors": [],
            "minScore": 150
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 400);
}

#[actix_web::test]
async fn test_generate_rejects_duplicate_ids() {
    let app = app!();
    let req = test::TestRequest::post()
        .uri("/api/v1/schedule/generate")
        .set_json(json!({
            "startups": [startup_json("s1", 2_000_000), startup_json("s1", 3_000_000)],
            "investors": [investor_json("i1")]
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 422);

    let body: Value = test::read_body_json(resp).await;
    assert!(body["message"].as_str().unwrap().contains("s1"));
}

#[actix_web::test]
async fn test_score_pair() {
    let app = app!();
    let req = test::TestRequest::post()
        .uri("/api/v1/schedule/score")
        .set_json(json!({
            "startup": startup_json("s1", 2_000_000),
            "investor": investor_json("i1")
        }))
        .to_request();

    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["passesHardFilters"], true);
    assert_eq!(body["score"], 90);
    assert_eq!(body["eligible"], true);
    assert_eq!(body["breakdown"].as_array().unwrap().len(), 5);
}

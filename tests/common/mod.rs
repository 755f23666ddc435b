#![allow(dead_code)]

use axum::{
    body::Body,
    extract::{Query, State},
    http::{HeaderMap, Request, StatusCode},
    routing::{get, post},
    Json, Router,
};
use hotel_price_tracker::{build_router, config::AppConfig, AppState};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tower::ServiceExt;

pub const TEST_API_KEY: &str = "test-api-key";

/// Serve `router` on an ephemeral local port, returning its base URL
pub async fn spawn_upstream(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

#[derive(Debug, Clone)]
pub struct RecordedAgodaRequest {
    pub authorization: Option<String>,
    pub body: Value,
}

#[derive(Clone)]
struct Canned<R> {
    status: StatusCode,
    body: String,
    requests: Arc<Mutex<Vec<R>>>,
}

pub struct FakeAgoda {
    pub url: String,
    pub requests: Arc<Mutex<Vec<RecordedAgodaRequest>>>,
}

pub struct FakeFireCat {
    pub url: String,
    pub requests: Arc<Mutex<Vec<HashMap<String, String>>>>,
}

async fn agoda_handler(
    State(canned): State<Canned<RecordedAgodaRequest>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, String) {
    let authorization = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    canned
        .requests
        .lock()
        .unwrap()
        .push(RecordedAgodaRequest { authorization, body });
    (canned.status, canned.body.clone())
}

async fn firecat_handler(
    State(canned): State<Canned<HashMap<String, String>>>,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, String) {
    canned.requests.lock().unwrap().push(params);
    (canned.status, canned.body.clone())
}

pub async fn fake_agoda(status: StatusCode, body: impl Into<String>) -> FakeAgoda {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let canned = Canned {
        status,
        body: body.into(),
        requests: requests.clone(),
    };
    let router = Router::new()
        .route("/affiliateservice/lt_v1", post(agoda_handler))
        .with_state(canned);

    FakeAgoda {
        url: format!("{}/affiliateservice/lt_v1", spawn_upstream(router).await),
        requests,
    }
}

pub async fn fake_firecat(status: StatusCode, body: impl Into<String>) -> FakeFireCat {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let canned = Canned {
        status,
        body: body.into(),
        requests: requests.clone(),
    };
    let router = Router::new()
        .route("/priceHistory", get(firecat_handler))
        .with_state(canned);

    FakeFireCat {
        url: spawn_upstream(router).await,
        requests,
    }
}

pub fn test_config(agoda_url: &str, history_url: &str, api_key: Option<&str>) -> AppConfig {
    let mut vars = HashMap::from([
        ("AGODA_API_URL".to_string(), agoda_url.to_string()),
        ("PRICE_HISTORY_API_URL".to_string(), history_url.to_string()),
        ("UPSTREAM_TIMEOUT_SECS".to_string(), "5".to_string()),
    ]);
    if let Some(key) = api_key {
        vars.insert("AGODA_API_KEY".to_string(), key.to_string());
    }
    AppConfig::from_lookup(|key| vars.get(key).cloned()).expect("valid test config")
}

/// Router wired to the fake upstreams through the real HTTP clients
pub fn build_test_app(agoda: &FakeAgoda, firecat: &FakeFireCat) -> Router {
    let config = test_config(&agoda.url, &firecat.url, Some(TEST_API_KEY));
    build_router(AppState::from_config(config).expect("clients build"))
}

pub async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

pub fn hotel_body(hotel_id: i64, daily_rate: f64) -> String {
    json!({
        "results": [{
            "hotelId": hotel_id,
            "hotelName": "Grand Hotel Seoul",
            "roomtypeName": "Deluxe Double",
            "starRating": 4.5,
            "reviewScore": 8.7,
            "reviewCount": 1520,
            "currency": "KRW",
            "dailyRate": daily_rate,
            "crossedOutRate": 180000,
            "discountPercentage": 17,
            "imageURL": "https://img.example/hotel.jpg",
            "landingURL": "https://book.example/hotel",
            "includeBreakfast": true,
            "freeWifi": true,
            "latitude": 37.56,
            "longitude": 126.97
        }]
    })
    .to_string()
}

pub fn history_body(hotel_id: i64, check_in: &str, los: u32, entries: &[(&str, f64)]) -> String {
    let prices: Vec<f64> = entries.iter().map(|(_, p)| *p).collect();
    let highest = prices.iter().cloned().fold(None, |acc: Option<f64>, p| Some(acc.map_or(p, |a| a.max(p))));
    let lowest = prices.iter().cloned().fold(None, |acc: Option<f64>, p| Some(acc.map_or(p, |a| a.min(p))));
    let average = (!prices.is_empty()).then(|| prices.iter().sum::<f64>() / prices.len() as f64);

    json!({
        "hotelId": hotel_id,
        "checkIn": check_in,
        "los": los,
        "highestPrice": highest,
        "lowestPrice": lowest,
        "averagePrice": average,
        "priceHistory": entries.iter().map(|(date, price)| json!({
            "checkedDate": date,
            "pricePerNight": price,
            "pricePerBook": price * 2.0,
            "consistentRoomIds": true,
            "hasEnoughData": true
        })).collect::<Vec<_>>(),
        "elapsedTime": "0.05s"
    })
    .to_string()
}

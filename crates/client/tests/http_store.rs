use std::{
    collections::HashMap,
    net::SocketAddr,
    sync::{Arc, Mutex},
};

use api_types::{
    Id,
    category::CategoryNew,
    operation::{OperationKind, OperationNew},
};
use axum::{
    Json, Router,
    extract::{Path, RawQuery, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use client::HttpStore;
use engine::{
    CategoryFilter, EngineError, Filter, GatewayError, SortBy, Store, Tracker, TypeFilter,
};
use serde_json::{Value, json};

#[derive(Default)]
struct MockState {
    collections: HashMap<String, Vec<Value>>,
    queries: Vec<String>,
    requests: Vec<String>,
    next_id: u64,
    fail: bool,
    garbage: bool,
}

type Shared = Arc<Mutex<MockState>>;

fn id_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn compare(a: &Value, b: &Value) -> std::cmp::Ordering {
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        _ => id_text(a).cmp(&id_text(b)),
    }
}

async fn list(
    State(state): State<Shared>,
    Path(resource): Path<String>,
    RawQuery(raw): RawQuery,
) -> Response {
    let mut state = state.lock().unwrap();
    state.requests.push(format!("GET /{resource}"));
    state.queries.push(raw.clone().unwrap_or_default());
    if state.fail {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    if state.garbage {
        return (StatusCode::OK, "<html>not json</html>").into_response();
    }

    let params: Vec<(String, String)> = raw
        .unwrap_or_default()
        .split('&')
        .filter(|pair| !pair.is_empty())
        .filter_map(|pair| pair.split_once('='))
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    let mut items: Vec<Value> = state
        .collections
        .get(&resource)
        .cloned()
        .unwrap_or_default()
        .into_iter()
        .filter(|item| {
            params
                .iter()
                .filter(|(key, _)| !key.starts_with('_'))
                .all(|(key, value)| id_text(&item[key.as_str()]) == *value)
        })
        .collect();

    let lookup = |key: &str| {
        params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    };
    if let Some(field) = lookup("_sort") {
        items.sort_by(|a, b| compare(&a[field.as_str()], &b[field.as_str()]));
        if lookup("_order").as_deref() == Some("desc") {
            items.reverse();
        }
    }
    Json(Value::Array(items)).into_response()
}

async fn create(
    State(state): State<Shared>,
    Path(resource): Path<String>,
    Json(mut body): Json<Value>,
) -> Response {
    let mut state = state.lock().unwrap();
    state.requests.push(format!("POST /{resource}"));
    if state.fail {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    state.next_id += 1;
    body["id"] = json!(state.next_id);
    state
        .collections
        .entry(resource)
        .or_default()
        .push(body.clone());
    (StatusCode::CREATED, Json(body)).into_response()
}

async fn replace(
    State(state): State<Shared>,
    Path((resource, id)): Path<(String, String)>,
    Json(mut body): Json<Value>,
) -> Response {
    let mut state = state.lock().unwrap();
    state.requests.push(format!("PUT /{resource}/{id}"));
    if state.fail {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    let items = state.collections.entry(resource).or_default();
    match items.iter_mut().find(|item| id_text(&item["id"]) == id) {
        Some(item) => {
            body["id"] = item["id"].clone();
            *item = body.clone();
            Json(body).into_response()
        }
        None => (StatusCode::NOT_FOUND, Json(json!({"error": "no such item"}))).into_response(),
    }
}

async fn remove(
    State(state): State<Shared>,
    Path((resource, id)): Path<(String, String)>,
) -> Response {
    let mut state = state.lock().unwrap();
    state.requests.push(format!("DELETE /{resource}/{id}"));
    if state.fail {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    let items = state.collections.entry(resource).or_default();
    let before = items.len();
    items.retain(|item| id_text(&item["id"]) != id);
    if items.len() == before {
        return StatusCode::NOT_FOUND.into_response();
    }
    Json(json!({})).into_response()
}

/// A json-server lookalike bound to an ephemeral port.
async fn spawn_store(seed: Value) -> (SocketAddr, Shared) {
    let mut state = MockState {
        next_id: 100,
        ..Default::default()
    };
    if let Value::Object(map) = seed {
        for (resource, items) in map {
            let items = items.as_array().cloned().unwrap_or_default();
            state.collections.insert(resource, items);
        }
    }
    let shared: Shared = Arc::new(Mutex::new(state));

    let router = Router::new()
        .route("/{resource}", get(list).post(create))
        .route("/{resource}/{id}", axum::routing::put(replace).delete(remove))
        .with_state(shared.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    (addr, shared)
}

fn seed() -> Value {
    json!({
        "operations": [
            {"id": 1, "description": "Salary", "amount": 1000, "type": "income", "category": 1, "date": "2024-01-15"},
            {"id": 2, "description": "Rent", "amount": 300, "type": "expense", "category": "1", "date": "2024-01-20"},
            {"id": 3, "description": "Bonus", "amount": 500, "type": "income", "category": "2", "date": "2024-02-01"}
        ],
        "categories": [
            {"id": 1, "name": "A"},
            {"id": "2", "name": "B"},
            {"id": "3", "name": "Unused"}
        ],
        "users": [
            {"id": 1, "username": "demo", "password": "demo"}
        ]
    })
}

fn store_for(addr: SocketAddr) -> HttpStore {
    HttpStore::new(&format!("http://{addr}")).unwrap()
}

#[tokio::test]
async fn default_listing_sorts_by_recent_date() {
    let (addr, state) = spawn_store(seed()).await;
    let store = store_for(addr);

    let ops = store.list_operations(&Filter::default()).await.unwrap();
    let ids: Vec<&str> = ops.iter().map(|op| op.id.as_str()).collect();
    assert_eq!(ids, vec!["3", "2", "1"]);
    assert_eq!(
        state.lock().unwrap().queries,
        vec!["_sort=date&_order=desc".to_string()]
    );
}

#[tokio::test]
async fn filters_become_query_parameters() {
    let (addr, state) = spawn_store(seed()).await;
    let store = store_for(addr);

    let filter = Filter {
        kind: TypeFilter::Income,
        category: CategoryFilter::Only(Id::from("2")),
        sort_by: SortBy::HigherAmount,
    };
    let ops = store.list_operations(&filter).await.unwrap();
    assert_eq!(ops.len(), 1);
    assert_eq!(ops[0].description, "Bonus");
    assert_eq!(
        state.lock().unwrap().queries,
        vec!["type=income&category=2&_sort=amount&_order=desc".to_string()]
    );
}

#[tokio::test]
async fn numeric_ids_are_normalized() {
    let (addr, _state) = spawn_store(seed()).await;
    let store = store_for(addr);

    let ops = store
        .list_operations(&Filter {
            sort_by: SortBy::LessRecent,
            ..Filter::default()
        })
        .await
        .unwrap();
    assert_eq!(ops[0].id, Id::from("1"));
    assert_eq!(ops[0].category, Some(Id::from("1")));
    assert_eq!(ops[1].category, Some(Id::from("1")));

    let categories = store.list_categories().await.unwrap();
    assert_eq!(categories[0].id, Id::from("1"));
}

#[tokio::test]
async fn create_update_and_remove_round_trip() {
    let (addr, state) = spawn_store(seed()).await;
    let store = store_for(addr);

    let payload = OperationNew {
        description: "Coffee".to_string(),
        amount: 3.5,
        kind: OperationKind::Expense,
        category: Some(Id::from("2")),
        date: "2024-02-03".to_string(),
    };
    let created = store.create_operation(&payload).await.unwrap();
    assert_eq!(created.id, Id::from("101"));
    assert_eq!(created.amount, 3.5);

    let updated = store
        .update_operation(
            &created.id,
            &OperationNew {
                amount: 4.0,
                ..payload.clone()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.amount, 4.0);

    store.remove_operation(&created.id).await.unwrap();
    let category = store
        .create_category(&CategoryNew {
            name: "Travel".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(category.name, "Travel");

    assert_eq!(
        state.lock().unwrap().requests,
        vec![
            "POST /operations".to_string(),
            "PUT /operations/101".to_string(),
            "DELETE /operations/101".to_string(),
            "POST /categories".to_string(),
        ]
    );
}

#[tokio::test]
async fn non_success_status_is_an_error() {
    let (addr, _state) = spawn_store(seed()).await;
    let store = store_for(addr);

    let err = store
        .update_category(
            &Id::from("42"),
            &CategoryNew {
                name: "Ghost".to_string(),
            },
        )
        .await
        .unwrap_err();
    assert_eq!(
        err,
        GatewayError::Status {
            status: 404,
            message: "no such item".to_string(),
        }
    );

    let err = store.remove_category(&Id::from("42")).await.unwrap_err();
    assert_eq!(
        err,
        GatewayError::Status {
            status: 404,
            message: "Not Found".to_string(),
        }
    );
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let (addr, state) = spawn_store(seed()).await;
    state.lock().unwrap().garbage = true;

    let err = store_for(addr).list_categories().await.unwrap_err();
    assert!(matches!(err, GatewayError::Decode(_)));
}

#[tokio::test]
async fn unreachable_store_is_a_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = store_for(addr).list_users().await.unwrap_err();
    assert!(matches!(err, GatewayError::Transport(_)));
}

#[tokio::test]
async fn tracker_over_http_builds_the_report() {
    let (addr, _state) = spawn_store(seed()).await;
    let tracker = Tracker::new(store_for(addr));

    let balance = tracker.calculate_balance().await;
    assert_eq!(balance.balance, 1200.0);

    let report = tracker.generate_reports().await;
    assert_eq!(report.category_with_highest_balance.name, "A");
    assert_eq!(report.category_with_highest_balance.amount, 700.0);
    assert_eq!(report.month_with_highest_income.name, "January 2024");
    assert!(report.category_totals.get("Unused").is_none());
}

#[tokio::test]
async fn tracker_over_http_guards_category_deletion() {
    let (addr, state) = spawn_store(seed()).await;
    let tracker = Tracker::new(store_for(addr));

    let err = tracker.delete_category(&Id::from("1")).await.unwrap_err();
    assert!(matches!(err, EngineError::CategoryInUse(_)));
    assert!(
        !state
            .lock()
            .unwrap()
            .requests
            .iter()
            .any(|r| r.starts_with("DELETE"))
    );

    tracker.delete_category(&Id::from("3")).await.unwrap();
    let names: Vec<String> = tracker
        .list_categories()
        .await
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, vec!["A".to_string(), "B".to_string()]);
}

#[tokio::test]
async fn tracker_over_http_recovers_from_server_errors() {
    let (addr, state) = spawn_store(seed()).await;
    state.lock().unwrap().fail = true;
    let tracker = Tracker::new(store_for(addr));

    assert!(tracker.list_operations(&Filter::default()).await.is_empty());
    assert_eq!(tracker.calculate_balance().await.income, 0.0);
    assert!(matches!(
        tracker.add_category("Travel").await,
        Err(EngineError::Gateway(GatewayError::Status { status: 500, .. }))
    ));
}

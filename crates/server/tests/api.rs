use api_types::{
    account::AccountView, budget::BudgetView, debt::DebtView, split_bill::SplitBillView,
    transfer::TransferView,
};
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header::CONTENT_TYPE},
};
use http_body_util::BodyExt;
use migration::MigratorTrait;
use sea_orm::{ConnectOptions, Database};
use serde_json::{Value, json};
use tower::ServiceExt;

use engine::Engine;

async fn test_app() -> Router {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).sqlx_logging(false);
    let db = Database::connect(options).await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder().database(db).build().await.unwrap();
    server::app(engine)
}

fn request(method: &str, uri: &str, user: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(user) = user {
        builder = builder.header("x-user-id", user);
    }
    match body {
        Some(body) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create_account(app: &Router, user: &str, name: &str, balance: i64) -> AccountView {
    let (status, body) = send(
        app,
        request(
            "POST",
            "/accounts",
            Some(user),
            Some(json!({ "name": name, "type": "bank", "balance": balance })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    serde_json::from_value(body).unwrap()
}

#[tokio::test]
async fn header_routes_require_user_header() {
    let app = test_app().await;

    let (status, body) = send(&app, request("GET", "/accounts", None, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].is_string());

    let (status, _) = send(&app, request("GET", "/debts", Some("   "), None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(&app, request("GET", "/accounts", Some("alice"), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn transfer_flow_over_http() {
    let app = test_app().await;
    let from = create_account(&app, "alice", "Bank", 1_000_000).await;
    let to = create_account(&app, "alice", "Wallet", 0).await;

    let (status, body) = send(
        &app,
        request(
            "POST",
            "/transfers",
            Some("alice"),
            Some(json!({ "fromAccountId": from.id, "toAccountId": to.id, "amount": 250_000 })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let transfer: TransferView = serde_json::from_value(body).unwrap();
    assert_eq!(transfer.amount, 250_000);

    let (_, body) = send(
        &app,
        request("GET", &format!("/accounts/{}", from.id), Some("alice"), None),
    )
    .await;
    let from: AccountView = serde_json::from_value(body).unwrap();
    assert_eq!(from.balance, 750_000);

    let (status, body) = send(
        &app,
        request(
            "POST",
            "/transfers",
            Some("alice"),
            Some(json!({ "fromAccountId": from.id, "toAccountId": from.id, "amount": 1_000 })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    // bob cannot see alice's accounts
    let (status, _) = send(
        &app,
        request("GET", &format!("/accounts/{}", to.id), Some("bob"), None),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_body_is_bad_request() {
    let app = test_app().await;

    let (status, body) = send(
        &app,
        request("POST", "/accounts", Some("alice"), Some(json!({ "name": "Bank" }))),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn claimed_routes_read_owner_from_request() {
    let app = test_app().await;

    let (status, body) = send(&app, request("GET", "/transactions", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let (status, _) = send(
        &app,
        request(
            "POST",
            "/transactions",
            None,
            Some(json!({ "type": "expense", "amount": 10_000 })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        request(
            "POST",
            "/transactions",
            None,
            Some(json!({ "userId": "alice", "type": "expense", "amount": 10_000 })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, body) = send(&app, request("GET", "/transactions?userId=alice", None, None)).await;
    assert_eq!(body.as_array().map(Vec::len), Some(1));
    let (_, body) = send(&app, request("GET", "/transactions?userId=bob", None, None)).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn duplicate_budget_is_conflict() {
    let app = test_app().await;
    let payload = json!({ "userId": "alice", "amount": 2_000_000, "month": 3, "year": 2026 });

    let (status, body) = send(&app, request("POST", "/budgets", None, Some(payload.clone()))).await;
    assert_eq!(status, StatusCode::CREATED);
    let budget: BudgetView = serde_json::from_value(body).unwrap();
    assert_eq!(budget.month, 3);

    let (status, body) = send(&app, request("POST", "/budgets", None, Some(payload))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].is_string());

    let (status, body) = send(
        &app,
        request("GET", "/budgets/status?userId=alice&month=3&year=2026", None, None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["budget"], json!(2_000_000));
    assert_eq!(body["state"], json!("safe"));

    let (status, _) = send(&app, request("GET", "/budgets/status", None, None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn paying_a_debt_twice_is_conflict() {
    let app = test_app().await;
    let (status, body) = send(
        &app,
        request(
            "POST",
            "/debts",
            Some("alice"),
            Some(json!({ "type": "receivable", "personName": "Budi", "amount": 150_000 })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let debt: DebtView = serde_json::from_value(body).unwrap();
    assert!(!debt.is_paid);

    let pay = format!("/debts/{}/pay", debt.id);
    let (status, body) = send(&app, request("POST", &pay, Some("alice"), None)).await;
    assert_eq!(status, StatusCode::OK);
    let paid: DebtView = serde_json::from_value(body).unwrap();
    assert!(paid.is_paid);
    assert!(paid.paid_date.is_some());

    let (status, _) = send(&app, request("POST", &pay, Some("alice"), None)).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, body) = send(&app, request("GET", "/debts/summary", Some("alice"), None)).await;
    assert_eq!(body["totalReceivable"], json!(0));
}

#[tokio::test]
async fn split_bill_participant_payment() {
    let app = test_app().await;
    let (status, body) = send(
        &app,
        request(
            "POST",
            "/split-bills",
            Some("alice"),
            Some(json!({
                "title": "Dinner",
                "totalAmount": 90_000,
                "splitEvenly": true,
                "participants": [{ "name": "Ani" }, { "name": "Budi" }, { "name": "Cici" }],
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let bill: SplitBillView = serde_json::from_value(body).unwrap();
    assert_eq!(bill.participants.len(), 3);
    assert_eq!(bill.allocated_amount, 90_000);
    assert_eq!(bill.outstanding_amount, 90_000);

    let participant = &bill.participants[0];
    let (status, body) = send(
        &app,
        request(
            "PUT",
            &format!("/split-bills/{}/participants/{}", bill.id, participant.id),
            Some("alice"),
            Some(json!({ "isPaid": true })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let bill: SplitBillView = serde_json::from_value(body).unwrap();
    assert_eq!(bill.paid_amount, 30_000);
    assert_eq!(bill.outstanding_amount, 60_000);

    let (status, _) = send(
        &app,
        request(
            "PUT",
            &format!("/split-bills/{}/participants/missing", bill.id),
            Some("alice"),
            Some(json!({ "isPaid": true })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn profile_is_created_on_first_save() {
    let app = test_app().await;

    let (status, _) = send(&app, request("GET", "/users/me", Some("alice"), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(
        &app,
        request(
            "PUT",
            "/users/me",
            Some("alice"),
            Some(json!({ "name": "Alice", "currency": "USD" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], json!("Alice"));
    assert_eq!(body["id"], json!("alice"));

    let (status, body) = send(&app, request("GET", "/users/me", Some("alice"), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["currency"], json!("USD"));
}

#[tokio::test]
async fn deleted_account_stays_readable() {
    let app = test_app().await;
    let from = create_account(&app, "alice", "Old", 1_000).await;
    let to = create_account(&app, "alice", "Bank", 0).await;
    let (status, _) = send(
        &app,
        request(
            "POST",
            "/transfers",
            Some("alice"),
            Some(json!({ "fromAccountId": from.id, "toAccountId": to.id, "amount": 400 })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let uri = format!("/accounts/{}", from.id);
    let (status, _) = send(&app, request("DELETE", &uri, Some("alice"), None)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, request("GET", &uri, Some("alice"), None)).await;
    assert_eq!(status, StatusCode::OK);
    let account: AccountView = serde_json::from_value(body).unwrap();
    assert!(!account.is_active);
    assert_eq!(account.balance, 600);

    let (_, body) = send(&app, request("GET", "/accounts", Some("alice"), None)).await;
    assert_eq!(body.as_array().map(Vec::len), Some(1));
    let (_, body) = send(
        &app,
        request("GET", "/accounts?includeInactive=true", Some("alice"), None),
    )
    .await;
    assert_eq!(body.as_array().map(Vec::len), Some(2));

    let (status, body) = send(
        &app,
        request(
            "GET",
            &format!("/transfers?accountId={}", from.id),
            Some("alice"),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn totals_past_the_amount_range_are_bad_request() {
    let app = test_app().await;
    create_account(&app, "alice", "Full", i64::MAX - 10).await;
    create_account(&app, "alice", "Cash", 1_000).await;

    let (status, body) = send(
        &app,
        request("GET", "/reports/net-worth", Some("alice"), None),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn blank_owner_lists_nothing() {
    let app = test_app().await;
    let (status, _) = send(
        &app,
        request(
            "POST",
            "/transactions",
            None,
            Some(json!({ "userId": "alice", "type": "expense", "amount": 10_000 })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    for uri in [
        "/transactions?userId=",
        "/transactions?userId=%20%20",
        "/categories?userId=",
        "/budgets?userId=",
    ] {
        let (status, body) = send(&app, request("GET", uri, None, None)).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(body, json!([]), "{uri}");
    }
}

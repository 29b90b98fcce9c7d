//! End-to-end storefront flows against in-process fake services.

use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use bookstore_client::ApiConfig;
use bookstore_core::{
    CheckoutError, CoreError, MemoryStorage, PaymentMethod, ProfileUpdate, Registration,
    SharedStorage,
};
use bookstore_storage::{FileStorage, StorageConfig};
use serde_json::{json, Value};
use storefront::cli::{CartCommand, Command};
use storefront::commands::{account, books, cart, checkout, orders};
use storefront::context::AppContext;
use storefront::error::StorefrontError;

/// Request bodies and auth headers seen by the fake services, in order.
#[derive(Clone, Default)]
struct Recorder {
    calls: Arc<Mutex<Vec<(String, Option<String>, Value)>>>,
}

impl Recorder {
    fn record(&self, route: &str, headers: &HeaderMap, body: Value) {
        let auth = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        self.calls.lock().unwrap().push((route.to_string(), auth, body));
    }

    fn calls(&self) -> Vec<(String, Option<String>, Value)> {
        self.calls.lock().unwrap().clone()
    }
}

fn book_json(id: i64) -> Value {
    match id {
        1 => json!({"id": 1, "title": "Dune", "author": "Frank Herbert", "price": "9.99", "stock": 3}),
        2 => json!({"id": 2, "title": "Emma", "author": "Jane Austen", "price": "5.00", "stock": 1}),
        _ => json!({"id": id, "title": "Sold Out", "author": "Nobody", "price": "1.00", "stock": 0}),
    }
}

type Failure = (StatusCode, Json<Value>);

async fn login(
    State(rec): State<Recorder>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Json<Value>, Failure> {
    rec.record("login", &headers, body.clone());
    if body["password"] == "wrong" {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "Invalid credentials"})),
        ));
    }
    Ok(Json(json!({
        "message": "Login successful",
        "user": {"id": 7, "username": body["username"], "first_name": "Ada", "email": "ada@example.com"},
        "token": "tok-7"
    })))
}

async fn register(
    State(rec): State<Recorder>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    rec.record("register", &headers, body.clone());
    (
        StatusCode::CREATED,
        Json(json!({
            "message": "User registered successfully",
            "user": {"id": 8, "username": body["username"], "first_name": body["first_name"]},
            "token": "tok-8"
        })),
    )
}

async fn get_user(Path(id): Path<i64>) -> Json<Value> {
    Json(json!({"id": id, "username": "grace", "first_name": "Grace", "phone": "555-0100"}))
}

async fn update_user(
    Path(id): Path<i64>,
    State(rec): State<Recorder>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    rec.record("update_user", &headers, body.clone());
    Json(json!({"id": id, "username": "grace", "first_name": "Grace", "phone": body["phone"]}))
}

async fn get_book(Path(id): Path<i64>) -> Result<Json<Value>, Failure> {
    if id == 404 {
        return Err((StatusCode::NOT_FOUND, Json(json!({"detail": "Not found."}))));
    }
    Ok(Json(book_json(id)))
}

async fn create_order(
    State(rec): State<Recorder>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    rec.record("order", &headers, body.clone());
    (
        StatusCode::CREATED,
        Json(json!({
            "id": 55,
            "user_id": body["user_id"],
            "status": "PENDING",
            "total_amount": "24.98",
            "shipping_address": body["shipping_address"],
            "items": body["items"]
        })),
    )
}

async fn create_payment(
    State(rec): State<Recorder>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    rec.record("payment", &headers, body.clone());
    let mut payment = body;
    payment["id"] = json!(90);
    payment["status"] = json!("COMPLETED");
    payment["transaction_id"] = json!("TXN-1");
    (StatusCode::CREATED, Json(payment))
}

async fn reject_payment(
    State(rec): State<Recorder>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    rec.record("payment", &headers, body);
    (StatusCode::BAD_REQUEST, Json(json!({"error": "Card declined"})))
}

fn routes(rec: &Recorder, payments_ok: bool) -> Router {
    let payments = if payments_ok {
        post(create_payment)
    } else {
        post(reject_payment)
    };
    Router::new()
        .route("/api/users/login/", post(login))
        .route("/api/users/register/", post(register))
        .route("/api/users/{id}/", get(get_user).put(update_user))
        .route(
            "/api/orders/by_user/",
            get(|| async {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({"detail": "Given token not valid for any token type"})),
                )
            }),
        )
        .route("/api/books/{id}/", get(get_book))
        .route("/api/orders/", post(create_order))
        .route("/api/payments/", payments)
        .route(
            "/api/reviews/by_book/",
            get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "down") }),
        )
        .route(
            "/api/reviews/book_statistics/",
            get(|| async {
                Json(json!({
                    "book_id": "1",
                    "average_rating": 4.0,
                    "total_reviews": 1,
                    "rating_distribution": [{"rating": 4, "count": 1}]
                }))
            }),
        )
        .with_state(rec.clone())
}

async fn spawn(router: Router) -> ApiConfig {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    let base = url::Url::parse(&format!("http://{}", addr)).unwrap();
    ApiConfig::single_host(&base)
}

async fn context(payments_ok: bool) -> (AppContext, Recorder) {
    let rec = Recorder::default();
    let config = spawn(routes(&rec, payments_ok)).await;
    let storage: SharedStorage = Arc::new(MemoryStorage::new());
    (AppContext::new(storage, &config).unwrap(), rec)
}

#[tokio::test]
async fn login_then_checkout_places_order_and_payment() {
    let (ctx, rec) = context(true).await;

    let user = account::login(&ctx, " ada ", "secret").await.unwrap();
    assert_eq!(user.id, 7);
    assert!(ctx.session.is_authenticated());
    assert_eq!(ctx.session.get_token().as_deref(), Some("tok-7"));

    cart::add(&ctx, 1, 2).await.unwrap();
    let summary = cart::add(&ctx, 2, 1).await.unwrap();
    assert_eq!(summary.total.cents(), 2498);
    assert_eq!(summary.count, 3);

    let receipt = checkout::place_order(&ctx, "  1 Main St ", PaymentMethod::Paypal)
        .await
        .unwrap();
    assert_eq!(receipt.order.id, 55);
    assert_eq!(receipt.payment.order_id, 55);
    assert!(ctx.cart.get_cart().is_empty());

    let calls = rec.calls();
    assert_eq!(calls[0].0, "login");
    assert_eq!(calls[0].2["username"], "ada");

    let (route, auth, body) = &calls[1];
    assert_eq!(route, "order");
    assert_eq!(auth.as_deref(), Some("Bearer tok-7"));
    assert_eq!(
        *body,
        json!({
            "user_id": 7,
            "shipping_address": "1 Main St",
            "items": [
                {"book_id": 1, "quantity": 2, "price": 9.99},
                {"book_id": 2, "quantity": 1, "price": 5.0}
            ]
        })
    );

    let (route, _, body) = &calls[2];
    assert_eq!(route, "payment");
    assert_eq!(
        *body,
        json!({"order_id": 55, "user_id": 7, "amount": 24.98, "payment_method": "PAYPAL"})
    );
}

#[tokio::test]
async fn failed_payment_keeps_the_cart() {
    let (ctx, rec) = context(false).await;
    account::login(&ctx, "ada", "secret").await.unwrap();
    cart::add(&ctx, 1, 1).await.unwrap();

    let err = checkout::place_order(&ctx, "1 Main St", PaymentMethod::CreditCard)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Card declined");
    assert_eq!(ctx.cart.get_item_count(), 1);

    let routes: Vec<String> = rec.calls().into_iter().map(|(route, _, _)| route).collect();
    assert_eq!(routes, vec!["login", "order", "payment"]);
}

#[tokio::test]
async fn checkout_preconditions_make_no_requests() {
    let (ctx, rec) = context(true).await;

    let err = checkout::place_order(&ctx, "1 Main St", PaymentMethod::CreditCard)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        StorefrontError::Checkout(CheckoutError::NotAuthenticated)
    ));

    account::login(&ctx, "ada", "secret").await.unwrap();
    let err = checkout::place_order(&ctx, "1 Main St", PaymentMethod::CreditCard)
        .await
        .unwrap_err();
    assert!(matches!(err, StorefrontError::Checkout(CheckoutError::EmptyCart)));

    cart::add(&ctx, 1, 1).await.unwrap();
    let err = checkout::place_order(&ctx, "   ", PaymentMethod::CreditCard)
        .await
        .unwrap_err();
    assert!(matches!(err, StorefrontError::Checkout(CheckoutError::Validation(_))));

    assert_eq!(rec.calls().len(), 1);
}

#[tokio::test]
async fn cart_add_respects_stock() {
    let (ctx, _) = context(true).await;

    cart::add(&ctx, 2, 1).await.unwrap();
    let err = cart::add(&ctx, 2, 1).await.unwrap_err();
    assert!(matches!(
        err,
        StorefrontError::Core(CoreError::InsufficientStock {
            book_id: 2,
            available: 1,
            requested: 2
        })
    ));

    let err = cart::add(&ctx, 3, 1).await.unwrap_err();
    assert!(matches!(err, StorefrontError::Core(CoreError::InsufficientStock { .. })));

    let err = cart::update(&ctx, 2, 5).unwrap_err();
    assert!(matches!(err, StorefrontError::Core(CoreError::InsufficientStock { .. })));

    let summary = cart::update(&ctx, 2, 0).unwrap();
    assert!(summary.is_empty());
}

#[tokio::test]
async fn book_detail_tolerates_missing_reviews() {
    let (ctx, _) = context(true).await;

    let detail = books::book_detail(&ctx, 1).await.unwrap();
    assert_eq!(detail.book.title, "Dune");
    assert!(detail.reviews.is_empty());
    assert_eq!(detail.stats.map(|s| s.total_reviews), Some(1));
}

#[tokio::test]
async fn dispatch_renders_cart_and_whoami() {
    let (ctx, _) = context(true).await;

    let out = storefront::dispatch(&ctx, Command::Whoami).await.unwrap();
    assert_eq!(out, "Not logged in.");

    let out = storefront::dispatch(&ctx, Command::Cart(CartCommand::Add { id: 1, qty: 2 }))
        .await
        .unwrap();
    assert!(out.contains("Total: $19.98"));

    let err = storefront::dispatch(&ctx, Command::Orders).await.unwrap_err();
    assert_eq!(err.to_string(), "Please log in first");
}

#[tokio::test]
async fn session_and_cart_survive_restart() {
    let dir = tempfile::tempdir().unwrap();
    let rec = Recorder::default();
    let config = spawn(routes(&rec, true)).await;

    {
        let storage = FileStorage::open(&StorageConfig::new(dir.path())).unwrap();
        let ctx = AppContext::new(Arc::new(storage), &config).unwrap();
        account::login(&ctx, "ada", "secret").await.unwrap();
        cart::add(&ctx, 1, 1).await.unwrap();
    }

    let storage = FileStorage::open(&StorageConfig::new(dir.path())).unwrap();
    let ctx = AppContext::new(Arc::new(storage), &config).unwrap();
    assert_eq!(account::whoami(&ctx).map(|u| u.id), Some(7));
    assert_eq!(cart::show(&ctx).total.cents(), 999);

    account::logout(&ctx);
    assert!(account::whoami(&ctx).is_none());
    assert_eq!(cart::show(&ctx).count, 1);
}

#[tokio::test]
async fn register_then_update_profile_refreshes_session() {
    let (ctx, rec) = context(true).await;

    let form = Registration {
        username: "grace".to_string(),
        email: "grace@example.com".to_string(),
        password: "pw".to_string(),
        password2: "pw".to_string(),
        first_name: "Grace".to_string(),
        last_name: "Hopper".to_string(),
    };
    let user = account::register(&ctx, &form).await.unwrap();
    assert_eq!(user.id, 8);
    assert_eq!(ctx.session.get_token().as_deref(), Some("tok-8"));

    let err = account::update_profile(&ctx, &ProfileUpdate::default())
        .await
        .unwrap_err();
    assert!(matches!(err, StorefrontError::Validation(_)));

    let update = ProfileUpdate {
        phone: Some("555-9999".to_string()),
        ..ProfileUpdate::default()
    };
    let refreshed = account::update_profile(&ctx, &update).await.unwrap();
    assert_eq!(refreshed.phone.as_deref(), Some("555-0100"));
    assert_eq!(
        ctx.session.get_user().and_then(|u| u.phone),
        Some("555-0100".to_string())
    );

    let calls = rec.calls();
    assert_eq!(calls[0].0, "register");
    assert_eq!(calls[0].2["password2"], "pw");
    let (route, auth, body) = &calls[1];
    assert_eq!(route, "update_user");
    assert_eq!(auth.as_deref(), Some("Bearer tok-8"));
    assert_eq!(*body, json!({"phone": "555-9999"}));
}

#[tokio::test]
async fn mismatched_passwords_never_reach_the_service() {
    let (ctx, rec) = context(true).await;

    let form = Registration {
        username: "grace".to_string(),
        password: "pw".to_string(),
        password2: "other".to_string(),
        ..Registration::default()
    };
    let err = account::register(&ctx, &form).await.unwrap_err();
    assert!(matches!(err, StorefrontError::Validation(_)));
    assert!(rec.calls().is_empty());
    assert!(!ctx.session.is_authenticated());
}

#[tokio::test]
async fn refused_token_reads_as_expired_session() {
    let (ctx, _) = context(true).await;

    let err = account::login(&ctx, "ada", "wrong").await.unwrap_err();
    assert!(matches!(err, StorefrontError::Api(_)));
    assert_eq!(err.to_string(), "Invalid credentials");

    account::login(&ctx, "ada", "secret").await.unwrap();
    let err = orders::my_orders(&ctx).await.unwrap_err();
    assert!(matches!(err, StorefrontError::SessionExpired(_)));
}

#[tokio::test]
async fn unknown_book_is_named() {
    let (ctx, _) = context(true).await;

    let err = cart::add(&ctx, 404, 1).await.unwrap_err();
    assert!(matches!(err, StorefrontError::BookNotFound(404)));
    assert!(ctx.cart.get_cart().is_empty());

    let err = books::book_detail(&ctx, 404).await.unwrap_err();
    assert_eq!(err.to_string(), "Book 404 was not found");
}

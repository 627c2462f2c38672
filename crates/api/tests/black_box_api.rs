use std::time::Duration;

use reqwest::StatusCode;
use serde_json::{json, Value};

use stonedesk_api::config::ApiConfig;

const ADMIN: &str = "admin@stonedesk.com.br";
const MANAGER: &str = "gerente@stonedesk.com.br";
const OPERATOR: &str = "operador@stonedesk.com.br";

struct TestServer {
    base_url: String,
    client: reqwest::Client,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        Self::spawn_with_delay(Duration::ZERO).await
    }

    async fn spawn_with_delay(submit_delay: Duration) -> Self {
        // Same router as prod, seeded, on an ephemeral port.
        let config = ApiConfig {
            submit_delay,
            seed_demo_data: true,
            ..ApiConfig::default()
        };
        let app = stonedesk_api::app::build_app(&config).expect("failed to build app");
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            client: reqwest::Client::new(),
            handle,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn login(&self, email: &str) -> String {
        let res = self
            .client
            .post(self.url("/auth/login"))
            .json(&json!({ "email": email, "password": "secret" }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        let body: Value = res.json().await.unwrap();
        body["token"].as_str().unwrap().to_string()
    }

    async fn get(&self, path: &str, token: &str) -> (StatusCode, Value) {
        let res = self
            .client
            .get(self.url(path))
            .bearer_auth(token)
            .send()
            .await
            .unwrap();
        let status = res.status();
        (status, res.json().await.unwrap_or(Value::Null))
    }

    async fn send(&self, method: reqwest::Method, path: &str, token: &str, body: Value) -> (StatusCode, Value) {
        let res = self
            .client
            .request(method, self.url(path))
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .unwrap();
        let status = res.status();
        (status, res.json().await.unwrap_or(Value::Null))
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn material_form(name: &str) -> Value {
    json!({
        "name": name,
        "type": "granite",
        "subtype": "slab",
        "dimensions": { "width": 3.0, "height": 1.9, "thickness": 2.0 },
        "quantity": 12,
        "purchase_price": 900.0,
        "price_per_square_meter": 320.0,
        "supplier": "Pedreira Norte",
        "location": "Galpao B",
        "ncm_code": "68029390",
        "processing_level": "finished",
        "entry_date": "2024-06-01"
    })
}

#[tokio::test]
async fn health_is_public() {
    let server = TestServer::spawn().await;
    let res = server.client.get(server.url("/health")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn login_returns_token_user_and_redirect() {
    let server = TestServer::spawn().await;

    let res = server
        .client
        .post(server.url("/auth/login"))
        .json(&json!({ "email": MANAGER, "password": "any-password" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = res.json().await.unwrap();
    assert!(!body["token"].as_str().unwrap().is_empty());
    assert_eq!(body["user"]["role"], "manager");
    assert_eq!(body["redirect"], "/dashboard");
    assert!(body["message"].as_str().unwrap().contains("Carlos Lima"));
}

#[tokio::test]
async fn unknown_email_is_the_single_login_failure() {
    let server = TestServer::spawn().await;

    let res = server
        .client
        .post(server.url("/auth/login"))
        .json(&json!({ "email": "ghost@stonedesk.com.br", "password": "secret" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "invalid_credentials");
}

#[tokio::test]
async fn invalid_login_form_reports_field_errors() {
    let server = TestServer::spawn().await;

    let res = server
        .client
        .post(server.url("/auth/login"))
        .json(&json!({ "email": "not-an-email", "password": "ab" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "validation_error");
    assert!(body["details"]["email"].is_array());
    assert!(body["details"]["password"].is_array());
}

#[tokio::test]
async fn protected_routes_redirect_anonymous_callers_to_login() {
    let server = TestServer::spawn().await;

    let res = server.client.get(server.url("/dashboard")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["redirect"], "/login");

    let (status, _) = server.get("/materials", "not-a-session").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn wrong_role_is_sent_back_to_the_dashboard() {
    let server = TestServer::spawn().await;
    let operator = server.login(OPERATOR).await;
    let manager = server.login(MANAGER).await;
    let admin = server.login(ADMIN).await;

    let (status, body) = server.get("/transactions", &operator).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["redirect"], "/dashboard");

    let (status, _) = server.get("/purchases", &operator).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = server.get("/transactions", &manager).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["count"].as_u64().unwrap() > 0);

    let (status, _) = server.get("/users", &manager).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = server.get("/users", &admin).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 3);
}

#[tokio::test]
async fn menu_lists_only_allowed_sections() {
    let server = TestServer::spawn().await;
    let operator = server.login(OPERATOR).await;

    let (status, body) = server.get("/navigation/menu", &operator).await;
    assert_eq!(status, StatusCode::OK);
    let sections = body["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["section"].as_str().unwrap().to_string())
        .collect::<Vec<_>>();
    assert_eq!(sections, ["dashboard", "inventory", "sales", "clients"]);
}

#[tokio::test]
async fn navigation_resolve_runs_the_gate() {
    let server = TestServer::spawn().await;

    let res = server
        .client
        .get(server.url("/navigation/resolve?path=/sales/new"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["section"], "sales");
    assert_eq!(body["access"]["decision"], "redirect_to_login");

    let operator = server.login(OPERATOR).await;
    let (_, body) = server.get("/navigation/resolve?path=/financial", &operator).await;
    assert_eq!(body["access"]["decision"], "redirect_to_default");
    assert_eq!(body["access"]["to"], "/dashboard");

    let (_, body) = server.get("/navigation/resolve?path=/inventory", &operator).await;
    assert_eq!(body["access"]["decision"], "render");
}

#[tokio::test]
async fn material_form_validation_and_submission() {
    let server = TestServer::spawn().await;
    let operator = server.login(OPERATOR).await;

    let mut bad = material_form("ab");
    bad["quantity"] = json!(0);
    let (status, body) = server.send(reqwest::Method::POST, "/materials", &operator, bad).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"]["name"].is_array());
    assert!(body["details"]["quantity"].is_array());

    let (status, body) = server
        .send(
            reqwest::Method::POST,
            "/materials",
            &operator,
            material_form("Preto Sao Gabriel"),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(!body["message"].as_str().unwrap().is_empty());
    assert_eq!(body["item"]["ncm_code"], "6802.93.90");

    let id = body["item"]["id"].as_str().unwrap().to_string();
    let (status, body) = server.get(&format!("/materials/{id}"), &operator).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Preto Sao Gabriel");

    let (status, body) = server
        .get(&format!("/materials/{id}/ncm-suggestion"), &operator)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["suggested"], "6802.93.90");
    assert_eq!(body["matches"], true);

    let (status, _) = server.get("/materials/not-a-uuid", &operator).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn material_list_filters_by_type() {
    let server = TestServer::spawn().await;
    let operator = server.login(OPERATOR).await;

    let (status, body) = server.get("/materials?type=marble", &operator).await;
    assert_eq!(status, StatusCode::OK);
    let items = body["items"].as_array().unwrap();
    assert!(!items.is_empty());
    assert!(items.iter().all(|m| m["type"] == "marble"));
}

#[tokio::test]
async fn dashboard_hides_financials_from_operators() {
    let server = TestServer::spawn().await;
    let operator = server.login(OPERATOR).await;
    let manager = server.login(MANAGER).await;

    let (status, body) = server.get("/dashboard", &operator).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["snapshot"]["financial"].is_null());
    assert!(body["snapshot"]["purchases"].is_null());
    assert!(body["snapshot"]["inventory"]["material_count"].as_u64().unwrap() > 0);
    assert!(body["display"]["stock_value"].as_str().unwrap().starts_with("R$"));

    let (status, body) = server.get("/dashboard", &manager).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["snapshot"]["financial"].is_object());
    assert!(body["display"]["balance"].is_string());

    let (status, _) = server.get("/dashboard?month=2024-13", &manager).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn month_filter_keeps_only_that_month() {
    let server = TestServer::spawn().await;
    let manager = server.login(MANAGER).await;

    let month = chrono::Local::now().format("%Y-%m").to_string();
    let (status, body) = server
        .get(&format!("/transactions?month={month}"), &manager)
        .await;
    assert_eq!(status, StatusCode::OK);
    for t in body["items"].as_array().unwrap() {
        assert!(t["date"].as_str().unwrap().starts_with(&month));
    }
}

#[tokio::test]
async fn finished_sales_cannot_change_status() {
    let server = TestServer::spawn().await;
    let operator = server.login(OPERATOR).await;

    let (_, clients) = server.get("/clients", &operator).await;
    let (_, materials) = server.get("/materials", &operator).await;
    let client_id = clients["items"][0]["id"].clone();
    let material_id = materials["items"][0]["id"].clone();

    let (status, body) = server
        .send(
            reqwest::Method::POST,
            "/sales",
            &operator,
            json!({
                "client_id": client_id,
                "material_id": material_id,
                "quantity": 3,
                "unit_price": 1200.0,
                "date": "2024-06-10"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["item"]["status"], "pending");
    assert_eq!(body["item"]["total_value"], 3600.0);
    let id = body["item"]["id"].as_str().unwrap().to_string();

    let path = format!("/sales/{id}/status");
    let (status, _) = server
        .send(reqwest::Method::PUT, &path, &operator, json!({ "status": "completed" }))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = server
        .send(reqwest::Method::PUT, &path, &operator, json!({ "status": "cancelled" }))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "conflict");
}

#[tokio::test]
async fn fiscal_endpoints() {
    let server = TestServer::spawn().await;
    let manager = server.login(MANAGER).await;
    let operator = server.login(OPERATOR).await;

    let (status, body) = server
        .get("/fiscal/ncm/suggest?type=granite&processing=finished", &manager)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], "6802.93.90");

    let (_, body) = server.get("/fiscal/ncm/validate?code=251611.00", &manager).await;
    assert_eq!(body["valid"], false);

    let (_, body) = server.get("/fiscal/ncm/validate?code=2516.11.00", &manager).await;
    assert_eq!(body["valid"], true);
    assert!(body["description"].is_string());

    let (status, body) = server.get("/fiscal/report", &manager).await;
    assert_eq!(status, StatusCode::OK);
    assert!(!body["unclassified"].as_array().unwrap().is_empty());
    assert!(!body["divergent"].as_array().unwrap().is_empty());

    let (status, _) = server.get("/fiscal/report", &operator).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn logout_ends_the_session() {
    let server = TestServer::spawn().await;
    let token = server.login(ADMIN).await;

    let (status, body) = server.get("/auth/me", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["email"], ADMIN);

    let (status, body) = server
        .send(reqwest::Method::POST, "/auth/logout", &token, json!({}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["redirect"], "/login");

    let (status, _) = server.get("/auth/me", &token).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn concurrent_status_changes_cannot_reopen_a_finished_sale() {
    let server = TestServer::spawn_with_delay(Duration::from_millis(200)).await;
    let operator = server.login(OPERATOR).await;

    let (_, clients) = server.get("/clients", &operator).await;
    let (_, materials) = server.get("/materials", &operator).await;
    let (status, body) = server
        .send(
            reqwest::Method::POST,
            "/sales",
            &operator,
            json!({
                "client_id": clients["items"][0]["id"],
                "material_id": materials["items"][0]["id"],
                "quantity": 1,
                "unit_price": 500.0,
                "date": "2024-06-10"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["item"]["id"].as_str().unwrap().to_string();
    let path = format!("/sales/{id}/status");

    let ((complete, _), (cancel, _)) = tokio::join!(
        server.send(reqwest::Method::PUT, &path, &operator, json!({ "status": "completed" })),
        server.send(reqwest::Method::PUT, &path, &operator, json!({ "status": "cancelled" })),
    );

    let mut statuses = [complete, cancel];
    statuses.sort();
    assert_eq!(statuses, [StatusCode::OK, StatusCode::CONFLICT]);

    let (_, sale) = server.get(&format!("/sales/{id}"), &operator).await;
    let expected = if complete == StatusCode::OK { "completed" } else { "cancelled" };
    assert_eq!(sale["status"], expected);
}

#[tokio::test]
async fn update_in_flight_does_not_restore_a_deleted_client() {
    let server = TestServer::spawn_with_delay(Duration::from_millis(200)).await;
    let operator = server.login(OPERATOR).await;

    let (_, clients) = server.get("/clients", &operator).await;
    let client = clients["items"][0].clone();
    let path = format!("/clients/{}", client["id"].as_str().unwrap());

    let delete_later = async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        server.send(reqwest::Method::DELETE, &path, &operator, json!({})).await
    };
    let ((put, _), (delete, _)) = tokio::join!(
        server.send(reqwest::Method::PUT, &path, &operator, client.clone()),
        delete_later,
    );

    assert_eq!(delete, StatusCode::OK);
    assert_eq!(put, StatusCode::NOT_FOUND);
    let (after, _) = server.get(&path, &operator).await;
    assert_eq!(after, StatusCode::NOT_FOUND);
}

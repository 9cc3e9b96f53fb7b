//! In-process stand-in for the salon REST API, bound to an ephemeral port.
//!
//! Every request is recorded (method, path, raw query, bearer token) so tests can assert on
//! what the client sent. Behaviour knobs live on [`BackendState`].

use axum::extract::{Path, RawQuery, Request, State};
use axum::http::{HeaderMap, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use salon_client_core::ClientConfig;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const PASSWORD: &str = "secret";

#[derive(Clone, Debug)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub bearer: Option<String>,
}

impl Recorded {
    pub fn values(&self, key: &str) -> Vec<String> {
        self.query
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
            .collect()
    }

    pub fn has(&self, key: &str) -> bool {
        self.query.iter().any(|(k, _)| k == key)
    }
}

pub struct BackendState {
    pub access_token: String,
    pub refresh_token: String,
    pub refresh_calls: u32,
    pub refresh_fails: bool,
    pub requests: Vec<Recorded>,
    pub transactions: Vec<Value>,
    pub next_id: i64,
    /// Wrap the list in `{items, total}` instead of a bare array.
    pub report_total: bool,
    /// Delay list responses filtered by this client id.
    pub slow_client: Option<(i64, Duration)>,
    pub settings: Value,
    pub settings_puts: Vec<(String, Value)>,
    /// Answer every request to a path with this status, after recording it.
    pub forced_status: HashMap<String, u16>,
    /// Reject every bearer token, including freshly refreshed ones.
    pub reject_tokens: bool,
}

pub type Shared = Arc<Mutex<BackendState>>;

impl BackendState {
    fn seeded() -> Self {
        Self {
            access_token: "access-0".into(),
            refresh_token: "refresh-0".into(),
            refresh_calls: 0,
            refresh_fails: false,
            requests: Vec::new(),
            transactions: Vec::new(),
            next_id: 1000,
            report_total: false,
            slow_client: None,
            settings: json!({
                "details": {"name": "Studio Bela", "document": "11.222.333/0001-81",
                            "address": {"cep": "01001000", "street": "Praça da Sé", "number": "1",
                                        "neighborhood": "Sé", "city": "São Paulo", "state": "SP"}},
                "financial": {"allow_negative_balance": false, "card_fee_percentage": "2.5"},
                "notifications": {"email_enabled": true, "reminder_hours_before": 24},
                "theme": {"primary_color": "#aa3366"},
                "admin": {}
            }),
            settings_puts: Vec::new(),
            forced_status: HashMap::new(),
            reject_tokens: false,
        }
    }
}

pub struct FakeBackend {
    pub base_url: String,
    pub state: Shared,
    _server: tokio::task::JoinHandle<()>,
}

impl FakeBackend {
    pub async fn start() -> Self {
        let state: Shared = Arc::new(Mutex::new(BackendState::seeded()));
        let app = router(state.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind fake backend");
        let addr = listener.local_addr().expect("local addr");
        let server = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve fake backend");
        });
        Self {
            base_url: format!("http://{}", addr),
            state,
            _server: server,
        }
    }

    pub fn config(&self) -> ClientConfig {
        ClientConfig::new(self.base_url.clone()).with_cep_base_url(format!("{}/cep", self.base_url))
    }

    pub fn with_state<T>(&self, f: impl FnOnce(&mut BackendState) -> T) -> T {
        f(&mut self.state.lock().expect("backend state"))
    }

    pub fn requests_to(&self, path: &str) -> Vec<Recorded> {
        self.with_state(|s| s.requests.iter().filter(|r| r.path == path).cloned().collect())
    }

    pub fn requests(&self, method: &str, path: &str) -> Vec<Recorded> {
        self.with_state(|s| {
            s.requests
                .iter()
                .filter(|r| r.method == method && r.path == path)
                .cloned()
                .collect()
        })
    }

    pub fn seed_transactions(&self, rows: Vec<Value>) {
        self.with_state(|s| s.transactions = rows);
    }
}

fn parse_query(raw: Option<String>) -> Vec<(String, String)> {
    raw.unwrap_or_default()
        .split('&')
        .filter(|p| !p.is_empty())
        .map(|pair| {
            let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
            let decode = |s: &str| {
                urlencoding::decode(&s.replace('+', " "))
                    .map(|c| c.into_owned())
                    .unwrap_or_else(|_| s.to_string())
            };
            (decode(k), decode(v))
        })
        .collect()
}

async fn record(State(state): State<Shared>, req: Request, next: Next) -> Response {
    let bearer = req
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_string);
    let entry = Recorded {
        method: req.method().to_string(),
        path: req.uri().path().to_string(),
        query: parse_query(req.uri().query().map(str::to_string)),
        bearer,
    };
    let forced = {
        let mut st = state.lock().expect("backend state");
        let forced = st.forced_status.get(&entry.path).copied();
        st.requests.push(entry);
        forced
    };
    if let Some(code) = forced {
        let status = StatusCode::from_u16(code).expect("status code");
        return (status, Json(json!({"detail": format!("Forced status {}", code)}))).into_response();
    }
    next.run(req).await
}

fn unauthorized() -> Response {
    (StatusCode::UNAUTHORIZED, Json(json!({"detail": "Not authenticated"}))).into_response()
}

fn authorized(state: &Shared, headers: &HeaderMap) -> bool {
    let st = state.lock().expect("backend state");
    if st.reject_tokens {
        return false;
    }
    let expected = format!("Bearer {}", st.access_token);
    drop(st);
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(|v| v == expected)
        .unwrap_or(false)
}

macro_rules! require_auth {
    ($state:expr, $headers:expr) => {
        if !authorized(&$state, &$headers) {
            return unauthorized();
        }
    };
}

fn user(email: &str) -> Value {
    json!({"id": 1, "name": "Ana Souza", "email": email, "company_id": 10, "role": "owner"})
}

async fn login(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let email = body["email"].as_str().unwrap_or_default().to_string();
    if body["password"] != PASSWORD {
        return (StatusCode::UNAUTHORIZED, Json(json!({"detail": "Incorrect email or password"})))
            .into_response();
    }
    let st = state.lock().expect("backend state");
    Json(json!({
        "access_token": st.access_token,
        "refresh_token": st.refresh_token,
        "token_type": "bearer",
        "user": user(&email),
    }))
    .into_response()
}

async fn refresh(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut st = state.lock().expect("backend state");
    st.refresh_calls += 1;
    if st.refresh_fails || body["refresh_token"] != st.refresh_token.as_str() {
        return (StatusCode::UNAUTHORIZED, Json(json!({"detail": "Invalid refresh token"})))
            .into_response();
    }
    let n = st.refresh_calls;
    st.access_token = format!("access-{}", n);
    st.refresh_token = format!("refresh-{}", n);
    Json(json!({"access_token": st.access_token, "refresh_token": st.refresh_token})).into_response()
}

async fn me(State(state): State<Shared>, headers: HeaderMap) -> Response {
    require_auth!(state, headers);
    Json(user("ana@studiobela.com.br")).into_response()
}

async fn list_transactions(State(state): State<Shared>, headers: HeaderMap, RawQuery(raw): RawQuery) -> Response {
    require_auth!(state, headers);
    let query = parse_query(raw);
    let params: HashMap<&str, &str> = query.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
    let client_id: Option<i64> = params.get("client_id").and_then(|c| c.parse().ok());
    let skip: usize = params.get("skip").and_then(|v| v.parse().ok()).unwrap_or(0);
    let limit: usize = params.get("limit").and_then(|v| v.parse().ok()).unwrap_or(20);

    let (rows, delay, report_total) = {
        let st = state.lock().expect("backend state");
        let rows: Vec<Value> = st
            .transactions
            .iter()
            .filter(|t| client_id.map_or(true, |c| t["client"]["id"] == c))
            .cloned()
            .collect();
        let delay = match (st.slow_client, client_id) {
            (Some((slow, d)), Some(c)) if slow == c => Some(d),
            _ => None,
        };
        (rows, delay, st.report_total)
    };
    if let Some(d) = delay {
        tokio::time::sleep(d).await;
    }
    let total = rows.len();
    let page: Vec<Value> = rows.into_iter().skip(skip).take(limit).collect();
    if report_total {
        Json(json!({"items": page, "total": total})).into_response()
    } else {
        Json(Value::Array(page)).into_response()
    }
}

async fn totals(State(state): State<Shared>, headers: HeaderMap) -> Response {
    require_auth!(state, headers);
    Json(json!({
        "total_received": "300.00",
        "total_to_receive": "120.50",
        "total_paid": "80.00",
        "total_to_pay": 40
    }))
    .into_response()
}

async fn create_transaction(State(state): State<Shared>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    require_auth!(state, headers);
    if body["description"].as_str().map_or(true, |d| d.trim().is_empty()) {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({"detail": [{"loc": ["body", "description"], "msg": "Descrição é obrigatória"}]})),
        )
            .into_response();
    }
    let mut st = state.lock().expect("backend state");
    st.next_id += 1;
    let row = json!({
        "id": st.next_id,
        "type": body["type"],
        "value": body["value"],
        "date": format!("{}T00:00:00", body["date"].as_str().unwrap_or("2024-01-01")),
        "status": "planned",
        "is_paid": body["is_paid"],
        "description": body["description"],
        "origin": "manual"
    });
    st.transactions.push(row.clone());
    (StatusCode::CREATED, Json(row)).into_response()
}

async fn delete_transaction(State(state): State<Shared>, headers: HeaderMap, Path(id): Path<i64>) -> Response {
    require_auth!(state, headers);
    let mut st = state.lock().expect("backend state");
    let before = st.transactions.len();
    st.transactions.retain(|t| t["id"] != id);
    if st.transactions.len() == before {
        return (StatusCode::NOT_FOUND, Json(json!({"detail": "Transação não encontrada"}))).into_response();
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn toggle_paid(State(state): State<Shared>, headers: HeaderMap, Path(id): Path<i64>) -> Response {
    require_auth!(state, headers);
    let mut st = state.lock().expect("backend state");
    match st.transactions.iter_mut().find(|t| t["id"] == id) {
        Some(t) => {
            let paid = t["is_paid"].as_bool().unwrap_or(false);
            t["is_paid"] = json!(!paid);
            Json(t.clone()).into_response()
        }
        None => (StatusCode::NOT_FOUND, Json(json!({"detail": "Transação não encontrada"}))).into_response(),
    }
}

async fn get_settings(State(state): State<Shared>, headers: HeaderMap) -> Response {
    require_auth!(state, headers);
    Json(state.lock().expect("backend state").settings.clone()).into_response()
}

async fn put_settings(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(domain): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    require_auth!(state, headers);
    let mut st = state.lock().expect("backend state");
    if domain == "admin" {
        return (StatusCode::FORBIDDEN, Json(json!({"detail": "Apenas administradores"}))).into_response();
    }
    st.settings[domain.as_str()] = body.clone();
    st.settings_puts.push((domain, body));
    Json(json!({"message": "ok"})).into_response()
}

async fn cep(Path(cep): Path<String>) -> Response {
    match cep.as_str() {
        "01001000" => Json(json!({
            "cep": "01001-000",
            "logradouro": "Praça da Sé",
            "complemento": "lado ímpar",
            "bairro": "Sé",
            "localidade": "São Paulo",
            "uf": "SP"
        }))
        .into_response(),
        _ => Json(json!({"erro": "true"})).into_response(),
    }
}

async fn unread_count(State(state): State<Shared>, headers: HeaderMap) -> Response {
    require_auth!(state, headers);
    Json(json!({"count": 3})).into_response()
}

async fn read_all(State(state): State<Shared>, headers: HeaderMap) -> Response {
    require_auth!(state, headers);
    StatusCode::NO_CONTENT.into_response()
}

async fn cancel_appointment(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    require_auth!(state, headers);
    Json(json!({
        "id": id,
        "start_time": "2024-06-20T14:30:00",
        "status": "cancelled",
        "notes": body["reason"],
        "service_name": "Corte feminino"
    }))
    .into_response()
}

async fn financial_report(State(state): State<Shared>, headers: HeaderMap) -> Response {
    require_auth!(state, headers);
    Json(json!({
        "total_income": "1500.00",
        "total_expense": "400.25",
        "by_category": [{"category": "Serviços", "total": "1500.00"}]
    }))
    .into_response()
}

async fn commissions(State(state): State<Shared>, headers: HeaderMap) -> Response {
    require_auth!(state, headers);
    Json(json!([
        {"id": 1, "professional": {"id": 7, "name": "Carla"}, "value": "45.00", "is_paid": false, "reference_date": "2024-06-10"},
        {"id": 2, "professional": {"id": 7, "name": "Carla"}, "value": "30.00", "is_paid": true, "reference_date": "2024-06-11"},
        {"id": 3, "professional": {"id": 8, "name": "Rui"}, "value": "12.50", "is_paid": false, "reference_date": "2024-06-12"}
    ]))
    .into_response()
}

fn router(state: Shared) -> Router {
    Router::new()
        .route("/auth/login/json", post(login))
        .route("/auth/refresh", post(refresh))
        .route("/auth/me", get(me))
        .route("/financial/transactions", get(list_transactions).post(create_transaction))
        .route("/financial/transactions/totals", get(totals))
        .route("/financial/transactions/:id", delete(delete_transaction))
        .route("/financial/transactions/:id/toggle-paid", post(toggle_paid))
        .route("/company-settings", get(get_settings))
        .route("/company-settings/:domain", put(put_settings))
        .route("/cep/:cep/json/", get(cep))
        .route("/notifications/unread-count", get(unread_count))
        .route("/notifications/read-all", post(read_all))
        .route("/appointments/:id/cancel", post(cancel_appointment))
        .route("/reports/financial", get(financial_report))
        .route("/commissions", get(commissions))
        .layer(middleware::from_fn_with_state(state.clone(), record))
        .with_state(state)
}

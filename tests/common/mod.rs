#![allow(dead_code)]

use assert_cmd::Command;
use axum::extract::{Query, State};
use axum::response::Json;
use axum::routing::get;
use axum::Router;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// A temporary project directory for running the binary against.
pub struct TestProject {
    pub dir: TempDir,
}

impl TestProject {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Path to the compiled matcha-finder binary.
    pub fn bin() -> PathBuf {
        PathBuf::from(env!("CARGO_BIN_EXE_matcha-finder"))
    }

    /// A command with colour disabled so output can be matched literally.
    pub fn cmd() -> Command {
        let mut cmd = Command::new(Self::bin());
        cmd.env("NO_COLOR", "1").env_remove("GOOGLE_MAPS_API_KEY");
        cmd
    }

    /// Run `init` and fail the test if it does not succeed.
    pub fn init(&self) {
        Self::cmd()
            .arg("init")
            .arg(self.path())
            .assert()
            .success();
    }

    /// Point the project at a fake API with a fixed key and no pacing delays.
    pub fn configure(&self, base_url: &str) {
        let config = format!(
            r#"[places]
base_url = "{base_url}"
api_key = "test-key"

[pacing]
review_delay_ms = 0
page_delay_ms = 0
"#
        );
        let path = self.path().join(".matcha-finder").join("config.toml");
        std::fs::write(path, config).expect("failed to write config");
    }

    /// Initialized project wired to a freshly started fake API.
    pub fn with_api(scenario: Scenario) -> (Self, FakeMapsApi) {
        let project = Self::new();
        project.init();
        let api = FakeMapsApi::start(scenario);
        project.configure(&api.base_url);
        (project, api)
    }
}

/// How the fake nearby-search endpoint answers
#[derive(Debug, Clone, Copy)]
pub enum Scenario {
    /// Two venues, then a continuation token leading to one more
    TwoPages,
    ZeroResults,
    Denied,
}

struct FakeState {
    scenario: Scenario,
    nearby_queries: Mutex<Vec<HashMap<String, String>>>,
}

/// In-process stand-in for the Google Maps web services.
pub struct FakeMapsApi {
    pub base_url: String,
    state: Arc<FakeState>,
}

impl FakeMapsApi {
    pub fn start(scenario: Scenario) -> Self {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("failed to bind");
        listener
            .set_nonblocking(true)
            .expect("failed to set non-blocking");
        let addr = listener.local_addr().expect("no local addr");

        let state = Arc::new(FakeState {
            scenario,
            nearby_queries: Mutex::new(Vec::new()),
        });
        let app = Router::new()
            .route("/geocode/json", get(geocode))
            .route("/place/nearbysearch/json", get(nearby))
            .route("/place/details/json", get(details))
            .with_state(state.clone());

        std::thread::spawn(move || {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("failed to build runtime");
            rt.block_on(async move {
                let listener =
                    tokio::net::TcpListener::from_std(listener).expect("failed to adopt listener");
                axum::serve(listener, app).await.expect("fake API stopped");
            });
        });

        Self {
            base_url: format!("http://{addr}"),
            state,
        }
    }

    /// Query strings received by the nearby-search endpoint, in order.
    pub fn nearby_queries(&self) -> Vec<HashMap<String, String>> {
        self.state.nearby_queries.lock().unwrap().clone()
    }
}

fn place(id: &str, name: &str, vicinity: &str, rating: f64) -> Value {
    json!({
        "place_id": id,
        "name": name,
        "vicinity": vicinity,
        "rating": rating,
        "geometry": { "location": { "lat": 43.65, "lng": -79.38 } }
    })
}

async fn geocode(Query(q): Query<HashMap<String, String>>) -> Json<Value> {
    if q.get("address").map(String::as_str) == Some("Atlantis") {
        return Json(json!({ "status": "ZERO_RESULTS", "results": [] }));
    }
    Json(json!({
        "status": "OK",
        "results": [{ "geometry": { "location": { "lat": 43.65, "lng": -79.38 } } }]
    }))
}

async fn nearby(
    State(state): State<Arc<FakeState>>,
    Query(q): Query<HashMap<String, String>>,
) -> Json<Value> {
    let follow_up = q.get("pagetoken").map(String::as_str) == Some("page-2");
    state.nearby_queries.lock().unwrap().push(q);

    let body = match state.scenario {
        Scenario::TwoPages if follow_up => json!({
            "status": "OK",
            "results": [place("p-corner", "Corner Cafe", "3 King St", 4.2)]
        }),
        Scenario::TwoPages => json!({
            "status": "OK",
            "results": [
                place("p-kissa", "Kissa Matcha Bar", "1 Queen St", 4.6),
                place("p-leaf", "Leaf & Stone", "2 Queen St", 3.9)
            ],
            "next_page_token": "page-2"
        }),
        Scenario::ZeroResults => json!({ "status": "ZERO_RESULTS", "results": [] }),
        Scenario::Denied => json!({
            "status": "REQUEST_DENIED",
            "error_message": "The provided API key is invalid.",
            "results": []
        }),
    };
    Json(body)
}

async fn details(Query(q): Query<HashMap<String, String>>) -> Json<Value> {
    let reviews = match q.get("place_id").map(String::as_str) {
        Some("p-kissa") => vec![
            "Creamy matcha with a grassy finish.",
            "Best matcha in town!",
        ],
        Some("p-leaf") => vec!["Bitter matcha latte, not sweet enough."],
        Some("p-corner") => vec!["Great coffee."],
        _ => vec![],
    };
    let reviews: Vec<Value> = reviews.into_iter().map(|t| json!({ "text": t })).collect();
    Json(json!({ "status": "OK", "result": { "reviews": reviews } }))
}

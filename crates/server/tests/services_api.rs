use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use models::{host, service as service_model, workspace};
use service::repository::{InventoryRepository, MemoryInventoryRepository};
use server::routes;
use server::state::ServerState;

fn cors() -> tower_http::cors::CorsLayer { tower_http::cors::CorsLayer::very_permissive() }

/// Router over a fresh in-memory store with two workspaces, one host each.
struct TestApp {
    router: Router,
    repo: Arc<MemoryInventoryRepository>,
    ws: workspace::Model,
    second_ws: workspace::Model,
    host: host::Model,
}

impl TestApp {
    async fn new() -> Self {
        common::utils::logging::init_test_logging();
        let repo = Arc::new(MemoryInventoryRepository::new());
        let ws = repo.create_workspace("test_ws").await.unwrap();
        let second_ws = repo.create_workspace("second_ws").await.unwrap();
        let host = repo.create_host(ws.id, "192.168.0.1", "linux", "").await.unwrap();
        repo.create_host(second_ws.id, "192.168.0.2", "linux", "").await.unwrap();
        let router = routes::build_router(ServerState::new(repo.clone()), cors());
        Self { router, repo, ws, second_ws, host }
    }

    fn url(&self, ws: &workspace::Model, id: Option<Uuid>) -> String {
        match id {
            Some(id) => format!("/workspace/{}/services/{}", ws.name, id),
            None => format!("/workspace/{}/services", ws.name),
        }
    }

    async fn send(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let req = match body {
            Some(b) => builder
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&b).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let resp = self.router.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
        (status, json)
    }

    /// Service factory: stored directly, bypassing the API.
    async fn service_on(&self, host: &host::Model, port: i32, status: &str) -> service_model::Model {
        let new = service_model::NewService {
            workspace_id: host.workspace_id,
            host_id: host.id,
            name: format!("svc-{}", port),
            port,
            protocol: "tcp".into(),
            status: service_model::ServiceStatus::parse(status).unwrap(),
            description: String::new(),
            owned: false,
            owner: String::new(),
            version: String::new(),
            creator: String::new(),
            command_id: None,
        };
        self.repo.insert_service(new).await.unwrap()
    }

    async fn stored(&self, id: Uuid) -> service_model::Model {
        self.repo.get_service(self.ws.id, id).await.unwrap().expect("service stored")
    }
}

fn create_body(parent: Uuid) -> Value {
    json!({
        "name": "ftp",
        "description": "test. test",
        "owned": false,
        "ports": [21],
        "protocol": "tcp",
        "status": "open",
        "parent": parent
    })
}

fn raw_put_data(id: Uuid, parent: Option<Uuid>, status: &str, ports: &[i64]) -> Value {
    let mut raw = json!({
        "status": status,
        "protocol": "tcp",
        "description": "",
        "_rev": "",
        "metadata": {"update_time": 1510945708000u64, "update_user": "", "update_action": 0, "creator": "",
                     "create_time": 1510945708000u64, "update_controller_action": "", "owner": "leonardo",
                     "command_id": null},
        "owned": false,
        "owner": "",
        "version": "",
        "_id": id,
        "ports": ports,
        "name": "ssh2",
        "type": "Service"
    });
    if let Some(p) = parent {
        raw["parent"] = json!(p);
    }
    raw
}

#[tokio::test]
async fn service_list_backwards_compatibility() {
    let app = TestApp::new().await;
    app.service_on(&app.host, 22, "open").await;
    let (status, body) = app.send("GET", &app.url(&app.ws, None), None).await;
    assert_eq!(status, StatusCode::OK);
    let services = body["services"].as_array().expect("services array");
    assert_eq!(services.len(), 1);
    for entry in services {
        let keys: Vec<_> = entry.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys.len(), 3);
        for k in ["id", "key", "value"] {
            assert!(keys.iter().any(|x| x == k), "missing {k}");
        }
        let value = entry["value"].as_object().unwrap();
        for k in ["status", "protocol", "description", "_rev", "owned", "owner", "credentials", "name", "version", "_id", "metadata"] {
            assert!(value.contains_key(k), "value missing {k}");
        }
    }
}

#[tokio::test]
async fn list_never_includes_other_workspace_services() {
    let app = TestApp::new().await;
    let mine = app.service_on(&app.host, 22, "open").await;
    let other_host = app.repo.list_hosts(app.second_ws.id).await.unwrap().remove(0);
    let theirs = app.service_on(&other_host, 80, "open").await;

    let (_, body) = app.send("GET", &app.url(&app.ws, None), None).await;
    let ids: Vec<String> = body["services"].as_array().unwrap().iter().map(|e| e["id"].as_str().unwrap().to_string()).collect();
    assert_eq!(ids, vec![mine.id.to_string()]);
    assert!(!ids.contains(&theirs.id.to_string()));
}

#[tokio::test]
async fn list_without_paging_returns_every_service() {
    let app = TestApp::new().await;
    for port in 1..=150 {
        app.service_on(&app.host, port, "open").await;
    }

    let (status, body) = app.send("GET", &app.url(&app.ws, None), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["services"].as_array().unwrap().len(), 150);

    let (_, body) = app.send("GET", &format!("{}?page=2&per_page=100", app.url(&app.ws, None)), None).await;
    assert_eq!(body["services"].as_array().unwrap().len(), 50);
    let (_, body) = app.send("GET", &format!("{}?per_page=20", app.url(&app.ws, None)), None).await;
    assert_eq!(body["services"].as_array().unwrap().len(), 20);
}

#[tokio::test]
async fn create_service() {
    let app = TestApp::new().await;
    let (status, body) = app.send("POST", &app.url(&app.ws, None), Some(create_body(app.host.id))).await;
    assert_eq!(status, StatusCode::CREATED);
    let id: Uuid = body["_id"].as_str().unwrap().parse().unwrap();
    let stored = app.stored(id).await;
    assert_eq!(stored.name, "ftp");
    assert_eq!(stored.port, 21);
    assert_eq!(stored.host_id, app.host.id);
    assert_eq!(body["parent"], json!(app.host.id));
    assert_eq!(body["ports"], json!([21]));
}

#[tokio::test]
async fn create_fails_with_host_of_other_workspace() {
    let app = TestApp::new().await;
    assert_ne!(app.host.workspace_id, app.second_ws.id);
    let (status, body) = app.send("POST", &app.url(&app.second_ws, None), Some(create_body(app.host.id))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("Host with id"));
    assert!(app.repo.list_services(app.second_ws.id, None).await.unwrap().is_empty());
}

#[tokio::test]
async fn create_fails_with_unknown_host() {
    let app = TestApp::new().await;
    let (status, body) = app.send("POST", &app.url(&app.ws, None), Some(create_body(Uuid::new_v4()))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("Host with id"));
}

#[tokio::test]
async fn update_fails_with_host_of_other_workspace() {
    let app = TestApp::new().await;
    let existing = app.service_on(&app.host, 22, "open").await;
    let foreign = app.repo.create_host(app.second_ws.id, "10.9.9.9", "", "").await.unwrap();
    let (status, body) = app.send("PUT", &app.url(&app.ws, Some(existing.id)), Some(create_body(foreign.id))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("Can't change service parent."));
}

#[tokio::test]
async fn update_with_json_from_webui() {
    let app = TestApp::new().await;
    let existing = app.service_on(&app.host, 22, "closed").await;
    let (status, _) = app.send("PUT", &app.url(&app.ws, Some(existing.id)), Some(raw_put_data(existing.id, None, "open", &[22]))).await;
    assert_eq!(status, StatusCode::OK);
    let updated = app.stored(existing.id).await;
    assert_eq!(updated.status, "open");
    assert_eq!(updated.name, "ssh2");
}

#[tokio::test]
async fn update_cant_change_parent() {
    let app = TestApp::new().await;
    let existing = app.service_on(&app.host, 22, "open").await;
    let sibling = app.repo.create_host(app.ws.id, "192.168.0.77", "", "").await.unwrap();
    let (status, body) = app
        .send("PUT", &app.url(&app.ws, Some(existing.id)), Some(raw_put_data(existing.id, Some(sibling.id), "open", &[22])))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("Can't change service parent."));
    assert_eq!(app.stored(existing.id).await, existing);
}

#[tokio::test]
async fn update_status() {
    let app = TestApp::new().await;
    let existing = app.service_on(&app.host, 22, "open").await;
    let (status, body) = app
        .send("PUT", &app.url(&app.ws, Some(existing.id)), Some(raw_put_data(existing.id, Some(app.host.id), "closed", &[22])))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "closed");
    assert_eq!(app.stored(existing.id).await.status, "closed");
}

#[tokio::test]
async fn update_ports() {
    let app = TestApp::new().await;
    let existing = app.service_on(&app.host, 22, "open").await;
    let (status, _) = app
        .send("PUT", &app.url(&app.ws, Some(existing.id)), Some(raw_put_data(existing.id, Some(app.host.id), "open", &[221])))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(app.stored(existing.id).await.port, 221);
}

#[tokio::test]
async fn update_cant_change_id() {
    let app = TestApp::new().await;
    let existing = app.service_on(&app.host, 22, "open").await;
    let (status, body) = app
        .send("PUT", &app.url(&app.ws, Some(existing.id)), Some(raw_put_data(Uuid::new_v4(), None, "open", &[22])))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], json!(existing.id));
    assert_eq!(app.stored(existing.id).await.id, existing.id);
}

#[tokio::test]
async fn update_rejects_unknown_status() {
    let app = TestApp::new().await;
    let existing = app.service_on(&app.host, 22, "open").await;
    let (status, _) = app
        .send("PUT", &app.url(&app.ws, Some(existing.id)), Some(raw_put_data(existing.id, None, "half-open", &[22])))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(app.stored(existing.id).await, existing);
}

#[tokio::test]
async fn retrieve_and_delete_are_workspace_scoped() {
    let app = TestApp::new().await;
    let existing = app.service_on(&app.host, 22, "open").await;

    let (status, body) = app.send("GET", &app.url(&app.ws, Some(existing.id)), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "svc-22");

    let (status, _) = app.send("GET", &app.url(&app.second_ws, Some(existing.id)), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = app.send("DELETE", &app.url(&app.second_ws, Some(existing.id)), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.send("DELETE", &app.url(&app.ws, Some(existing.id)), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = app.send("GET", &app.url(&app.ws, Some(existing.id)), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_workspace_is_not_found() {
    let app = TestApp::new().await;
    let (status, body) = app.send("GET", "/workspace/missing/services", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not Found");
}

#[tokio::test]
async fn malformed_body_is_bad_request() {
    let app = TestApp::new().await;
    let (status, body) = app.send("POST", &app.url(&app.ws, None), Some(json!({"ports": "twenty-one"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid JSON");
}

#[tokio::test]
async fn workspaces_and_hosts_endpoints() {
    let app = TestApp::new().await;
    let (status, ws) = app.send("POST", "/workspaces", Some(json!({"name": "fresh"}))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(ws["name"], "fresh");
    let (status, _) = app.send("POST", "/workspaces", Some(json!({"name": "fresh"}))).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, host) = app.send("POST", "/workspace/fresh/hosts", Some(json!({"ip": "172.16.0.1"}))).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, hosts) = app.send("GET", "/workspace/fresh/hosts", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(hosts.as_array().unwrap().len(), 1);

    let parent: Uuid = host["id"].as_str().unwrap().parse().unwrap();
    let (status, _) = app.send("POST", "/workspace/fresh/services", Some(create_body(parent))).await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, list) = app.send("GET", "/workspaces", None).await;
    assert_eq!(list.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn health_and_openapi_are_served() {
    let app = TestApp::new().await;
    let (status, body) = app.send("GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, doc) = app.send("GET", "/api-docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"].get("/workspace/{ws}/services/{id}").is_some());
}

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use fleetdeck_console::{Bridge, BridgeError, BridgeResult, FileExplorer, UploadPart};
use fleetdeck_console::api::FilesApi;
use fleetdeck_console::facade::Facade;
use serde_json::{Value, json};
use url::Url;

pub const NODE: &str = "node-1";

#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub method: &'static str,
    pub endpoint: String,
    pub body: Option<Value>,
}

#[derive(Debug, Clone)]
pub enum Reply {
    Json(Value),
    Bytes(Vec<u8>),
    Status(u16, String),
}

struct Route {
    method: &'static str,
    fragment: String,
    reply: Reply,
}

/// In-memory bridge that records every call and answers from scripted routes.
///
/// Routes match on method plus a substring of the endpoint; the most recently
/// added match wins. Unmatched calls answer `404`.
pub struct RecordingBridge {
    calls: Mutex<Vec<Call>>,
    routes: Mutex<Vec<Route>>,
    target: Mutex<Url>,
}

impl RecordingBridge {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            routes: Mutex::new(Vec::new()),
            target: Mutex::new(Url::parse("http://localhost:8080").expect("static url")),
        })
    }

    pub fn route(&self, method: &'static str, fragment: &str, reply: Reply) {
        self.routes.lock().expect("routes lock").push(Route {
            method,
            fragment: fragment.to_string(),
            reply,
        });
    }

    pub fn json(&self, method: &'static str, fragment: &str, body: Value) {
        self.route(method, fragment, Reply::Json(body));
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("calls lock").clone()
    }

    pub fn calls_to(&self, method: &'static str, fragment: &str) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|call| call.method == method && call.endpoint.contains(fragment))
            .collect()
    }

    pub fn current_target(&self) -> Url {
        self.target.lock().expect("target lock").clone()
    }

    fn answer(&self, method: &'static str, endpoint: &str, body: Option<Value>) -> Reply {
        self.calls.lock().expect("calls lock").push(Call {
            method,
            endpoint: endpoint.to_string(),
            body,
        });
        self.routes
            .lock()
            .expect("routes lock")
            .iter()
            .rev()
            .find(|route| route.method == method && endpoint.contains(&route.fragment))
            .map_or_else(
                || Reply::Status(404, format!("no route for {method} {endpoint}")),
                |route| route.reply.clone(),
            )
    }

    fn answer_json(&self, method: &'static str, endpoint: &str, body: Option<Value>) -> BridgeResult<Value> {
        match self.answer(method, endpoint, body) {
            Reply::Json(value) => Ok(value),
            Reply::Bytes(_) => Ok(json!({})),
            Reply::Status(status, body) => Err(BridgeError::Status { status, body }),
        }
    }
}

#[async_trait]
impl Bridge for RecordingBridge {
    async fn get(&self, endpoint: &str) -> BridgeResult<Value> {
        self.answer_json("GET", endpoint, None)
    }

    async fn post(&self, endpoint: &str, body: Value) -> BridgeResult<Value> {
        self.answer_json("POST", endpoint, Some(body))
    }

    async fn put(&self, endpoint: &str, body: Value) -> BridgeResult<Value> {
        self.answer_json("PUT", endpoint, Some(body))
    }

    async fn delete(&self, endpoint: &str) -> BridgeResult<Value> {
        self.answer_json("DELETE", endpoint, None)
    }

    async fn download(&self, endpoint: &str) -> BridgeResult<Vec<u8>> {
        match self.answer("GET", endpoint, None) {
            Reply::Bytes(bytes) => Ok(bytes),
            Reply::Json(value) => Ok(value.to_string().into_bytes()),
            Reply::Status(status, body) => Err(BridgeError::Status { status, body }),
        }
    }

    async fn upload(&self, endpoint: &str, part: UploadPart) -> BridgeResult<Value> {
        let body = json!({ "file_name": part.file_name, "size": part.bytes.len() });
        self.answer_json("POST", endpoint, Some(body))
    }

    fn retarget(&self, base_url: Url) -> BridgeResult<()> {
        *self.target.lock().map_err(|_| BridgeError::LockPoisoned)? = base_url;
        Ok(())
    }

    fn target(&self) -> BridgeResult<Url> {
        Ok(self.current_target())
    }
}

pub fn facade(bridge: &Arc<RecordingBridge>) -> Facade {
    Facade::new(Arc::clone(bridge) as Arc<dyn Bridge>)
}

pub fn file(dir: &str, name: &str, is_directory: bool) -> Value {
    let path = if dir == "/" {
        format!("/{name}")
    } else {
        format!("{dir}/{name}")
    };
    json!({
        "name": name,
        "path": path,
        "is_directory": is_directory,
        "size": if is_directory { 0 } else { 1536 },
        "modified_time": 1_700_000_000,
        "created_time": 1_700_000_000,
        "permissions": "rw-r--r--"
    })
}

pub fn listing(files: Vec<Value>) -> Value {
    json!({ "success": true, "files": files })
}

pub fn ok() -> Value {
    json!({ "success": true })
}

pub fn rejected(message: &str) -> Value {
    json!({ "success": false, "error": message })
}

/// Explorer at `/` whose root listing is `[a.txt, sub/]`, already loaded.
pub async fn loaded_explorer(bridge: &Arc<RecordingBridge>) -> FileExplorer {
    bridge.json(
        "GET",
        "/files?path=%2F&",
        listing(vec![file("/", "a.txt", false), file("/", "sub", true)]),
    );
    let mut explorer = FileExplorer::new(FilesApi::new(facade(bridge)), NODE);
    assert!(explorer.refresh().await, "initial listing applies");
    explorer
}

//! Shared helpers for integration tests
#![allow(dead_code)]

use serde_json::{json, Value};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::thread;
use tempfile::TempDir;
use tiny_http::{Header, Response, Server};

/// A temporary `packs/` tree
pub struct PackTree {
    dir: TempDir,
}

impl PackTree {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        fs::create_dir_all(dir.path().join("packs")).expect("Failed to create packs dir");
        Self { dir }
    }

    /// The directory to validate
    pub fn root(&self) -> PathBuf {
        self.dir.path().join("packs")
    }

    /// Scratch space outside the pack root (config, XDG dirs)
    pub fn scratch(&self) -> PathBuf {
        let path = self.dir.path().join("scratch");
        fs::create_dir_all(&path).expect("Failed to create scratch dir");
        path
    }

    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.root().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        fs::write(&path, content).expect("Failed to write fixture");
        path
    }

    pub fn write_json(&self, relative: &str, value: &Value) -> PathBuf {
        self.write(relative, &serde_json::to_string_pretty(value).unwrap())
    }

    pub fn remove(&self, relative: &str) {
        fs::remove_file(self.root().join(relative)).expect("Failed to remove fixture");
    }

    /// A well-formed pack with one scenario and golden file per id
    pub fn add_valid_pack(&self, name: &str, scenario_ids: &[&str]) -> PathBuf {
        let scenarios: Vec<Value> = scenario_ids
            .iter()
            .map(|id| {
                self.write_json(
                    &format!("{}/scenarios/{}.json", name, id),
                    &json!({"scenario": id, "steps": [{"send": "hello"}, {"expect": "reply"}]}),
                );
                self.write_json(
                    &format!("{}/golden/{}.json", name, id),
                    &json!({"scenario_id": id, "transcript": [{"from": "bot", "text": "hello"}]}),
                );
                json!({
                    "id": id,
                    "entry": format!("scenarios/{}.json", id),
                    "golden": format!("golden/{}.json", id),
                })
            })
            .collect();

        self.write(&format!("{}/README.md", name), "# Pack\n\nContributor notes.\n");
        self.write_json(
            &format!("{}/pack.json", name),
            &json!({
                "id": format!("greentic.{}", name),
                "name": name,
                "version": "0.1.0",
                "description": "fixture pack",
                "type": "messaging",
                "scenarios": scenarios,
            }),
        )
    }

    /// Rewrite the manifest of `name` through `edit`
    pub fn edit_manifest(&self, name: &str, edit: impl FnOnce(&mut Value)) {
        let path = self.root().join(name).join("pack.json");
        let mut manifest: Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        edit(&mut manifest);
        fs::write(&path, serde_json::to_string_pretty(&manifest).unwrap()).unwrap();
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }
}

/// Serve `handler` on a loopback port from a background thread; returns the base URL
pub fn spawn_backend<F>(handler: F) -> String
where
    F: Fn(&str, &Value) -> (Value, u16) + Send + 'static,
{
    let server = Server::http("127.0.0.1:0").expect("Failed to bind test backend");
    let addr = server.server_addr().to_ip().expect("Test backend is not on TCP");

    thread::spawn(move || {
        for mut request in server.incoming_requests() {
            let mut body = String::new();
            let _ = request.as_reader().read_to_string(&mut body);
            let payload = serde_json::from_str(&body).unwrap_or(Value::Null);
            let (response, status) = handler(request.url(), &payload);

            let response = Response::from_string(response.to_string())
                .with_status_code(status)
                .with_header(
                    Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..])
                        .expect("Invalid content type header"),
                );
            let _ = request.respond(response);
        }
    });

    format!("http://{}", addr)
}

/// Location of the built binary
pub fn packcheck_bin() -> &'static Path {
    Path::new(env!("CARGO_BIN_EXE_packcheck"))
}

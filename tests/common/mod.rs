//! Common test utilities for integration tests

use hslu_fetch::config::Config;
use hslu_fetch::fetcher::JsonSource;
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

/// In-memory API that serves canned responses and records every request.
///
/// Endpoints without a canned response behave like a failed request.
#[allow(dead_code)]
#[derive(Default)]
pub struct RecordingSource {
    responses: HashMap<String, Value>,
    requested: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl RecordingSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(mut self, endpoint: &str, response: Value) -> Self {
        self.responses.insert(endpoint.to_string(), response);
        self
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

impl JsonSource for RecordingSource {
    async fn fetch(&self, endpoint: &str) -> Option<Value> {
        self.requested.lock().unwrap().push(endpoint.to_string());
        self.responses.get(endpoint).cloned()
    }
}

/// Configuration pointing at `api_url` with no delay between requests
#[allow(dead_code)]
pub fn test_config(api_url: &str, output_dir: &Path) -> Config {
    Config {
        api_url: api_url.to_string(),
        access_key: "test-key".to_string(),
        request_timeout: Duration::from_secs(5),
        request_delay: Duration::ZERO,
        output_dir: output_dir.to_path_buf(),
    }
}

/// Reads a written output file back as JSON
#[allow(dead_code)]
pub fn read_json(path: &Path) -> Value {
    let contents = std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("{} should exist: {e}", path.display()));
    serde_json::from_str(&contents).unwrap()
}

/// All files below `dir`, relative to it and sorted
#[allow(dead_code)]
pub fn written_files(dir: &Path) -> Vec<PathBuf> {
    fn walk(root: &Path, dir: &Path, out: &mut Vec<PathBuf>) {
        for entry in std::fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                walk(root, &path, out);
            } else {
                out.push(path.strip_prefix(root).unwrap().to_path_buf());
            }
        }
    }

    let mut files = Vec::new();
    if dir.exists() {
        walk(dir, dir, &mut files);
    }
    files.sort();
    files
}

#![allow(dead_code)]

use axum::{
    body::{Body, Bytes},
    http::{header, Method, Request, Response},
    Router,
};
use http_body_util::BodyExt;
use std::path::PathBuf;
use tempfile::TempDir;
use tower::ServiceExt;
use videobooth::config::{AssetsConfig, Config, ServerConfig, StorageConfig};
use videobooth::{create_router, AppState};

const BOUNDARY: &str = "videobooth-test-boundary";

/// Router backed by a throwaway directory
pub struct TestApp {
    pub router: Router,
    pub videos_dir: PathBuf,
    pub public_dir: PathBuf,
    _temp_dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_upload_limit(200 * 1024 * 1024).await
    }

    pub async fn with_upload_limit(max_upload_bytes: u64) -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let videos_dir = temp_dir.path().join("videos");
        let public_dir = temp_dir.path().join("public");

        let config = Config {
            server: ServerConfig::default(),
            storage: StorageConfig {
                videos_dir: videos_dir.clone(),
                max_upload_bytes,
            },
            assets: AssetsConfig {
                public_dir: public_dir.clone(),
            },
        };

        let state = AppState::new(config);
        state
            .store
            .ensure_directory()
            .await
            .expect("Failed to create videos dir");

        Self {
            router: create_router(state),
            videos_dir,
            public_dir,
            _temp_dir: temp_dir,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("Router is infallible")
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        self.send(Request::get(uri).body(Body::empty()).unwrap()).await
    }

    pub async fn get_with_range(&self, uri: &str, range: &str) -> Response<Body> {
        let request = Request::get(uri)
            .header(header::RANGE, range)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    pub async fn post_multipart(&self, parts: &[Part<'_>]) -> Response<Body> {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/upload")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(multipart_body(parts)))
            .unwrap();
        self.send(request).await
    }

    /// Upload `content` as the `video` field
    pub async fn upload(&self, content: &[u8]) -> Response<Body> {
        self.post_multipart(&[Part::file("video", "recording.webm", content)])
            .await
    }

    pub fn write_video(&self, name: &str, content: &[u8]) {
        std::fs::write(self.videos_dir.join(name), content).expect("Failed to write video");
    }

    pub fn write_page(&self, name: &str, content: &str) {
        std::fs::create_dir_all(&self.public_dir).unwrap();
        std::fs::write(self.public_dir.join(name), content).expect("Failed to write page");
    }

    pub fn stored_files(&self) -> Vec<String> {
        std::fs::read_dir(&self.videos_dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().into_string().unwrap())
            .collect()
    }
}

/// One multipart form part
pub struct Part<'a> {
    pub name: &'a str,
    pub filename: Option<&'a str>,
    pub content: &'a [u8],
}

impl<'a> Part<'a> {
    pub fn file(name: &'a str, filename: &'a str, content: &'a [u8]) -> Self {
        Self {
            name,
            filename: Some(filename),
            content,
        }
    }

    pub fn text(name: &'a str, content: &'a str) -> Self {
        Self {
            name,
            filename: None,
            content: content.as_bytes(),
        }
    }
}

fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match part.filename {
            Some(filename) => body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n\
                     Content-Type: video/webm\r\n\r\n",
                    part.name, filename
                )
                .as_bytes(),
            ),
            None => body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{}\"\r\n\r\n",
                    part.name
                )
                .as_bytes(),
            ),
        }
        body.extend_from_slice(part.content);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

pub async fn body_bytes(response: Response<Body>) -> Bytes {
    response
        .into_body()
        .collect()
        .await
        .expect("Failed to read body")
        .to_bytes()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = body_bytes(response).await;
    serde_json::from_slice(&bytes).expect("Body is not JSON")
}

pub fn header_str<'a>(response: &'a Response<Body>, name: header::HeaderName) -> &'a str {
    response
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}

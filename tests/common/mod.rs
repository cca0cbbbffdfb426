#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, Response},
    Router,
};
use diesel::result::{DatabaseErrorKind, Error::DatabaseError};
use school_portal::{
    app,
    config::UPLOAD_ROUTE,
    db::StorageError,
    schools::{
        models::{NewSchool, SchoolCard},
        store::SchoolStore,
    },
    storage::interface::Storage,
    AppState,
};
use tempfile::TempDir;
use tower::ServiceExt;

pub const BOUNDARY: &str = "school-portal-test-boundary";
pub const BODY_LIMIT: usize = 1024 * 1024;

/// In-memory table with AUTO_INCREMENT ids.
#[derive(Default)]
pub struct MemoryStore {
    rows: Mutex<Vec<(i32, NewSchool)>>,
}

impl MemoryStore {
    pub fn rows(&self) -> Vec<(i32, NewSchool)> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl SchoolStore for MemoryStore {
    async fn insert(&self, school: NewSchool) -> Result<(), StorageError> {
        let mut rows = self.rows.lock().unwrap();
        let id = rows.last().map_or(1, |(id, _)| id + 1);
        rows.push((id, school));
        Ok(())
    }

    async fn list(&self) -> Result<Vec<SchoolCard>, StorageError> {
        let rows = self.rows.lock().unwrap();

        Ok(rows
            .iter()
            .rev()
            .map(|(id, school)| SchoolCard {
                id: *id,
                name: school.name.clone(),
                address: school.address.clone(),
                city: school.city.clone(),
                image: school.image.clone(),
            })
            .collect())
    }
}

/// Behaves like a database that refuses every connection.
pub struct UnreachableStore;

fn connection_refused() -> StorageError {
    StorageError::Query(DatabaseError(
        DatabaseErrorKind::UnableToSendCommand,
        Box::new(String::from("connection refused")),
    ))
}

#[async_trait]
impl SchoolStore for UnreachableStore {
    async fn insert(&self, _school: NewSchool) -> Result<(), StorageError> {
        Err(connection_refused())
    }

    async fn list(&self) -> Result<Vec<SchoolCard>, StorageError> {
        Err(connection_refused())
    }
}

pub struct TestApp {
    pub router: Router,
    pub public: TempDir,
}

impl TestApp {
    pub async fn new(schools: Arc<dyn SchoolStore>) -> Self {
        let public = tempfile::tempdir().unwrap();
        let storage = Storage::new(public.path(), UPLOAD_ROUTE);
        storage.ensure_upload_dir().await.unwrap();

        Self::with_storage(schools, storage, public)
    }

    /// Upload directory left uncreated, so every image write fails.
    pub fn without_upload_dir(schools: Arc<dyn SchoolStore>) -> Self {
        let public = tempfile::tempdir().unwrap();
        let storage = Storage::new(public.path(), UPLOAD_ROUTE);

        Self::with_storage(schools, storage, public)
    }

    fn with_storage(schools: Arc<dyn SchoolStore>, storage: Storage, public: TempDir) -> Self {
        let router = app(AppState { schools, storage }, BODY_LIMIT);

        Self { router, public }
    }

    pub async fn send(&self, request: Request<Body>) -> Response<axum::body::BoxBody> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, uri: &str) -> Response<axum::body::BoxBody> {
        self.send(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn post_multipart(
        &self,
        uri: &str,
        form: MultipartForm,
    ) -> Response<axum::body::BoxBody> {
        self.send(form.into_request(uri)).await
    }

    pub fn uploaded_files(&self) -> Vec<String> {
        let dir = self.public.path().join(UPLOAD_ROUTE);
        let Ok(entries) = std::fs::read_dir(dir) else {
            return vec![];
        };

        let mut names: Vec<String> = entries
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}

#[derive(Default)]
pub struct MultipartForm {
    body: Vec<u8>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, file_name: &str, content_type: &str, bytes: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(bytes);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    /// Every field the submission form sends, without an image.
    pub fn school(name: &str, email_id: &str, contact: &str) -> Self {
        Self::new()
            .text("name", name)
            .text("address", "123, Main Road, Karol Bagh")
            .text("city", "New Delhi")
            .text("state", "Delhi")
            .text("contact", contact)
            .text("email_id", email_id)
    }

    pub fn into_request(mut self, uri: &str) -> Request<Body> {
        self.body
            .extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .header(header::CONTENT_LENGTH, self.body.len())
            .body(Body::from(self.body))
            .unwrap()
    }
}

pub async fn body_bytes(response: Response<axum::body::BoxBody>) -> bytes::Bytes {
    hyper::body::to_bytes(response.into_body()).await.unwrap()
}

pub async fn body_text(response: Response<axum::body::BoxBody>) -> String {
    let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<axum::body::BoxBody>) -> serde_json::Value {
    let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

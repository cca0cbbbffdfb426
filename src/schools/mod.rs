use axum::{
    extract::multipart::{MultipartError, MultipartRejection},
    http::StatusCode,
    response::IntoResponse,
};

use crate::{db::StorageError, storage::FilesystemError, ErrorResponse};

pub mod models;
pub mod routes;
pub mod store;

/// Why a school could not be created.
#[derive(thiserror::Error, Debug)]
pub enum CreateSchoolError {
    #[error("invalid multipart request: {0}")]
    Rejected(#[from] MultipartRejection),

    #[error("request body exceeds the {limit} byte upload limit")]
    TooLarge { limit: usize },

    #[error("invalid multipart body: {0}")]
    Multipart(#[from] MultipartError),

    #[error(transparent)]
    Filesystem(#[from] FilesystemError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[derive(thiserror::Error, Debug)]
pub enum SchoolsError {
    #[error("Failed to add school data.")]
    Create(#[from] CreateSchoolError),

    #[error("Failed to fetch schools data.")]
    List(#[source] StorageError),
}

impl SchoolsError {
    pub fn error_response(&self) -> ErrorResponse {
        match self {
            SchoolsError::Create(cause) => ErrorResponse {
                error: self.to_string(),
                details: Some(cause.to_string()),
            },
            SchoolsError::List(_) => ErrorResponse {
                error: self.to_string(),
                ..Default::default()
            },
        }
    }
}

impl IntoResponse for SchoolsError {
    fn into_response(self) -> axum::response::Response {
        tracing::error!("{:#?}", self);

        (StatusCode::INTERNAL_SERVER_ERROR, self.error_response()).into_response()
    }
}

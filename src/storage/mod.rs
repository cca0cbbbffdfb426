use std::{io, path::PathBuf};

use bytes::Bytes;
use serde::Serialize;

pub mod helpers;
pub mod interface;

/// An image file received in a multipart submission, held fully in memory.
///
/// Serializes as its metadata only, validation errors carry it as a param.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    #[serde(skip)]
    pub bytes: Bytes,
}

/// An image written under the public directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    /// URL path stored in the `image` column, e.g. `/schoolImages/1700000000000-a_b.png`.
    pub public_path: String,
    pub file_path: PathBuf,
}

#[derive(thiserror::Error, Debug)]
pub enum FilesystemError {
    #[error("failed to create upload directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to remove {}: {source}", .path.display())]
    Remove {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

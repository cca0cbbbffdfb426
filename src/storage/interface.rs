use std::path::{Path, PathBuf};

use chrono::Utc;

use super::{helpers::upload_file_name, FilesystemError, ImageUpload, StoredImage};

/// Disk-backed image storage rooted at the public asset directory.
#[derive(Clone, Debug)]
pub struct Storage {
    public_dir: PathBuf,
    route: String,
}

impl Storage {
    /// Create a new storage instance, images go to `<public_dir>/<route>`
    #[must_use]
    pub fn new(public_dir: impl Into<PathBuf>, route: &str) -> Self {
        Self {
            public_dir: public_dir.into(),
            route: route.trim_matches('/').to_string(),
        }
    }

    pub fn public_dir(&self) -> &Path {
        &self.public_dir
    }

    pub fn upload_dir(&self) -> PathBuf {
        self.public_dir.join(&self.route)
    }
}

impl Storage {
    pub async fn ensure_upload_dir(&self) -> Result<(), FilesystemError> {
        let path = self.upload_dir();

        tokio::fs::create_dir_all(&path)
            .await
            .map_err(|source| FilesystemError::CreateDir { path, source })
    }

    pub async fn put(&self, upload: &ImageUpload) -> Result<StoredImage, FilesystemError> {
        self.put_at(upload, Utc::now().timestamp_millis()).await
    }

    pub async fn put_at(
        &self,
        upload: &ImageUpload,
        epoch_millis: i64,
    ) -> Result<StoredImage, FilesystemError> {
        let file_name = upload_file_name(&upload.file_name, epoch_millis);
        let file_path = self.upload_dir().join(&file_name);

        tokio::fs::write(&file_path, &upload.bytes)
            .await
            .map_err(|source| FilesystemError::Write {
                path: file_path.clone(),
                source,
            })?;

        tracing::debug!(
            "wrote {} bytes to {}",
            upload.bytes.len(),
            file_path.display()
        );

        Ok(StoredImage {
            public_path: format!("/{}/{}", self.route, file_name),
            file_path,
        })
    }

    pub async fn delete(&self, image: &StoredImage) -> Result<(), FilesystemError> {
        tokio::fs::remove_file(&image.file_path)
            .await
            .map_err(|source| FilesystemError::Remove {
                path: image.file_path.clone(),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use super::*;

    fn upload(name: &str, bytes: &'static [u8]) -> ImageUpload {
        ImageUpload {
            file_name: name.to_string(),
            content_type: Some(String::from("image/png")),
            bytes: Bytes::from_static(bytes),
        }
    }

    #[tokio::test]
    async fn put_writes_file_and_returns_public_path() {
        let public = tempfile::tempdir().unwrap();
        let storage = Storage::new(public.path(), "schoolImages");
        storage.ensure_upload_dir().await.unwrap();

        let stored = storage
            .put_at(&upload("a b.png", b"png-bytes"), 42)
            .await
            .unwrap();

        assert_eq!(stored.public_path, "/schoolImages/42-a_b.png");
        assert_eq!(
            stored.file_path,
            public.path().join("schoolImages").join("42-a_b.png")
        );
        assert_eq!(std::fs::read(&stored.file_path).unwrap(), b"png-bytes");
    }

    #[tokio::test]
    async fn put_fails_when_upload_dir_is_missing() {
        let public = tempfile::tempdir().unwrap();
        let storage = Storage::new(public.path(), "schoolImages");

        let err = storage.put(&upload("x.png", b"x")).await.unwrap_err();

        assert!(matches!(err, FilesystemError::Write { .. }));
    }

    #[tokio::test]
    async fn delete_removes_stored_file() {
        let public = tempfile::tempdir().unwrap();
        let storage = Storage::new(public.path(), "/schoolImages/");
        storage.ensure_upload_dir().await.unwrap();

        let stored = storage.put_at(&upload("x.png", b"x"), 7).await.unwrap();
        storage.delete(&stored).await.unwrap();

        assert!(!stored.file_path.exists());
        assert!(storage.delete(&stored).await.is_err());
    }
}

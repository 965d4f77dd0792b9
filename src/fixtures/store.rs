//! Read-only fixture lookup.

use std::io;
use std::path::{Component, Path, PathBuf};

use serde_json::Value;

/// Why a fixture could not be served.
#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    #[error("fixture {} does not exist", .path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read fixture {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("fixture {} is not valid JSON: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Fixture documents stored as `<dir>/<filename>`.
///
/// Cloning is cheap; the store holds no open handles and caches nothing.
#[derive(Debug, Clone)]
pub struct FixtureStore {
    root: PathBuf,
}

impl FixtureStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Read and parse the fixture named `filename`.
    pub async fn lookup(&self, filename: &str) -> Result<Value, FixtureError> {
        let path = self.root.join(filename);

        if !stays_inside(Path::new(filename)) {
            tracing::warn!(filename, "Rejected fixture name escaping the fixture directory");
            return Err(FixtureError::NotFound { path });
        }

        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if cannot_exist(&e) => {
                return Err(FixtureError::NotFound { path });
            }
            Err(source) => return Err(FixtureError::Read { path, source }),
        };

        serde_json::from_str(&content).map_err(|source| FixtureError::Parse { path, source })
    }
}

/// Errors meaning no file by that name can be there: missing, a path component
/// that is a plain file, or a name the filesystem refuses (e.g. too long).
fn cannot_exist(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::NotADirectory | io::ErrorKind::InvalidFilename
    )
}

/// Query tokens are not rewritten by the deriver, so a name may contain `/`.
/// Only plain relative components are allowed.
fn stays_inside(relative: &Path) -> bool {
    relative
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn store_with(files: &[(&str, &str)]) -> (tempfile::TempDir, FixtureStore) {
        let dir = tempfile::tempdir().unwrap();
        for (name, content) in files {
            std::fs::write(dir.path().join(name), content).unwrap();
        }
        let store = FixtureStore::new(dir.path());
        (dir, store)
    }

    #[tokio::test]
    async fn test_lookup_success() {
        let (_dir, store) = store_with(&[("foo.json", r#"{"a":1}"#)]);
        assert_eq!(store.lookup("foo.json").await.unwrap(), json!({"a": 1}));
    }

    #[tokio::test]
    async fn test_lookup_missing() {
        let (_dir, store) = store_with(&[]);
        assert!(matches!(
            store.lookup("nope.json").await,
            Err(FixtureError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_lookup_invalid_json() {
        let (_dir, store) = store_with(&[("bad.json", "{not json")]);
        assert!(matches!(
            store.lookup("bad.json").await,
            Err(FixtureError::Parse { .. })
        ));
    }

    #[tokio::test]
    async fn test_lookup_directory_is_read_error() {
        let (dir, store) = store_with(&[]);
        std::fs::create_dir(dir.path().join("dir.json")).unwrap();
        assert!(matches!(
            store.lookup("dir.json").await,
            Err(FixtureError::Read { .. })
        ));
    }

    #[tokio::test]
    async fn test_lookup_sees_changes_on_disk() {
        let (dir, store) = store_with(&[("live.json", "[1]")]);
        assert_eq!(store.lookup("live.json").await.unwrap(), json!([1]));

        std::fs::write(dir.path().join("live.json"), "[2]").unwrap();
        assert_eq!(store.lookup("live.json").await.unwrap(), json!([2]));
    }

    #[tokio::test]
    async fn test_lookup_overlong_name_is_missing() {
        let (_dir, store) = store_with(&[]);
        let name = format!("search--q={}.json", "x".repeat(300));
        assert!(matches!(
            store.lookup(&name).await,
            Err(FixtureError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_lookup_through_plain_file_is_missing() {
        let (_dir, store) = store_with(&[("users.json", "{}")]);
        assert!(matches!(
            store.lookup("users.json/1.json").await,
            Err(FixtureError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_lookup_rejects_parent_components() {
        let (dir, store) = store_with(&[]);
        std::fs::write(dir.path().join("secret.json"), "{}").unwrap();
        let nested = FixtureStore::new(dir.path().join("mocks"));
        std::fs::create_dir_all(dir.path().join("mocks").join("x--f=")).unwrap();

        assert!(matches!(
            nested.lookup("x--f=/../../secret.json").await,
            Err(FixtureError::NotFound { .. })
        ));
        assert!(matches!(
            store.lookup("/etc/passwd").await,
            Err(FixtureError::NotFound { .. })
        ));
    }
}

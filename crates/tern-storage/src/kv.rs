//! Raw key-value store trait and implementations.
//!
//! The [`KvStore`] trait provides byte-level `get`/`set`/`delete` operations
//! with namespaced keys. Implementations:
//!
//! - **In-memory** (always available): for tests and ephemeral hosts
//! - **`SurrealKV`** (behind `kv` feature): persistent, transactional
//!
//! # Namespacing
//!
//! All operations are scoped to a namespace. The account service keeps
//! process-wide entries under `global` and per-account entries under
//! `account:{id}`.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
#[cfg(feature = "kv")]
use tracing::debug;

use crate::error::{StorageError, StorageResult};

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate that a namespace is safe for use as a key prefix.
///
/// Namespaces must be non-empty and must not contain the null byte
/// (used internally as the namespace/key separator).
fn validate_namespace(namespace: &str) -> StorageResult<()> {
    if namespace.is_empty() {
        return Err(StorageError::InvalidKey(
            "namespace must not be empty".into(),
        ));
    }
    if namespace.contains('\0') {
        return Err(StorageError::InvalidKey(
            "namespace must not contain null bytes".into(),
        ));
    }
    Ok(())
}

/// Validate that a key is safe for storage.
///
/// Keys must be non-empty and must not contain the null byte.
fn validate_key(key: &str) -> StorageResult<()> {
    if key.is_empty() {
        return Err(StorageError::InvalidKey("key must not be empty".into()));
    }
    if key.contains('\0') {
        return Err(StorageError::InvalidKey(
            "key must not contain null bytes".into(),
        ));
    }
    Ok(())
}

/// Composite map key `"{namespace}\0{key}"`.
fn full_key(namespace: &str, key: &str) -> String {
    format!("{namespace}\0{key}")
}

/// [`full_key`] as raw bytes for the `SurrealKV` tree.
#[cfg(feature = "kv")]
fn composite_key(namespace: &str, key: &str) -> Vec<u8> {
    full_key(namespace, key).into_bytes()
}

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// Raw key-value store trait.
///
/// Provides namespaced byte-level storage. All operations are scoped
/// to a namespace for isolation.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Get a value by namespace and key.
    ///
    /// Returns `None` if the key does not exist.
    async fn get(&self, namespace: &str, key: &str) -> StorageResult<Option<Vec<u8>>>;

    /// Set a value for a namespace and key.
    ///
    /// Overwrites any existing value.
    async fn set(&self, namespace: &str, key: &str, value: Vec<u8>) -> StorageResult<()>;

    /// Delete a key from a namespace.
    ///
    /// Returns `true` if the key existed and was deleted.
    async fn delete(&self, namespace: &str, key: &str) -> StorageResult<bool>;

    /// Flush pending writes and release the backend.
    ///
    /// Backends without durable state have nothing to do.
    async fn close(&self) -> StorageResult<()> {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// In-memory implementation
// ---------------------------------------------------------------------------

/// In-memory key-value store for tests and ephemeral data.
///
/// Keys are stored as `"{namespace}\0{key}"` in a `BTreeMap`.
#[derive(Debug, Default)]
pub struct MemoryKvStore {
    data: std::sync::RwLock<BTreeMap<String, Vec<u8>>>,
}

impl MemoryKvStore {
    /// Create a new empty in-memory KV store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KvStore for MemoryKvStore {
    async fn get(&self, namespace: &str, key: &str) -> StorageResult<Option<Vec<u8>>> {
        validate_namespace(namespace)?;
        validate_key(key)?;
        let data = self
            .data
            .read()
            .map_err(|e| StorageError::Internal(e.to_string()))?;
        Ok(data.get(&full_key(namespace, key)).cloned())
    }

    async fn set(&self, namespace: &str, key: &str, value: Vec<u8>) -> StorageResult<()> {
        validate_namespace(namespace)?;
        validate_key(key)?;
        let mut data = self
            .data
            .write()
            .map_err(|e| StorageError::Internal(e.to_string()))?;
        data.insert(full_key(namespace, key), value);
        Ok(())
    }

    async fn delete(&self, namespace: &str, key: &str) -> StorageResult<bool> {
        validate_namespace(namespace)?;
        validate_key(key)?;
        let mut data = self
            .data
            .write()
            .map_err(|e| StorageError::Internal(e.to_string()))?;
        Ok(data.remove(&full_key(namespace, key)).is_some())
    }
}

// ---------------------------------------------------------------------------
// SurrealKV implementation (behind `kv` feature)
// ---------------------------------------------------------------------------

/// Persistent key-value store backed by `SurrealKV`.
///
/// Every mutation runs in its own transaction, so a failed commit leaves
/// nothing behind for later reads.
///
/// # Example
///
/// ```rust,ignore
/// use tern_storage::SurrealKvStore;
///
/// let store = SurrealKvStore::open("./data/kv")?;
/// store.set("global", "theme", b"dark".to_vec()).await?;
/// ```
#[cfg(feature = "kv")]
pub struct SurrealKvStore {
    tree: surrealkv::Tree,
}

#[cfg(feature = "kv")]
impl std::fmt::Debug for SurrealKvStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SurrealKvStore").finish_non_exhaustive()
    }
}

#[cfg(feature = "kv")]
impl SurrealKvStore {
    /// Open a persistent KV store in the directory `path`.
    ///
    /// Creates the directory if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Connection`] if the store cannot be opened.
    pub fn open(path: impl AsRef<std::path::Path>) -> StorageResult<Self> {
        let path = path.as_ref().to_path_buf();
        let tree = surrealkv::TreeBuilder::new()
            .with_path(path.clone())
            .build()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        debug!(path = %path.display(), "opened surrealkv store");
        Ok(Self { tree })
    }
}

#[cfg(feature = "kv")]
fn map_kv_err(e: &surrealkv::Error) -> StorageError {
    StorageError::Internal(e.to_string())
}

#[cfg(feature = "kv")]
#[async_trait]
impl KvStore for SurrealKvStore {
    async fn get(&self, namespace: &str, key: &str) -> StorageResult<Option<Vec<u8>>> {
        validate_namespace(namespace)?;
        validate_key(key)?;
        let ck = composite_key(namespace, key);
        let tx = self
            .tree
            .begin_with_mode(surrealkv::Mode::ReadOnly)
            .map_err(|ref e| map_kv_err(e))?;
        tx.get(&ck).map_err(|ref e| map_kv_err(e))
    }

    async fn set(&self, namespace: &str, key: &str, value: Vec<u8>) -> StorageResult<()> {
        validate_namespace(namespace)?;
        validate_key(key)?;
        let ck = composite_key(namespace, key);
        let mut tx = self.tree.begin().map_err(|ref e| map_kv_err(e))?;
        tx.set(&ck, &value).map_err(|ref e| map_kv_err(e))?;
        tx.commit().await.map_err(|ref e| map_kv_err(e))
    }

    async fn delete(&self, namespace: &str, key: &str) -> StorageResult<bool> {
        validate_namespace(namespace)?;
        validate_key(key)?;
        let ck = composite_key(namespace, key);
        let mut tx = self.tree.begin().map_err(|ref e| map_kv_err(e))?;
        let existed = tx.get(&ck).map_err(|ref e| map_kv_err(e))?.is_some();
        if existed {
            tx.delete(&ck).map_err(|ref e| map_kv_err(e))?;
            tx.commit().await.map_err(|ref e| map_kv_err(e))?;
        }
        Ok(existed)
    }

    async fn close(&self) -> StorageResult<()> {
        self.tree
            .close()
            .await
            .map_err(|e| StorageError::Internal(e.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Scoped view
// ---------------------------------------------------------------------------

/// A [`KvStore`] view bound to a single namespace.
///
/// ```rust,ignore
/// let scoped = ScopedKvStore::new(store, "global")?;
/// scoped.set("theme", b"dark".to_vec()).await?;
/// let val = scoped.get("theme").await?;
/// ```
#[derive(Clone)]
pub struct ScopedKvStore {
    inner: Arc<dyn KvStore>,
    namespace: String,
}

impl std::fmt::Debug for ScopedKvStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScopedKvStore")
            .field("namespace", &self.namespace)
            .finish_non_exhaustive()
    }
}

impl ScopedKvStore {
    /// Create a scoped view into the given store for `namespace`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidKey`] if the namespace is empty
    /// or contains null bytes.
    pub fn new(store: Arc<dyn KvStore>, namespace: impl Into<String>) -> StorageResult<Self> {
        let namespace = namespace.into();
        validate_namespace(&namespace)?;
        Ok(Self {
            inner: store,
            namespace,
        })
    }

    /// The namespace this store is scoped to.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Get a raw byte value by key.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidKey`] if the key is empty or invalid.
    pub async fn get(&self, key: &str) -> StorageResult<Option<Vec<u8>>> {
        validate_key(key)?;
        self.inner.get(&self.namespace, key).await
    }

    /// Set a raw byte value.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidKey`] if the key is empty or invalid.
    pub async fn set(&self, key: &str, value: Vec<u8>) -> StorageResult<()> {
        validate_key(key)?;
        self.inner.set(&self.namespace, key, value).await
    }

    /// Delete a key.
    ///
    /// Returns `true` if the key existed.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidKey`] if the key is empty or invalid.
    pub async fn delete(&self, key: &str) -> StorageResult<bool> {
        validate_key(key)?;
        self.inner.delete(&self.namespace, key).await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- MemoryKvStore tests --

    #[tokio::test]
    async fn test_memory_get_set() {
        let store = MemoryKvStore::new();
        store.set("ns1", "key1", b"hello".to_vec()).await.unwrap();
        let val = store.get("ns1", "key1").await.unwrap();
        assert_eq!(val, Some(b"hello".to_vec()));
    }

    #[tokio::test]
    async fn test_memory_get_missing() {
        let store = MemoryKvStore::new();
        let val = store.get("ns1", "missing").await.unwrap();
        assert!(val.is_none());
    }

    #[tokio::test]
    async fn test_memory_overwrite() {
        let store = MemoryKvStore::new();
        store.set("ns1", "k", b"v1".to_vec()).await.unwrap();
        store.set("ns1", "k", b"v2".to_vec()).await.unwrap();
        let val = store.get("ns1", "k").await.unwrap();
        assert_eq!(val, Some(b"v2".to_vec()));
    }

    #[tokio::test]
    async fn test_memory_delete() {
        let store = MemoryKvStore::new();
        store.set("ns1", "k", b"v".to_vec()).await.unwrap();
        assert!(store.delete("ns1", "k").await.unwrap());
        assert!(!store.delete("ns1", "k").await.unwrap());
        assert!(store.get("ns1", "k").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_memory_namespace_isolation() {
        let store = MemoryKvStore::new();
        store.set("ns1", "k", b"v1".to_vec()).await.unwrap();
        store.set("ns2", "k", b"v2".to_vec()).await.unwrap();
        assert_eq!(store.get("ns1", "k").await.unwrap(), Some(b"v1".to_vec()));
        assert_eq!(store.get("ns2", "k").await.unwrap(), Some(b"v2".to_vec()));
    }

    #[tokio::test]
    async fn test_memory_rejects_invalid_keys() {
        let store = MemoryKvStore::new();
        assert!(store.set("", "k", Vec::new()).await.is_err());
        assert!(store.set("ns", "", Vec::new()).await.is_err());
        assert!(store.get("ns", "a\0b").await.is_err());
    }

    // -- ScopedKvStore tests --

    #[tokio::test]
    async fn test_scoped_store_binds_namespace() {
        let store: Arc<dyn KvStore> = Arc::new(MemoryKvStore::new());
        let scoped = ScopedKvStore::new(Arc::clone(&store), "global").unwrap();

        scoped.set("k", b"v".to_vec()).await.unwrap();
        assert_eq!(store.get("global", "k").await.unwrap(), Some(b"v".to_vec()));
        assert_eq!(scoped.namespace(), "global");
        assert!(scoped.delete("k").await.unwrap());
        assert!(scoped.get("k").await.unwrap().is_none());
    }

    // -- Validation tests --

    #[test]
    fn test_scoped_store_rejects_bad_namespace() {
        let store: Arc<dyn KvStore> = Arc::new(MemoryKvStore::new());
        assert!(ScopedKvStore::new(Arc::clone(&store), "").is_err());
        assert!(ScopedKvStore::new(store, "bad\0ns").is_err());
    }

    // -- SurrealKvStore tests (behind feature gate) --

    #[cfg(feature = "kv")]
    mod surreal_kv_tests {
        use super::*;

        fn make_store() -> (SurrealKvStore, tempfile::TempDir) {
            let dir = tempfile::tempdir().unwrap();
            let store = SurrealKvStore::open(dir.path()).unwrap();
            (store, dir)
        }

        #[tokio::test]
        async fn test_surreal_get_set() {
            let (store, _dir) = make_store();
            store.set("global", "k", "héllo ✓".as_bytes().to_vec()).await.unwrap();
            assert_eq!(
                store.get("global", "k").await.unwrap(),
                Some("héllo ✓".as_bytes().to_vec())
            );
        }

        #[tokio::test]
        async fn test_surreal_get_missing() {
            let (store, _dir) = make_store();
            assert!(store.get("global", "missing").await.unwrap().is_none());
        }

        #[tokio::test]
        async fn test_surreal_delete() {
            let (store, _dir) = make_store();
            store.set("global", "k", b"v".to_vec()).await.unwrap();
            assert!(store.delete("global", "k").await.unwrap());
            assert!(!store.delete("global", "k").await.unwrap());
            assert!(store.get("global", "k").await.unwrap().is_none());
        }

        #[tokio::test]
        async fn test_surreal_namespace_isolation() {
            let (store, _dir) = make_store();
            store.set("global", "k", b"v1".to_vec()).await.unwrap();
            store.set("account:alice", "k", b"v2".to_vec()).await.unwrap();
            assert_eq!(store.get("global", "k").await.unwrap(), Some(b"v1".to_vec()));
            assert_eq!(
                store.get("account:alice", "k").await.unwrap(),
                Some(b"v2".to_vec())
            );
        }

        #[tokio::test]
        async fn test_surreal_persists_across_reopen() {
            let dir = tempfile::tempdir().unwrap();
            let store = SurrealKvStore::open(dir.path()).unwrap();
            store.set("global", "kept", b"v".to_vec()).await.unwrap();
            store.set("global", "gone", b"x".to_vec()).await.unwrap();
            assert!(store.delete("global", "gone").await.unwrap());
            store.close().await.unwrap();
            drop(store);

            let reopened = SurrealKvStore::open(dir.path()).unwrap();
            assert_eq!(
                reopened.get("global", "kept").await.unwrap(),
                Some(b"v".to_vec())
            );
            assert!(reopened.get("global", "gone").await.unwrap().is_none());
        }

        #[tokio::test]
        async fn test_surreal_rejected_set_leaves_previous_value() {
            let (store, _dir) = make_store();
            store.set("global", "k", b"old".to_vec()).await.unwrap();
            assert!(store.set("global\0x", "k", b"new".to_vec()).await.is_err());
            assert_eq!(store.get("global", "k").await.unwrap(), Some(b"old".to_vec()));
        }
    }
}

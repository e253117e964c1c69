//! Resource Loader Tests
//!
//! ## Test Scopes
//! - **FsResourceLoader**: reading files below the root, missing files and
//!   identifiers that try to leave the root.
//! - **MemoryResourceLoader**: insert / lookup semantics.
//! - **Cache integration**: loaders plugged into `ResourceCache`.

#[cfg(test)]
mod tests {
    use crate::counter::cache::{MissingResourcePolicy, ResourceCache};
    use crate::error::CounterError;
    use crate::resources::loader::{
        FsResourceLoader, LoadError, MemoryResourceLoader, ResourceLoader,
    };
    use std::fs;
    use std::sync::Arc;

    fn loader_with_files(files: &[(&str, &str)]) -> (tempfile::TempDir, FsResourceLoader) {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        for (name, content) in files {
            let path = dir.path().join(name);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(path, content).unwrap();
        }
        let loader = FsResourceLoader::new(dir.path());
        (dir, loader)
    }

    // ============================================================
    // FS LOADER TESTS
    // ============================================================

    #[test]
    fn test_fs_loader_reads_file() {
        let (_dir, loader) = loader_with_files(&[("data.txt", "Duis sed")]);

        let bytes = loader.load_bytes("data.txt").unwrap();
        assert_eq!(bytes, b"Duis sed");
    }

    #[test]
    fn test_fs_loader_reads_nested_file() {
        let (_dir, loader) = loader_with_files(&[("books/latin.txt", "lorem ipsum")]);

        assert_eq!(loader.load_bytes("books/latin.txt").unwrap(), b"lorem ipsum");
        assert_eq!(loader.load_bytes("./books/latin.txt").unwrap(), b"lorem ipsum");
    }

    #[test]
    fn test_fs_loader_missing_file() {
        let (_dir, loader) = loader_with_files(&[]);

        let err = loader.load_bytes("nope.txt").unwrap_err();
        assert!(matches!(err, LoadError::NotFound));
    }

    #[test]
    fn test_fs_loader_rejects_escaping_identifiers() {
        let (_dir, loader) = loader_with_files(&[("data.txt", "x")]);

        for id in ["", "../data.txt", "books/../../etc/passwd", "/etc/passwd"] {
            let err = loader.load_bytes(id).unwrap_err();
            assert!(
                matches!(err, LoadError::InvalidIdentifier),
                "{:?} should be rejected, got {:?}",
                id,
                err
            );
        }
    }

    #[test]
    fn test_fs_loader_directory_is_unreadable() {
        let (_dir, loader) = loader_with_files(&[("books/latin.txt", "lorem")]);

        let err = loader.load_bytes("books").unwrap_err();
        assert!(matches!(err, LoadError::Unreadable(_)));
    }

    // ============================================================
    // MEMORY LOADER TESTS
    // ============================================================

    #[test]
    fn test_memory_loader_insert_and_load() {
        let loader = MemoryResourceLoader::new().with_resource("a.txt", "alpha");
        loader.insert("b.txt", vec![0xffu8, b'b']);

        assert_eq!(loader.len(), 2);
        assert_eq!(loader.load_bytes("a.txt").unwrap(), b"alpha");
        assert_eq!(loader.load_bytes("b.txt").unwrap(), vec![0xff, b'b']);
        assert!(matches!(loader.load_bytes("c.txt"), Err(LoadError::NotFound)));
    }

    #[test]
    fn test_memory_loader_replaces_content() {
        let loader = MemoryResourceLoader::new().with_resource("a.txt", "old");
        loader.insert("a.txt", "new");

        assert_eq!(loader.len(), 1);
        assert_eq!(loader.load_bytes("a.txt").unwrap(), b"new");
    }

    // ============================================================
    // CACHE INTEGRATION
    // ============================================================

    #[tokio::test]
    async fn test_cache_over_fs_loader() {
        let (_dir, loader) = loader_with_files(&[("data.txt", "Sed sed SED, duis")]);
        let cache = ResourceCache::new(Arc::new(loader), MissingResourcePolicy::Empty);

        let index = cache.get_or_build("data.txt").await.unwrap();
        assert_eq!(index.get("sed"), 3);
        assert_eq!(index.get("duis"), 1);
    }

    #[tokio::test]
    async fn test_cache_rejects_traversal_under_any_policy() {
        for policy in [MissingResourcePolicy::Empty, MissingResourcePolicy::Fail] {
            let (_dir, loader) = loader_with_files(&[]);
            let cache = ResourceCache::new(Arc::new(loader), policy);

            let err = cache.get_or_build("../secret.txt").await.unwrap_err();
            assert_eq!(err, CounterError::InvalidIdentifier("../secret.txt".to_string()));
        }
    }

    #[tokio::test]
    async fn test_cache_unreadable_resource() {
        let (_dir, loader) = loader_with_files(&[("books/latin.txt", "lorem")]);
        let strict = ResourceCache::new(Arc::new(loader.clone()), MissingResourcePolicy::Fail);
        let lenient = ResourceCache::new(Arc::new(loader), MissingResourcePolicy::Empty);

        let err = strict.get_or_build("books").await.unwrap_err();
        assert!(matches!(err, CounterError::ResourceUnreadable { ref id, .. } if id == "books"));

        let index = lenient.get_or_build("books").await.unwrap();
        assert!(index.is_empty());
    }
}

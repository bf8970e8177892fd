//! Asset resolution and listing.
//!
//! An asset is a directory directly under one of the storage roots. It is
//! servable once it contains an index playlist. Every name taken from a
//! request is reduced to a single safe path component before it touches the
//! filesystem, so resolved paths always stay inside their root.

use hlsvault_common::paths::{safe_component, with_segment_extension, INDEX_PLAYLIST};
use hlsvault_common::{Error, Result};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Build `root/<asset>/<file>` from untrusted names.
///
/// Returns `None` when either name sanitizes to nothing.
pub fn asset_file_path(root: &Path, asset: &str, file: &str) -> Option<PathBuf> {
    let asset = safe_component(asset);
    let file = safe_component(file);
    if asset.is_empty() || file.is_empty() {
        return None;
    }
    Some(root.join(asset).join(file))
}

/// Sanitized segment file name, with the segment extension appended if missing.
pub fn segment_file_name(raw: &str) -> String {
    let name = safe_component(raw);
    if name.is_empty() {
        return name;
    }
    with_segment_extension(&name)
}

/// Resolve the index playlist of an asset.
pub async fn resolve_playlist(root: &Path, asset: &str) -> Result<PathBuf> {
    let path = asset_file_path(root, asset, INDEX_PLAYLIST);
    resolve_existing(path, "Playlist").await
}

/// Resolve a segment of an asset. `segment` may omit its extension.
pub async fn resolve_segment(root: &Path, asset: &str, segment: &str) -> Result<PathBuf> {
    let path = asset_file_path(root, asset, &segment_file_name(segment));
    resolve_existing(path, "Segment").await
}

async fn resolve_existing(path: Option<PathBuf>, what: &str) -> Result<PathBuf> {
    let Some(path) = path else {
        return Err(Error::not_found(what));
    };

    // Stat the asset directory first so that a plain file in its place reads
    // as "not found" rather than a storage failure.
    if let Some(asset_dir) = path.parent() {
        match tokio::fs::metadata(asset_dir).await {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => return Err(Error::not_found(what)),
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(Error::not_found(what)),
            Err(e) => return Err(Error::storage(format!("stat {:?}", asset_dir), e)),
        }
    }

    match tokio::fs::metadata(&path).await {
        Ok(meta) if meta.is_file() => Ok(path),
        Ok(_) => Err(Error::not_found(what)),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(Error::not_found(what)),
        Err(e) => Err(Error::storage(format!("stat {:?}", path), e)),
    }
}

/// List the servable assets under `root`, sorted by name.
///
/// A missing root lists as empty. A root that exists but cannot be read is a
/// storage failure.
pub async fn list_assets(root: &Path) -> Result<Vec<String>> {
    let mut entries = match tokio::fs::read_dir(root).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!("Asset root {:?} does not exist, listing as empty", root);
            return Ok(Vec::new());
        }
        Err(e) => return Err(Error::storage(format!("reading {:?}", root), e)),
    };

    let mut names = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| Error::storage(format!("reading {:?}", root), e))?
    {
        match entry.file_type().await {
            Ok(file_type) if file_type.is_dir() => {}
            Ok(_) => continue,
            Err(e) => {
                tracing::warn!("Skipping {:?}: {}", entry.path(), e);
                continue;
            }
        }

        let Ok(name) = entry.file_name().into_string() else {
            tracing::debug!("Skipping non UTF-8 directory {:?}", entry.path());
            continue;
        };

        let playlist = entry.path().join(INDEX_PLAYLIST);
        if let Ok(meta) = tokio::fs::metadata(&playlist).await {
            if meta.is_file() {
                names.push(name);
            }
        }
    }

    names.sort();
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::fs;
    use tempfile::tempdir;

    fn make_asset(root: &Path, name: &str, with_index: bool) {
        let dir = root.join(name);
        fs::create_dir_all(&dir).unwrap();
        if with_index {
            fs::write(dir.join(INDEX_PLAYLIST), "#EXTM3U\n").unwrap();
        }
    }

    #[test]
    fn test_asset_file_path_stays_in_root() {
        let root = Path::new("/srv/videos");
        let path = asset_file_path(root, "../../etc/passwd", "index.m3u8").unwrap();
        assert_eq!(path, PathBuf::from("/srv/videos/passwd/index.m3u8"));
        assert!(path.starts_with(root));

        let path = asset_file_path(root, "movie", "../../../etc/shadow").unwrap();
        assert_eq!(path, PathBuf::from("/srv/videos/movie/shadow"));

        assert!(asset_file_path(root, "..", "index.m3u8").is_none());
        assert!(asset_file_path(root, "movie", "").is_none());
    }

    #[test]
    fn test_segment_file_name() {
        assert_eq!(segment_file_name("foo"), "foo.ts");
        assert_eq!(segment_file_name("segment001.ts"), "segment001.ts");
        assert_eq!(segment_file_name("../segment001"), "segment001.ts");
        assert_eq!(segment_file_name(".."), "");
    }

    #[tokio::test]
    async fn test_resolve_playlist() {
        let root = tempdir().unwrap();
        make_asset(root.path(), "intro", true);

        let path = resolve_playlist(root.path(), "intro").await.unwrap();
        assert_eq!(path, root.path().join("intro").join(INDEX_PLAYLIST));

        let err = resolve_playlist(root.path(), "missing").await.unwrap_err();
        assert_matches!(err, Error::NotFound(_));
    }

    #[tokio::test]
    async fn test_resolve_segment_appends_extension() {
        let root = tempdir().unwrap();
        make_asset(root.path(), "intro", true);
        fs::write(root.path().join("intro").join("foo.ts"), b"data").unwrap();

        let path = resolve_segment(root.path(), "intro", "foo").await.unwrap();
        assert_eq!(path, root.path().join("intro").join("foo.ts"));

        let path = resolve_segment(root.path(), "intro", "foo.ts").await.unwrap();
        assert_eq!(path, root.path().join("intro").join("foo.ts"));
    }

    #[tokio::test]
    async fn test_resolve_traversal_never_escapes() {
        let outer = tempdir().unwrap();
        let root = outer.path().join("videos");
        fs::create_dir_all(&root).unwrap();
        // A playlist outside the root that traversal would reach.
        make_asset(outer.path(), "secret", true);

        let err = resolve_playlist(&root, "../secret").await.unwrap_err();
        assert_matches!(err, Error::NotFound(_));

        let err = resolve_segment(&root, "..", "../secret/index.m3u8")
            .await
            .unwrap_err();
        assert_matches!(err, Error::NotFound(_));
    }

    #[tokio::test]
    async fn test_resolve_asset_that_is_a_file() {
        let root = tempdir().unwrap();
        fs::write(root.path().join("notadir"), b"x").unwrap();

        let err = resolve_playlist(root.path(), "notadir").await.unwrap_err();
        assert_matches!(err, Error::NotFound(_));
    }

    #[tokio::test]
    async fn test_resolve_directory_named_like_segment() {
        let root = tempdir().unwrap();
        make_asset(root.path(), "intro", true);
        fs::create_dir_all(root.path().join("intro").join("segment000.ts")).unwrap();

        let err = resolve_segment(root.path(), "intro", "segment000")
            .await
            .unwrap_err();
        assert_matches!(err, Error::NotFound(_));
    }

    #[tokio::test]
    async fn test_list_assets_requires_index() {
        let root = tempdir().unwrap();
        make_asset(root.path(), "a", true);
        make_asset(root.path(), "b", false);
        fs::write(root.path().join("stray.ts"), b"x").unwrap();

        let names = list_assets(root.path()).await.unwrap();
        assert_eq!(names, vec!["a".to_string()]);
    }

    #[tokio::test]
    async fn test_list_assets_sorted() {
        let root = tempdir().unwrap();
        for name in ["zeta", "alpha", "mid"] {
            make_asset(root.path(), name, true);
        }

        let names = list_assets(root.path()).await.unwrap();
        assert_eq!(names, vec!["alpha", "mid", "zeta"]);
    }

    #[tokio::test]
    async fn test_list_missing_root_is_empty() {
        let root = tempdir().unwrap();
        let names = list_assets(&root.path().join("live")).await.unwrap();
        assert!(names.is_empty());
    }

    #[tokio::test]
    async fn test_list_unreadable_root_is_storage_error() {
        let root = tempdir().unwrap();
        let not_a_dir = root.path().join("file");
        fs::write(&not_a_dir, b"x").unwrap();

        let err = list_assets(&not_a_dir).await.unwrap_err();
        assert_matches!(err, Error::Storage { .. });
        assert_eq!(err.http_status(), 500);
    }
}

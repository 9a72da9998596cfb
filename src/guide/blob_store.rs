use crate::error::{GuideError, Result};
use crate::guide::paths::{GuidePaths, INDEX_FILE_NAME};
use crate::guide::record::ARTICLE_EXTENSION;
use std::collections::BTreeSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Article bodies stored as plain files next to the index.
#[derive(Debug, Clone)]
pub struct BlobStore {
    paths: GuidePaths,
}

impl BlobStore {
    pub fn new(paths: &GuidePaths) -> Self {
        Self {
            paths: paths.clone(),
        }
    }

    pub fn write(&self, filename: &str, content: &str) -> Result<PathBuf> {
        let path = self.paths.article_path(filename);
        fs::write(&path, content).map_err(|err| GuideError::storage(&path, err))?;
        debug!(path = %path.display(), bytes = content.len(), "wrote article");
        Ok(path)
    }

    /// Read an article body.
    ///
    /// Anything that is not a regular file (absent, a directory, the guide dir
    /// itself for an empty filename) is `Ok(None)`, the same set `exists`
    /// rejects. Invalid UTF-8 is replaced rather than refused.
    pub fn read(&self, filename: &str) -> Result<Option<String>> {
        if !self.exists(filename) {
            return Ok(None);
        }
        let path = self.paths.article_path(filename);
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(String::from_utf8_lossy(&bytes).into_owned())),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(GuideError::storage(&path, err)),
        }
    }

    pub fn exists(&self, filename: &str) -> bool {
        !filename.is_empty() && self.paths.article_path(filename).is_file()
    }

    /// Every article-looking file in the guide directory, the index excluded.
    pub fn list_all(&self) -> Result<BTreeSet<String>> {
        let guide_dir = &self.paths.guide_dir;
        let read_dir =
            fs::read_dir(guide_dir).map_err(|err| GuideError::storage(guide_dir, err))?;

        let mut out = BTreeSet::new();
        for entry in read_dir {
            let entry = entry.map_err(|err| GuideError::storage(guide_dir, err))?;
            let path = entry.path();
            if !path.is_file() || !has_article_extension(&path) {
                continue;
            }
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if name == INDEX_FILE_NAME {
                continue;
            }
            out.insert(name.to_string());
        }
        Ok(out)
    }
}

fn has_article_extension(path: &Path) -> bool {
    path.extension().and_then(|ext| ext.to_str()) == Some(ARTICLE_EXTENSION)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn store_in(root: &Path) -> BlobStore {
        let paths = GuidePaths::under(root.join("guide"));
        fs::create_dir_all(&paths.guide_dir).expect("mkdir guide");
        BlobStore::new(&paths)
    }

    #[test]
    fn write_then_read_returns_raw_content() {
        let tmp = tempdir().expect("tempdir");
        let store = store_in(tmp.path());

        store
            .write("towel.txt", "A towel is about the most massively useful thing.\n")
            .expect("write");
        assert!(store.exists("towel.txt"));
        assert_eq!(
            store.read("towel.txt").expect("read").as_deref(),
            Some("A towel is about the most massively useful thing.\n")
        );
    }

    #[test]
    fn write_overwrites_existing_blob() {
        let tmp = tempdir().expect("tempdir");
        let store = store_in(tmp.path());

        store.write("earth.txt", "Harmless").expect("first write");
        store.write("earth.txt", "Mostly harmless").expect("second write");
        assert_eq!(
            store.read("earth.txt").expect("read").as_deref(),
            Some("Mostly harmless")
        );
    }

    #[test]
    fn read_missing_blob_is_none() {
        let tmp = tempdir().expect("tempdir");
        let store = store_in(tmp.path());
        assert_eq!(store.read("magrathea.txt").expect("read"), None);
        assert!(!store.exists("magrathea.txt"));
    }

    #[test]
    fn non_file_targets_read_as_absent() {
        let tmp = tempdir().expect("tempdir");
        let store = store_in(tmp.path());
        fs::create_dir_all(tmp.path().join("guide/attic")).expect("attic dir");

        assert_eq!(store.read("").expect("empty filename"), None);
        assert_eq!(store.read("attic").expect("directory"), None);
        assert!(!store.exists(""));
        assert!(!store.exists("attic"));
    }

    #[test]
    fn non_utf8_body_is_read_lossily() {
        let tmp = tempdir().expect("tempdir");
        let store = store_in(tmp.path());
        fs::write(tmp.path().join("guide/zaphod.txt"), b"Zaphod \xe9t\xe9 Beeblebrox")
            .expect("latin-1 blob");

        let body = store.read("zaphod.txt").expect("read").expect("present");
        assert_eq!(body.split_whitespace().count(), 3);
        assert!(body.starts_with("Zaphod "));
    }

    #[test]
    fn list_all_skips_index_other_extensions_and_directories() {
        let tmp = tempdir().expect("tempdir");
        let store = store_in(tmp.path());
        let dir = tmp.path().join("guide");

        fs::write(dir.join("index.txt"), "").expect("index");
        fs::write(dir.join("earth.txt"), "x").expect("earth");
        fs::write(dir.join("vogons.txt"), "x").expect("vogons");
        fs::write(dir.join("cover.bmp"), "x").expect("bmp");
        fs::create_dir_all(dir.join("nested.txt")).expect("dir named like an article");

        let all: Vec<String> = store.list_all().expect("list").into_iter().collect();
        assert_eq!(all, vec!["earth.txt".to_string(), "vogons.txt".to_string()]);
    }
}

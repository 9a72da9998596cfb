use std::env;
use std::path::{Path, PathBuf};

pub const INDEX_FILE_NAME: &str = "index.txt";

const DEFAULT_GUIDE_DIR: &str = "sd_card/guide";

#[derive(Debug, Clone)]
pub struct GuidePaths {
    pub guide_dir: PathBuf,
    pub index_file: PathBuf,
}

impl GuidePaths {
    pub fn under(guide_dir: impl Into<PathBuf>) -> Self {
        let guide_dir = guide_dir.into();
        let index_file = guide_dir.join(INDEX_FILE_NAME);
        Self {
            guide_dir,
            index_file,
        }
    }

    pub fn article_path(&self, filename: &str) -> PathBuf {
        self.guide_dir.join(filename)
    }
}

fn env_or_default_path(var: &str, fallback: &Path) -> PathBuf {
    match env::var(var) {
        Ok(v) if !v.trim().is_empty() => PathBuf::from(v.trim()),
        _ => fallback.to_path_buf(),
    }
}

/// Resolve the storage layout. `GUIDE_DIR` wins; otherwise the guide lives in
/// `sd_card/guide` under the working directory.
pub fn resolve_paths() -> GuidePaths {
    GuidePaths::under(env_or_default_path(
        "GUIDE_DIR",
        Path::new(DEFAULT_GUIDE_DIR),
    ))
}

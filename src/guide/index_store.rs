use crate::error::{GuideError, Result};
use crate::guide::paths::GuidePaths;
use crate::guide::record::{self, ArticleRecord, DecodedLine};
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexEntry {
    Record(ArticleRecord),
    Malformed { raw: String, fields: usize },
}

/// One non-blank index line with its 1-based position in the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexLine {
    pub line_number: usize,
    pub entry: IndexEntry,
}

impl IndexLine {
    pub fn record(&self) -> Option<&ArticleRecord> {
        match &self.entry {
            IndexEntry::Record(record) => Some(record),
            IndexEntry::Malformed { .. } => None,
        }
    }
}

pub fn records(lines: &[IndexLine]) -> impl Iterator<Item = &ArticleRecord> {
    lines.iter().filter_map(IndexLine::record)
}

#[derive(Debug, Clone)]
pub struct IndexStore {
    guide_dir: PathBuf,
    index_file: PathBuf,
}

impl IndexStore {
    pub fn new(paths: &GuidePaths) -> Self {
        Self {
            guide_dir: paths.guide_dir.clone(),
            index_file: paths.index_file.clone(),
        }
    }

    /// Create the guide directory and an empty index if either is missing.
    /// An existing index is never truncated.
    pub fn ensure_exists(&self) -> Result<()> {
        fs::create_dir_all(&self.guide_dir)
            .map_err(|err| GuideError::storage(&self.guide_dir, err))?;
        if !self.index_file.exists() {
            fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.index_file)
                .map_err(|err| GuideError::storage(&self.index_file, err))?;
            debug!(path = %self.index_file.display(), "created empty index");
        }
        Ok(())
    }

    pub fn load(&self) -> Result<Vec<IndexLine>> {
        let raw = fs::read_to_string(&self.index_file)
            .map_err(|err| GuideError::storage(&self.index_file, err))?;

        let mut out = Vec::new();
        for (idx, line) in raw.lines().enumerate() {
            let entry = match record::decode(line) {
                DecodedLine::Blank => continue,
                DecodedLine::Record(record) => IndexEntry::Record(record),
                DecodedLine::Malformed { fields } => {
                    debug!(line = idx + 1, fields, "malformed index line");
                    IndexEntry::Malformed {
                        raw: line.trim().to_string(),
                        fields,
                    }
                }
            };
            out.push(IndexLine {
                line_number: idx + 1,
                entry,
            });
        }

        debug!(
            path = %self.index_file.display(),
            lines = out.len(),
            "loaded index"
        );
        Ok(out)
    }

    pub fn append(&self, record: &ArticleRecord) -> Result<()> {
        let line = record::encode(record);
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.index_file)
            .map_err(|err| GuideError::storage(&self.index_file, err))?;
        file.write_all(line.as_bytes())
            .and_then(|()| file.sync_data())
            .map_err(|err| GuideError::storage(&self.index_file, err))?;
        debug!(filename = %record.filename, "appended index record");
        Ok(())
    }

    /// Replace the whole index with `lines`, written to a temp file next to the
    /// index and renamed over it. Malformed lines are written back verbatim.
    pub fn rewrite(&self, lines: &[IndexLine]) -> Result<()> {
        let mut out = String::new();
        for line in lines {
            match &line.entry {
                IndexEntry::Record(record) => out.push_str(&record::encode(record)),
                IndexEntry::Malformed { raw, .. } => {
                    out.push_str(raw);
                    out.push('\n');
                }
            }
        }

        let mut tmp = tempfile::NamedTempFile::new_in(&self.guide_dir)
            .map_err(|err| GuideError::storage(&self.guide_dir, err))?;
        tmp.write_all(out.as_bytes())
            .and_then(|()| tmp.as_file().sync_all())
            .map_err(|err| GuideError::storage(tmp.path(), err))?;
        tmp.persist(&self.index_file)
            .map_err(|err| GuideError::storage(&self.index_file, err.error))?;

        debug!(lines = lines.len(), "rewrote index");
        Ok(())
    }
}

#[cfg(test)]
impl IndexStore {
    pub fn path(&self) -> &std::path::Path {
        &self.index_file
    }
}

use crate::error::{GuideError, Result};
use crate::guide::blob_store::BlobStore;
use crate::guide::categories::Categories;
use crate::guide::index_store::{self, IndexEntry, IndexStore};
use crate::guide::paths::{GuidePaths, INDEX_FILE_NAME};
use crate::guide::record::{self, ARTICLE_EXTENSION, ArticleRecord};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Derive the article filename for a title.
///
/// Lower-cases, turns spaces into underscores, strips apostrophes and then
/// anything that is not alphanumeric or `_`. Distinct titles can collide
/// (`"Don't Panic"` and `"Dont Panic"` both give `dont_panic.txt`).
pub fn derive_filename(title: &str) -> String {
    let lowered = title.to_lowercase().replace(' ', "_").replace('\'', "");
    let mut out: String = lowered
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .collect();
    out.push('.');
    out.push_str(ARTICLE_EXTENSION);
    out
}

fn matches_query(title: &str, needle: &str) -> bool {
    title.to_lowercase().contains(needle)
}

#[derive(Debug, Clone)]
pub struct CreatedArticle {
    pub record: ArticleRecord,
    pub path: PathBuf,
    /// True when an earlier record already pointed at the same file.
    pub collided: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ArticleListing {
    /// Category -> records sorted by (title, filename).
    pub groups: BTreeMap<String, Vec<ArticleRecord>>,
    /// Non-blank index lines, malformed ones included.
    pub total_lines: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewOutcome {
    Found {
        record: ArticleRecord,
        content: String,
    },
    NoMatch,
    /// The first matching record points at a file that does not exist.
    MissingFile { record: ArticleRecord },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuideStats {
    pub total_articles: usize,
    pub total_words: usize,
    pub by_category: BTreeMap<String, usize>,
}

impl GuideStats {
    pub fn average_words(&self) -> usize {
        if self.total_articles == 0 {
            0
        } else {
            self.total_words / self.total_articles
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompactOutcome {
    pub records_kept: usize,
    pub malformed_kept: usize,
}

/// Article operations over the index and the blob store.
///
/// Nothing is cached: every operation reloads the index so results always
/// reflect what is on disk.
#[derive(Debug, Clone)]
pub struct Catalog {
    index: IndexStore,
    blobs: BlobStore,
    categories: Categories,
}

impl Catalog {
    pub fn new(paths: &GuidePaths, categories: Categories) -> Self {
        Self {
            index: IndexStore::new(paths),
            blobs: BlobStore::new(paths),
            categories,
        }
    }

    pub fn categories(&self) -> &Categories {
        &self.categories
    }

    pub fn ensure_exists(&self) -> Result<()> {
        self.index.ensure_exists()
    }

    /// Write the article body, then append its index record.
    ///
    /// A failure between the two steps leaves an orphaned file, never a
    /// record without a file.
    pub fn create(&self, title: &str, category: &str, content: &str) -> Result<CreatedArticle> {
        let title = title.trim();
        if title.is_empty() {
            return Err(GuideError::validation("title cannot be empty"));
        }
        if !record::is_encodable_field(title) {
            return Err(GuideError::validation(format!(
                "title cannot contain '{}' or line breaks",
                record::FIELD_DELIMITER
            )));
        }
        if category.trim().is_empty() || !record::is_encodable_field(category) {
            return Err(GuideError::validation(format!(
                "category must be non-empty and cannot contain '{}' or line breaks",
                record::FIELD_DELIMITER
            )));
        }

        let filename = derive_filename(title);
        if filename.len() == ARTICLE_EXTENSION.len() + 1 {
            return Err(GuideError::validation(
                "title must contain at least one letter or digit",
            ));
        }
        if filename == INDEX_FILE_NAME {
            return Err(GuideError::validation(format!(
                "title would overwrite the guide index ({INDEX_FILE_NAME})"
            )));
        }

        let lines = self.index.load()?;
        let collided = index_store::records(&lines).any(|r| r.filename == filename);
        if collided {
            warn!(
                %filename,
                title,
                "filename already referenced by another record; article body will be replaced"
            );
        }

        let record = ArticleRecord::new(title, filename, category);
        let path = self.blobs.write(&record.filename, content)?;
        self.index.append(&record)?;

        Ok(CreatedArticle {
            record,
            path,
            collided,
        })
    }

    pub fn list_grouped(&self) -> Result<ArticleListing> {
        let lines = self.index.load()?;

        let mut groups: BTreeMap<String, Vec<ArticleRecord>> = BTreeMap::new();
        for record in index_store::records(&lines) {
            groups
                .entry(record.category.clone())
                .or_default()
                .push(record.clone());
        }
        for records in groups.values_mut() {
            records.sort_by(|a, b| {
                a.title
                    .cmp(&b.title)
                    .then_with(|| a.filename.cmp(&b.filename))
            });
        }

        Ok(ArticleListing {
            groups,
            total_lines: lines.len(),
        })
    }

    /// Case-insensitive substring match on titles, in index order.
    pub fn search(&self, query: &str) -> Result<Vec<ArticleRecord>> {
        let needle = query.to_lowercase();
        let lines = self.index.load()?;
        let found: Vec<ArticleRecord> = index_store::records(&lines)
            .filter(|r| matches_query(&r.title, &needle))
            .cloned()
            .collect();
        debug!(query, matches = found.len(), "searched titles");
        Ok(found)
    }

    /// Fetch the first record whose title contains `query`, with its body.
    pub fn view(&self, query: &str) -> Result<ViewOutcome> {
        let needle = query.to_lowercase();
        let lines = self.index.load()?;
        let Some(record) = index_store::records(&lines)
            .find(|r| matches_query(&r.title, &needle))
            .cloned()
        else {
            return Ok(ViewOutcome::NoMatch);
        };

        match self.blobs.read(&record.filename)? {
            Some(content) => Ok(ViewOutcome::Found { record, content }),
            None => {
                warn!(
                    title = %record.title,
                    filename = %record.filename,
                    "matching record has no article file"
                );
                Ok(ViewOutcome::MissingFile { record })
            }
        }
    }

    pub fn stats(&self) -> Result<GuideStats> {
        let lines = self.index.load()?;

        let mut stats = GuideStats::default();
        for record in index_store::records(&lines) {
            stats.total_articles += 1;
            if let Some(content) = self.blobs.read(&record.filename)? {
                stats.total_words += content.split_whitespace().count();
            }
            *stats.by_category.entry(record.category.clone()).or_insert(0) += 1;
        }
        Ok(stats)
    }

    /// Rewrite the index without blank lines or stray surrounding whitespace.
    pub fn compact(&self) -> Result<CompactOutcome> {
        let lines = self.index.load()?;
        self.index.rewrite(&lines)?;

        let malformed_kept = lines
            .iter()
            .filter(|l| matches!(l.entry, IndexEntry::Malformed { .. }))
            .count();
        Ok(CompactOutcome {
            records_kept: lines.len() - malformed_kept,
            malformed_kept,
        })
    }
}

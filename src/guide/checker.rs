use crate::error::Result;
use crate::guide::blob_store::BlobStore;
use crate::guide::categories::Categories;
use crate::guide::index_store::{IndexEntry, IndexStore};
use crate::guide::paths::GuidePaths;
use std::collections::BTreeSet;
use std::fmt;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    MalformedLine {
        line: usize,
    },
    MissingFile {
        line: usize,
        title: String,
        filename: String,
    },
    UnknownCategory {
        line: usize,
        title: String,
        category: String,
    },
    OrphanedFile {
        filename: String,
    },
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedLine { line } => write!(f, "Line {line}: Invalid format"),
            Self::MissingFile {
                line,
                title,
                filename,
            } => write!(f, "Line {line}: Missing file '{filename}' for '{title}'"),
            Self::UnknownCategory {
                line,
                title,
                category,
            } => write!(f, "Line {line}: Unknown category '{category}' for '{title}'"),
            Self::OrphanedFile { filename } => {
                write!(f, "Orphaned file: {filename} (not in index)")
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    /// Well-formed records looked at.
    pub records_examined: usize,
    pub issues: Vec<Issue>,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Read-only cross-check of the index against the files on disk.
#[derive(Debug, Clone)]
pub struct Checker {
    index: IndexStore,
    blobs: BlobStore,
    categories: Categories,
}

impl Checker {
    pub fn new(paths: &GuidePaths, categories: Categories) -> Self {
        Self {
            index: IndexStore::new(paths),
            blobs: BlobStore::new(paths),
            categories,
        }
    }

    pub fn validate(&self) -> Result<ValidationReport> {
        let lines = self.index.load()?;

        let mut report = ValidationReport::default();
        let mut referenced = BTreeSet::new();
        for line in &lines {
            let record = match &line.entry {
                IndexEntry::Record(record) => record,
                IndexEntry::Malformed { .. } => {
                    report.issues.push(Issue::MalformedLine {
                        line: line.line_number,
                    });
                    continue;
                }
            };

            report.records_examined += 1;
            referenced.insert(record.filename.as_str());

            if !self.blobs.exists(&record.filename) {
                report.issues.push(Issue::MissingFile {
                    line: line.line_number,
                    title: record.title.clone(),
                    filename: record.filename.clone(),
                });
            }
            if !self.categories.contains(&record.category) {
                report.issues.push(Issue::UnknownCategory {
                    line: line.line_number,
                    title: record.title.clone(),
                    category: record.category.clone(),
                });
            }
        }

        for filename in self.blobs.list_all()? {
            if !referenced.contains(filename.as_str()) {
                report.issues.push(Issue::OrphanedFile { filename });
            }
        }

        debug!(
            records = report.records_examined,
            issues = report.issues.len(),
            "validated guide"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guide::catalog::Catalog;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    fn setup(root: &Path) -> (Checker, Catalog, GuidePaths) {
        let paths = GuidePaths::under(root.join("guide"));
        let catalog = Catalog::new(&paths, Categories::default());
        catalog.ensure_exists().expect("ensure");
        (Checker::new(&paths, Categories::default()), catalog, paths)
    }

    #[test]
    fn clean_guide_has_no_issues() {
        let tmp = tempdir().expect("tempdir");
        let (checker, catalog, _) = setup(tmp.path());
        catalog
            .create("Earth", "Planets", "Mostly harmless")
            .expect("create");

        let report = checker.validate().expect("validate");
        assert_eq!(report.records_examined, 1);
        assert!(report.is_clean(), "unexpected issues: {:?}", report.issues);
    }

    #[test]
    fn detects_every_issue_kind_in_order() {
        let tmp = tempdir().expect("tempdir");
        let (checker, _, paths) = setup(tmp.path());
        fs::write(
            &paths.index_file,
            "Earth|earth.txt|Planets\n\
             Ghost|ghost.txt|Hauntings\n\
             two|fields\n\
             one|two|three|four\n",
        )
        .expect("seed index");
        fs::write(paths.article_path("earth.txt"), "Mostly harmless").expect("earth");
        fs::write(paths.article_path("stray.txt"), "nobody points here").expect("stray");
        fs::write(paths.article_path("cover.bmp"), "not an article").expect("bmp");

        let report = checker.validate().expect("validate");
        assert_eq!(report.records_examined, 2);
        assert_eq!(
            report.issues,
            vec![
                Issue::MissingFile {
                    line: 2,
                    title: "Ghost".to_string(),
                    filename: "ghost.txt".to_string(),
                },
                Issue::UnknownCategory {
                    line: 2,
                    title: "Ghost".to_string(),
                    category: "Hauntings".to_string(),
                },
                Issue::MalformedLine { line: 3 },
                Issue::MalformedLine { line: 4 },
                Issue::OrphanedFile {
                    filename: "stray.txt".to_string(),
                },
            ]
        );
    }

    #[test]
    fn validate_does_not_touch_the_index() {
        let tmp = tempdir().expect("tempdir");
        let (checker, _, paths) = setup(tmp.path());
        let seeded = "\nbad line\nGhost|ghost.txt|Planets\n\n";
        fs::write(&paths.index_file, seeded).expect("seed");

        checker.validate().expect("validate");
        assert_eq!(fs::read_to_string(&paths.index_file).expect("index"), seeded);
        assert!(!paths.article_path("ghost.txt").exists());
    }

    #[test]
    fn categories_are_checked_against_the_injected_set() {
        let tmp = tempdir().expect("tempdir");
        let paths = GuidePaths::under(tmp.path().join("guide"));
        let custom = Categories::new(["Towels".to_string()]);
        let catalog = Catalog::new(&paths, custom.clone());
        catalog.ensure_exists().expect("ensure");
        catalog.create("Bath Towel", "Towels", "fluffy").expect("create");
        catalog.create("Earth", "Planets", "harmless").expect("create");

        let report = Checker::new(&paths, custom).validate().expect("validate");
        assert_eq!(
            report.issues,
            vec![Issue::UnknownCategory {
                line: 2,
                title: "Earth".to_string(),
                category: "Planets".to_string(),
            }]
        );
    }

    #[test]
    fn issue_messages_match_report_format() {
        assert_eq!(
            Issue::MalformedLine { line: 7 }.to_string(),
            "Line 7: Invalid format"
        );
        assert_eq!(
            Issue::MissingFile {
                line: 2,
                title: "Ghost".into(),
                filename: "ghost.txt".into(),
            }
            .to_string(),
            "Line 2: Missing file 'ghost.txt' for 'Ghost'"
        );
        assert_eq!(
            Issue::OrphanedFile {
                filename: "stray.txt".into()
            }
            .to_string(),
            "Orphaned file: stray.txt (not in index)"
        );
    }
}

/// Separator between the three index fields.
pub const FIELD_DELIMITER: char = '|';

/// Extension shared by article blobs and the index file.
pub const ARTICLE_EXTENSION: &str = "txt";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleRecord {
    pub title: String,
    pub filename: String,
    pub category: String,
}

impl ArticleRecord {
    pub fn new(
        title: impl Into<String>,
        filename: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            filename: filename.into(),
            category: category.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedLine {
    Blank,
    Record(ArticleRecord),
    Malformed { fields: usize },
}

/// Render a record as one index line, newline included.
///
/// Fields are written as-is; a delimiter inside a field corrupts the line,
/// so callers reject such input before it gets here.
pub fn encode(record: &ArticleRecord) -> String {
    format!(
        "{}{FIELD_DELIMITER}{}{FIELD_DELIMITER}{}\n",
        record.title, record.filename, record.category
    )
}

pub fn decode(line: &str) -> DecodedLine {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return DecodedLine::Blank;
    }

    let parts: Vec<&str> = trimmed.split(FIELD_DELIMITER).collect();
    match parts.as_slice() {
        [title, filename, category] => {
            DecodedLine::Record(ArticleRecord::new(*title, *filename, *category))
        }
        _ => DecodedLine::Malformed {
            fields: parts.len(),
        },
    }
}

/// True when `value` can be stored in an index field without breaking the line format.
pub fn is_encodable_field(value: &str) -> bool {
    !value.contains(FIELD_DELIMITER) && !value.contains(['\n', '\r'])
}

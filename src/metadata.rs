use chrono::NaiveDate;
use serde::Serialize;

pub const DEFAULT_CATEGORY: &str = "uncategorized";

/// Hints gathered from one source (in-file headers or the filename).
/// A field that could not be derived stays `None`.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialMetadata {
    pub title: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub date: Option<NaiveDate>,
}

impl PartialMetadata {
    /// Shallow override: every field present in `self` wins over `fallback`.
    pub fn or(self, fallback: PartialMetadata) -> PartialMetadata {
        PartialMetadata {
            title: self.title.or(fallback.title),
            category: self.category.or(fallback.category),
            tags: self.tags.or(fallback.tags),
            date: self.date.or(fallback.date),
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct PostMetadata {
    pub title: String,
    pub category: String,
    pub tags: Vec<String>,
    pub date: NaiveDate,
}

impl PostMetadata {
    /// Merges header hints over filename hints, then fills what is still missing:
    /// `today` for the date, [`DEFAULT_CATEGORY`], and `file_stem` for the title.
    pub fn resolve(
        header: PartialMetadata,
        filename: PartialMetadata,
        file_stem: &str,
        today: NaiveDate,
    ) -> PostMetadata {
        let merged = header.or(filename);
        PostMetadata {
            title: merged
                .title
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| file_stem.to_string()),
            category: merged
                .category
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            tags: merged.tags.unwrap_or_default(),
            date: merged.date.unwrap_or(today),
        }
    }
}

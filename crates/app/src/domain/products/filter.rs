//! Product listing filters

use std::str::FromStr;

use mongodb::bson::{Document, doc};
use thiserror::Error;

/// Products returned per page when a page index is given.
pub const PAGE_SIZE: u64 = 3;

/// Listing filter supplied by the caller.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    /// Case-insensitive substring of `vendor`. Empty matches everything.
    pub txt: String,

    /// Inclusive minimum `speed`.
    pub min_speed: Option<f64>,

    pub sort_field: Option<String>,
    pub sort_dir: SortDirection,

    /// Zero-based page. `None` returns every match.
    pub page_idx: Option<u64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    const fn as_i32(self) -> i32 {
        match self {
            Self::Asc => 1,
            Self::Desc => -1,
        }
    }
}

#[derive(Debug, Error)]
#[error("invalid sort direction: {0:?}")]
pub struct InvalidSortDirection(String);

impl FromStr for SortDirection {
    type Err = InvalidSortDirection;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "1" | "asc" => Ok(Self::Asc),
            "-1" | "desc" => Ok(Self::Desc),
            _ => Err(InvalidSortDirection(value.to_string())),
        }
    }
}

/// `id` and `createdAt` are not stored; both order by `_id`, which is time ordered.
fn stored_sort_field(field: &str) -> &str {
    match field {
        "id" | "createdAt" => "_id",
        field => field,
    }
}

/// Store query built from a [`ProductFilter`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductQuery {
    pub criteria: Document,
    pub sort: Document,
    pub skip: Option<u64>,
    pub limit: Option<i64>,
}

impl ProductFilter {
    #[must_use]
    pub fn criteria(&self) -> Document {
        let mut criteria = doc! {
            "vendor": { "$regex": regex::escape(&self.txt), "$options": "i" },
        };

        if let Some(min_speed) = self.min_speed {
            criteria.insert("speed", doc! { "$gte": min_speed });
        }

        criteria
    }

    #[must_use]
    pub fn sort(&self) -> Document {
        let mut sort = Document::new();

        if let Some(field) = self.sort_field.as_deref().filter(|field| !field.is_empty()) {
            sort.insert(stored_sort_field(field), self.sort_dir.as_i32());
        }

        sort
    }

    #[must_use]
    pub fn into_query(self) -> ProductQuery {
        let (skip, limit) = match self.page_idx {
            Some(page_idx) => (
                Some(page_idx.saturating_mul(PAGE_SIZE)),
                i64::try_from(PAGE_SIZE).ok(),
            ),
            None => (None, None),
        };

        ProductQuery {
            criteria: self.criteria(),
            sort: self.sort(),
            skip,
            limit,
        }
    }
}

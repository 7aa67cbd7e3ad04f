use chrono::{DateTime, Utc};
use serde::Serialize;

/// Placeholder for a result that carries no `fields.thumbnail`.
pub const THUMBNAIL_NOT_AVAILABLE: &str = "N.A";
/// Placeholder for a contributor tag without `webTitle` or `webUrl`.
pub const CONTRIBUTOR_NOT_AVAILABLE: &str = "N.A.";

/// One decoded news item.
///
/// Built only by [`crate::api::decode::Decoder`]; fields are read through
/// accessors and never change afterwards. It serializes for hand-off but
/// cannot be deserialized:
///
/// ```compile_fail
/// let article: guardian_ox::models::Article =
///     serde_json::from_str(r#"{"title":""}"#).unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    title: String,
    section: String,
    published_at: String,
    link: String,
    thumbnail_url: String,
    author: String,
    author_link: String,
}

impl Article {
    pub(crate) fn new(
        title: String,
        section: String,
        published_at: String,
        link: String,
        thumbnail_url: String,
        author: String,
        author_link: String,
    ) -> Self {
        Self {
            title,
            section,
            published_at,
            link,
            thumbnail_url,
            author,
            author_link,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn section(&self) -> &str {
        &self.section
    }

    /// Timestamp exactly as the API sent it, e.g. `2017-06-09T10:00:00Z`.
    pub fn published_at(&self) -> &str {
        &self.published_at
    }

    pub fn link(&self) -> &str {
        &self.link
    }

    pub fn thumbnail_url(&self) -> &str {
        &self.thumbnail_url
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn author_link(&self) -> &str {
        &self.author_link
    }

    pub fn published_at_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.published_at)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }

    pub fn has_thumbnail(&self) -> bool {
        self.thumbnail_url != THUMBNAIL_NOT_AVAILABLE
    }

    pub fn has_author(&self) -> bool {
        self.author != CONTRIBUTOR_NOT_AVAILABLE
    }
}
